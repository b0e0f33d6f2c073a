// ── Core error types ──
//
// Errors surfaced by store mutations. The `From<ccro_api::Error>` impl keeps
// the two kinds callers care about distinct: the backend was unreachable,
// or it answered with a failure status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach archive server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    // ── Backend errors ───────────────────────────────────────────────
    #[error("Server rejected the request (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    #[error("Unexpected response from server: {message}")]
    InvalidResponse { message: String },

    // ── Client-side errors ───────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if the request never reached a responder.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ccro_api::Error> for CoreError {
    fn from(err: ccro_api::Error) -> Self {
        match err {
            ccro_api::Error::Network(e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            ccro_api::Error::Http { status, message } => CoreError::Http { status, message },
            ccro_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
            ccro_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ccro_api::Error::Client(message) => CoreError::Config { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_survives_conversion() {
        let err = CoreError::from(ccro_api::Error::Http {
            status: 409,
            message: "Box code already exists".into(),
        });
        assert_eq!(err.status(), Some(409));
        assert_eq!(
            err.to_string(),
            "Server rejected the request (HTTP 409): Box code already exists"
        );
    }

    #[test]
    fn deserialization_becomes_invalid_response() {
        let err = CoreError::from(ccro_api::Error::Deserialization {
            message: "expected value".into(),
            body: String::new(),
        });
        assert!(matches!(err, CoreError::InvalidResponse { .. }));
        assert!(!err.is_network());
    }
}
