use thiserror::Error;

/// Top-level error type for the `ccro-api` crate.
///
/// Two kinds matter to callers: [`Error::Network`] means the request never
/// reached a responder, [`Error::Http`] means the backend answered with a
/// non-success status. `ccro-core` maps these into store-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// Connection refused, DNS failure, reset mid-body, etc.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    // ── Backend ─────────────────────────────────────────────────────
    /// Non-success status, with the server-provided message if any.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if no response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// The HTTP status carried by this error, if the backend responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
