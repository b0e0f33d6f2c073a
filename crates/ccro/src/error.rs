//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ccro_config::ConfigError;
use ccro_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the archive server at {url}")]
    #[diagnostic(
        code(ccro::connection_failed),
        help(
            "Check that the archive locator backend is running and reachable.\n\
             URL: {url}\n\
             Override it with --server or set `server` in your profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ccro::auth_failed),
        help(
            "Verify your username and password.\n\
             Run: ccro config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(ccro::no_credentials),
        help(
            "Configure credentials with: ccro config init\n\
             Or set the CCRO_USERNAME and CCRO_PASSWORD environment variables."
        )
    )]
    NoCredentials { profile: String },

    #[error("Not logged in on profile '{profile}'")]
    #[diagnostic(code(ccro::not_logged_in), help("Run: ccro login"))]
    NotLoggedIn { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(ccro::not_found),
        help("Run: ccro {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("Server error (HTTP {status}): {message}")]
    #[diagnostic(code(ccro::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from server: {message}")]
    #[diagnostic(
        code(ccro::invalid_response),
        help("Check that --server points at the archive locator API (usually ending in /api).")
    )]
    InvalidResponse { message: String },

    #[error("The activity history could not be cleared")]
    #[diagnostic(
        code(ccro::history_not_cleared),
        help("The local history was left unchanged. Run with -v for the server's answer.")
    )]
    HistoryNotCleared,

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ccro::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ccro::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ccro config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(ccro::config))]
    Config(Box<figment::Error>),

    #[error("Failed to write configuration: {0}")]
    #[diagnostic(code(ccro::config_write))]
    ConfigWrite(#[from] toml::ser::Error),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(ccro::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(ccro::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(ccro::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } | Self::NotLoggedIn { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Re-tag a backend 404 with the resource the command was looking for.
    pub fn or_not_found(self, resource_type: &str, identifier: &str, list_command: &str) -> Self {
        match self {
            Self::ApiError { status: 404, .. } => Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.into(),
                list_command: list_command.into(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Http {
                status: 401 | 403,
                message,
            } => CliError::AuthFailed {
                profile: "current".into(),
                message,
            },

            CoreError::Http { status, message } => CliError::ApiError { status, message },

            CoreError::InvalidResponse { message } => CliError::InvalidResponse { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Serialization(e) => CliError::ConfigWrite(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failures_exit_with_connection_code() {
        let err = CliError::from(CoreError::ConnectionFailed {
            url: "http://localhost:3001/api/boxes".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn unauthorized_maps_to_auth() {
        let err = CliError::from(CoreError::Http {
            status: 401,
            message: "Invalid credentials".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
        assert!(err.to_string().contains("Invalid credentials"));
    }

    #[test]
    fn not_found_is_tagged_with_resource() {
        let err = CliError::from(CoreError::Http {
            status: 404,
            message: "Not Found".into(),
        })
        .or_not_found("box", "42", "boxes list");
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "box '42' not found");
    }

    #[test]
    fn other_statuses_stay_general() {
        let err = CliError::from(CoreError::Http {
            status: 409,
            message: "Box code already exists".into(),
        })
        .or_not_found("box", "B1", "boxes list");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
