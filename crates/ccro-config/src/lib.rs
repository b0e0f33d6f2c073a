//! Shared configuration for the archive locator CLI.
//!
//! TOML profiles, password resolution (env + keyring + plaintext), the
//! user recorded by `ccro login`, and translation to
//! `ccro_core::ArchiveConfig`. The CLI adds `GlobalOpts`-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ccro_core::{ArchiveConfig, CurrentUser, DEFAULT_LOG_LIMIT, EntityId};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "ccro";

/// Backend address used when a profile does not name one.
pub const DEFAULT_SERVER: &str = "http://localhost:3001/api";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Activity entries fetched by `logs list`.
    #[serde(default = "default_log_limit")]
    pub log_limit: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            log_limit: default_log_limit(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_log_limit() -> u32 {
    DEFAULT_LOG_LIMIT
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:3001/api").
    #[serde(default = "default_server")]
    pub server: String,

    /// Username for `ccro login`.
    pub username: Option<String>,

    /// Password (plaintext, prefer keyring or `CCRO_PASSWORD`).
    pub password: Option<String>,

    /// Accept self-signed certificates.
    pub insecure: Option<bool>,

    /// Request timeout in seconds. No timeout when absent.
    pub timeout: Option<u64>,

    /// Override `defaults.log_limit`.
    pub log_limit: Option<u32>,

    /// Identity recorded by the last successful `ccro login`.
    pub user: Option<RecordedUser>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server: default_server(),
            username: None,
            password: None,
            insecure: None,
            timeout: None,
            log_limit: None,
            user: None,
        }
    }
}

fn default_server() -> String {
    DEFAULT_SERVER.into()
}

/// The logged-in user that activity records are attributed to.
///
/// Only the identity is kept; the backend hands out no session token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecordedUser {
    pub id: EntityId,
    pub username: String,
}

impl From<&RecordedUser> for CurrentUser {
    fn from(user: &RecordedUser) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
        }
    }
}

impl From<&CurrentUser> for RecordedUser {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "ccro", "ccro").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ccro");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path`, layered over defaults and under `CCRO_` env vars.
///
/// Nested keys use a double underscore:
/// `CCRO_PROFILES__DEFAULT__SERVER=http://archive:3001/api`.
/// A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CCRO_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the login username: profile, then `CCRO_USERNAME`.
pub fn resolve_username(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var("CCRO_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Resolve the login password from the credential chain.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var("CCRO_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_key(profile_name)) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Keyring entry name holding a profile's password.
pub fn keyring_key(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

// ── Translation ─────────────────────────────────────────────────────

/// Parse and check a backend URL.
pub fn parse_server_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "server".into(),
            reason: format!("expected an http or https URL, got '{raw}'"),
        });
    }
    Ok(url)
}

/// Build an `ArchiveConfig` from a profile, no CLI flag overrides.
pub fn profile_to_archive_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ArchiveConfig, ConfigError> {
    let server = parse_server_url(&profile.server)?;

    let mut config = ArchiveConfig::new(server);
    config.timeout = profile.timeout.map(Duration::from_secs);
    config.accept_invalid_certs = profile.insecure.unwrap_or(defaults.insecure);
    config.log_limit = profile.log_limit.unwrap_or(defaults.log_limit);
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.log_limit, 100);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn reads_profiles_and_recorded_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "records"

[defaults]
output = "json"

[profiles.records]
server = "http://archive.local:3001/api"
username = "archivist"
timeout = 15

[profiles.records.user]
id = 7
username = "archivist"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("records"));
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");

        let profile = &cfg.profiles["records"];
        assert_eq!(profile.server, "http://archive.local:3001/api");
        assert_eq!(profile.timeout, Some(15));
        assert_eq!(
            profile.user,
            Some(RecordedUser {
                id: EntityId::from(7),
                username: "archivist".into(),
            })
        );
    }

    #[test]
    fn profile_server_defaults_to_localhost() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profiles.default]\nusername = \"clerk\"\n").unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.profiles["default"].server, DEFAULT_SERVER);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                username: Some("archivist".into()),
                user: Some(RecordedUser {
                    id: EntityId::from("u-7"),
                    username: "archivist".into(),
                }),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn archive_config_maps_profile_fields() {
        let profile = Profile {
            timeout: Some(20),
            insecure: Some(true),
            log_limit: Some(25),
            ..Profile::default()
        };
        let cfg = profile_to_archive_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(cfg.server.as_str(), "http://localhost:3001/api");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(20)));
        assert!(cfg.accept_invalid_certs);
        assert_eq!(cfg.log_limit, 25);
    }

    #[test]
    fn archive_config_has_no_timeout_by_default() {
        let cfg = profile_to_archive_config(&Profile::default(), &Defaults::default()).unwrap();
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.log_limit, DEFAULT_LOG_LIMIT);
    }

    #[test]
    fn rejects_malformed_server() {
        for raw in ["not a url", "ftp://archive.local/api"] {
            let profile = Profile {
                server: raw.into(),
                ..Profile::default()
            };
            let err = profile_to_archive_config(&profile, &Defaults::default()).unwrap_err();
            assert!(
                matches!(err, ConfigError::Validation { ref field, .. } if field == "server"),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn recorded_user_becomes_current_user() {
        let recorded = RecordedUser {
            id: EntityId::from(3),
            username: "clerk".into(),
        };
        let current = CurrentUser::from(&recorded);
        assert_eq!(current.id, EntityId::from(3));
        assert_eq!(RecordedUser::from(&current), recorded);
    }
}
