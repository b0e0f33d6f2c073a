//! CLI configuration: thin wrapper around `ccro_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --timeout, etc.).

use std::time::Duration;

use ccro_core::{ArchiveConfig, CurrentUser};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ccro_config::{
    Config, Defaults, KEYRING_SERVICE, Profile, RecordedUser, config_path, keyring_key,
    load_config, load_config_or_default, save_config,
};

/// Everything a backend-bound command needs from configuration.
#[derive(Debug, Clone)]
pub struct Session {
    pub profile_name: String,
    pub profile: Profile,
    pub archive: ArchiveConfig,
}

impl Session {
    /// The user recorded by the last `ccro login` on this profile.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.profile.user.as_ref().map(CurrentUser::from)
    }
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for error help.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Translate the active profile + global flags into a `Session`.
///
/// CLI flag overrides take priority over profile values. Without any
/// profile the built-in defaults apply, unless `--profile` named one
/// explicitly.
pub fn resolve_session(global: &GlobalOpts, config: &Config) -> Result<Session, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut profile = match config.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        None => Profile::default(),
    };

    // 1. Server URL (flag > env > profile)
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }

    let mut archive = ccro_config::profile_to_archive_config(&profile, &config.defaults)?;

    // 2. Transport overrides
    if global.insecure {
        archive.accept_invalid_certs = true;
    }
    if let Some(secs) = global.timeout {
        archive.timeout = Some(Duration::from_secs(secs));
    }

    Ok(Session {
        profile_name,
        profile,
        archive,
    })
}

/// Persist (or forget, with `None`) the logged-in user on a profile.
///
/// A profile that only existed as flags/defaults is written out with the
/// server it was used with.
pub fn record_user(session: &Session, user: Option<&CurrentUser>) -> Result<(), CliError> {
    let mut cfg = load_config()?;
    let profile = cfg
        .profiles
        .entry(session.profile_name.clone())
        .or_insert_with(|| Profile {
            server: session.profile.server.clone(),
            ..Profile::default()
        });
    profile.user = user.map(RecordedUser::from);
    save_config(&cfg)?;
    Ok(())
}
