//! Login, logout and whoami.
//!
//! The backend issues no session token: a successful login only records the
//! user's identity in the profile so later activity entries are attributed.

use dialoguer::Input;
use secrecy::SecretString;

use ccro_config::ConfigError;
use ccro_core::{ActivityKind, Archive, CurrentUser, User};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{self, Session};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

fn detail(user: &User) -> String {
    let mut pairs = vec![
        ("ID", user.id.to_string()),
        ("Username", user.username.clone()),
    ];
    pairs.extend(user.extra.iter().map(|(k, v)| (k.as_str(), v.to_string())));
    output::detail_lines(&pairs)
}

fn print_user(user: &User, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, user, detail, |u| u.username.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn resolve_username(args: &LoginArgs, session: &Session) -> Result<String, CliError> {
    if let Some(ref username) = args.username {
        return Ok(username.clone());
    }
    match ccro_config::resolve_username(&session.profile, &session.profile_name) {
        Ok(username) => Ok(username),
        Err(ConfigError::NoCredentials { .. }) => Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(prompt_err),
        Err(e) => Err(e.into()),
    }
}

fn resolve_password(session: &Session) -> Result<SecretString, CliError> {
    match ccro_config::resolve_password(&session.profile, &session.profile_name) {
        Ok(password) => Ok(password),
        Err(ConfigError::NoCredentials { .. }) => {
            let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::NoCredentials {
                    profile: session.profile_name.clone(),
                });
            }
            Ok(SecretString::from(password))
        }
        Err(e) => Err(e.into()),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn login(
    archive: &Archive,
    session: &Session,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let username = resolve_username(&args, session)?;
    let password = resolve_password(session)?;

    let user = archive
        .login(&username, &password)
        .await
        .map_err(|e| match CliError::from(e) {
            CliError::AuthFailed { message, .. } => CliError::AuthFailed {
                profile: session.profile_name.clone(),
                message,
            },
            other => other,
        })?;

    config::record_user(session, Some(&CurrentUser::from(&user)))?;
    archive
        .record(
            ActivityKind::Login,
            &format!("{} logged in", user.username),
            None,
        )
        .await;

    if !global.quiet {
        eprintln!(
            "Logged in as {} on profile '{}'",
            user.username, session.profile_name
        );
    }
    print_user(&user, global)
}

pub fn logout(archive: &Archive, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    archive.logout();
    if session.profile.user.is_some() {
        config::record_user(session, None)?;
    }
    if !global.quiet {
        eprintln!("Logged out of profile '{}'", session.profile_name);
    }
    Ok(())
}

pub async fn whoami(
    archive: &Archive,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let current = archive.current_user().ok_or_else(|| CliError::NotLoggedIn {
        profile: session.profile_name.clone(),
    })?;
    let user = archive.get_user(&current.id).await.map_err(|e| {
        CliError::from(e).or_not_found("user", &current.id.to_string(), "login")
    })?;
    print_user(&user, global)
}
