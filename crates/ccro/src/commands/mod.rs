//! Command dispatch: bridges CLI args -> archive stores -> output formatting.

pub mod auth;
pub mod boxes;
pub mod config_cmd;
pub mod locations;
pub mod logs;
pub mod util;

use ccro_core::Archive;

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    archive: &Archive,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Boxes(args) => boxes::handle(archive, args, global).await,
        Command::Locations(args) => locations::handle(archive, args, global).await,
        Command::Login(args) => auth::login(archive, session, args, global).await,
        Command::Logout => auth::logout(archive, session, global),
        Command::Whoami => auth::whoami(archive, session, global).await,
        Command::Logs(args) => logs::handle(archive, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
