mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ccro_core::Archive;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose, cli.global.quiet);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    // Logs go to stderr so structured stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands never talk to the backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "ccro", &mut std::io::stdout());
            Ok(())
        }

        // All other commands go through an archive session
        cmd => {
            let cfg = config::load_config_or_default();
            let mut session = config::resolve_session(&cli.global, &cfg)?;
            if let Some(limit) = cmd.log_limit() {
                session.archive.log_limit = limit;
            }

            let archive = Archive::new(session.archive.clone())?;
            archive.set_current_user(session.current_user());

            tracing::debug!(
                command = ?cmd,
                profile = %session.profile_name,
                server = %session.archive.server,
                "dispatching command"
            );
            commands::dispatch(cmd, &archive, &session, &cli.global).await
        }
    }
}
