//! Clap derive structures for the `ccro` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ccro -- find archive boxes and manage their storage locations
#[derive(Debug, Parser)]
#[command(
    name = "ccro",
    version,
    about = "Locate archive boxes from the command line",
    long_about = "Command-line client for the CCRO archive locator.\n\n\
        Tracks physical archive boxes, their storage location profiles,\n\
        and the activity log kept by the archive locator backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "CCRO_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "CCRO_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CCRO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "CCRO_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (no timeout unless set)
    #[arg(long, env = "CCRO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage archive boxes
    #[command(alias = "box", alias = "b")]
    Boxes(BoxesArgs),

    /// Manage storage location profiles
    #[command(alias = "loc", alias = "l")]
    Locations(LocationsArgs),

    /// Log in and record the user for activity attribution
    Login(LoginArgs),

    /// Forget the recorded user (local only)
    Logout,

    /// Show the recorded user as the backend knows it
    Whoami,

    /// View and manage the activity log
    Logs(LogsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Command {
    /// Activity entries to fetch when `logs list --limit` overrides the profile.
    pub fn log_limit(&self) -> Option<u32> {
        match self {
            Self::Logs(LogsArgs {
                command: LogsCommand::List { limit },
            }) => *limit,
            _ => None,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOXES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BoxesArgs {
    #[command(subcommand)]
    pub command: BoxesCommand,
}

#[derive(Debug, Subcommand)]
pub enum BoxesCommand {
    /// List every box
    #[command(alias = "ls")]
    List,

    /// Show one box
    Get {
        /// Box ID
        id: String,
    },

    /// Register a new box
    #[command(alias = "create")]
    Add {
        /// Box code (e.g. MRG-1990-01)
        #[arg(long, required = true)]
        code: String,

        /// Contents description
        #[arg(long)]
        description: Option<String>,

        /// Storage location ID
        #[arg(long)]
        location: Option<String>,
    },

    /// Change a box
    Update {
        /// Box ID
        id: String,

        /// New box code
        #[arg(long)]
        code: Option<String>,

        /// New contents description
        #[arg(long)]
        description: Option<String>,

        /// New storage location ID
        #[arg(long)]
        location: Option<String>,
    },

    /// Delete a box
    #[command(alias = "rm")]
    Delete {
        /// Box ID
        id: String,
    },

    /// Find boxes by code and record the search
    #[command(alias = "find")]
    Search {
        /// Code or part of a code, case-insensitive
        code: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOCATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LocationsArgs {
    #[command(subcommand)]
    pub command: LocationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LocationsCommand {
    /// List location profiles
    #[command(alias = "ls")]
    List,

    /// Show the active location profile
    Active,

    /// Show one location profile
    Get {
        /// Profile ID
        id: String,
    },

    /// Create a profile, or update it when --id is given
    Save {
        /// Existing profile ID to update
        #[arg(long)]
        id: Option<String>,

        /// Profile name
        #[arg(long, required = true)]
        name: String,

        /// Profile description
        #[arg(long)]
        description: Option<String>,
    },

    /// Make a profile the active one
    Activate {
        /// Profile ID
        id: String,
    },

    /// Delete a location profile
    #[command(alias = "rm")]
    Delete {
        /// Profile ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (defaults to the profile's username)
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LogsCommand {
    /// Show the most recent activity, newest first
    #[command(alias = "ls")]
    List {
        /// Number of entries to fetch (defaults to the profile's log_limit)
        #[arg(long, short = 'l')]
        limit: Option<u32>,
    },

    /// Record an activity entry
    Add {
        /// Activity type (e.g. SEARCH)
        kind: String,

        /// Free-form details
        details: String,

        /// Box code the activity refers to
        #[arg(long)]
        search_code: Option<String>,
    },

    /// Delete the whole activity history
    Clear,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a configuration value on the active profile
    Set {
        /// Profile key (server, username, timeout, insecure, log_limit)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
