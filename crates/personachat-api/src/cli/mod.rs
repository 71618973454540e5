//! CLI command definitions for the `pchat` binary.
//!
//! Uses clap derive macros for argument parsing. Resource commands follow a
//! noun-verb pattern (e.g., `pchat character set`, `pchat conversation list`).

pub mod character;
pub mod chat;
pub mod conversation;

use clap::{Parser, Subcommand};

/// Chat with stored personas and inspect recorded conversations.
#[derive(Parser)]
#[command(name = "pchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "PERSONACHAT_LOG_JSON")]
    pub log_json: bool,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true, env = "PERSONACHAT_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// How a command reports its result on stdout.
///
/// `--json` wins over `--quiet`: JSON is data the caller asked for, while
/// `--quiet` only drops the styled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Json,
    Styled,
    Quiet,
}

impl Output {
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => Output::Json,
            (false, true) => Output::Quiet,
            (false, false) => Output::Styled,
        }
    }
}

impl Cli {
    pub fn output(&self) -> Output {
        Output::from_flags(self.json, self.quiet)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to `server.port` in config.toml).
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host` in config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Send one message to a character and record the exchange.
    Chat {
        /// Caller identifier.
        #[arg(long)]
        user: String,

        /// Character to talk to.
        #[arg(long)]
        character: String,

        /// Message text.
        message: String,
    },

    /// Manage stored characters.
    Character {
        #[command(subcommand)]
        action: CharacterAction,
    },

    /// Inspect recorded conversations.
    #[command(alias = "conv")]
    Conversation {
        #[command(subcommand)]
        action: ConversationAction,
    },
}

#[derive(Subcommand)]
pub enum CharacterAction {
    /// Create or replace a character's persona.
    Set {
        /// Character identifier.
        id: String,

        /// System prompt used verbatim for every exchange.
        #[arg(long)]
        prompt: String,

        /// Display name.
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Show a character.
    Show {
        /// Character identifier.
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConversationAction {
    /// Show one recorded exchange.
    Show {
        /// Session UUID returned by `chat`.
        session_id: String,
    },

    /// List a user's exchanges, newest first.
    #[command(alias = "ls")]
    List {
        /// User identifier.
        #[arg(long)]
        user: String,

        /// Maximum number of conversations to show.
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
}
