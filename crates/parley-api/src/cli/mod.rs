//! CLI command definitions for the `parley` binary.

pub mod ask;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Multi-session chat gateway in front of Anthropic Claude.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP gateway.
    Serve {
        /// Path to a TOML config file. A missing file means defaults.
        #[arg(short, long, env = "PARLEY_CONFIG", default_value = "parley.toml")]
        config: PathBuf,

        /// Host to bind to (overrides config and environment).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and environment).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send one message to a running gateway and print the reply.
    Ask {
        /// Message text.
        message: String,

        /// Continue an existing session.
        #[arg(short, long)]
        session_id: Option<String>,

        /// Switch the session to a built-in prompt (default, programming, writing, education).
        #[arg(long)]
        prompt_type: Option<String>,

        /// Gateway base URL.
        #[arg(long, env = "PARLEY_URL", default_value = "http://localhost:8000")]
        url: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
