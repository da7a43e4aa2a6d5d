//! CLI definitions for majsoul-rpa.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// majsoul-rpa CLI.
#[derive(Parser)]
#[command(name = "majsoul-rpa")]
#[command(about = "Browser automation for Mahjong Soul friendly matches")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.majsoul-rpa/config.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in, host a room filled with AIs and play it out (default)
    Run {
        /// Account e-mail address; asked for on stdin when omitted
        #[arg(long, env = "MAJSOUL_EMAIL")]
        email: Option<String>,

        /// Matches to play before leaving the room
        #[arg(long, default_value_t = 1)]
        matches: u32,
    },

    /// Open the game and save a screenshot
    Screenshot {
        /// Output PNG file
        #[arg(short, long, default_value = "majsoul.png")]
        output: PathBuf,

        /// Seconds to let the page load before capturing
        #[arg(long, default_value_t = 10)]
        delay: u64,
    },

    /// Load and validate the configuration
    CheckConfig,

    /// Check that exactly one game window is open
    CheckWindow,
}
