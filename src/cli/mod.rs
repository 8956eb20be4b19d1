//! CLI module for Gatehouse
//!
//! Provides command-line interface parsing for the gatehouse-server binary.
//! Flags outrank environment variables, which outrank the TOML file.

use clap::Parser;
use std::path::PathBuf;

/// Gatehouse - Authentication Service
///
/// A web authentication service with credential registration, session
/// cookies, HTTP Basic support, and password-reset flows.
#[derive(Parser, Debug)]
#[command(
    name = "gatehouse-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Gatehouse - Authentication Service",
    long_about = "A web authentication service: credential registration, login and logout,\n\
                  opaque session cookies or HTTP Basic gating, and password-reset tokens.\n\n\
                  Run without arguments for an in-memory service on 127.0.0.1:3000.",
    after_help = "EXAMPLES:\n    \
                  gatehouse-server                          # In-memory store, session strategy\n    \
                  gatehouse-server --config gatehouse.toml  # Use a config file\n    \
                  gatehouse-server --database users.db      # File-backed identity store\n    \
                  gatehouse-server --port 8080              # Override the listen port"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "GATEHOUSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host address to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SQLite database path (":memory:" for ephemeral)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
