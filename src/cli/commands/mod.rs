//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod books;
mod init;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "booklens")]
#[command(about = "Public-domain book cache with LLM literary analysis")]
#[command(version)]
pub struct Cli {
    /// Target directory or database file (overrides config file).
    /// Can be a directory containing booklens.db or a .db file directly.
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Start the HTTP API
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: 127.0.0.1:3030)
        #[arg(default_value = "127.0.0.1:3030")]
        bind: String,
    },

    /// Show a book, fetching it from the catalog if not cached
    Get {
        /// Catalog book id
        id: i64,
        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
        /// Include the book text
        #[arg(long)]
        text: bool,
    },

    /// Analyze a cached book (fetch it with `get` first)
    Analyze {
        /// Catalog book id
        id: i64,
        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List cached books
    List,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        target: cli.target,
    };
    let (settings, _config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Serve { bind } => serve::cmd_serve(&settings, &bind).await,
        Commands::Get { id, json, text } => books::cmd_get(&settings, id, json, text).await,
        Commands::Analyze { id, json } => books::cmd_analyze(&settings, id, json).await,
        Commands::List => books::cmd_list(&settings).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["booklens", "get", "1342", "--json", "-t", "/tmp/shelf"])
            .unwrap();
        assert_eq!(cli.target, Some(PathBuf::from("/tmp/shelf")));
        assert!(matches!(
            cli.command,
            Commands::Get {
                id: 1342,
                json: true,
                text: false
            }
        ));
    }

    #[test]
    fn test_serve_default_bind() {
        let cli = Cli::try_parse_from(["booklens", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind, "127.0.0.1:3030"),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_get_requires_numeric_id() {
        assert!(Cli::try_parse_from(["booklens", "get", "pride"]).is_err());
    }
}
