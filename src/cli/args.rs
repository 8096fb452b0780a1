//! CLI argument definitions using clap
//!
//! Commands:
//! - lospinos query [--config <path>]
//! - lospinos serve [--config <path>]
//! - lospinos check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Los Pinos list query engine
#[derive(Parser, Debug)]
#[command(name = "lospinos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a single list request read from stdin
    Query {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Answer list requests from stdin, one per line, until EOF
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a configuration file and print the effective values
    CheckConfig {
        /// Path to configuration file
        #[arg(long)]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_without_config() {
        let cli = Cli::try_parse_from(["lospinos", "query"]).unwrap();
        assert!(matches!(cli.command, Command::Query { config: None }));
    }

    #[test]
    fn test_parse_serve_with_config() {
        let cli = Cli::try_parse_from(["lospinos", "serve", "--config", "pinos.json"]).unwrap();
        match cli.command {
            Command::Serve { config } => assert_eq!(config, Some(PathBuf::from("pinos.json"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_config_requires_path() {
        assert!(Cli::try_parse_from(["lospinos", "check-config"]).is_err());
    }
}
