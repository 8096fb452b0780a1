//! CLI module for lospinos
//!
//! Provides command-line interface for:
//! - query: answer one list request from stdin
//! - serve: answer list requests from stdin until EOF
//! - check-config: validate and print configuration

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_config, load_config, query, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_line, read_request, write_error, write_response, RequestLine};
