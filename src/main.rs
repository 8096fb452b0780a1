//! lospinos CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, logs fatal errors to
//! stderr and exits non-zero on failure. All logic lives in `cli`.

use lospinos::cli;
use lospinos::observability::Event;

fn main() {
    if let Err(e) = cli::run() {
        Event::CommandFailed.log(&[("code", e.code_str()), ("message", e.message())]);
        std::process::exit(1);
    }
}
