//! CLI command implementations
//!
//! Every command loads configuration first, applies its log level, then
//! works on stdin/stdout. Request failures are answered with an error
//! response; only config and I/O failures end the process.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::observability::{Event, Logger, RequestScope};
use crate::request::RequestHandler;

use super::args::Command;
use super::errors::CliResult;
use super::io::{read_line, read_request, write_error, write_response, RequestLine};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Query { config } => {
            let config = load_config(config.as_deref())?;
            let stdin = io::stdin();
            query(&config, &mut stdin.lock(), &mut io::stdout())
        }
        Command::Serve { config } => {
            let config = load_config(config.as_deref())?;
            let stdin = io::stdin();
            serve(&config, &mut stdin.lock(), &mut io::stdout())
        }
        Command::CheckConfig { config } => check_config(&config, &mut io::stdout()),
    }
}

/// Loads config from `path`, or defaults when no path is given.
///
/// Applies the configured log level before returning.
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = match path {
        Some(path) => {
            let config = Config::load(path)?;
            Logger::set_min_severity(config.log_level);
            Event::ConfigLoaded.log(&[("path", &path.display().to_string())]);
            config
        }
        None => {
            let config = Config::default();
            Logger::set_min_severity(config.log_level);
            Event::ConfigDefaulted.log(&[("reason", "no --config given")]);
            config
        }
    };
    Ok(config)
}

/// Answers one request
pub fn query<R: BufRead, W: Write>(config: &Config, input: &mut R, output: &mut W) -> CliResult<()> {
    let line = read_request(input)?;
    answer(&RequestHandler::new(config), line, output)
}

/// Answers requests until EOF
pub fn serve<R: BufRead, W: Write>(config: &Config, input: &mut R, output: &mut W) -> CliResult<()> {
    let handler = RequestHandler::new(config);
    Event::Serving.log(&[]);

    let mut answered: u64 = 0;
    while let Some(line) = read_line(input)? {
        answer(&handler, line, output)?;
        answered += 1;
    }

    Event::ServeComplete.log(&[("answered", &answered.to_string())]);
    Ok(())
}

/// Validates a config file and prints the effective configuration
pub fn check_config<W: Write>(path: &Path, output: &mut W) -> CliResult<()> {
    let config = Config::load(path)?;
    Logger::set_min_severity(config.log_level);
    write_response(output, serde_json::to_value(&config)?)
}

fn answer<W: Write>(handler: &RequestHandler<'_>, line: RequestLine, output: &mut W) -> CliResult<()> {
    let scope = RequestScope::begin();

    match line.and_then(|line| handler.handle_line(&line)) {
        Ok((data, stats)) => {
            write_response(output, data)?;
            scope.complete(&[
                ("input", &stats.input.to_string()),
                ("matching", &stats.matching.to_string()),
                ("visible", &stats.visible.to_string()),
            ]);
        }
        Err(e) => {
            write_error(output, &e)?;
            scope.reject(e.code(), &e.to_string());
        }
    }

    Ok(())
}
