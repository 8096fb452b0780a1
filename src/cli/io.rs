//! JSON line I/O for the CLI
//!
//! - Input: one JSON request object per line
//! - Output: one JSON response object per line
//! - Lines that are not UTF-8 are answered as malformed requests

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::request::RequestError;

use super::errors::{CliError, CliResult};

/// One request line as read from input; text that is not UTF-8 is already
/// a malformed request
pub type RequestLine = Result<String, RequestError>;

/// Reads the next non-blank line. None at EOF.
///
/// Only read failures are errors here. A line that is not UTF-8 comes back
/// as `Some(Err(RequestError::Malformed))` so the caller can answer it.
pub fn read_line<R: BufRead>(reader: &mut R) -> CliResult<Option<RequestLine>> {
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        if raw.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let line = String::from_utf8(std::mem::take(&mut raw))
            .map(|text| text.trim_end().to_string())
            .map_err(|e| {
                RequestError::Malformed(format!("request line is not UTF-8: {}", e.utf8_error()))
            });
        return Ok(Some(line));
    }
}

/// Reads exactly one request line; blank input is an error
pub fn read_request<R: BufRead>(reader: &mut R) -> CliResult<RequestLine> {
    read_line(reader)?.ok_or_else(|| CliError::io_error("Empty input"))
}

/// Writes a success response
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(writer, &response)
}

/// Writes an error response for a failed request
pub fn write_error<W: Write>(writer: &mut W, error: &RequestError) -> CliResult<()> {
    let body = serde_json::to_value(error.to_body())?;
    write_line(writer, &body)
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
