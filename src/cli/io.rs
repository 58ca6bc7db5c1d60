//! JSON output for CLI commands
//!
//! One pretty-printed JSON document per command on stdout. Logs go to
//! stderr so stdout stays machine-readable.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a JSON value to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value)
}

/// Write a JSON value followed by a newline to `writer`
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
