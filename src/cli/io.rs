//! JSON output for CLI commands

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a JSON value to stdout, pretty-printed, newline-terminated
pub fn write_json(value: &Value) -> CliResult<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(value, &mut handle)
}

fn write_json_to<W: Write>(value: &Value, writer: &mut W) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
