//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::Table;
use crate::error::Result;

/// Writes the table to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2021-02-01T09:00:00", "author": "Ana", "message": "Oi"}
/// ]
/// ```
pub fn write_json(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_json_value(table, BufWriter::new(file))
}

/// Renders the table as a JSON array string.
pub fn to_json(table: &Table) -> Result<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

/// Writes any serializable value (a table, a report) as pretty JSON.
pub fn write_json_value<T, W>(value: &T, mut writer: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
