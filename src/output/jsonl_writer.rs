//! JSON Lines (JSONL) output writer.
//!
//! One record per line, so consumers can process large exports without
//! loading the whole file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Table;
use crate::error::Result;

/// Writes the table to a JSONL file.
///
/// # Format
/// ```text
/// {"timestamp":"2021-02-01T09:00:00","author":"Ana","message":"Oi"}
/// {"timestamp":"2021-02-01T09:01:00","author":"Bia","message":"Olá"}
/// ```
pub fn write_jsonl(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_jsonl_to(table, BufWriter::new(file))
}

/// Renders the table as a JSONL string.
pub fn to_jsonl(table: &Table) -> Result<String> {
    let mut out = String::new();
    for record in table {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

/// Writes the table as JSONL to any writer.
pub fn write_jsonl_to<W: Write>(table: &Table, mut writer: W) -> Result<()> {
    for record in table {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
