//! CSV output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Table;
use crate::error::{ChatlensError, Result};

const HEADER: [&str; 3] = ["Timestamp", "Author", "Message"];

/// Writes the table to a CSV file.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Author`, `Message`
/// - Timestamps as `YYYY-MM-DD HH:MM:SS`
/// - Encoding: UTF-8
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv_to(table, BufWriter::new(file))
}

/// Renders the table as a CSV string.
pub fn to_csv(table: &Table) -> Result<String> {
    let mut buf = Vec::new();
    write_csv_to(table, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ChatlensError::invalid_format("csv", e.to_string()))
}

/// Writes the table as CSV to any writer.
pub fn write_csv_to<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for record in table {
        let timestamp = record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        writer.write_record([timestamp.as_str(), record.author.as_str(), record.message.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}
