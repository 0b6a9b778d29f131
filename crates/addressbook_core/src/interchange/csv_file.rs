//! CSV file codec for interchange tables.
//!
//! # Responsibility
//! - Encode a [`Table`] as UTF-8 CSV and decode it back.
//! - Load an import file completely before parsing it.
//!
//! # Invariants
//! - Exported files start with a UTF-8 BOM so spreadsheet apps detect the
//!   encoding; a leading BOM is ignored on import.
//! - Rows may have differing lengths on import.

use super::table::{export_table, import_table, Table};
use super::{ExportError, ImportError};
use crate::model::contact::Contact;
use log::{error, info};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

/// Default export file name.
pub const DEFAULT_FILE_NAME: &str = "通讯录.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `table` as CSV, prefixed with a UTF-8 BOM.
pub fn write_table<W: Write>(mut writer: W, table: &Table) -> Result<(), ExportError> {
    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads a whole CSV table from `reader`.
pub fn read_table<R: Read>(mut reader: R) -> Result<Table, ImportError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(ImportError::Read)?;
    parse_table(&bytes)
}

/// Exports `contacts` into a CSV file at `path`, replacing any existing file.
pub fn export_to_path(path: impl AsRef<Path>, contacts: &[Contact]) -> Result<(), ExportError> {
    let started_at = Instant::now();
    let table = export_table(contacts)?;
    let result = std::fs::File::create(path.as_ref())
        .map_err(ExportError::from)
        .and_then(|file| write_table(std::io::BufWriter::new(file), &table));

    match &result {
        Ok(()) => info!(
            "event=file_export module=interchange status=ok rows={} duration_ms={}",
            contacts.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=file_export module=interchange status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

/// Reads the file at `path` and parses it into new contacts.
///
/// The file is read into memory in one step before any parsing happens.
pub fn import_from_path(path: impl AsRef<Path>) -> Result<Vec<Contact>, ImportError> {
    let started_at = Instant::now();
    let bytes = match std::fs::read(path.as_ref()) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(
                "event=file_import module=interchange status=error duration_ms={} error_code=read_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(ImportError::Read(err));
        }
    };

    let result = import_from_bytes(&bytes);
    if let Err(err) = &result {
        error!(
            "event=file_import module=interchange status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        );
    }
    result
}

/// Parses in-memory CSV bytes into new contacts.
pub fn import_from_bytes(bytes: &[u8]) -> Result<Vec<Contact>, ImportError> {
    let table = parse_table(bytes)?;
    import_table(&table)
}

fn parse_table(bytes: &[u8]) -> Result<Table, ImportError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(ImportError::Malformed)?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    Ok(Table::new(rows))
}
