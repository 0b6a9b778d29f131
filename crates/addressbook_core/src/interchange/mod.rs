//! Spreadsheet interchange for bulk export and import.
//!
//! # Responsibility
//! - Map contacts to and from the fixed seven-column table schema.
//! - Read and write that table as a UTF-8 CSV file.
//!
//! # Invariants
//! - Ids are never exported or imported; imported rows get fresh ids.
//! - Import never partially fails: bad rows are dropped, whole-file problems
//!   reject the import.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod csv_file;
pub mod table;

pub use csv_file::{
    export_to_path, import_from_bytes, import_from_path, read_table, write_table,
    DEFAULT_FILE_NAME,
};
pub use table::{export_table, import_table, Table, FAVORITE_NO, FAVORITE_YES, HEADER};

/// Export failure.
#[derive(Debug)]
pub enum ExportError {
    /// Nothing to export.
    NoContacts,
    Csv(csv::Error),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoContacts => write!(f, "no contacts to export"),
            Self::Csv(err) => write!(f, "failed to encode table: {err}"),
            Self::Io(err) => write!(f, "failed to write export file: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoContacts => None,
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Import failure; no contacts are merged when one is returned.
#[derive(Debug)]
pub enum ImportError {
    /// The table has no data rows below the header.
    NoData,
    /// Every data row was skipped.
    NothingImported,
    /// The file bytes could not be read.
    Read(std::io::Error),
    /// The bytes are not a readable UTF-8 table.
    Malformed(csv::Error),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData => write!(f, "import file has no data rows"),
            Self::NothingImported => write!(f, "no importable contacts found"),
            Self::Read(err) => write!(f, "failed to read import file: {err}"),
            Self::Malformed(err) => write!(f, "import file is not a valid table: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoData | Self::NothingImported => None,
            Self::Read(err) => Some(err),
            Self::Malformed(err) => Some(err),
        }
    }
}
