//! Contact <-> table mapping.
//!
//! # Invariants
//! - Column order is fixed: name, phone, email, wechat, address, note,
//!   favorite.
//! - Export writes method values by column; a later method of the same type
//!   overwrites an earlier one.
//! - Import keeps source row order.

use super::{ExportError, ImportError};
use crate::model::contact::{Contact, ContactMethod, MethodType};
use log::{debug, info};

/// Header row written on export. Its content is ignored on import.
pub const HEADER: [&str; 7] = ["姓名", "电话", "邮箱", "微信", "地址", "备注", "是否收藏"];
/// Favorite column value for favorites.
pub const FAVORITE_YES: &str = "是";
/// Favorite column value for everyone else.
pub const FAVORITE_NO: &str = "否";

const NAME_COLUMN: usize = 0;
const FIRST_METHOD_COLUMN: usize = 1;
const NOTE_COLUMN: usize = 5;
const FAVORITE_COLUMN: usize = 6;

/// Rows of text cells; the first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }
}

/// Builds the export table for `contacts`.
///
/// Contacts without methods still produce a row with blank method cells.
/// Methods of unknown type are not exported.
///
/// # Errors
/// - `ExportError::NoContacts` when `contacts` is empty.
pub fn export_table(contacts: &[Contact]) -> Result<Table, ExportError> {
    if contacts.is_empty() {
        return Err(ExportError::NoContacts);
    }

    let mut rows = Vec::with_capacity(contacts.len() + 1);
    rows.push(HEADER.iter().map(|label| label.to_string()).collect());

    for contact in contacts {
        let mut row = vec![String::new(); HEADER.len()];
        row[NAME_COLUMN] = contact.name.clone();
        for method in &contact.methods {
            if let Some(column) = method_column(&method.kind) {
                row[column] = method.value.clone();
            }
        }
        row[NOTE_COLUMN] = contact.note.clone();
        row[FAVORITE_COLUMN] = if contact.is_favorite {
            FAVORITE_YES
        } else {
            FAVORITE_NO
        }
        .to_string();
        rows.push(row);
    }

    debug!(
        "event=table_export module=interchange status=ok rows={}",
        contacts.len()
    );
    Ok(Table::new(rows))
}

/// Parses data rows of `table` into new contacts with fresh ids.
///
/// Rows with a blank name, or with all four method cells blank, are skipped.
/// Missing trailing cells count as blank.
///
/// # Errors
/// - `ImportError::NoData` when the table has fewer than two rows.
pub fn import_table(table: &Table) -> Result<Vec<Contact>, ImportError> {
    if table.rows.len() < 2 {
        return Err(ImportError::NoData);
    }

    let rows = table.data_rows();
    let contacts = rows.iter().filter_map(|row| parse_row(row)).collect::<Vec<_>>();

    info!(
        "event=table_import module=interchange status=ok rows={} imported={} skipped={}",
        rows.len(),
        contacts.len(),
        rows.len() - contacts.len()
    );
    Ok(contacts)
}

fn parse_row(row: &[String]) -> Option<Contact> {
    let name = cell(row, NAME_COLUMN);
    if name.is_empty() {
        return None;
    }

    let methods = MethodType::FIXED
        .into_iter()
        .enumerate()
        .filter_map(|(offset, kind)| {
            let value = cell(row, FIRST_METHOD_COLUMN + offset);
            (!value.is_empty()).then(|| ContactMethod::new(kind, value))
        })
        .collect::<Vec<_>>();
    if methods.is_empty() {
        return None;
    }

    let mut contact = Contact::new(name, methods);
    contact.note = cell(row, NOTE_COLUMN).to_string();
    contact.is_favorite = cell(row, FAVORITE_COLUMN) == FAVORITE_YES;
    Some(contact)
}

fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map_or("", |value| value.trim())
}

fn method_column(kind: &MethodType) -> Option<usize> {
    MethodType::FIXED
        .iter()
        .position(|fixed| fixed == kind)
        .map(|offset| FIRST_METHOD_COLUMN + offset)
}
