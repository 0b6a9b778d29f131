//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the entry points a presentation layer calls: save form input,
//!   delete, favorite, filter, export, import-and-merge.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - An import merge is one storage write, or none when it fails.

use crate::interchange::{self, ExportError, ImportError, Table};
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::query::filter::{filter_contacts, ContactQuery, FilterMode};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Form input rejected before any write.
    Validation(ContactValidationError),
    ContactNotFound(ContactId),
    Repo(RepoError),
    Export(ExportError),
    Import(ImportError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::ContactNotFound(_) => None,
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::Import(err) => Some(err),
        }
    }
}

impl From<ContactValidationError> for ServiceError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::ContactNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ExportError> for ServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<ImportError> for ServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// Result of saving form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedContact {
    /// The contact as persisted.
    pub contact: Contact,
    /// Whole collection after the write.
    pub contacts: Vec<Contact>,
}

/// Result of a successful import merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of contacts appended by this import.
    pub imported: usize,
    /// Whole collection after the merge.
    pub contacts: Vec<Contact>,
}

/// Use-case service wrapper over a contact repository.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the whole collection in stored order.
    pub fn list(&self) -> Vec<Contact> {
        self.repo.get_all()
    }

    pub fn get(&self, id: &ContactId) -> Option<Contact> {
        self.repo.find_by_id(id)
    }

    /// Filters the stored collection by favorites mode and search term.
    pub fn filter(&self, mode: FilterMode, term: &str) -> Vec<Contact> {
        let matches = filter_contacts(&self.repo.get_all(), &ContactQuery::new(mode, term));
        debug!(
            "event=contact_filter module=service status=ok mode={} matches={}",
            mode.as_str(),
            matches.len()
        );
        matches
    }

    /// Saves edit-form input as a new or existing contact.
    ///
    /// # Contract
    /// - `draft.id == None` appends a new contact with a fresh id.
    /// - `draft.id == Some(id)` replaces that contact; unknown ids fail with
    ///   `ContactNotFound`.
    /// - Validation runs before any storage access.
    pub fn save_draft(&self, draft: ContactDraft) -> ServiceResult<SavedContact> {
        let is_new = draft.id.is_none();
        let contact = draft.into_contact()?;
        let contacts = if is_new {
            self.repo.add(contact.clone())?
        } else {
            self.repo.update(contact.clone())?
        };
        Ok(SavedContact { contact, contacts })
    }

    pub fn delete(&self, id: &ContactId) -> ServiceResult<Vec<Contact>> {
        Ok(self.repo.delete(id)?)
    }

    /// Flips the favorite flag; `Ok(None)` for unknown ids.
    pub fn toggle_favorite(&self, id: &ContactId) -> ServiceResult<Option<Contact>> {
        Ok(self.repo.toggle_favorite(id)?)
    }

    /// Builds the export table for the whole collection.
    pub fn export_table(&self) -> ServiceResult<Table> {
        Ok(interchange::export_table(&self.repo.get_all())?)
    }

    /// Writes the whole collection as a CSV file at `path`.
    pub fn export_to_path(&self, path: impl AsRef<Path>) -> ServiceResult<usize> {
        let contacts = self.repo.get_all();
        interchange::export_to_path(path, &contacts)?;
        Ok(contacts.len())
    }

    /// Appends already-parsed contacts to the stored collection.
    ///
    /// No de-duplication against existing contacts is performed.
    ///
    /// # Errors
    /// - `Import(NothingImported)` when `imported` is empty.
    /// - `Validation` when any contact fails `Contact::validate()`.
    ///
    /// Nothing is written on error.
    pub fn merge_imported(&self, imported: Vec<Contact>) -> ServiceResult<ImportSummary> {
        if imported.is_empty() {
            return Err(ImportError::NothingImported.into());
        }
        for contact in &imported {
            contact.validate()?;
        }

        let count = imported.len();
        let mut contacts = self.repo.get_all();
        contacts.extend(imported);
        self.repo.save(&contacts)?;
        info!(
            "event=contact_import module=service status=ok imported={} total={}",
            count,
            contacts.len()
        );
        Ok(ImportSummary {
            imported: count,
            contacts,
        })
    }

    /// Parses `table` and merges its contacts.
    pub fn import_table(&self, table: &Table) -> ServiceResult<ImportSummary> {
        let imported = interchange::import_table(table)?;
        self.merge_imported(imported)
    }

    /// Reads a CSV file and merges its contacts.
    pub fn import_from_path(&self, path: impl AsRef<Path>) -> ServiceResult<ImportSummary> {
        let imported = interchange::import_from_path(path)?;
        self.merge_imported(imported)
    }
}
