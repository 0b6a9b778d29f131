//! Contact repository contract and key/value implementation.
//!
//! # Responsibility
//! - Provide CRUD, lookup and favorite toggling over the whole collection.
//! - Map stored JSON records to typed `Contact` values.
//!
//! # Invariants
//! - The collection lives under the single key [`CONTACTS_KEY`].
//! - Each operation performs at most one storage write.
//! - Lookup misses never write.

use crate::model::contact::{Contact, ContactId, ContactValidationError};
use crate::storage::{KeyValueBackend, StorageAdapter};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the JSON array of contact records.
pub const CONTACTS_KEY: &str = "contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact writes.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    NotFound(ContactId),
    /// The storage adapter reported the write as failed.
    Persist { key: &'static str },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::Persist { key } => write!(f, "failed to persist storage key `{key}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::Persist { .. } => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for the contact collection.
pub trait ContactRepository {
    /// Reads the whole collection in stored order; empty when nothing is stored.
    fn get_all(&self) -> Vec<Contact>;
    /// Replaces the whole stored collection with one write.
    fn save(&self, contacts: &[Contact]) -> RepoResult<()>;
    /// Appends `contact` and returns the updated collection.
    fn add(&self, contact: Contact) -> RepoResult<Vec<Contact>>;
    /// Replaces the record with the same id and returns the updated collection.
    fn update(&self, contact: Contact) -> RepoResult<Vec<Contact>>;
    /// Removes every record with `id` and returns the updated collection.
    fn delete(&self, id: &ContactId) -> RepoResult<Vec<Contact>>;
    fn find_by_id(&self, id: &ContactId) -> Option<Contact>;
    /// Flips `is_favorite`; `Ok(None)` when the id is unknown.
    fn toggle_favorite(&self, id: &ContactId) -> RepoResult<Option<Contact>>;
}

/// Contact repository persisted through a [`StorageAdapter`].
pub struct StoredContactRepository<B: KeyValueBackend> {
    storage: StorageAdapter<B>,
}

impl<B: KeyValueBackend> StoredContactRepository<B> {
    pub fn new(backend: B) -> Self {
        Self {
            storage: StorageAdapter::new(backend),
        }
    }

    fn persist(&self, contacts: &[Contact]) -> RepoResult<()> {
        if self.storage.set(CONTACTS_KEY, contacts) {
            Ok(())
        } else {
            Err(RepoError::Persist { key: CONTACTS_KEY })
        }
    }
}

impl<B: KeyValueBackend> ContactRepository for StoredContactRepository<B> {
    fn get_all(&self) -> Vec<Contact> {
        let records: Vec<serde_json::Value> = self.storage.get(CONTACTS_KEY, Vec::new());
        let total = records.len();
        let contacts = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Contact>(record) {
                Ok(contact) => Some(contact),
                Err(err) => {
                    warn!(
                        "event=contact_decode module=repo status=skipped index={index} error={err}"
                    );
                    None
                }
            })
            .collect::<Vec<_>>();
        debug!(
            "event=contact_get_all module=repo status=ok count={} skipped={}",
            contacts.len(),
            total - contacts.len()
        );
        contacts
    }

    fn save(&self, contacts: &[Contact]) -> RepoResult<()> {
        self.persist(contacts)?;
        info!(
            "event=contact_save module=repo status=ok count={}",
            contacts.len()
        );
        Ok(())
    }

    fn add(&self, contact: Contact) -> RepoResult<Vec<Contact>> {
        contact.validate()?;

        let mut contacts = self.get_all();
        contacts.push(contact);
        self.persist(&contacts)?;
        info!(
            "event=contact_add module=repo status=ok count={}",
            contacts.len()
        );
        Ok(contacts)
    }

    fn update(&self, contact: Contact) -> RepoResult<Vec<Contact>> {
        contact.validate()?;

        let mut contacts = self.get_all();
        let Some(slot) = contacts.iter_mut().find(|item| item.id == contact.id) else {
            warn!("event=contact_update module=repo status=not_found");
            return Err(RepoError::NotFound(contact.id));
        };
        *slot = contact;
        self.persist(&contacts)?;
        info!("event=contact_update module=repo status=ok");
        Ok(contacts)
    }

    fn delete(&self, id: &ContactId) -> RepoResult<Vec<Contact>> {
        let mut contacts = self.get_all();
        let before = contacts.len();
        contacts.retain(|item| &item.id != id);
        if contacts.len() == before {
            warn!("event=contact_delete module=repo status=not_found");
            return Err(RepoError::NotFound(id.clone()));
        }
        self.persist(&contacts)?;
        info!(
            "event=contact_delete module=repo status=ok removed={}",
            before - contacts.len()
        );
        Ok(contacts)
    }

    fn find_by_id(&self, id: &ContactId) -> Option<Contact> {
        self.get_all().into_iter().find(|item| &item.id == id)
    }

    fn toggle_favorite(&self, id: &ContactId) -> RepoResult<Option<Contact>> {
        let mut contacts = self.get_all();
        let Some(contact) = contacts.iter_mut().find(|item| &item.id == id) else {
            return Ok(None);
        };
        contact.is_favorite = !contact.is_favorite;
        let updated = contact.clone();
        self.persist(&contacts)?;
        info!(
            "event=contact_toggle_favorite module=repo status=ok favorite={}",
            updated.is_favorite
        );
        Ok(Some(updated))
    }
}
