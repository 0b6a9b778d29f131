//! Core contact data layer for the address book.
//! This crate is the single source of truth for contact invariants.

pub mod config;
pub mod db;
pub mod interchange;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::CoreConfig;
pub use interchange::{ExportError, ImportError, Table};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::contact::{
    Contact, ContactDraft, ContactId, ContactMethod, ContactValidationError, MethodType,
};
pub use query::filter::{filter_contacts, ContactQuery, FilterMode};
pub use repo::contact_repo::{
    ContactRepository, RepoError, RepoResult, StoredContactRepository, CONTACTS_KEY,
};
pub use service::app_state::AppState;
pub use service::contact_service::{
    ContactService, ImportSummary, SavedContact, ServiceError, ServiceResult,
};
pub use storage::{KeyValueBackend, SqliteBackend, StorageAdapter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
