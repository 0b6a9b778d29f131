//! Repository layer over the persisted contact collection.
//!
//! # Responsibility
//! - Define the contact CRUD contract used by services.
//! - Keep the storage key and record decoding inside core.
//!
//! # Invariants
//! - Every write is a full read-modify-write of one storage key.
//! - `add`/`update` enforce `Contact::validate()` before persistence.

pub mod contact_repo;
