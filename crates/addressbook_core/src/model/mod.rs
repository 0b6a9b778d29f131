//! Address book domain model.
//!
//! # Responsibility
//! - Define the contact record shared by repository, query and interchange.
//! - Normalize edit-form input into persistable contacts.
//!
//! # Invariants
//! - Every contact carries a `ContactId` that never changes after creation.
//! - Deletion is a hard removal; there are no tombstones.

pub mod contact;
