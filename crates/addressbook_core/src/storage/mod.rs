//! Key/value persistence for the address book.
//!
//! # Responsibility
//! - Provide whole-value `get`/`set`/`remove`/`clear` over string keys.
//! - Convert values to and from JSON text at the boundary.
//!
//! # Invariants
//! - Callers may only assume whole-value access for a single key.
//! - The JSON adapter never propagates a failure to its caller.

pub mod adapter;
pub mod kv;

pub use adapter::StorageAdapter;
pub use kv::{KeyValueBackend, SqliteBackend, StorageError, StorageResult};
