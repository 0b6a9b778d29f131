//! Favorites filter and free-text search over contacts.
//!
//! # Responsibility
//! - Decide whether a contact matches a [`ContactQuery`].
//! - Return matches in their original collection order.
//!
//! # Invariants
//! - Mode and search term are combined with AND.
//! - Matching is case-insensitive and only looks at `name` and method values.
//! - An empty term matches every contact; whitespace in a term is matched
//!   literally.

use crate::model::contact::Contact;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Favorites filter selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    Favorites,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Favorites => "favorites",
        }
    }
}

/// Error for unrecognized filter mode text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterMode(pub String);

impl Display for UnknownFilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter mode `{}`; expected all|favorites",
            self.0
        )
    }
}

impl Error for UnknownFilterMode {}

impl FromStr for FilterMode {
    type Err = UnknownFilterMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "favorites" => Ok(Self::Favorites),
            other => Err(UnknownFilterMode(other.to_string())),
        }
    }
}

/// Filter options applied to a contact collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
    pub mode: FilterMode,
    /// Free-text term, matched as-is (no trimming).
    pub term: String,
}

impl ContactQuery {
    pub fn new(mode: FilterMode, term: impl Into<String>) -> Self {
        Self {
            mode,
            term: term.into(),
        }
    }

    /// Returns a reusable matcher with the term lowercased once.
    pub fn matcher(&self) -> ContactMatcher {
        let term = self.term.to_lowercase();
        ContactMatcher {
            favorites_only: self.mode == FilterMode::Favorites,
            term: (!term.is_empty()).then_some(term),
        }
    }
}

/// Precompiled predicate for one [`ContactQuery`].
#[derive(Debug, Clone)]
pub struct ContactMatcher {
    favorites_only: bool,
    term: Option<String>,
}

impl ContactMatcher {
    pub fn matches(&self, contact: &Contact) -> bool {
        if self.favorites_only && !contact.is_favorite {
            return false;
        }
        let Some(term) = self.term.as_deref() else {
            return true;
        };
        contact.name.to_lowercase().contains(term)
            || contact
                .methods
                .iter()
                .any(|method| method.value.to_lowercase().contains(term))
    }
}

/// Returns the contacts matching `query`, preserving collection order.
pub fn filter_contacts(contacts: &[Contact], query: &ContactQuery) -> Vec<Contact> {
    let matcher = query.matcher();
    contacts
        .iter()
        .filter(|contact| matcher.matches(contact))
        .cloned()
        .collect()
}
