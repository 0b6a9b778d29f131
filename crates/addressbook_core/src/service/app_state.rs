//! Explicit presentation state.
//!
//! # Responsibility
//! - Carry the in-memory collection, active filter, search term and
//!   selected contact between presentation events.
//!
//! # Invariants
//! - `selected` always refers to a contact present in `contacts`.

use crate::model::contact::{Contact, ContactId};
use crate::query::filter::{filter_contacts, ContactQuery, FilterMode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub contacts: Vec<Contact>,
    pub mode: FilterMode,
    pub term: String,
    selected: Option<ContactId>,
}

impl AppState {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Installs a fresh collection, dropping a selection that no longer exists.
    pub fn with_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.contacts = contacts;
        if let Some(id) = &self.selected {
            if !self.contacts.iter().any(|contact| &contact.id == id) {
                self.selected = None;
            }
        }
        self
    }

    /// Selects `id` when present; unknown ids clear the selection.
    pub fn with_selection(mut self, id: &ContactId) -> Self {
        self.selected = self
            .contacts
            .iter()
            .any(|contact| &contact.id == id)
            .then(|| id.clone());
        self
    }

    pub fn selected(&self) -> Option<&Contact> {
        let id = self.selected.as_ref()?;
        self.contacts.iter().find(|contact| &contact.id == id)
    }

    /// Contacts visible under the current filter and term.
    pub fn visible(&self) -> Vec<Contact> {
        filter_contacts(
            &self.contacts,
            &ContactQuery::new(self.mode, self.term.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::model::contact::{Contact, ContactMethod, MethodType};
    use crate::query::filter::FilterMode;

    fn contact(name: &str, favorite: bool) -> Contact {
        let mut contact = Contact::new(name, vec![ContactMethod::new(MethodType::Phone, "1")]);
        contact.is_favorite = favorite;
        contact
    }

    #[test]
    fn selection_is_dropped_when_contact_disappears() {
        let alice = contact("Alice", false);
        let bob = contact("Bob", true);
        let state = AppState::new(vec![alice.clone(), bob.clone()]).with_selection(&alice.id);
        assert_eq!(state.selected(), Some(&alice));

        let state = state.with_contacts(vec![bob]);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let alice = contact("Alice", false);
        let stranger = contact("Stranger", false);
        let state = AppState::new(vec![alice]).with_selection(&stranger.id);
        assert!(state.selected().is_none());
    }

    #[test]
    fn visible_applies_mode_and_term() {
        let state = AppState::new(vec![contact("Alice", true), contact("Alan", false)])
            .with_mode(FilterMode::Favorites)
            .with_term("al");
        let names = state
            .visible()
            .into_iter()
            .map(|contact| contact.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Alice".to_string()]);
    }
}
