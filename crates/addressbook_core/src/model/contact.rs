//! Contact domain model.
//!
//! # Responsibility
//! - Define `Contact`, its typed contact methods and its stored JSON shape.
//! - Provide the form-input normalization and save-time validation rules.
//!
//! # Invariants
//! - A persisted contact has a non-blank `name` and at least one method.
//! - `methods` keeps the order in which methods were entered.
//! - Unknown method types survive a decode/encode cycle unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable contact identifier.
///
/// Opaque text so that ids written by older builds (millisecond timestamps)
/// keep working next to generated UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Returns a fresh random (UUID v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ContactId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for ContactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Channel type of a contact method.
///
/// Serialized as its raw string. Values outside the four known channels are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MethodType {
    Phone,
    Email,
    Wechat,
    Address,
    Other(String),
}

impl MethodType {
    /// Known channels in interchange column order.
    pub const FIXED: [MethodType; 4] = [
        MethodType::Phone,
        MethodType::Email,
        MethodType::Wechat,
        MethodType::Address,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Wechat => "wechat",
            Self::Address => "address",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Display label; unknown types fall back to the raw type string.
    pub fn label(&self) -> &str {
        match self {
            Self::Phone => "电话",
            Self::Email => "邮箱",
            Self::Wechat => "微信",
            Self::Address => "地址",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for MethodType {
    fn from(value: &str) -> Self {
        match value {
            "phone" => Self::Phone,
            "email" => Self::Email,
            "wechat" => Self::Wechat,
            "address" => Self::Address,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for MethodType {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<MethodType> for String {
    fn from(value: MethodType) -> Self {
        match value {
            MethodType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for MethodType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed channel of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethod {
    /// Serialized as `type` to match the stored record shape.
    #[serde(rename = "type")]
    pub kind: MethodType,
    pub value: String,
}

impl ContactMethod {
    pub fn new(kind: MethodType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Save-time validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// `name` is empty after trimming.
    EmptyName,
    /// `methods` is empty.
    NoMethods,
    /// The method at this position has a blank value.
    BlankMethodValue(usize),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name must not be empty"),
            Self::NoMethods => write!(f, "contact needs at least one contact method"),
            Self::BlankMethodValue(index) => {
                write!(f, "contact method #{index} has an empty value")
            }
        }
    }
}

impl Error for ContactValidationError {}

/// Canonical contact record.
///
/// Field names follow the stored JSON shape
/// (`id`, `name`, `methods`, `note`, `isFavorite`). Optional fields missing
/// from older records decode to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub methods: Vec<ContactMethod>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,
}

impl Contact {
    /// Creates a non-favorite contact with a generated id and empty note.
    pub fn new(name: impl Into<String>, methods: Vec<ContactMethod>) -> Self {
        Self::with_id(ContactId::generate(), name, methods)
    }

    /// Creates a contact with a caller-provided id.
    ///
    /// Does not validate; repository writes do.
    pub fn with_id(id: ContactId, name: impl Into<String>, methods: Vec<ContactMethod>) -> Self {
        Self {
            id,
            name: name.into(),
            methods,
            note: String::new(),
            is_favorite: false,
        }
    }

    /// Checks the persistence invariant.
    ///
    /// # Errors
    /// - `EmptyName` when the trimmed name is empty.
    /// - `NoMethods` when `methods` is empty.
    /// - `BlankMethodValue` for the first method whose trimmed value is empty.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if self.methods.is_empty() {
            return Err(ContactValidationError::NoMethods);
        }
        if let Some(index) = self
            .methods
            .iter()
            .position(|method| method.value.trim().is_empty())
        {
            return Err(ContactValidationError::BlankMethodValue(index));
        }
        Ok(())
    }
}

/// Raw edit-form input for creating or updating a contact.
///
/// `id == None` means "new contact".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub id: Option<ContactId>,
    pub name: String,
    pub methods: Vec<ContactMethod>,
    pub note: String,
    pub is_favorite: bool,
}

impl ContactDraft {
    /// Normalizes and validates the draft.
    ///
    /// Trims name, note and method values, drops methods whose value is
    /// blank, keeps method order, and assigns a fresh id to new contacts.
    ///
    /// # Errors
    /// - `EmptyName` when the trimmed name is empty (checked first).
    /// - `NoMethods` when no method keeps a non-empty value.
    pub fn into_contact(self) -> Result<Contact, ContactValidationError> {
        let name = self.name.trim().to_string();
        let methods = self
            .methods
            .into_iter()
            .filter_map(|method| {
                let value = method.value.trim();
                (!value.is_empty()).then(|| ContactMethod::new(method.kind, value))
            })
            .collect::<Vec<_>>();

        let contact = Contact {
            id: self.id.unwrap_or_else(ContactId::generate),
            name,
            methods,
            note: self.note.trim().to_string(),
            is_favorite: self.is_favorite,
        };
        contact.validate()?;
        Ok(contact)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{ContactMethod, MethodType};

    #[test]
    fn method_type_keeps_unknown_raw_string() {
        let kind = MethodType::from("telegram".to_string());
        assert_eq!(kind, MethodType::Other("telegram".to_string()));
        assert_eq!(kind.label(), "telegram");
        assert_eq!(String::from(kind), "telegram");
    }

    #[test]
    fn known_method_types_map_to_labels() {
        let fixed = MethodType::FIXED;
        let labels = fixed
            .iter()
            .map(MethodType::label)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["电话", "邮箱", "微信", "地址"]);
    }

    #[test]
    fn method_serializes_kind_as_type_field() {
        let method = ContactMethod::new(MethodType::Wechat, "wx_alice");
        let json = serde_json::to_value(&method).unwrap();
        assert_eq!(json, serde_json::json!({"type": "wechat", "value": "wx_alice"}));
    }
}
