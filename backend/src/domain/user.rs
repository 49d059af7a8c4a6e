//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptyPhoneNumber,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyPhoneNumber => write!(f, "phone number must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier, assigned by the record store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID as a [`UserId`].
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human readable name of a registered person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserValidationError> {
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Contact phone number for a registered person.
///
/// No particular dialling format is enforced; the community tracker only
/// requires the field to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`] from owned input.
    pub fn new(phone: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(phone.into())
    }

    fn from_owned(phone: String) -> Result<Self, UserValidationError> {
        if phone.trim().is_empty() {
            return Err(UserValidationError::EmptyPhoneNumber);
        }
        Ok(Self(phone))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Validated payload for registering a user; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: PersonName,
    pub phone_number: PhoneNumber,
}

impl UserDraft {
    /// Validate registration input before any store call is made.
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: PersonName::new(name)?,
            phone_number: PhoneNumber::new(phone_number)?,
        })
    }
}

/// Registered community member.
///
/// ## Invariants
/// - `name` and `phone_number` are non-empty once trimmed of whitespace.
/// - `id` is assigned by the record store and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    name: PersonName,
    phone_number: PhoneNumber,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, name: PersonName, phone_number: PhoneNumber) -> Self {
        Self {
            id,
            name,
            phone_number,
        }
    }

    /// Build a [`User`] from a validated draft and a store-assigned id.
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        Self::new(id, draft.name, draft.phone_number)
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Name the user registered with.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Contact phone number.
    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }
}
