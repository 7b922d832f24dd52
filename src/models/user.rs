//! User model
//!
//! Authorization records: who may sign in and with which role. Distinct from
//! the owner fields denormalized onto each claim; the two are joined by email.
//!
//! Like claims, users arrive from the store as loose documents
//! ([`UserDocument`]); [`User::from_document`] normalizes the role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Role of an authorized user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Employee,
    Manager,
    Admin,
}

impl Role {
    /// Parse a role from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" => Some(Self::Employee),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Managers and admins review claims
    pub fn can_review(&self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authorized user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,

    /// Unique key; claims reference users through it
    pub email: String,

    pub name: String,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user record
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            name: name.into(),
            role,
            created_at: Some(Utc::now()),
        }
    }

    /// Build a user from a stored document
    ///
    /// A missing or blank role means employee. Any other role string must
    /// name a known role, in any casing.
    pub fn from_document(doc: UserDocument) -> Result<Self, UserIngestError> {
        let role = match doc.role.as_deref().map(str::trim) {
            None | Some("") => Role::Employee,
            Some(raw) => {
                Role::parse(raw).ok_or_else(|| UserIngestError::UnknownRole(raw.to_string()))?
            }
        };

        let id = match doc.id {
            Some(id) => UserId::from(id),
            None => UserId::derived(&doc.email.trim().to_ascii_lowercase()),
        };

        Ok(Self {
            id,
            email: doc.email,
            name: doc.name,
            role,
            created_at: doc.created_at,
        })
    }

    /// Convert to the stored document shape
    pub fn to_document(&self) -> UserDocument {
        UserDocument {
            id: Some(self.id.to_string()),
            email: self.email.clone(),
            name: self.name.clone(),
            role: Some(self.role.as_str().to_string()),
            created_at: self.created_at,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({})", self.name, self.email, self.role)
    }
}

/// User as stored in the record store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub email: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Reasons a stored user document cannot be ingested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIngestError {
    UnknownRole(String),
}

impl fmt::Display for UserIngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRole(s) => write!(f, "Unknown user role: '{}'", s),
        }
    }
}

impl std::error::Error for UserIngestError {}
