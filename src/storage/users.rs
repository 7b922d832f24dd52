//! User repository for JSON storage
//!
//! Manages loading and saving authorized users to users.json. User documents
//! that cannot be ingested are written back unchanged.

use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{ClaimsError, ClaimsResult};
use crate::models::{User, UserDocument, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::records::{records, Slot};

const USER_FIELDS: &[&str] = &["id", "email", "name", "role", "createdAt"];

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    #[serde(default)]
    users: Vec<Value>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<Vec<Slot<User>>>,
}

fn ingest(raw: Value) -> Slot<User> {
    let doc: UserDocument = match serde_json::from_value(raw.clone()) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(error = %e, "Keeping unreadable user record as stored");
            return Slot::Unreadable(raw);
        }
    };

    let email = doc.email.clone();
    match User::from_document(doc) {
        Ok(user) => Slot::loaded(user, raw),
        Err(e) => {
            tracing::warn!(email = %email, error = %e, "Skipping user record");
            Slot::Unreadable(raw)
        }
    }
}

fn render(user: &User) -> ClaimsResult<Value> {
    Ok(serde_json::to_value(user.to_document())?)
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> ClaimsResult<()> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.users.into_iter().map(ingest).collect();

        tracing::debug!(
            count = records(&data).count(),
            stored = data.len(),
            path = %self.path.display(),
            "Loaded users"
        );
        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> ClaimsResult<()> {
        let data = self.data.read().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let users = data
            .iter()
            .map(|slot| slot.to_value(USER_FIELDS, &[], render))
            .collect::<ClaimsResult<Vec<_>>>()?;
        write_json_atomic(&self.path, &UserData { users })
    }

    pub fn get(&self, id: &UserId) -> ClaimsResult<Option<User>> {
        let data = self.data.read().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let found = records(&data).find(|u| &u.id == id).cloned();
        Ok(found)
    }

    /// Find a user by exact email
    pub fn get_by_email(&self, email: &str) -> ClaimsResult<Option<User>> {
        let data = self.data.read().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let found = records(&data).find(|u| u.email == email).cloned();
        Ok(found)
    }

    pub fn get_all(&self) -> ClaimsResult<Vec<User>> {
        let data = self.data.read().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(records(&data).cloned().collect())
    }

    /// Add a user; emails are unique
    pub fn insert(&self, user: User) -> ClaimsResult<()> {
        let mut data = self.data.write().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if records(&data).any(|u| u.email == user.email) {
            return Err(ClaimsError::Duplicate {
                entity_type: "User",
                identifier: user.email,
            });
        }

        data.push(Slot::added(user));
        Ok(())
    }

    /// Replace an existing user record
    pub fn replace(&self, user: User) -> ClaimsResult<()> {
        let mut data = self.data.write().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let slot = data
            .iter_mut()
            .find(|slot| slot.record().is_some_and(|u| u.id == user.id))
            .ok_or_else(|| ClaimsError::user_not_found(user.id.to_string()))?;
        slot.replace(user);
        Ok(())
    }

    pub fn delete(&self, id: &UserId) -> ClaimsResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let before = data.len();
        data.retain(|slot| slot.record().map_or(true, |u| &u.id != id));
        Ok(data.len() != before)
    }
}
