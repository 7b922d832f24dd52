//! Storage layer for expense-claims
//!
//! A local JSON-file record store. The core talks to it only through the
//! [`ClaimStore`] and [`UserStore`] traits, so a hosted document database can
//! take its place. Every mutation is written through immediately.

pub mod claims;
pub mod feed;
pub mod file_io;
mod records;
pub mod users;

pub use claims::ClaimRepository;
pub use feed::{spawn_store_poller, SnapshotFeed, StorePoller};
pub use file_io::{read_json, write_json_atomic};
pub use users::UserRepository;

use chrono::{DateTime, Utc};

use crate::config::paths::ClaimsPaths;
use crate::error::{ClaimsError, ClaimsResult};
use crate::models::{Claim, ClaimId, ClaimState, Snapshot, User, UserId};

/// Claim persistence as seen by the core
pub trait ClaimStore {
    fn get_claim(&self, id: &ClaimId) -> ClaimsResult<Option<Claim>>;

    fn insert_claim(&self, claim: Claim) -> ClaimsResult<()>;

    /// Single atomic status update; returns the updated claim
    fn update_claim_state(
        &self,
        id: &ClaimId,
        state: ClaimState,
        at: DateTime<Utc>,
    ) -> ClaimsResult<Claim>;

    fn delete_claim(&self, id: &ClaimId) -> ClaimsResult<()>;
}

/// User persistence as seen by the core
pub trait UserStore {
    fn list_users(&self) -> ClaimsResult<Vec<User>>;

    fn get_user(&self, id: &UserId) -> ClaimsResult<Option<User>>;

    fn find_user_by_email(&self, email: &str) -> ClaimsResult<Option<User>>;

    fn insert_user(&self, user: User) -> ClaimsResult<()>;

    fn update_user(&self, user: User) -> ClaimsResult<()>;

    fn delete_user(&self, id: &UserId) -> ClaimsResult<()>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: ClaimsPaths,
    pub claims: ClaimRepository,
    pub users: UserRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ClaimsPaths) -> ClaimsResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            claims: ClaimRepository::new(paths.claims_file()),
            users: UserRepository::new(paths.users_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &ClaimsPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> ClaimsResult<()> {
        self.claims.load()?;
        self.users.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> ClaimsResult<()> {
        self.claims.save()?;
        self.users.save()?;
        Ok(())
    }

    /// Complete copy of the current record set
    pub fn snapshot(&self) -> ClaimsResult<Snapshot> {
        Ok(Snapshot::new(self.claims.get_all()?, self.users.get_all()?))
    }
}

impl ClaimStore for Storage {
    fn get_claim(&self, id: &ClaimId) -> ClaimsResult<Option<Claim>> {
        self.claims.get(id)
    }

    fn insert_claim(&self, claim: Claim) -> ClaimsResult<()> {
        let id = claim.id.clone();
        self.claims.insert(claim)?;
        self.claims.save()?;
        tracing::info!(claim_id = %id, "Claim stored");
        Ok(())
    }

    fn update_claim_state(
        &self,
        id: &ClaimId,
        state: ClaimState,
        at: DateTime<Utc>,
    ) -> ClaimsResult<Claim> {
        let mut claim = self
            .claims
            .get(id)?
            .ok_or_else(|| ClaimsError::claim_not_found(id.to_string()))?;

        claim.set_state(state, at);
        self.claims.replace(claim.clone())?;
        self.claims.save()?;
        tracing::info!(claim_id = %id, status = %claim.status(), "Claim status updated");
        Ok(claim)
    }

    fn delete_claim(&self, id: &ClaimId) -> ClaimsResult<()> {
        if !self.claims.delete(id)? {
            return Err(ClaimsError::claim_not_found(id.to_string()));
        }
        self.claims.save()?;
        tracing::info!(claim_id = %id, "Claim deleted");
        Ok(())
    }
}

impl UserStore for Storage {
    fn list_users(&self) -> ClaimsResult<Vec<User>> {
        self.users.get_all()
    }

    fn get_user(&self, id: &UserId) -> ClaimsResult<Option<User>> {
        self.users.get(id)
    }

    fn find_user_by_email(&self, email: &str) -> ClaimsResult<Option<User>> {
        self.users.get_by_email(email)
    }

    fn insert_user(&self, user: User) -> ClaimsResult<()> {
        let email = user.email.clone();
        self.users.insert(user)?;
        self.users.save()?;
        tracing::info!(email = %email, "User added");
        Ok(())
    }

    fn update_user(&self, user: User) -> ClaimsResult<()> {
        let id = user.id.clone();
        self.users.replace(user)?;
        self.users.save()?;
        tracing::info!(user_id = %id, "User updated");
        Ok(())
    }

    fn delete_user(&self, id: &UserId) -> ClaimsResult<()> {
        if !self.users.delete(id)? {
            return Err(ClaimsError::user_not_found(id.to_string()));
        }
        self.users.save()?;
        tracing::info!(user_id = %id, "User removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClaimStatus, Money, Role};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClaimsPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, _storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_mutations_are_written_through() {
        let (temp_dir, storage) = create_test_storage();
        let claim = Claim::new(
            UserId::from("u1"),
            None,
            None,
            "2024-11-20",
            "Client Meeting Lunch",
            Money::from_units(2500),
        );
        let id = claim.id.clone();
        storage.insert_claim(claim).unwrap();
        storage
            .update_claim_state(
                &id,
                ClaimState::Approved {
                    approved_by: Some("Priya Sharma".into()),
                },
                Utc::now(),
            )
            .unwrap();
        storage
            .insert_user(User::new("a@example.com", "A", Role::Employee))
            .unwrap();

        let paths = ClaimsPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        let snapshot = reopened.snapshot().unwrap();

        assert_eq!(snapshot.claims.len(), 1);
        assert_eq!(snapshot.claims[0].status(), ClaimStatus::Approved);
        assert!(snapshot.claims[0].updated_at.is_some());
        assert_eq!(snapshot.users.len(), 1);
    }

    #[test]
    fn test_delete_missing_claim_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let err = storage.delete_claim(&ClaimId::from("nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_missing_user_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let err = storage.delete_user(&UserId::from("nope")).unwrap_err();
        assert!(err.is_not_found());
    }
}
