//! User management service
//!
//! Admin-only maintenance of the authorized user list.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ClaimsError, ClaimsResult};
use crate::models::{Role, SessionContext, User, UserId};
use crate::storage::UserStore;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Check an email address against the accepted shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Input for adding a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl NewUser {
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role,
        }
    }
}

/// Service for user management
pub struct UserService<'a> {
    store: &'a dyn UserStore,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a dyn UserStore) -> Self {
        Self { store }
    }

    /// All users, sorted by name
    pub fn list(&self) -> ClaimsResult<Vec<User>> {
        let mut users = self.store.list_users()?;
        users.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(users)
    }

    pub fn add(&self, session: &SessionContext, input: NewUser) -> ClaimsResult<User> {
        require_admin(session)?;

        let name = input.name.trim();
        if name.is_empty() {
            return Err(ClaimsError::Validation("Name: This field is required".into()));
        }

        let email = input.email.trim();
        if email.is_empty() {
            return Err(ClaimsError::Validation("Email: This field is required".into()));
        }
        if !is_valid_email(email) {
            return Err(ClaimsError::Validation(format!(
                "Email: '{}' is not a valid email address",
                email
            )));
        }

        if self.store.find_user_by_email(email)?.is_some() {
            return Err(ClaimsError::Duplicate {
                entity_type: "User",
                identifier: email.to_string(),
            });
        }

        let user = User::new(email, name, input.role);
        self.store.insert_user(user.clone())?;
        Ok(user)
    }

    /// Change a user's name and/or role
    pub fn update(
        &self,
        session: &SessionContext,
        id: &UserId,
        name: Option<String>,
        role: Option<Role>,
    ) -> ClaimsResult<User> {
        require_admin(session)?;

        let mut user = self
            .store
            .get_user(id)?
            .ok_or_else(|| ClaimsError::user_not_found(id.to_string()))?;

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ClaimsError::Validation("Name: This field is required".into()));
            }
            user.name = name.to_string();
        }
        if let Some(role) = role {
            user.role = role;
        }

        self.store.update_user(user.clone())?;
        Ok(user)
    }

    pub fn remove(&self, session: &SessionContext, id: &UserId) -> ClaimsResult<()> {
        require_admin(session)?;
        self.store.delete_user(id)
    }
}

fn require_admin(session: &SessionContext) -> ClaimsResult<()> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(ClaimsError::Forbidden(
            "User management requires the admin role".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ClaimsPaths;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ClaimsPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn admin() -> SessionContext {
        SessionContext::new(
            UserId::from("admin@example.com"),
            "admin@example.com",
            "Admin",
            Role::Admin,
        )
    }

    fn manager() -> SessionContext {
        SessionContext::new(
            UserId::from("mgr"),
            "priya.sharma@example.com",
            "Priya Sharma",
            Role::Manager,
        )
    }

    #[test]
    fn test_email_regex() {
        assert!(is_valid_email("raj.kumar@example.com"));
        assert!(!is_valid_email("raj.kumar@example"));
        assert!(!is_valid_email("raj kumar@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_add_user() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let user = service
            .add(
                &admin(),
                NewUser::new(" raj.kumar@example.com ", " Raj Kumar ", Role::Employee),
            )
            .unwrap();

        assert_eq!(user.email, "raj.kumar@example.com");
        assert_eq!(user.name, "Raj Kumar");
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_validates_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let err = service
            .add(&admin(), NewUser::new("a@example.com", "  ", Role::Employee))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add(&admin(), NewUser::new("not-an-email", "A", Role::Employee))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        service
            .add(&admin(), NewUser::new("a@example.com", "A", Role::Employee))
            .unwrap();
        let err = service
            .add(&admin(), NewUser::new("a@example.com", "B", Role::Manager))
            .unwrap_err();
        assert!(matches!(err, ClaimsError::Duplicate { .. }));
    }

    #[test]
    fn test_non_admin_is_forbidden() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let err = service
            .add(&manager(), NewUser::new("a@example.com", "A", Role::Employee))
            .unwrap_err();
        assert!(matches!(err, ClaimsError::Forbidden(_)));
        assert!(storage.users.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let user = service
            .add(&admin(), NewUser::new("a@example.com", "A", Role::Employee))
            .unwrap();

        let updated = service
            .update(&admin(), &user.id, Some("Anita".into()), Some(Role::Manager))
            .unwrap();
        assert_eq!(updated.name, "Anita");
        assert_eq!(updated.role, Role::Manager);

        let err = service
            .update(&manager(), &user.id, None, Some(Role::Admin))
            .unwrap_err();
        assert!(matches!(err, ClaimsError::Forbidden(_)));

        service.remove(&admin(), &user.id).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(service.remove(&admin(), &user.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_sorted_by_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        service
            .add(&admin(), NewUser::new("z@example.com", "zoe", Role::Employee))
            .unwrap();
        service
            .add(&admin(), NewUser::new("a@example.com", "Amit", Role::Employee))
            .unwrap();

        let names: Vec<_> = service.list().unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, ["Amit", "zoe"]);
    }
}
