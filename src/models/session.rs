//! Session context
//!
//! The identity and role of whoever is driving a viewing session. Core
//! operations that depend on the caller receive it explicitly.

use super::ids::UserId;
use super::user::{Role, User};
use crate::error::{ClaimsError, ClaimsResult};

/// Caller identity for one viewing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl SessionContext {
    pub fn new(
        user_id: UserId,
        email: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// Session for a known user record
    pub fn for_user(user: &User) -> Self {
        Self::new(user.id.clone(), &user.email, &user.name, user.role)
    }

    /// Resolve a signed-in email against the configured admin and the user list
    ///
    /// The configured admin email always resolves to [`Role::Admin`], even
    /// without a user record. Any other email must have a user record.
    pub fn resolve(
        email: &str,
        users: &[User],
        admin_email: Option<&str>,
    ) -> ClaimsResult<Self> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ClaimsError::Unauthorized(
                "no user given; pass --user or set CLAIMS_USER".into(),
            ));
        }

        let record = users.iter().find(|u| u.email == email);

        if admin_email.is_some_and(|admin| admin == email) {
            return Ok(match record {
                Some(user) => Self::new(user.id.clone(), email, &user.name, Role::Admin),
                None => Self::new(UserId::from(email), email, "Admin", Role::Admin),
            });
        }

        record
            .map(Self::for_user)
            .ok_or_else(|| ClaimsError::Unauthorized(format!("{} is not an authorized user", email)))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
