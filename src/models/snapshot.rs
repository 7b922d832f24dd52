//! Snapshot of the record set
//!
//! The record store delivers the complete current claim and user lists on
//! every change. A snapshot is never mutated after it is built.

use super::claim::Claim;
use super::ids::ClaimId;
use super::user::User;

/// Complete, immutable copy of the record set at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Claims in stream order
    pub claims: Vec<Claim>,
    pub users: Vec<User>,
}

impl Snapshot {
    pub fn new(claims: Vec<Claim>, users: Vec<User>) -> Self {
        Self { claims, users }
    }

    pub fn claim(&self, id: &ClaimId) -> Option<&Claim> {
        self.claims.iter().find(|c| &c.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }
}
