//! Claim service
//!
//! Submission and the status transitions. Every transition passes through
//! [`TransitionGate`] first; a refused transition never reaches the store.

use chrono::{NaiveDate, Utc};
use std::fmt;

use crate::error::{ClaimsError, ClaimsResult};
use crate::models::{Claim, ClaimId, ClaimState, Money, SessionContext};
use crate::storage::ClaimStore;

/// A status-changing action on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimAction {
    Approve,
    Reject,
    Delete,
}

impl ClaimAction {
    pub const ALL: [ClaimAction; 3] = [Self::Approve, Self::Reject, Self::Delete];

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ClaimAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Validation gate for status transitions
///
/// Approve and reject need a reviewing role. Delete is for the owner only.
/// All three require the claim to still be Pending.
pub struct TransitionGate;

impl TransitionGate {
    pub fn check(session: &SessionContext, claim: &Claim, action: ClaimAction) -> ClaimsResult<()> {
        let result = Self::evaluate(session, claim, action);
        if let Err(e) = &result {
            tracing::warn!(
                claim_id = %claim.id,
                action = action.verb(),
                user = %session.email,
                error = %e,
                "Transition refused"
            );
        }
        result
    }

    /// Actions the session may be offered for this claim
    pub fn allowed_actions(session: &SessionContext, claim: &Claim) -> Vec<ClaimAction> {
        ClaimAction::ALL
            .into_iter()
            .filter(|action| Self::evaluate(session, claim, *action).is_ok())
            .collect()
    }

    fn evaluate(session: &SessionContext, claim: &Claim, action: ClaimAction) -> ClaimsResult<()> {
        match action {
            ClaimAction::Approve | ClaimAction::Reject => {
                if !session.role.can_review() {
                    return Err(ClaimsError::Forbidden(format!(
                        "{} claims requires a manager or admin role",
                        if action == ClaimAction::Approve {
                            "Approving"
                        } else {
                            "Rejecting"
                        }
                    )));
                }
            }
            ClaimAction::Delete => {
                if claim.owner_id != session.user_id {
                    return Err(ClaimsError::Forbidden(
                        "Only the submitting employee can delete a claim".into(),
                    ));
                }
            }
        }

        if !claim.is_pending() {
            return Err(ClaimsError::InvalidTransition {
                id: claim.id.to_string(),
                status: claim.status(),
                action: action.verb(),
            });
        }

        Ok(())
    }
}

/// Input for a claim submission, as typed by the employee
#[derive(Debug, Clone, Default)]
pub struct NewClaim {
    pub date: String,
    pub description: String,
    pub amount: String,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidClaim {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
}

impl NewClaim {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount: amount.into(),
        }
    }

    /// Validate every field, reporting all problems at once
    pub fn validate(&self) -> ClaimsResult<ValidClaim> {
        let mut errors = Vec::new();

        let date = self.date.trim();
        let parsed_date = if date.is_empty() {
            errors.push("Date: This field is required".to_string());
            None
        } else {
            match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.push(format!("Date: '{}' is not a valid YYYY-MM-DD date", date));
                    None
                }
            }
        };

        let description = self.description.trim();
        if description.is_empty() {
            errors.push("Description: This field is required".to_string());
        }

        let amount = self.amount.trim();
        let parsed_amount = if amount.is_empty() {
            errors.push("Amount: This field is required".to_string());
            None
        } else {
            match Money::parse(amount) {
                Ok(m) if m.is_positive() => Some(m),
                Ok(_) => {
                    errors.push("Amount must be greater than 0".to_string());
                    None
                }
                Err(e) => {
                    errors.push(format!("Amount: {}", e));
                    None
                }
            }
        };

        match (parsed_date, parsed_amount) {
            (Some(date), Some(amount)) if errors.is_empty() => Ok(ValidClaim {
                date,
                description: description.to_string(),
                amount,
            }),
            _ => Err(ClaimsError::Validation(errors.join("; "))),
        }
    }
}

/// Service for claim submission and review
pub struct ClaimService<'a> {
    store: &'a dyn ClaimStore,
}

impl<'a> ClaimService<'a> {
    pub fn new(store: &'a dyn ClaimStore) -> Self {
        Self { store }
    }

    /// Submit a new Pending claim owned by the session user
    pub fn submit(&self, session: &SessionContext, input: NewClaim) -> ClaimsResult<Claim> {
        let valid = input.validate()?;

        let claim = Claim::new(
            session.user_id.clone(),
            Some(session.display_name.clone()),
            Some(session.email.clone()),
            valid.date.format("%Y-%m-%d").to_string(),
            valid.description,
            valid.amount,
        );

        self.store.insert_claim(claim.clone())?;
        Ok(claim)
    }

    pub fn approve(&self, session: &SessionContext, id: &ClaimId) -> ClaimsResult<Claim> {
        let claim = self.load(id)?;
        TransitionGate::check(session, &claim, ClaimAction::Approve)?;

        self.store.update_claim_state(
            id,
            ClaimState::Approved {
                approved_by: Some(session.display_name.clone()),
            },
            Utc::now(),
        )
    }

    pub fn reject(
        &self,
        session: &SessionContext,
        id: &ClaimId,
        reason: Option<String>,
    ) -> ClaimsResult<Claim> {
        let claim = self.load(id)?;
        TransitionGate::check(session, &claim, ClaimAction::Reject)?;

        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        self.store.update_claim_state(
            id,
            ClaimState::Rejected {
                rejected_by: Some(session.display_name.clone()),
                reason,
            },
            Utc::now(),
        )
    }

    /// Delete a Pending claim; owner only
    pub fn delete(&self, session: &SessionContext, id: &ClaimId) -> ClaimsResult<()> {
        let claim = self.load(id)?;
        TransitionGate::check(session, &claim, ClaimAction::Delete)?;
        self.store.delete_claim(id)
    }

    fn load(&self, id: &ClaimId) -> ClaimsResult<Claim> {
        self.store
            .get_claim(id)?
            .ok_or_else(|| ClaimsError::claim_not_found(id.to_string()))
    }
}
