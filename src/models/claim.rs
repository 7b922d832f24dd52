//! Claim model
//!
//! A claim is a single expense-reimbursement request. Its lifecycle state is
//! a sum type: actor and rejection details exist only on the variants where
//! they mean something.
//!
//! The record store hands claims over as loose documents ([`ClaimDocument`]).
//! [`Claim::from_document`] is the ingestion boundary: status casing is
//! normalized there and unusable amounts are coerced to zero, so everything
//! downstream works with a single canonical shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::ids::{ClaimId, UserId};
use super::money::Money;

/// Lifecycle status of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClaimStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Parse a status string regardless of casing ("Pending", "pending", "PENDING")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Canonical label used for storage, tables and exports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Approved and Rejected are terminal
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimIngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ClaimIngestError::UnknownStatus(s.to_string()))
    }
}

/// Status together with the fields that only exist in that status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClaimState {
    #[default]
    Pending,
    Approved {
        approved_by: Option<String>,
    },
    Rejected {
        rejected_by: Option<String>,
        reason: Option<String>,
    },
}

impl ClaimState {
    pub fn status(&self) -> ClaimStatus {
        match self {
            Self::Pending => ClaimStatus::Pending,
            Self::Approved { .. } => ClaimStatus::Approved,
            Self::Rejected { .. } => ClaimStatus::Rejected,
        }
    }

    /// Who moved the claim out of Pending, if recorded
    pub fn actor(&self) -> Option<&str> {
        match self {
            Self::Pending => None,
            Self::Approved { approved_by } => approved_by.as_deref(),
            Self::Rejected { rejected_by, .. } => rejected_by.as_deref(),
        }
    }
}

/// An expense claim
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub id: ClaimId,

    /// Submitting employee; never changes
    pub owner_id: UserId,

    /// Display name captured at submission
    pub owner_name: Option<String>,

    /// Email captured at submission; join key against user records
    pub owner_email: Option<String>,

    /// Calendar date the expense was incurred, `YYYY-MM-DD`
    pub date: String,

    pub description: String,

    pub amount: Money,

    pub state: ClaimState,

    /// Assigned by the record store; absent while the server timestamp is pending
    pub created_at: Option<DateTime<Utc>>,

    /// Set on the first status transition
    pub updated_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Create a new Pending claim
    pub fn new(
        owner_id: UserId,
        owner_name: Option<String>,
        owner_email: Option<String>,
        date: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            id: ClaimId::new(),
            owner_id,
            owner_name,
            owner_email,
            date: date.into(),
            description: description.into(),
            amount,
            state: ClaimState::Pending,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    pub fn status(&self) -> ClaimStatus {
        self.state.status()
    }

    pub fn is_pending(&self) -> bool {
        self.status() == ClaimStatus::Pending
    }

    /// Move to a new state, stamping `updated_at`
    pub fn set_state(&mut self, state: ClaimState, at: DateTime<Utc>) {
        self.state = state;
        self.updated_at = Some(at);
    }

    /// Build a claim from a stored document, normalizing status and amount
    pub fn from_document(doc: ClaimDocument) -> Result<Self, ClaimIngestError> {
        let status: ClaimStatus = doc.status.parse()?;

        let amount = match coerce_amount(&doc.amount) {
            Some(amount) => amount,
            None => {
                tracing::warn!(
                    claim_id = doc.id.as_deref().unwrap_or("<unassigned>"),
                    amount = %doc.amount,
                    "Claim amount is not a positive number, counting it as zero"
                );
                Money::zero()
            }
        };

        let state = match status {
            ClaimStatus::Pending => ClaimState::Pending,
            ClaimStatus::Approved => ClaimState::Approved {
                approved_by: doc.approved_by,
            },
            ClaimStatus::Rejected => ClaimState::Rejected {
                rejected_by: doc.rejected_by,
                reason: doc.rejection_reason,
            },
        };

        // Older records carry no uid; the email is the only stable owner key then
        let owner_id = doc
            .uid
            .or_else(|| doc.email.clone())
            .map(UserId::from)
            .unwrap_or_else(|| UserId::from_string(""));

        let id = match doc.id {
            Some(id) => ClaimId::from(id),
            None => ClaimId::derived(&format!(
                "{}|{}|{}|{}",
                owner_id, doc.date, doc.description, doc.amount
            )),
        };

        Ok(Self {
            id,
            owner_id,
            owner_name: doc.user_name.filter(|s| !s.is_empty()),
            owner_email: doc.email.filter(|s| !s.is_empty()),
            date: doc.date,
            description: doc.description,
            amount,
            state,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }

    /// Convert to the stored document shape
    pub fn to_document(&self) -> ClaimDocument {
        let (approved_by, rejected_by, rejection_reason) = match &self.state {
            ClaimState::Pending => (None, None, None),
            ClaimState::Approved { approved_by } => (approved_by.clone(), None, None),
            ClaimState::Rejected {
                rejected_by,
                reason,
            } => (None, rejected_by.clone(), reason.clone()),
        };

        let amount = if self.amount.cents_part() == 0 {
            Value::from(self.amount.units())
        } else {
            Value::from(self.amount.as_f64())
        };

        ClaimDocument {
            id: Some(self.id.to_string()),
            uid: Some(self.owner_id.to_string()),
            user_name: self.owner_name.clone(),
            email: self.owner_email.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
            amount,
            status: self.status().label().to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            approved_by,
            rejected_by,
            rejection_reason,
        }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date,
            self.description,
            self.amount,
            self.status()
        )
    }
}

/// Positive amounts only; anything else is `None`
fn coerce_amount(value: &Value) -> Option<Money> {
    let amount = match value {
        Value::Number(n) => n.as_f64().and_then(Money::from_f64),
        Value::String(s) => Money::parse(s).ok(),
        _ => None,
    }?;

    amount.is_positive().then_some(amount)
}

/// Claim as stored in the record store
///
/// Field names follow the store's camelCase documents. The demo data set
/// used `employeeName`/`employeeEmail`/`timestamp`, which are accepted as
/// aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(default, alias = "employeeName", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(default, alias = "employeeEmail", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub amount: Value,

    #[serde(default)]
    pub status: String,

    #[serde(default, alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Reasons a stored claim document cannot be ingested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimIngestError {
    UnknownStatus(String),
}

impl fmt::Display for ClaimIngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStatus(s) => write!(f, "Unknown claim status: '{}'", s),
        }
    }
}

impl std::error::Error for ClaimIngestError {}
