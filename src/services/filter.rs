//! Claim filtering
//!
//! Two layers: the *base* filter (employee and date) that statistics are
//! computed over, and the *display* filter that additionally restricts to a
//! status category for the visible table and exports. Every predicate is an
//! exact, case-sensitive comparison, and an unset or empty value matches
//! everything.

use std::fmt;
use std::str::FromStr;

use crate::error::ClaimsError;
use crate::models::{Claim, ClaimStatus};

/// Status tab: all claims or one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusCategory {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 4] = [Self::All, Self::Pending, Self::Approved, Self::Rejected];

    /// Parse a category from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        ClaimStatus::parse(s).map(Self::from)
    }

    /// Whether a claim with this status belongs in the category
    pub fn includes(&self, status: ClaimStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == ClaimStatus::Pending,
            Self::Approved => status == ClaimStatus::Approved,
            Self::Rejected => status == ClaimStatus::Rejected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl From<ClaimStatus> for StatusCategory {
    fn from(status: ClaimStatus) -> Self {
        match status {
            ClaimStatus::Pending => Self::Pending,
            ClaimStatus::Approved => Self::Approved,
            ClaimStatus::Rejected => Self::Rejected,
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusCategory {
    type Err = ClaimsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ClaimsError::Validation(format!(
                "Invalid status '{}'. Valid values: all, pending, approved, rejected",
                s
            ))
        })
    }
}

/// Transient filter state held by a viewing session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Exact match against the claim's owner email
    pub employee_email: Option<String>,
    /// Exact match against the claim date (`YYYY-MM-DD`)
    pub date: Option<String>,
    pub status: StatusCategory,
}

impl FilterState {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by employee email
    pub fn employee(mut self, email: impl Into<String>) -> Self {
        self.employee_email = Some(email.into());
        self
    }

    /// Filter by claim date
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Filter by status tab
    pub fn status(mut self, status: StatusCategory) -> Self {
        self.status = status;
        self
    }

    /// Drop the employee and date filters, keeping the status tab
    pub fn clear(&mut self) {
        self.employee_email = None;
        self.date = None;
    }

    /// Whether an employee or date filter is active
    pub fn is_narrowed(&self) -> bool {
        active(&self.employee_email).is_some() || active(&self.date).is_some()
    }

    /// Employee and date predicates; status is not considered
    pub fn matches_base(&self, claim: &Claim) -> bool {
        matches_employee(claim, active(&self.employee_email))
            && matches_date(claim, active(&self.date))
    }

    /// Base predicates plus the status category
    pub fn matches_display(&self, claim: &Claim) -> bool {
        self.matches_base(claim) && self.status.includes(claim.status())
    }
}

/// Empty strings count as unset
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn matches_employee(claim: &Claim, email: Option<&str>) -> bool {
    email.map_or(true, |email| claim.owner_email.as_deref() == Some(email))
}

fn matches_date(claim: &Claim, date: Option<&str>) -> bool {
    date.map_or(true, |date| claim.date == date)
}

/// Claims narrowed to one employee email
pub fn filter_by_employee(claims: &[Claim], email: &str) -> Vec<Claim> {
    let email = Some(email).filter(|e| !e.is_empty());
    claims
        .iter()
        .filter(|c| matches_employee(c, email))
        .cloned()
        .collect()
}

/// Claims narrowed to one date
pub fn filter_by_date(claims: &[Claim], date: &str) -> Vec<Claim> {
    let date = Some(date).filter(|d| !d.is_empty());
    claims
        .iter()
        .filter(|c| matches_date(c, date))
        .cloned()
        .collect()
}

/// Claims narrowed to one status category
pub fn filter_by_status(claims: &[Claim], status: StatusCategory) -> Vec<Claim> {
    claims
        .iter()
        .filter(|c| status.includes(c.status()))
        .cloned()
        .collect()
}

/// Output of the filter stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredClaims {
    /// Employee and date applied; the denominator for statistics
    pub base: Vec<Claim>,
    /// Base plus status category; what the table and exports show
    pub display: Vec<Claim>,
}

/// Run both filter layers over a claim set, preserving input order
pub fn apply_filters(claims: &[Claim], filter: &FilterState) -> FilteredClaims {
    let base: Vec<Claim> = claims
        .iter()
        .filter(|c| filter.matches_base(c))
        .cloned()
        .collect();
    let display = filter_by_status(&base, filter.status);
    FilteredClaims { base, display }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClaimState, Money, UserId};

    fn claim(email: Option<&str>, date: &str, units: i64, state: ClaimState) -> Claim {
        let mut c = Claim::new(
            UserId::from(email.unwrap_or("anon")),
            email.map(|_| "Someone".to_string()),
            email.map(str::to_string),
            date,
            "Expense",
            Money::from_units(units),
        );
        c.state = state;
        c
    }

    fn approved() -> ClaimState {
        ClaimState::Approved { approved_by: None }
    }

    fn rejected() -> ClaimState {
        ClaimState::Rejected {
            rejected_by: None,
            reason: None,
        }
    }

    fn sample() -> Vec<Claim> {
        vec![
            claim(Some("raj@example.com"), "2024-11-20", 2500, ClaimState::Pending),
            claim(Some("raj@example.com"), "2024-11-18", 8500, approved()),
            claim(Some("amit@example.com"), "2024-11-18", 5000, ClaimState::Pending),
            claim(Some("amit@example.com"), "2024-11-10", 12000, rejected()),
            claim(None, "2024-11-18", 450, approved()),
        ]
    }

    fn ids(claims: &[Claim]) -> Vec<String> {
        claims.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn test_status_category_parse() {
        assert_eq!(StatusCategory::parse("all"), Some(StatusCategory::All));
        assert_eq!(StatusCategory::parse("ALL"), Some(StatusCategory::All));
        assert_eq!(StatusCategory::parse("Pending"), Some(StatusCategory::Pending));
        assert_eq!(StatusCategory::parse("rejected"), Some(StatusCategory::Rejected));
        assert!("done".parse::<StatusCategory>().unwrap_err().is_validation());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let claims = sample();
        let filtered = apply_filters(&claims, &FilterState::new());
        assert_eq!(filtered.base, claims);
        assert_eq!(filtered.display, claims);
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let claims = sample();
        let filter = FilterState::new().employee("").date("");
        assert!(!filter.is_narrowed());
        assert_eq!(apply_filters(&claims, &filter).base.len(), claims.len());
    }

    #[test]
    fn test_employee_filter_is_exact() {
        let claims = sample();
        let filtered = apply_filters(&claims, &FilterState::new().employee("raj@example.com"));
        assert_eq!(filtered.base.len(), 2);

        let upper = apply_filters(&claims, &FilterState::new().employee("RAJ@example.com"));
        assert!(upper.base.is_empty());

        let partial = apply_filters(&claims, &FilterState::new().employee("raj"));
        assert!(partial.base.is_empty());
    }

    #[test]
    fn test_date_filter_is_exact() {
        let claims = sample();
        let filtered = apply_filters(&claims, &FilterState::new().date("2024-11-18"));
        assert_eq!(filtered.base.len(), 3);
    }

    #[test]
    fn test_malformed_date_matches_nothing() {
        let claims = sample();
        let filtered = apply_filters(&claims, &FilterState::new().date("18/11/2024"));
        assert!(filtered.base.is_empty());
        assert!(filtered.display.is_empty());
    }

    #[test]
    fn test_status_only_applies_to_display() {
        let claims = sample();
        let filter = FilterState::new()
            .date("2024-11-18")
            .status(StatusCategory::Approved);
        let filtered = apply_filters(&claims, &filter);
        assert_eq!(filtered.base.len(), 3);
        assert_eq!(filtered.display.len(), 2);
        assert!(filtered
            .display
            .iter()
            .all(|c| c.status() == ClaimStatus::Approved));
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let claims = sample();
        let filter = FilterState::new()
            .employee("amit@example.com")
            .status(StatusCategory::Pending);
        let once = apply_filters(&claims, &filter);
        let twice = apply_filters(&once.display, &filter);
        assert_eq!(once.display, twice.display);
        assert_eq!(once, apply_filters(&claims, &filter));
    }

    #[test]
    fn test_employee_and_date_filters_commute() {
        let claims = sample();
        let a = filter_by_date(&filter_by_employee(&claims, "raj@example.com"), "2024-11-18");
        let b = filter_by_employee(&filter_by_date(&claims, "2024-11-18"), "raj@example.com");
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.len(), 1);

        let combined = apply_filters(
            &claims,
            &FilterState::new()
                .employee("raj@example.com")
                .date("2024-11-18"),
        );
        assert_eq!(ids(&combined.base), ids(&a));
    }

    #[test]
    fn test_status_filter_commutes_with_base() {
        let claims = sample();
        let a = filter_by_status(&filter_by_date(&claims, "2024-11-18"), StatusCategory::Pending);
        let b = filter_by_date(&filter_by_status(&claims, StatusCategory::Pending), "2024-11-18");
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn test_unknown_employee_matches_nothing() {
        let claims = sample();
        let filtered = apply_filters(&claims, &FilterState::new().employee("nobody@x.com"));
        assert!(filtered.base.is_empty());
    }

    #[test]
    fn test_clear_keeps_status_tab() {
        let mut filter = FilterState::new()
            .employee("raj@example.com")
            .date("2024-11-18")
            .status(StatusCategory::Rejected);
        filter.clear();
        assert!(!filter.is_narrowed());
        assert_eq!(filter.status, StatusCategory::Rejected);
    }
}
