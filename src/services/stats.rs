//! Aggregate statistics over the base-filtered claim set
//!
//! Stats describe the base set, never the display set, so switching status
//! tabs does not change them.

use crate::models::{Claim, ClaimStatus, Money};

use super::filter::StatusCategory;

/// Count and amount total for one status category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub count: usize,
    pub amount: Money,
}

impl CategoryStats {
    fn add(&mut self, claim: &Claim) {
        self.count += 1;
        self.amount += claim.amount;
    }
}

/// Stat tiles for a dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimStats {
    pub all: CategoryStats,
    pub pending: CategoryStats,
    pub approved: CategoryStats,
    pub rejected: CategoryStats,
}

impl ClaimStats {
    /// Single pass over the base set
    pub fn compute(base: &[Claim]) -> Self {
        let mut stats = Self::default();
        for claim in base {
            stats.all.add(claim);
            match claim.status() {
                ClaimStatus::Pending => stats.pending.add(claim),
                ClaimStatus::Approved => stats.approved.add(claim),
                ClaimStatus::Rejected => stats.rejected.add(claim),
            }
        }
        stats
    }

    pub fn get(&self, category: StatusCategory) -> CategoryStats {
        match category {
            StatusCategory::All => self.all,
            StatusCategory::Pending => self.pending,
            StatusCategory::Approved => self.approved,
            StatusCategory::Rejected => self.rejected,
        }
    }
}
