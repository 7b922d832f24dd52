//! Dashboard view
//!
//! Everything a dashboard shows for one session at one snapshot: the role
//! scope, date-sorted claims, both filter layers, and the stat tiles.

use crate::config::ReportTitles;
use crate::models::{Claim, Role, SessionContext, Snapshot};
use crate::services::filter::{apply_filters, FilterState};
use crate::services::sort::sort_by_date_desc;
use crate::services::stats::ClaimStats;

/// One entry of the employee filter dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeOption {
    pub email: String,
    pub name: String,
}

/// A fully computed dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Filter actually applied (employee filter dropped for employees)
    pub filter: FilterState,
    /// Base set, sorted; the stats denominator
    pub base: Vec<Claim>,
    /// Display set, sorted; what the table and exports show
    pub display: Vec<Claim>,
    pub stats: ClaimStats,
    pub employee_options: Vec<EmployeeOption>,
    pub report_title: String,
}

impl DashboardView {
    /// Build with the default report titles
    pub fn build(snapshot: &Snapshot, session: &SessionContext, filter: &FilterState) -> Self {
        Self::build_with_titles(snapshot, session, filter, &ReportTitles::default())
    }

    pub fn build_with_titles(
        snapshot: &Snapshot,
        session: &SessionContext,
        filter: &FilterState,
        titles: &ReportTitles,
    ) -> Self {
        let mut filter = filter.clone();

        let mut scoped: Vec<Claim> = match session.role {
            Role::Employee => {
                filter.employee_email = None;
                snapshot
                    .claims
                    .iter()
                    .filter(|c| c.owner_id == session.user_id)
                    .cloned()
                    .collect()
            }
            Role::Manager | Role::Admin => snapshot.claims.clone(),
        };

        sort_by_date_desc(&mut scoped);
        let filtered = apply_filters(&scoped, &filter);
        let stats = ClaimStats::compute(&filtered.base);

        let employee_options = snapshot
            .users
            .iter()
            .map(|u| EmployeeOption {
                email: u.email.clone(),
                name: u.name.clone(),
            })
            .collect();

        tracing::debug!(
            user = %session.email,
            base = filtered.base.len(),
            display = filtered.display.len(),
            "Dashboard rebuilt"
        );

        Self {
            filter,
            base: filtered.base,
            display: filtered.display,
            stats,
            employee_options,
            report_title: titles.for_role(session.role).to_string(),
        }
    }
}
