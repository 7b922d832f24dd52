//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod claim;
pub mod export;
pub mod user;
pub mod watch;

pub use claim::{handle_claim_command, ClaimCommands};
pub use export::{handle_export_command, ExportArgs};
pub use user::{handle_user_command, UserCommands};
pub use watch::{handle_watch_command, WatchArgs};

use crate::config::Settings;
use crate::error::{ClaimsError, ClaimsResult};
use crate::models::SessionContext;
use crate::services::filter::{FilterState, StatusCategory};
use crate::storage::Storage;

/// Resolve the signed-in user against the stored user list
pub fn resolve_session(
    storage: &Storage,
    settings: &Settings,
    user: Option<&str>,
) -> ClaimsResult<SessionContext> {
    let users = storage.users.get_all()?;
    let session = SessionContext::resolve(
        user.unwrap_or_default(),
        &users,
        settings.admin_email.as_deref(),
    )?;
    tracing::debug!(email = %session.email, role = %session.role, "Session resolved");
    Ok(session)
}

/// Build a filter from command-line options
pub(crate) fn build_filter(
    employee: Option<String>,
    date: Option<String>,
    status: &str,
) -> ClaimsResult<FilterState> {
    let status: StatusCategory = status.parse()?;
    let mut filter = FilterState::new().status(status);
    filter.employee_email = employee;
    filter.date = date;
    Ok(filter)
}

/// Parse a role argument
pub(crate) fn parse_role(role: &str) -> ClaimsResult<crate::models::Role> {
    crate::models::Role::parse(role).ok_or_else(|| {
        ClaimsError::Validation(format!(
            "Invalid role: '{}'. Valid roles: employee, manager, admin",
            role
        ))
    })
}
