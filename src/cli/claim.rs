//! Claim CLI commands
//!
//! Implements CLI commands for submitting, listing and reviewing claims.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::claim::{format_claim_details, format_claim_list};
use crate::display::stats::format_stat_tiles;
use crate::error::{ClaimsError, ClaimsResult};
use crate::models::{ClaimId, SessionContext};
use crate::reports::DashboardView;
use crate::services::{ClaimService, NewClaim};
use crate::storage::Storage;

use super::build_filter;

/// Claim subcommands
#[derive(Subcommand)]
pub enum ClaimCommands {
    /// Submit a new expense claim
    Submit {
        /// Date the expense was incurred (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// What the expense was for
        #[arg(short = 'm', long)]
        description: String,
        /// Amount (e.g., "2500" or "2500.50")
        #[arg(short, long)]
        amount: String,
    },
    /// Show the dashboard: stat tiles and the claim table
    List {
        /// Only claims from this employee email (managers and admins)
        #[arg(short, long)]
        employee: Option<String>,
        /// Only claims on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Status tab (all, pending, approved, rejected)
        #[arg(short, long, default_value = "all")]
        status: String,
    },
    /// Show claim details
    Show {
        /// Claim ID
        id: String,
    },
    /// Approve a pending claim
    Approve {
        /// Claim ID
        id: String,
    },
    /// Reject a pending claim
    Reject {
        /// Claim ID
        id: String,
        /// Reason shown to the employee
        #[arg(short, long)]
        reason: Option<String>,
    },
    /// Delete one of your own pending claims
    Delete {
        /// Claim ID
        id: String,
    },
}

/// Handle a claim command
pub fn handle_claim_command(
    storage: &Storage,
    settings: &Settings,
    session: &SessionContext,
    cmd: ClaimCommands,
) -> ClaimsResult<()> {
    let service = ClaimService::new(storage);

    match cmd {
        ClaimCommands::Submit {
            date,
            description,
            amount,
        } => {
            let claim = service.submit(session, NewClaim::new(date, description, amount))?;

            println!("Submitted claim: {}", claim.id);
            println!("  Date: {}", claim.date);
            println!("  Description: {}", claim.description);
            println!(
                "  Amount: {}",
                claim.amount.format_with_symbol(&settings.currency_symbol)
            );
            println!("  Status: {}", claim.status());
        }

        ClaimCommands::List {
            employee,
            date,
            status,
        } => {
            let filter = build_filter(employee, date, &status)?;
            let snapshot = storage.snapshot()?;
            let view =
                DashboardView::build_with_titles(&snapshot, session, &filter, &settings.report_titles);

            println!("{}", view.report_title);
            println!(
                "{}",
                format_stat_tiles(&view.stats, view.filter.status, &settings.currency_symbol)
            );
            println!("{}", format_claim_list(&view.display, settings));
        }

        ClaimCommands::Show { id } => {
            let id = ClaimId::from(id);
            let snapshot = storage.snapshot()?;
            let claim = snapshot
                .claim(&id)
                .filter(|c| session.role.can_review() || c.owner_id == session.user_id)
                .ok_or_else(|| ClaimsError::claim_not_found(id.to_string()))?;
            print!("{}", format_claim_details(claim, settings));
        }

        ClaimCommands::Approve { id } => {
            let claim = service.approve(session, &ClaimId::from(id))?;
            println!("Approved claim: {}", claim.id);
        }

        ClaimCommands::Reject { id, reason } => {
            let claim = service.reject(session, &ClaimId::from(id), reason)?;
            println!("Rejected claim: {}", claim.id);
        }

        ClaimCommands::Delete { id } => {
            let id = ClaimId::from(id);
            service.delete(session, &id)?;
            println!("Deleted claim: {}", id);
        }
    }

    Ok(())
}
