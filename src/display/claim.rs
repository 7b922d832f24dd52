//! Claim display formatting
//!
//! Formats claims for terminal output in table and detail views.

use std::fmt::Write;

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Claim, ClaimState};

const MISSING: &str = "N/A";

#[derive(Tabled)]
struct ClaimRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Render a `YYYY-MM-DD` date with the configured format
///
/// Unparseable dates and invalid format strings leave the date as stored.
pub fn format_display_date(date: &str, format: &str) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return date.to_string();
    };

    let mut rendered = String::new();
    match write!(rendered, "{}", parsed.format(format)) {
        Ok(()) => rendered,
        Err(_) => {
            tracing::warn!(format = %format, "Invalid date format, showing stored date");
            date.to_string()
        }
    }
}

/// Format claims as a table
pub fn format_claim_list(claims: &[Claim], settings: &Settings) -> String {
    if claims.is_empty() {
        return "No claims found.".to_string();
    }

    let rows = claims.iter().map(|c| ClaimRow {
        id: c.id.to_string(),
        date: format_display_date(&c.date, &settings.date_format),
        employee: c.owner_name.clone().unwrap_or_else(|| MISSING.into()),
        email: c.owner_email.clone().unwrap_or_else(|| MISSING.into()),
        description: c.description.clone(),
        amount: c.amount.format_with_symbol(&settings.currency_symbol),
        status: c.status().to_string(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a single claim with its review details
pub fn format_claim_details(claim: &Claim, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Claim:       {}\n", claim.id));
    output.push_str(&format!(
        "Date:        {}\n",
        format_display_date(&claim.date, &settings.date_format)
    ));
    output.push_str(&format!(
        "Employee:    {}\n",
        claim.owner_name.as_deref().unwrap_or(MISSING)
    ));
    output.push_str(&format!(
        "Email:       {}\n",
        claim.owner_email.as_deref().unwrap_or(MISSING)
    ));
    output.push_str(&format!("Description: {}\n", claim.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        claim.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Status:      {}\n", claim.status()));

    match &claim.state {
        ClaimState::Pending => {}
        ClaimState::Approved { approved_by } => {
            if let Some(by) = approved_by {
                output.push_str(&format!("Approved by: {}\n", by));
            }
        }
        ClaimState::Rejected {
            rejected_by,
            reason,
        } => {
            if let Some(by) = rejected_by {
                output.push_str(&format!("Rejected by: {}\n", by));
            }
            if let Some(reason) = reason {
                output.push_str(&format!("Reason:      {}\n", reason));
            }
        }
    }

    if let Some(created) = claim.created_at {
        output.push_str(&format!(
            "Submitted:   {}\n",
            created.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}
