//! Export module for expense-claims
//!
//! Turns the display set into a downloadable artifact:
//! - XLSX: a single `Claims` sheet
//! - CSV: the same header and rows as plain text
//!
//! Exports are pure: they return bytes and a file name and never touch the
//! filesystem. Writing the artifact somewhere is the caller's business.

pub mod csv;
pub mod xlsx;

use chrono::{NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClaimsError, ClaimsResult};
use crate::models::{Claim, Money};

pub use self::csv::export_csv;
pub use self::xlsx::export_xlsx;

/// Column headers, in order
pub const HEADERS: [&str; 6] = ["Date", "Employee", "Email", "Description", "Amount", "Status"];

/// Placeholder for absent owner fields
pub const MISSING: &str = "N/A";

/// Title used when the caller gives none
pub const DEFAULT_TITLE: &str = "Claims_Report";

/// One exported row, shared by every encoder
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub date: String,
    pub employee: String,
    pub email: String,
    pub description: String,
    pub amount: Money,
    pub status: &'static str,
}

impl ExportRow {
    pub fn from_claim(claim: &Claim) -> Self {
        Self {
            date: claim.date.clone(),
            employee: claim
                .owner_name
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
            email: claim
                .owner_email
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
            description: claim.description.clone(),
            amount: claim.amount,
            status: claim.status().label(),
        }
    }

    /// Cells as text, in header order
    pub fn to_record(&self) -> [String; 6] {
        [
            self.date.clone(),
            self.employee.clone(),
            self.email.clone(),
            self.description.clone(),
            self.amount.to_plain_string(),
            self.status.to_string(),
        ]
    }
}

/// Supported export encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ClaimsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            other => Err(ClaimsError::Validation(format!(
                "Unsupported export format '{}'. Use xlsx or csv",
                other
            ))),
        }
    }
}

/// A finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `<title>_<YYYY-MM-DD>.<ext>`; a blank title falls back to [`DEFAULT_TITLE`]
pub fn export_file_name(title: &str, created_on: NaiveDate, format: ExportFormat) -> String {
    let title = title.trim();
    let title = if title.is_empty() { DEFAULT_TITLE } else { title };
    // Path separators would turn the name into a path
    let title = title.replace(['/', '\\'], "_");
    format!(
        "{}_{}.{}",
        title,
        created_on.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Encode claims in the given format, naming the file for `created_on`
pub fn export_claims_on(
    claims: &[Claim],
    title: &str,
    format: ExportFormat,
    created_on: NaiveDate,
) -> ClaimsResult<ExportArtifact> {
    let rows: Vec<ExportRow> = claims.iter().map(ExportRow::from_claim).collect();

    let bytes = match format {
        ExportFormat::Xlsx => export_xlsx(&rows)?,
        ExportFormat::Csv => export_csv(&rows)?,
    };

    let file_name = export_file_name(title, created_on, format);
    tracing::debug!(file = %file_name, rows = rows.len(), bytes = bytes.len(), "Export built");

    Ok(ExportArtifact {
        file_name,
        content_type: format.content_type(),
        bytes,
    })
}

/// Encode claims, naming the file for today's date (UTC)
pub fn export_claims(
    claims: &[Claim],
    title: &str,
    format: ExportFormat,
) -> ClaimsResult<ExportArtifact> {
    export_claims_on(claims, title, format, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClaimState, UserId};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 25).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            export_file_name("Manager Claims Report", day(), ExportFormat::Xlsx),
            "Manager Claims Report_2024-11-25.xlsx"
        );
        assert_eq!(
            export_file_name("", day(), ExportFormat::Csv),
            "Claims_Report_2024-11-25.csv"
        );
        assert_eq!(
            export_file_name("Q4/Travel", day(), ExportFormat::Csv),
            "Q4_Travel_2024-11-25.csv"
        );
    }

    #[test]
    fn test_row_uses_placeholder_for_missing_owner() {
        let mut claim = Claim::new(
            UserId::from("u1"),
            None,
            None,
            "2024-11-20",
            "Taxi",
            Money::from_cents(45050),
        );
        claim.state = ClaimState::Approved { approved_by: None };

        let row = ExportRow::from_claim(&claim);
        assert_eq!(
            row.to_record(),
            ["2024-11-20", "N/A", "N/A", "Taxi", "450.50", "Approved"].map(String::from)
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("pdf".parse::<ExportFormat>().unwrap_err().is_validation());
    }

    #[test]
    fn test_artifact_metadata() {
        let artifact = export_claims_on(&[], "Claims", ExportFormat::Csv, day()).unwrap();
        assert_eq!(artifact.file_name, "Claims_2024-11-25.csv");
        assert_eq!(artifact.content_type, "text/csv");

        let artifact = export_claims_on(&[], "Claims", ExportFormat::Xlsx, day()).unwrap();
        assert_eq!(
            artifact.content_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert!(artifact.bytes.starts_with(b"PK"));
    }
}
