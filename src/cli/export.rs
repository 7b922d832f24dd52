//! Export CLI command
//!
//! Writes the current display set to an xlsx or csv file.

use clap::Args;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::ClaimsResult;
use crate::export::{export_claims, ExportFormat};
use crate::models::SessionContext;
use crate::reports::DashboardView;
use crate::storage::Storage;

use super::build_filter;

/// Export arguments
#[derive(Args)]
pub struct ExportArgs {
    /// Export format (xlsx, csv)
    pub format: String,
    /// Only claims from this employee email (managers and admins)
    #[arg(short, long)]
    pub employee: Option<String>,
    /// Only claims on this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Status tab (all, pending, approved, rejected)
    #[arg(short, long, default_value = "all")]
    pub status: String,
    /// Report title; defaults to the dashboard title for your role
    #[arg(short, long)]
    pub title: Option<String>,
    /// Directory to write the file into
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    session: &SessionContext,
    args: ExportArgs,
) -> ClaimsResult<()> {
    let format: ExportFormat = args.format.parse()?;
    let filter = build_filter(args.employee, args.date, &args.status)?;

    let snapshot = storage.snapshot()?;
    let view =
        DashboardView::build_with_titles(&snapshot, session, &filter, &settings.report_titles);
    let title = args.title.unwrap_or(view.report_title);

    let artifact = export_claims(&view.display, &title, format)?;

    let dir = args.output.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes)?;

    tracing::info!(path = %path.display(), rows = view.display.len(), "Export written");
    println!(
        "Exported {} claims to {}",
        view.display.len(),
        path.display()
    );

    Ok(())
}
