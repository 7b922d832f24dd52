//! Live dashboard
//!
//! Polls the record store on a background thread and redraws the
//! dashboard whenever a new snapshot arrives.

use clap::Args;
use std::time::Duration;

use crate::config::Settings;
use crate::display::claim::format_claim_list;
use crate::display::stats::format_stat_tiles;
use crate::error::ClaimsResult;
use crate::models::SessionContext;
use crate::reports::{DashboardView, ViewSession};
use crate::storage::{spawn_store_poller, SnapshotFeed, Storage};

use super::build_filter;

/// Watch arguments
#[derive(Args)]
pub struct WatchArgs {
    /// Poll interval in milliseconds; defaults to the configured interval
    #[arg(short, long)]
    pub interval_ms: Option<u64>,
    /// Only claims from this employee email (managers and admins)
    #[arg(short, long)]
    pub employee: Option<String>,
    /// Only claims on this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Status tab (all, pending, approved, rejected)
    #[arg(short, long, default_value = "all")]
    pub status: String,
}

/// Run the live dashboard until the process is interrupted
pub fn handle_watch_command(
    storage: &Storage,
    settings: &Settings,
    session: &SessionContext,
    args: WatchArgs,
) -> ClaimsResult<()> {
    let filter = build_filter(args.employee, args.date, &args.status)?;
    let interval = Duration::from_millis(args.interval_ms.unwrap_or(settings.watch_interval_ms));

    let (feed, receiver) = SnapshotFeed::channel();
    let poller = spawn_store_poller(storage.paths().clone(), interval, feed);

    let mut view_session = ViewSession::new(session.clone(), receiver)
        .with_titles(settings.report_titles.clone())
        .with_filter(filter);

    tracing::info!(interval_ms = interval.as_millis() as u64, "Watching for changes");

    while let Some(view) = view_session.next_view() {
        // Clear screen, cursor home
        print!("\x1B[2J\x1B[H");
        print!("{}", render(&view, settings));
    }

    poller.stop();
    Ok(())
}

fn render(view: &DashboardView, settings: &Settings) -> String {
    format!(
        "{}\n{}\n{}\n\nWatching for changes. Press Ctrl-C to quit.\n",
        view.report_title,
        format_stat_tiles(&view.stats, view.filter.status, &settings.currency_symbol),
        format_claim_list(&view.display, settings)
    )
}
