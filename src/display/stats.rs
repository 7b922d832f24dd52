//! Stat tile formatting

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::services::filter::StatusCategory;
use crate::services::stats::ClaimStats;

/// One column per status category: count on top, amount below.
/// The active tab is marked with `*`.
pub fn format_stat_tiles(stats: &ClaimStats, active: StatusCategory, currency_symbol: &str) -> String {
    let mut builder = Builder::default();

    builder.push_record(StatusCategory::ALL.iter().map(|c| {
        if *c == active {
            format!("*{}*", c.label())
        } else {
            c.label().to_string()
        }
    }));
    builder.push_record(
        StatusCategory::ALL
            .iter()
            .map(|c| format!("{} claims", stats.get(*c).count)),
    );
    builder.push_record(
        StatusCategory::ALL
            .iter()
            .map(|c| stats.get(*c).amount.format_with_symbol(currency_symbol)),
    );

    builder.build().with(Style::rounded()).to_string()
}
