//! Display formatting for terminal output
//!
//! Renders claims, stat tiles and users as tables for the CLI.

pub mod claim;
pub mod stats;
pub mod user;

pub use claim::{format_claim_details, format_claim_list, format_display_date};
pub use stats::format_stat_tiles;
pub use user::format_user_list;
