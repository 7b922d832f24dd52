//! Configuration module for expense-claims
//!
//! - Path resolution for the data directory
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ClaimsPaths;
pub use settings::{ReportTitles, Settings};
