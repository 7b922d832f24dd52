//! Reports module for expense-claims
//!
//! Dashboard views computed from a snapshot, and the viewing session that
//! keeps one current as snapshots arrive.

pub mod dashboard;
pub mod session;

pub use dashboard::{DashboardView, EmployeeOption};
pub use session::ViewSession;
