//! expense-claims - travel-expense claim tracking
//!
//! This library provides the core of the claims dashboard: filtering,
//! aggregate statistics, ordering and report export over a claim set,
//! plus the status transitions employees, managers and admins perform.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (claims, users, sessions, snapshots)
//! - `storage`: JSON file record store and the snapshot feed
//! - `services`: Filter, sort and aggregation stages; claim and user services
//! - `reports`: Dashboard views and viewing sessions
//! - `export`: XLSX and CSV report export
//! - `display`: Terminal tables
//! - `cli`: Command handlers for the `claims` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_claims::reports::DashboardView;
//! use expense_claims::services::{FilterState, StatusCategory};
//!
//! let filter = FilterState::new().status(StatusCategory::Pending);
//! let view = DashboardView::build(&snapshot, &session, &filter);
//! println!("{} pending", view.stats.pending.count);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ClaimsError, ClaimsResult};
