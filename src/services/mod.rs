//! Service layer for expense-claims
//!
//! The pipeline stages (filter, sort, aggregate) are pure functions over
//! claim slices. The claim and user services add validation and
//! authorization on top of the record store traits.

pub mod claim;
pub mod filter;
pub mod sort;
pub mod stats;
pub mod user;

pub use claim::{ClaimAction, ClaimService, NewClaim, TransitionGate, ValidClaim};
pub use filter::{apply_filters, FilterState, FilteredClaims, StatusCategory};
pub use sort::{sort_by_date_desc, sorted_by_date_desc};
pub use stats::{CategoryStats, ClaimStats};
pub use user::{is_valid_email, NewUser, UserService};
