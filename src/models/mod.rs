//! Core data models
//!
//! Claims, users, the session context passed into core operations, and the
//! immutable snapshot the record store delivers on each change.

pub mod claim;
pub mod ids;
pub mod money;
pub mod session;
pub mod snapshot;
pub mod user;

pub use claim::{Claim, ClaimDocument, ClaimIngestError, ClaimState, ClaimStatus};
pub use ids::{ClaimId, UserId};
pub use money::{Money, MoneyParseError};
pub use session::SessionContext;
pub use snapshot::Snapshot;
pub use user::{Role, User, UserDocument, UserIngestError};
