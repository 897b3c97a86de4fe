//! Institute record lifecycle
//!
//! The creation pipeline: payload normalization at the boundary,
//! validation, record assembly, and the approval state machine that
//! gates public visibility.

pub mod approval;
pub mod assemble;
pub mod normalize;
pub mod validate;

pub use approval::{ApprovalDecision, ApprovalStatus};
pub use assemble::{assemble, AssembledRecord, CallerProfile, CreateInstituteRequest, MediaDefaults};
pub use normalize::{normalize, FromRawName, ListInput};
