//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the role enum, wire-value helpers and error types
//! that form the vocabulary of the prospect dashboard.

mod errors;
mod ids;
mod role;
pub(crate) mod wire;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{ActivityId, InvalidRecordKey, ProspectId, RecordKey};
pub use role::{InvalidRole, Role};
