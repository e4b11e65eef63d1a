//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, roles, wire helpers, errors)
//! - `prospect` - Sales lead record, draft and insert payload
//! - `activity` - Logged interactions that reference a prospect
//! - `access` - Role capabilities for create and delete
//! - `session` - The role picked at sign-in
//! - `dashboard` - Derived views: stats, activity join, prospect choices
//! - `report` - Export content, independent of file format

pub mod access;
pub mod activity;
pub mod dashboard;
pub mod foundation;
pub mod prospect;
pub mod report;
pub mod session;
