//! Prospect Tracker - Sales prospect and follow-up activity dashboard
//!
//! Marketing staff log prospects and activities, managers review them, and
//! superadmins may also delete. Records live in a PostgREST-backed store;
//! the dashboard derives status statistics, joins activities to prospect
//! names and exports the lists as PDF and XLSX.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
