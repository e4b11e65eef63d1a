//! Clock port: the current calendar day.
//!
//! Activities default their date to the day they are created. Reading the
//! day through a port keeps that default testable.

use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
