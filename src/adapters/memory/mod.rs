//! In-memory record store for development and tests.

mod record_store;

pub use record_store::InMemoryRecordStore;
