//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dashboard to external systems:
//! - `postgrest` - Record store over a PostgREST endpoint
//! - `memory` - In-process record store for local runs and tests
//! - `export` - PDF and XLSX renderers, local artifact storage
//! - `clock` - System and fixed clocks
//! - `http` - Axum JSON API

pub mod clock;
pub mod export;
pub mod http;
pub mod memory;
pub mod postgrest;

pub use clock::{FixedClock, SystemClock};
pub use export::{LocalArtifactStorage, PdfDocumentRenderer, XlsxWorkbookRenderer};
pub use memory::InMemoryRecordStore;
pub use postgrest::{PostgrestClient, PostgrestConfig};
