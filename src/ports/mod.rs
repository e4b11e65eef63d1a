//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProspectStore`, `ActivityStore` - The remote record store
//! - `DocumentRenderer`, `WorkbookRenderer` - Export file rendering
//! - `ArtifactStorage` - Saving rendered exports
//! - `Clock` - The current calendar day

mod artifact_storage;
mod clock;
mod export;
mod record_store;

pub use artifact_storage::{ArtifactStorage, SavedArtifact};
pub use clock::Clock;
pub use export::{DocumentRenderer, ExportError, ExportFormat, ExportedDocument, WorkbookRenderer};
pub use record_store::{ActivityStore, ProspectStore, StoreError};
