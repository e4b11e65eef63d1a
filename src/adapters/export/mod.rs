//! Export adapters: PDF and XLSX renderers plus local artifact storage.

mod local_artifact_storage;
mod pdf_renderer;
mod xlsx_renderer;

pub use local_artifact_storage::LocalArtifactStorage;
pub use pdf_renderer::{PageLayout, PdfDocumentRenderer, PlacedText};
pub use xlsx_renderer::XlsxWorkbookRenderer;
