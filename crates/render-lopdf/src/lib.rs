//! PDF output for folio documents.
//!
//! [`LopdfSurface`] implements the render surface over a streaming writer: each page's
//! content stream is flushed to the sink when the page ends, so memory stays bounded by a
//! single page plus the shared resources.

mod helpers;
mod surface;
mod writer;

pub use helpers::to_win_ansi;
pub use surface::{DocumentInfo, LopdfSurface};
pub use writer::StreamingPdfWriter;
