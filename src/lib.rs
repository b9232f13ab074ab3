//! folio renders astrology compatibility reports as paginated PDF documents.
//!
//! ```no_run
//! use folio::{ReportGenerator, ReportConfig, SubjectReport};
//!
//! let report: SubjectReport = serde_json::from_str(&std::fs::read_to_string("report.json")?)?;
//! let generator = ReportGenerator::new(ReportConfig::default());
//! let artifact = generator.generate_single(&report)?;
//! std::fs::write("report.pdf", &artifact.output)?;
//! # Ok::<(), folio::FolioError>(())
//! ```

pub mod error;
mod generator;
pub mod naming;

pub use error::FolioError;
pub use generator::{GeneratorBuilder, PdfArtifact, ReportGenerator};
pub use naming::{suggested_file_name, suggested_slug};

pub use folio_report::{
    ComparisonEntry, ComparisonReport, Composer, DocumentPlan, RenderedArtifact, ReportConfig,
    SubjectReport,
};
