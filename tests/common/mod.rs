#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use folio::{ComparisonReport, FolioError, PdfArtifact, ReportGenerator, SubjectReport};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
    /// Page count reported by the composer
    pub reported_pages: usize,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from a rendered artifact
    pub fn from_artifact(artifact: PdfArtifact) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&artifact.output)?;
        Ok(Self { bytes: artifact.output, doc, reported_pages: artifact.page_count })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// First page (1-based) whose text contains `needle`
    pub fn page_of(&self, needle: &str) -> Option<usize> {
        pdf_assertions::page_containing(&self.doc, needle)
    }

    /// First page (1-based) whose text contains every one of `needles`
    pub fn page_with_all(&self, needles: &[&str]) -> Option<usize> {
        (1..=self.page_count()).find(|&n| {
            let text = pdf_assertions::page_text(&self.doc, n);
            needles.iter().all(|needle| text.contains(needle))
        })
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn generator() -> ReportGenerator {
    ReportGenerator::new(fixtures::config())
}

pub fn render_single(report: &SubjectReport) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    init_logger();
    let artifact = generator().generate_single(report)?;
    GeneratedPdf::from_artifact(artifact)
}

pub fn render_comparison(
    report: &ComparisonReport,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    init_logger();
    let artifact = generator().generate_comparison(report)?;
    GeneratedPdf::from_artifact(artifact)
}

/// Renders and keeps the error type, for tests that inspect failures
pub fn try_render_single(report: &SubjectReport) -> Result<PdfArtifact, FolioError> {
    init_logger();
    generator().generate_single(report)
}
