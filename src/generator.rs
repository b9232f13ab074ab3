use crate::error::FolioError;
use crate::naming::suggested_file_name;
use folio_render_core::ImageData;
use folio_render_lopdf::{DocumentInfo, LopdfSurface};
use folio_report::plan::{self, DocumentPlan};
use folio_report::{ComparisonReport, Composer, RenderedArtifact, ReportConfig, SubjectReport};
use folio_style::PageSize;
use std::fs;
use std::path::{Path, PathBuf};

/// A rendered PDF with its page count and the placement record.
pub type PdfArtifact = RenderedArtifact<Vec<u8>>;

/// Configures and builds a [`ReportGenerator`].
#[derive(Debug, Default)]
pub struct GeneratorBuilder {
    config: ReportConfig,
    logo: Option<PathBuf>,
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads a [`ReportConfig`] from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, FolioError> {
        let path = path.as_ref();
        log::info!("Loading config from {}", path.display());
        self.config = serde_json::from_str(&fs::read_to_string(path)?)?;
        Ok(self)
    }

    /// Overrides the page size of the current config.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.config.page_size = size;
        self
    }

    /// Embeds the image at `path` on the cover. Overrides the config's logo.
    pub fn with_logo_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.logo = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Result<ReportGenerator, FolioError> {
        let logo = match self.logo.as_ref().or(self.config.logo.as_ref()) {
            Some(path) => {
                log::debug!("Loading logo from {}", path.display());
                Some(ImageData::decode(&fs::read(path)?)?)
            }
            None => None,
        };
        let mut composer = Composer::new(self.config);
        if let Some(logo) = logo {
            composer = composer.with_logo(logo);
        }
        Ok(ReportGenerator { composer })
    }
}

/// Turns report data into PDF bytes. One generator can serve any number of reports.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    composer: Composer,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { composer: Composer::new(config) }
    }

    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    pub fn config(&self) -> &ReportConfig {
        self.composer.config()
    }

    pub fn generate_single(&self, report: &SubjectReport) -> Result<PdfArtifact, FolioError> {
        self.render(&plan::single_subject(report, self.config()))
    }

    pub fn generate_comparison(
        &self,
        report: &ComparisonReport,
    ) -> Result<PdfArtifact, FolioError> {
        self.render(&plan::comparison(report, self.config()))
    }

    /// Renders any document plan to PDF bytes.
    pub fn render(&self, plan: &DocumentPlan) -> Result<PdfArtifact, FolioError> {
        let config = self.config();
        let info = DocumentInfo {
            title: Some(plan.title.clone()),
            author: Some(config.author.clone().unwrap_or_else(|| config.brand.clone())),
            creator: Some(format!("folio {}", env!("CARGO_PKG_VERSION"))),
        };
        let surface = LopdfSurface::new(Vec::new())?.with_info(info);
        Ok(self.composer.compose(plan, surface)?)
    }

    /// Writes `artifact` to `path`, or to the suggested file name inside `path` when it is a
    /// directory. Returns the path written.
    pub fn write_to<P: AsRef<Path>>(
        &self,
        artifact: &PdfArtifact,
        path: P,
        names: &[&str],
    ) -> Result<PathBuf, FolioError> {
        let path = path.as_ref();
        let target = if path.is_dir() {
            path.join(suggested_file_name(names, self.config().generated_on()))
        } else {
            path.to_path_buf()
        };
        fs::write(&target, &artifact.output)?;
        log::info!("Wrote {} pages to {}", artifact.page_count, target.display());
        Ok(target)
    }
}
