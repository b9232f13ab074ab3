use chrono::NaiveDate;
use folio_layout::LayoutConfig;
use folio_style::{FontSet, Length, PageSize, Palette};
use folio_types::PageGeometry;
use serde::Deserialize;
use std::path::PathBuf;

/// Which of the two document shapes is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    SingleSubject,
    Comparison,
}

/// Cosmetic settings for a render. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    pub page_size: PageSize,
    pub margin: Length,
    pub fonts: FontSet,
    pub palette: Palette,
    /// Brand line on the cover and in the running header.
    pub brand: String,
    /// Overrides the left side of the running header (the brand by default).
    pub header_text: Option<String>,
    /// Overrides the left side of the running footer.
    pub footer_text: Option<String>,
    pub website: Option<String>,
    /// Date printed on the report. Defaults to today.
    pub generated_on: Option<NaiveDate>,
    pub title: Option<String>,
    pub author: Option<String>,
    /// PNG or JPEG drawn above the brand on the cover.
    pub logo: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margin: Length(54.0),
            fonts: FontSet::default(),
            palette: Palette::default(),
            brand: "ASTROLOGY COMPATIBILITY".to_string(),
            header_text: None,
            footer_text: None,
            website: None,
            generated_on: None,
            title: None,
            author: None,
            logo: None,
        }
    }
}

impl ReportConfig {
    pub fn generated_on(&self) -> NaiveDate {
        self.generated_on.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Page geometry for a document shape. The comparison report uses tighter header and
    /// footer bands.
    pub fn geometry(&self, kind: DocumentKind) -> PageGeometry {
        let (width, height) = self.page_size.dimensions_pt();
        let chrome = ChromeLayout::for_kind(kind);
        PageGeometry::new(
            width,
            height,
            self.margin.pt(),
            chrome.content_top,
            height - chrome.bottom_band,
        )
    }

    pub fn layout(&self, kind: DocumentKind) -> LayoutConfig {
        match kind {
            DocumentKind::SingleSubject => LayoutConfig::default(),
            DocumentKind::Comparison => LayoutConfig::compact(),
        }
    }
}

/// Vertical positions of the running header and footer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeLayout {
    pub header_y: f32,
    pub header_rule_y: f32,
    pub content_top: f32,
    /// Distance from the page bottom to the end of the content area.
    pub bottom_band: f32,
    /// Distance from the page bottom to the footer text.
    pub footer_offset: f32,
}

impl ChromeLayout {
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::SingleSubject => Self {
                header_y: 30.0,
                header_rule_y: 48.0,
                content_top: 72.0,
                bottom_band: 46.0,
                footer_offset: 30.0,
            },
            DocumentKind::Comparison => Self {
                header_y: 22.0,
                header_rule_y: 36.0,
                content_top: 56.0,
                bottom_band: 40.0,
                footer_offset: 28.0,
            },
        }
    }
}
