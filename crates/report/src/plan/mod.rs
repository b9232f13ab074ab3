//! Declarative description of a document. A plan says what goes on the pages; the composer
//! decides where it lands.

mod comparison;
mod single;

pub use comparison::comparison;
pub use single::single_subject;

use crate::config::DocumentKind;
use crate::theme::Tone;
use folio_layout::ColumnMode;
use folio_style::TextRole;

/// Everything the composer needs to draw one report.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub kind: DocumentKind,
    /// Document title for the PDF metadata.
    pub title: String,
    pub chrome: ChromeText,
    pub cover: Option<Cover>,
    pub sections: Vec<Section>,
}

/// Running header and footer texts. `{page}` is replaced with the page number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChromeText {
    pub header_left: String,
    pub header_right: String,
    pub footer_left: String,
    pub footer_right: String,
}

impl ChromeText {
    pub const PAGE_PLACEHOLDER: &'static str = "{page}";

    pub fn resolve(text: &str, page: usize) -> String {
        text.replace(Self::PAGE_PLACEHOLDER, &page.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cover {
    /// Y of the first item.
    pub start_y: f32,
    /// Double border frame with corner brackets.
    pub framed: bool,
    pub items: Vec<CoverItem>,
    /// Lines anchored to the page bottom, as `(distance from bottom, text)`.
    pub footer: Vec<(f32, CoverText)>,
}

/// One centered element of the cover, stacked top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverItem {
    /// The configured logo, skipped when none is loaded.
    Logo { size: f32 },
    Text(CoverText),
    Rule { half_width: f32, alpha: f32, diamond: bool, after: f32 },
    ScoreDial { fraction: f32, score: u32, max: u32, diameter: f32 },
    Stars { filled: u8 },
    Gap(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverText {
    pub text: String,
    pub role: TextRole,
    pub tone: Tone,
    pub alpha: f32,
    pub size: Option<f32>,
    pub letter_spacing: Option<f32>,
    /// Cursor advance after the line.
    pub advance: f32,
}

impl CoverText {
    pub fn new(text: impl Into<String>, role: TextRole, tone: Tone, advance: f32) -> Self {
        Self {
            text: text.into(),
            role,
            tone,
            alpha: 1.0,
            size: None,
            letter_spacing: None,
            advance,
        }
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn spaced(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = Some(letter_spacing);
        self
    }
}

/// One block of the document body, drawn in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Verdict(VerdictCard),
    Reasons(ReasonList),
    Table(TableSection),
    Narrative(Narrative),
    Summary(ExecutiveSummary),
    Status(StatusCard),
    Disclaimer(Disclaimer),
    /// Starts a fresh content page unless the cursor already sits at the top of one.
    PageBreak,
    Spacing(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerdictCard {
    pub title: String,
    pub lines: Vec<VerdictLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerdictLine {
    pub label: String,
    pub value: VerdictValue,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VerdictValue {
    Text(String),
    /// Filled stars out of five.
    Stars(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReasonList {
    pub title: String,
    pub reasons: Vec<String>,
    /// Small type with a hanging marker, used inside comparison analyses.
    pub compact: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSection {
    /// Drawn with the ornamental divider and kept with the first rows.
    pub title: Option<String>,
    pub table: TableSpec,
    pub legend: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub columns: ColumnMode,
    pub rows: Vec<TableRow>,
}

impl TableSpec {
    /// A measured table from parsed narrative rows. The first row is the header.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, cells)| TableRow {
                band: if i == 0 { RowBand::Header } else { RowBand::Body },
                cells: cells.iter().map(|text| TableCell::new(text.clone())).collect(),
            })
            .collect();
        Self { columns: ColumnMode::Measured, rows }
    }

    pub fn texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.text.clone()).collect())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowBand {
    Header,
    Body,
    /// Filled like the header, white bold text.
    Total,
    /// Accent-tinted row for the adjusted total.
    Highlight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub band: RowBand,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(band: RowBand, cells: Vec<TableCell>) -> Self {
        Self { band, cells }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub tone: Tone,
    pub bold: bool,
}

impl TableCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Text, bold: false }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone, bold: false }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Free text parsed with the markup parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Narrative {
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutiveSummary {
    pub title: String,
    pub recommendation: Recommendation,
    pub cards: Vec<ScoreCard>,
    pub footnote: String,
    pub chart: BarChart,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub headline: String,
    pub detail: String,
    /// Accent for a real recommendation, caution when nobody qualifies.
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub name: String,
    pub score: String,
    pub actual: String,
    pub badge: String,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub max: f32,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f32,
    pub value_text: String,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusCard {
    pub title: String,
    pub score: String,
    pub label: String,
    pub positive: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Disclaimer {
    pub heading: String,
    pub body: String,
    pub copyright: String,
}

impl Disclaimer {
    pub fn standard(brand: &str, website: Option<&str>, year: i32) -> Self {
        let mut copyright = format!("\u{a9} {} {}", year, title_case(brand));
        if let Some(site) = website {
            copyright.push_str(" \u{b7} ");
            copyright.push_str(site);
        }
        Self {
            heading: "AI-Generated Analysis".to_string(),
            body: "This report is generated using AI based on vedic astrology principles. \
                   Results are for informational and entertainment purposes only."
                .to_string(),
            copyright,
        }
    }
}

/// "ASTROLOGY COMPATIBILITY" becomes "Astrology Compatibility".
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_placeholder_is_substituted() {
        assert_eq!(ChromeText::resolve("Page {page}", 3), "Page 3");
        assert_eq!(ChromeText::resolve("no page", 3), "no page");
    }

    #[test]
    fn parsed_rows_become_a_measured_table() {
        let rows = vec![
            vec!["Area".to_string(), "Note".to_string()],
            vec!["Nadi".to_string(), "Strong".to_string()],
        ];
        let spec = TableSpec::from_rows(&rows);
        assert_eq!(spec.columns, ColumnMode::Measured);
        assert_eq!(spec.rows[0].band, RowBand::Header);
        assert_eq!(spec.rows[1].band, RowBand::Body);
        assert_eq!(spec.texts(), rows);
    }

    #[test]
    fn disclaimer_copyright_uses_the_brand() {
        let disclaimer = Disclaimer::standard("ASTROLOGY COMPATIBILITY", Some("example.com"), 2026);
        assert_eq!(disclaimer.copyright, "\u{a9} 2026 Astrology Compatibility \u{b7} example.com");
    }
}
