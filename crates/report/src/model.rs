//! Input data for the two report shapes. Everything here is already computed upstream;
//! the composer only lays it out.

use serde::Deserialize;

fn default_max_score() -> u32 {
    36
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Person {
    pub name: String,
    /// Free-form birth details, e.g. "12 Mar 1994, 06:40, Pune".
    pub birth_details: Option<String>,
}

impl Person {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), birth_details: None }
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// One scored compatibility area (a koota).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryRow {
    #[serde(alias = "name")]
    pub label: String,
    pub points: f32,
    pub max_points: f32,
    #[serde(alias = "description")]
    pub footnote: Option<String>,
    pub cancelled: bool,
    pub cancellation_reason: Option<String>,
}

impl CategoryRow {
    /// A zero score on a heavily weighted area counts as a dosha.
    pub fn is_dosha(&self) -> bool {
        self.points == 0.0 && self.max_points >= 6.0
    }
}

/// The scored outcome shared by both report shapes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Assessment {
    #[serde(alias = "overall_score")]
    pub total_score: u32,
    pub max_score: u32,
    pub adjusted_score: Option<u32>,
    /// Category name for the adjusted score, e.g. "Good".
    pub adjusted_category: Option<String>,
    pub adjustment_reason: Option<String>,
    #[serde(alias = "is_recommended")]
    pub recommended: bool,
    #[serde(alias = "kutas")]
    pub categories: Vec<CategoryRow>,
    pub rejection_reasons: Vec<String>,
    /// Manglik compatibility wording, e.g. "Cancelled" or "excellent".
    pub manglik: Option<String>,
}

impl Default for Assessment {
    fn default() -> Self {
        Self {
            total_score: 0,
            max_score: default_max_score(),
            adjusted_score: None,
            adjusted_category: None,
            adjustment_reason: None,
            recommended: default_true(),
            categories: Vec::new(),
            rejection_reasons: Vec::new(),
            manglik: None,
        }
    }
}

impl Assessment {
    /// The adjusted score, or the raw total when no adjustment was made.
    pub fn effective_score(&self) -> u32 {
        self.adjusted_score.unwrap_or(self.total_score)
    }

    pub fn was_adjusted(&self) -> bool {
        self.adjusted_score.is_some_and(|adjusted| adjusted != self.total_score)
    }

    /// Effective score as a fraction of the maximum, clamped to `0..=1`.
    pub fn fraction(&self) -> f64 {
        if self.max_score == 0 {
            return 0.0;
        }
        (self.effective_score() as f64 / self.max_score as f64).clamp(0.0, 1.0)
    }

    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0) as u32
    }

    pub fn category(&self, label: &str) -> Option<&CategoryRow> {
        self.categories.iter().find(|c| c.label.eq_ignore_ascii_case(label))
    }
}

/// A titled block of loosely formatted narrative text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NarrativeSection {
    pub title: String,
    pub content: String,
}

/// Input for the single-subject report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubjectReport {
    pub primary: Person,
    pub partner: Person,
    #[serde(flatten)]
    pub assessment: Assessment,
    pub sections: Vec<NarrativeSection>,
}

impl SubjectReport {
    pub fn names(&self) -> [&str; 2] {
        [self.primary.name.as_str(), self.partner.name.as_str()]
    }
}

/// One partner's result inside a comparison report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComparisonEntry {
    pub partner: Person,
    #[serde(flatten)]
    pub assessment: Assessment,
    /// One-sentence recommendation shown when this entry is the best match.
    pub one_liner: Option<String>,
    /// Narrative analysis for this partner.
    pub summary: String,
}

/// Input for the comparison report: one subject against several partners.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComparisonReport {
    pub subject: Person,
    pub entries: Vec<ComparisonEntry>,
}
