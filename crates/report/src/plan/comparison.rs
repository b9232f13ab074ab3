use super::{
    Bar, BarChart, ChromeText, Cover, CoverItem, CoverText, Disclaimer, DocumentPlan,
    ExecutiveSummary, Narrative, ReasonList, Recommendation, RowBand, ScoreCard, Section,
    StatusCard, TableCell, TableRow, TableSection, TableSpec, title_case,
};
use crate::config::{DocumentKind, ReportConfig};
use crate::model::{ComparisonEntry, ComparisonReport};
use crate::scoring::{
    NO_RECOMMENDATION, best_match, format_points, personalize_reason, sorted_entries, status_label,
};
use crate::theme::Tone;
use chrono::Datelike;
use folio_layout::ColumnMode;
use folio_style::{Dimension, TextRole};
use itertools::Itertools;

pub const KUTA_ORDER: [&str; 8] =
    ["Varna", "Vashya", "Tara", "Yoni", "Maitri", "Gana", "Bhakoot", "Nadi"];

const LEGEND: &str = "8 full   \u{b7}   0 \u{bb} 8 cancelled (adjusted from \
                      cancellation)   \u{b7}   0 active dosha   \u{b7}   0 caution";

/// Plan for the comparison report: cover, executive summary, breakdown table and one
/// analysis per partner on its own page.
pub fn comparison(report: &ComparisonReport, config: &ReportConfig) -> DocumentPlan {
    let date = config.generated_on();
    let subject = report.subject.name.as_str();
    let sorted = sorted_entries(&report.entries);
    if sorted.is_empty() {
        log::warn!("comparison report for {} has no entries", subject);
    }

    let chrome = ChromeText {
        header_left: config.header_text.clone().unwrap_or_else(|| title_case(&config.brand)),
        header_right: format!("Compatibility Comparison \u{2014} {}", subject),
        footer_left: format!("Page {}", ChromeText::PAGE_PLACEHOLDER),
        footer_right: config
            .footer_text
            .clone()
            .unwrap_or_else(|| format!("\u{a9} {} {}", date.year(), title_case(&config.brand))),
    };

    let mut sections = vec![
        Section::Summary(summary(&sorted)),
        Section::Table(TableSection {
            title: Some("DETAILED KOOTA BREAKDOWN".to_string()),
            table: breakdown(&sorted),
            legend: Some(LEGEND.to_string()),
        }),
    ];

    for entry in &sorted {
        sections.push(Section::PageBreak);
        sections.extend(analysis(report, entry));
    }

    sections.push(Section::Disclaimer(Disclaimer::standard(
        &config.brand,
        config.website.as_deref(),
        date.year(),
    )));

    let partners = sorted.iter().map(|e| e.partner.name.as_str()).join(", ");
    DocumentPlan {
        kind: DocumentKind::Comparison,
        title: config
            .title
            .clone()
            .unwrap_or_else(|| format!("Compatibility Comparison: {} with {}", subject, partners)),
        chrome,
        cover: Some(cover(report, &sorted, config)),
        sections,
    }
}

fn cover(report: &ComparisonReport, sorted: &[&ComparisonEntry], config: &ReportConfig) -> Cover {
    let rule = |diamond: bool, after: f32| CoverItem::Rule {
        half_width: 60.0,
        alpha: 0.3,
        diamond,
        after,
    };

    let mut items = vec![
        CoverItem::Logo { size: 60.0 },
        CoverItem::Text(
            CoverText::new(config.brand.clone(), TextRole::Brand, Tone::Accent, 22.0).spaced(6.0),
        ),
        CoverItem::Text(
            CoverText::new("VEDIC COMPATIBILITY ANALYSIS", TextRole::Tiny, Tone::Accent, 24.0)
                .size(9.0)
                .alpha(0.6)
                .spaced(3.0),
        ),
        rule(false, 20.0),
        CoverItem::Text(
            CoverText::new("COMPARISON REPORT", TextRole::Title, Tone::Strong, 50.0).size(30.0),
        ),
        CoverItem::Text(CoverText::new(
            report.subject.name.clone(),
            TextRole::Heading,
            Tone::Accent,
            30.0,
        )),
        CoverItem::Text(
            CoverText::new("compared with", TextRole::Small, Tone::Secondary, 22.0).size(10.0),
        ),
    ];
    items.extend(sorted.iter().map(|entry| {
        CoverItem::Text(
            CoverText::new(entry.partner.name.clone(), TextRole::Subtitle, Tone::Strong, 24.0)
                .size(14.0)
                .alpha(0.85),
        )
    }));
    items.push(CoverItem::Gap(12.0));
    items.push(rule(true, 30.0));
    let date = config.generated_on().format("%B %-d, %Y").to_string();
    items.push(CoverItem::Text(
        CoverText::new(date, TextRole::Small, Tone::Secondary, 20.0)
            .size(10.0)
            .alpha(0.6),
    ));

    let footer = config
        .website
        .iter()
        .map(|site| {
            let text = CoverText::new(site.clone(), TextRole::Tiny, Tone::Secondary, 0.0);
            (50.0, text.alpha(0.3))
        })
        .collect();

    Cover { start_y: 220.0, framed: false, items, footer }
}

fn summary(sorted: &[&ComparisonEntry]) -> ExecutiveSummary {
    let best = best_match(sorted);
    let recommendation = match best {
        Some(entry) => Recommendation {
            headline: format!(
                "Final Recommendation: {} ({}/{})",
                entry.partner.name,
                entry.assessment.effective_score(),
                entry.assessment.max_score
            ),
            detail: entry
                .one_liner
                .clone()
                .unwrap_or_else(|| "Highest compatibility. All doshas safe.".to_string()),
            tone: Tone::Accent,
        },
        None => Recommendation {
            headline: NO_RECOMMENDATION.to_string(),
            detail: "Review individual analyses for detailed insights.".to_string(),
            tone: Tone::Caution,
        },
    };

    let cards = sorted
        .iter()
        .map(|entry| {
            let a = &entry.assessment;
            let is_best = best.is_some_and(|b| std::ptr::eq(b, *entry));
            ScoreCard {
                name: entry.partner.name.to_uppercase(),
                score: format!("{}/{}*", a.effective_score(), a.max_score),
                actual: format!("{}/{} actual", a.total_score, a.max_score),
                badge: match (a.recommended, is_best) {
                    (true, true) => "Best",
                    (true, false) => "Recommended",
                    (false, _) => "Not Rec",
                }
                .to_string(),
                positive: a.recommended,
            }
        })
        .collect();

    let max = sorted.first().map_or(36, |e| e.assessment.max_score) as f32;
    let bars = sorted
        .iter()
        .map(|entry| Bar {
            label: entry.partner.name.clone(),
            value: entry.assessment.effective_score() as f32,
            value_text: format!(
                "{}/{}",
                entry.assessment.effective_score(),
                entry.assessment.max_score
            ),
            positive: entry.assessment.recommended,
        })
        .collect();

    ExecutiveSummary {
        title: "EXECUTIVE SUMMARY".to_string(),
        recommendation,
        cards,
        footnote: "*After dosha cancellation adjustment".to_string(),
        chart: BarChart { title: "SCORE COMPARISON".to_string(), max, bars },
    }
}

fn breakdown(sorted: &[&ComparisonEntry]) -> TableSpec {
    let mut columns = vec![Dimension::Pt(72.0)];
    columns.extend(sorted.iter().map(|_| Dimension::Auto));

    let label = |text: &str| TableCell::toned(text, Tone::Secondary).bold();
    let mut rows = Vec::with_capacity(KUTA_ORDER.len() + 4);

    let mut header = vec![TableCell::toned("Area", Tone::Accent)];
    header.extend(sorted.iter().map(|e| TableCell::toned(e.partner.first_name(), Tone::Accent)));
    rows.push(TableRow::new(RowBand::Header, header));

    for kuta in KUTA_ORDER {
        let mut cells = vec![label(kuta)];
        cells.extend(sorted.iter().map(|e| kuta_cell(e, kuta)));
        rows.push(TableRow::new(RowBand::Body, cells));
    }

    let mut manglik = vec![label("Manglik")];
    manglik.extend(sorted.iter().map(|e| manglik_cell(e)));
    rows.push(TableRow::new(RowBand::Body, manglik));

    let mut actual = vec![TableCell::toned("Actual", Tone::Strong).bold()];
    actual.extend(sorted.iter().map(|e| {
        let text = format!("{}/{}", e.assessment.total_score, e.assessment.max_score);
        TableCell::toned(text, Tone::Strong).bold()
    }));
    rows.push(TableRow::new(RowBand::Total, actual));

    let mut adjusted = vec![TableCell::toned("Adjusted", Tone::Accent).bold()];
    adjusted.extend(sorted.iter().map(|e| {
        let tone = if e.assessment.recommended { Tone::Accent } else { Tone::Negative };
        let text = format!("{}/{}", e.assessment.effective_score(), e.assessment.max_score);
        TableCell::toned(text, tone).bold()
    }));
    rows.push(TableRow::new(RowBand::Highlight, adjusted));

    TableSpec { columns: ColumnMode::Declared(columns), rows }
}

fn kuta_cell(entry: &ComparisonEntry, kuta: &str) -> TableCell {
    let Some(row) = entry.assessment.category(kuta) else {
        return TableCell::toned("\u{2014}", Tone::Secondary);
    };
    let points = format_points(row.points);
    let rejected = entry.assessment.rejection_reasons.iter().any(|r| r.contains(kuta));
    if row.cancelled {
        let text = format!("{} \u{bb} {} cancelled", points, format_points(row.max_points));
        TableCell::toned(text, Tone::Positive)
    } else if row.is_dosha() && rejected {
        TableCell::toned(format!("{} active", points), Tone::Negative)
    } else if row.points == row.max_points {
        TableCell::toned(format!("{} full", points), Tone::Positive)
    } else if row.points == 0.0 {
        TableCell::toned(format!("{} caution", points), Tone::Caution)
    } else {
        TableCell::new(points)
    }
}

fn manglik_cell(entry: &ComparisonEntry) -> TableCell {
    let assessment = &entry.assessment;
    if assessment.rejection_reasons.iter().any(|r| r.contains("Mangal")) {
        return TableCell::toned("Active", Tone::Negative);
    }
    match assessment.manglik.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        Some(status) => {
            let lower = status.to_lowercase();
            let tone = match lower.as_str() {
                "excellent" | "good" | "cancelled" | "none" => Tone::Positive,
                _ => Tone::Caution,
            };
            TableCell::toned(title_case(&lower), tone)
        }
        None => TableCell::toned("None", Tone::Positive),
    }
}

fn analysis(report: &ComparisonReport, entry: &ComparisonEntry) -> Vec<Section> {
    let a = &entry.assessment;
    let mut sections = vec![Section::Status(StatusCard {
        title: format!("ANALYSIS \u{2014} {}", entry.partner.name.to_uppercase()),
        score: format!("{}/{}", a.effective_score(), a.max_score),
        label: status_label(a).to_string(),
        positive: a.recommended,
        note: a.was_adjusted().then(|| {
            format!(
                "Ashtakoot: {}/{} \u{b7} Adjusted: {}/{}",
                a.total_score,
                a.max_score,
                a.effective_score(),
                a.max_score
            )
        }),
    })];

    if !a.recommended && !a.rejection_reasons.is_empty() {
        sections.push(Section::Reasons(ReasonList {
            title: "WHY NOT RECOMMENDED:".to_string(),
            reasons: a
                .rejection_reasons
                .iter()
                .map(|r| {
                    personalize_reason(r, report.subject.first_name(), entry.partner.first_name())
                })
                .collect(),
            compact: true,
        }));
    }

    if !entry.summary.trim().is_empty() {
        sections.push(Section::Narrative(Narrative {
            title: None,
            content: entry.summary.clone(),
        }));
    }
    sections.push(Section::Spacing(6.0));
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assessment, CategoryRow, Person};

    fn entry(name: &str, score: u32, adjusted: u32, recommended: bool) -> ComparisonEntry {
        ComparisonEntry {
            partner: Person::new(name),
            assessment: Assessment {
                total_score: score,
                adjusted_score: Some(adjusted),
                recommended,
                categories: vec![
                    CategoryRow {
                        label: "Nadi".into(),
                        points: 0.0,
                        max_points: 8.0,
                        ..Default::default()
                    },
                    CategoryRow {
                        label: "Varna".into(),
                        points: 1.0,
                        max_points: 1.0,
                        ..Default::default()
                    },
                ],
                rejection_reasons: if recommended {
                    vec![]
                } else {
                    vec!["Nadi dosha: Boy and Girl share nadi".into()]
                },
                ..Default::default()
            },
            one_liner: None,
            summary: format!("{} analysis.", name),
        }
    }

    fn report() -> ComparisonReport {
        ComparisonReport {
            subject: Person::new("Arjun Rao"),
            entries: vec![
                entry("Cira Das", 30, 30, false),
                entry("Asha Menon", 24, 26, true),
                entry("Bela Roy", 27, 27, true),
            ],
        }
    }

    #[test]
    fn summary_recommends_the_best_recommended_entry() {
        let report = report();
        let sorted = sorted_entries(&report.entries);
        let summary = summary(&sorted);
        assert_eq!(summary.recommendation.headline, "Final Recommendation: Bela Roy (27/36)");
        let badges: Vec<&str> = summary.cards.iter().map(|c| c.badge.as_str()).collect();
        assert_eq!(badges, vec!["Best", "Recommended", "Not Rec"]);
        assert_eq!(summary.chart.bars.len(), 3);
    }

    #[test]
    fn nobody_recommended_gives_a_caution() {
        let report = ComparisonReport {
            subject: Person::new("Arjun"),
            entries: vec![entry("Cira", 30, 30, false)],
        };
        let summary = summary(&sorted_entries(&report.entries));
        assert_eq!(summary.recommendation.headline, NO_RECOMMENDATION);
        assert_eq!(summary.recommendation.tone, Tone::Caution);
    }

    #[test]
    fn breakdown_has_one_column_per_partner() {
        let report = report();
        let table = breakdown(&sorted_entries(&report.entries));
        // Header, eight kutas, manglik, actual, adjusted.
        assert_eq!(table.rows.len(), 12);
        assert!(table.rows.iter().all(|r| r.cells.len() == 4));
        assert_eq!(table.rows[0].cells[1].text, "Bela");
        // Missing categories fall back to a dash.
        assert_eq!(table.rows[2].cells[1].text, "\u{2014}");
    }

    #[test]
    fn kuta_cells_mark_doshas() {
        let rejected = entry("Cira", 30, 30, false);
        assert_eq!(kuta_cell(&rejected, "Nadi").text, "0 active");
        assert_eq!(kuta_cell(&rejected, "Varna").text, "1 full");
        let fine = entry("Asha", 24, 26, true);
        assert_eq!(kuta_cell(&fine, "Nadi").text, "0 caution");

        let mut cancelled = fine.clone();
        cancelled.assessment.categories[0].cancelled = true;
        assert_eq!(kuta_cell(&cancelled, "Nadi").text, "0 \u{bb} 8 cancelled");
    }

    #[test]
    fn manglik_status_is_derived_from_reasons_and_text() {
        let mut e = entry("Asha", 24, 26, true);
        assert_eq!(manglik_cell(&e).text, "None");
        e.assessment.manglik = Some("CANCELLED".into());
        assert_eq!(manglik_cell(&e).text, "Cancelled");
        e.assessment.manglik = Some("moderate".into());
        assert_eq!(manglik_cell(&e).tone, Tone::Caution);
        e.assessment.rejection_reasons = vec!["Mangal dosha active".into()];
        assert_eq!(manglik_cell(&e).text, "Active");
    }

    #[test]
    fn every_partner_gets_a_fresh_page() {
        let plan = comparison(&report(), &ReportConfig::default());
        let breaks = plan.sections.iter().filter(|s| matches!(s, Section::PageBreak)).count();
        assert_eq!(breaks, 3);
        let reasons: Vec<&ReasonList> = plan
            .sections
            .iter()
            .filter_map(|s| match s {
                Section::Reasons(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].reasons[0], "Nadi dosha: Arjun and Cira share nadi");
    }
}
