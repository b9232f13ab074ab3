use super::{
    ChromeText, Cover, CoverItem, CoverText, Disclaimer, DocumentPlan, Narrative, ReasonList,
    RowBand, Section, TableCell, TableRow, TableSection, TableSpec, VerdictCard, VerdictLine,
    VerdictValue,
};
use crate::config::{DocumentKind, ReportConfig};
use crate::model::{Assessment, CategoryRow, SubjectReport};
use crate::scoring::{format_points, personalize_reason, rating_text, star_count};
use crate::theme::Tone;
use chrono::Datelike;
use folio_layout::ColumnMode;
use folio_style::{Dimension, TextRole};

const MISSING: &str = "\u{2014}";

/// Plan for the single-subject report: cover, verdict, rejection reasons, category
/// breakdown, narrative sections and the disclaimer.
pub fn single_subject(report: &SubjectReport, config: &ReportConfig) -> DocumentPlan {
    let [primary, partner] = report.names();
    let date = config.generated_on();
    let pair = format!("{} & {}", primary, partner);

    let chrome = ChromeText {
        header_left: config.header_text.clone().unwrap_or_else(|| config.brand.clone()),
        header_right: format!("Page {}", ChromeText::PAGE_PLACEHOLDER),
        footer_left: config
            .footer_text
            .clone()
            .unwrap_or_else(|| format!("{} \u{2014} Compatibility Report", pair)),
        footer_right: date.format("%-d %b %Y").to_string(),
    };

    let mut sections = vec![Section::Verdict(verdict(&report.assessment))];

    let assessment = &report.assessment;
    if !assessment.recommended && !assessment.rejection_reasons.is_empty() {
        sections.push(Section::Reasons(ReasonList {
            title: "REASONS FOR NOT RECOMMENDED".to_string(),
            reasons: assessment
                .rejection_reasons
                .iter()
                .map(|r| {
                    personalize_reason(r, report.primary.first_name(), report.partner.first_name())
                })
                .collect(),
            compact: false,
        }));
    }

    if assessment.categories.is_empty() {
        log::warn!("report for {} has no category rows; skipping the breakdown table", pair);
    } else {
        sections.push(Section::Table(TableSection {
            title: Some("ASHTAKOOT (8 GUNA) ANALYSIS".to_string()),
            table: breakdown(assessment),
            legend: None,
        }));
    }

    for section in &report.sections {
        if section.content.trim().is_empty() {
            log::debug!("skipping empty narrative section '{}'", section.title);
            continue;
        }
        sections.push(Section::Narrative(Narrative {
            title: Some(section.title.clone()),
            content: section.content.clone(),
        }));
        sections.push(Section::Spacing(14.0));
    }

    sections.push(Section::Disclaimer(Disclaimer::standard(
        &config.brand,
        config.website.as_deref(),
        date.year(),
    )));

    DocumentPlan {
        kind: DocumentKind::SingleSubject,
        title: config
            .title
            .clone()
            .unwrap_or_else(|| format!("Compatibility Report: {}", pair)),
        chrome,
        cover: Some(cover(report, config)),
        sections,
    }
}

fn cover(report: &SubjectReport, config: &ReportConfig) -> Cover {
    let assessment = &report.assessment;
    let (page_width, _) = config.page_size.dimensions_pt();
    let rule = |alpha: f32, after: f32| CoverItem::Rule {
        half_width: page_width * 0.2,
        alpha,
        diamond: false,
        after,
    };
    let rating_tone = if assessment.recommended { Tone::Accent } else { Tone::Negative };
    let rating = rating_text(assessment).to_uppercase();
    let name = |name: &str, after: f32| {
        CoverItem::Text(CoverText::new(name.to_uppercase(), TextRole::Title, Tone::Strong, after))
    };

    let mut items = vec![
        CoverItem::Logo { size: 50.0 },
        CoverItem::Text(
            CoverText::new(config.brand.clone(), TextRole::Brand, Tone::Accent, 30.0).spaced(4.0),
        ),
        CoverItem::Text(
            CoverText::new("COMPATIBILITY REPORT", TextRole::Tiny, Tone::Accent, 40.0)
                .size(10.0)
                .alpha(0.6)
                .spaced(3.0),
        ),
        rule(0.4, 30.0),
        name(report.primary.name.as_str(), 36.0),
        CoverItem::Text(CoverText::new("&", TextRole::Subtitle, Tone::Accent, 28.0).size(16.0)),
        name(report.partner.name.as_str(), 50.0),
        CoverItem::ScoreDial {
            fraction: assessment.fraction() as f32,
            score: assessment.effective_score(),
            max: assessment.max_score,
            diameter: 120.0,
        },
        CoverItem::Stars { filled: star_count(assessment) },
        CoverItem::Text(
            CoverText::new(rating, TextRole::Subtitle, rating_tone, 22.0).spaced(3.0),
        ),
    ];

    let transparency = |text: String| {
        CoverItem::Text(
            CoverText::new(text, TextRole::Tiny, Tone::Strong, 12.0)
                .size(8.5)
                .alpha(0.45),
        )
    };
    if let Some(adjusted) = assessment.adjusted_score.filter(|_| assessment.was_adjusted()) {
        items.push(transparency(format!(
            "Ashtakoot: {}/{} \u{b7} Adjusted: {}/{}",
            assessment.total_score, assessment.max_score, adjusted, assessment.max_score
        )));
        if !assessment.recommended {
            let note = "Overridden due to dosha incompatibility";
            items.push(CoverItem::Text(
                CoverText::new(note, TextRole::Tiny, Tone::Negative, 12.0).alpha(0.6),
            ));
        }
    } else {
        items.push(transparency(format!(
            "Ashtakoot Score: {}/{}",
            assessment.total_score, assessment.max_score
        )));
    }
    items.push(CoverItem::Gap(16.0));

    if let (Some(a), Some(b)) = (&report.primary.birth_details, &report.partner.birth_details) {
        items.push(CoverItem::Text(
            CoverText::new(format!("Born: {} \u{b7} {}", a, b), TextRole::Small, Tone::Strong, 20.0)
                .size(10.0)
                .alpha(0.5),
        ));
    }
    items.push(rule(0.3, 30.0));

    let mut footer = Vec::new();
    if let Some(site) = &config.website {
        footer.push((
            60.0,
            CoverText::new(site.clone(), TextRole::Tiny, Tone::Accent, 0.0)
                .size(9.0)
                .alpha(0.5)
                .spaced(2.0),
        ));
    }
    footer.push((
        46.0,
        CoverText::new(
            format!("Generated: {}", config.generated_on().format("%B %-d, %Y")),
            TextRole::Tiny,
            Tone::Strong,
            0.0,
        )
        .alpha(0.3),
    ));

    Cover { start_y: 160.0, framed: true, items, footer }
}

fn verdict(assessment: &Assessment) -> VerdictCard {
    let text = |label: &str, value: String, tone: Tone| VerdictLine {
        label: label.to_string(),
        value: VerdictValue::Text(value),
        tone,
    };
    let max = assessment.max_score;
    let raw = format!("{}/{}", assessment.total_score, max);
    let mut lines = vec![text("Raw Ashtakoot Score:", raw, Tone::Text)];

    if let Some(adjusted) = assessment.adjusted_score.filter(|_| assessment.was_adjusted()) {
        lines.push(text(
            "Adjusted Score:",
            format!("{}/{} ({}%)", adjusted, max, assessment.percent()),
            Tone::Accent,
        ));
    }

    if assessment.recommended {
        lines.push(text("Compatibility:", format!("{}%", assessment.percent()), Tone::Text));
        lines.push(text("Final Verdict:", rating_text(assessment).to_string(), Tone::Positive));
        if let Some(reason) = &assessment.adjustment_reason {
            lines.push(text("Reason:", reason.clone(), Tone::Secondary));
        }
    } else {
        lines.push(text("Final Verdict:", "Not Recommended".to_string(), Tone::Negative));
        if assessment.was_adjusted() {
            let reason = assessment
                .adjustment_reason
                .clone()
                .unwrap_or_else(|| "Dosha incompatibility overrides adjusted score".to_string());
            lines.push(text("Reason:", reason, Tone::Negative));
        }
    }

    lines.push(VerdictLine {
        label: "Overall Rating:".to_string(),
        value: VerdictValue::Stars(star_count(assessment)),
        tone: Tone::Accent,
    });

    VerdictCard { title: "COMPATIBILITY VERDICT".to_string(), lines }
}

fn breakdown(assessment: &Assessment) -> TableSpec {
    let header = ["Koota", "Score", "Max", "Adj.", "Analysis"]
        .into_iter()
        .map(|h| TableCell::toned(h, Tone::Accent))
        .collect();
    let mut rows = vec![TableRow::new(RowBand::Header, header)];
    rows.extend(assessment.categories.iter().map(category_row));

    let max = assessment.max_score.to_string();
    rows.push(TableRow::new(
        RowBand::Total,
        vec![
            TableCell::toned("TOTAL", Tone::Strong).bold(),
            TableCell::toned(assessment.total_score.to_string(), Tone::Strong).bold(),
            TableCell::toned(max.clone(), Tone::Strong).bold(),
            TableCell::new(""),
            TableCell::new(""),
        ],
    ));

    if let Some(adjusted) = assessment.adjusted_score.filter(|_| assessment.was_adjusted()) {
        let note = if assessment.recommended {
            let category = assessment
                .adjusted_category
                .clone()
                .unwrap_or_else(|| format!("{}%", assessment.percent()));
            format!("{} ({}%)", category, assessment.percent())
        } else {
            format!("{}% \u{2014} overridden by dosha", assessment.percent())
        };
        rows.push(TableRow::new(
            RowBand::Highlight,
            vec![
                TableCell::toned("ADJUSTED", Tone::Accent).bold(),
                TableCell::toned(assessment.total_score.to_string(), Tone::Accent).bold(),
                TableCell::toned(max, Tone::Accent).bold(),
                TableCell::toned(adjusted.to_string(), Tone::Accent).bold(),
                TableCell::toned(note, Tone::Accent).bold(),
            ],
        ));
    }

    TableSpec {
        columns: ColumnMode::Declared(vec![
            Dimension::Pt(80.0),
            Dimension::Pt(42.0),
            Dimension::Pt(42.0),
            Dimension::Pt(50.0),
            Dimension::Auto,
        ]),
        rows,
    }
}

fn category_row(row: &CategoryRow) -> TableRow {
    let dosha = row.is_dosha();
    let (label_tone, adjusted) = match (dosha, row.cancelled) {
        (true, true) => {
            (Tone::Positive, TableCell::toned(format_points(row.max_points), Tone::Positive))
        }
        (true, false) => (Tone::Negative, TableCell::toned("0", Tone::Negative)),
        _ => (Tone::Text, TableCell::toned(MISSING, Tone::Secondary)),
    };

    let mut analysis = row
        .footnote
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(MISSING)
        .to_string();
    if dosha && row.cancelled {
        let reason = row.cancellation_reason.as_deref().unwrap_or("Cancelled");
        analysis.push_str(&format!(" \u{2014} Cancelled: {}", reason));
    } else if dosha {
        analysis.push_str(" \u{2014} Active dosha");
    }

    let label = if row.label.trim().is_empty() { MISSING } else { row.label.as_str() };
    TableRow::new(
        RowBand::Body,
        vec![
            TableCell::toned(label, label_tone).bold(),
            TableCell::new(format_points(row.points)),
            TableCell::new(format_points(row.max_points)),
            adjusted,
            TableCell::toned(analysis, Tone::Secondary),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NarrativeSection, Person};
    use chrono::NaiveDate;

    fn report() -> SubjectReport {
        SubjectReport {
            primary: Person::new("Arjun Rao"),
            partner: Person::new("Meera Iyer"),
            assessment: Assessment {
                total_score: 24,
                adjusted_score: Some(28),
                categories: vec![
                    CategoryRow {
                        label: "Varna".into(),
                        points: 1.0,
                        max_points: 1.0,
                        ..Default::default()
                    },
                    CategoryRow {
                        label: "Nadi".into(),
                        points: 0.0,
                        max_points: 8.0,
                        cancelled: true,
                        cancellation_reason: Some("Same rashi".into()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            sections: vec![
                NarrativeSection {
                    title: "Overview".into(),
                    content: "A **strong** match.".into(),
                },
                NarrativeSection { title: "Empty".into(), content: "   ".into() },
            ],
        }
    }

    fn config() -> ReportConfig {
        ReportConfig {
            generated_on: NaiveDate::from_ymd_opt(2026, 3, 1),
            ..Default::default()
        }
    }

    #[test]
    fn sections_follow_the_report_order() {
        let plan = single_subject(&report(), &config());
        assert!(matches!(plan.sections[0], Section::Verdict(_)));
        assert!(matches!(plan.sections[1], Section::Table(_)));
        assert!(matches!(plan.sections[2], Section::Narrative(_)));
        assert!(matches!(plan.sections.last(), Some(Section::Disclaimer(_))));
        // The blank narrative section is dropped.
        assert_eq!(plan.sections.len(), 5);
    }

    #[test]
    fn chrome_names_the_pair_and_date() {
        let plan = single_subject(&report(), &config());
        assert_eq!(plan.chrome.header_left, "ASTROLOGY COMPATIBILITY");
        assert_eq!(plan.chrome.footer_left, "Arjun Rao & Meera Iyer \u{2014} Compatibility Report");
        assert_eq!(plan.chrome.footer_right, "1 Mar 2026");
    }

    #[test]
    fn cancelled_dosha_is_annotated_and_restored() {
        let table = breakdown(&report().assessment);
        let nadi = &table.rows[2];
        assert_eq!(nadi.cells[3].text, "8");
        assert_eq!(nadi.cells[3].tone, Tone::Positive);
        assert!(nadi.cells[4].text.ends_with("Cancelled: Same rashi"));
        // Header, two categories, total and the adjusted row.
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rows[4].band, RowBand::Highlight);
    }

    #[test]
    fn rejected_report_lists_personalized_reasons() {
        let mut report = report();
        report.assessment.recommended = false;
        report.assessment.rejection_reasons = vec!["Boy: Mangal dosha active".into()];
        let plan = single_subject(&report, &config());
        match &plan.sections[1] {
            Section::Reasons(list) => assert_eq!(list.reasons, vec!["Arjun: Mangal dosha active"]),
            other => panic!("expected reasons, got {:?}", other),
        }
    }

    #[test]
    fn verdict_reports_adjustment() {
        let card = verdict(&report().assessment);
        let labels: Vec<&str> = card.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Raw Ashtakoot Score:",
                "Adjusted Score:",
                "Compatibility:",
                "Final Verdict:",
                "Overall Rating:"
            ]
        );
        assert_eq!(card.lines[4].value, VerdictValue::Stars(4));
    }
}
