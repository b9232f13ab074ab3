//! Report data used across the integration tests, built from JSON the way callers send it.

use folio::{ComparisonReport, ReportConfig, SubjectReport};
use serde_json::{Value, json};

pub fn config() -> ReportConfig {
    serde_json::from_value(json!({
        "generatedOn": "2026-03-01",
        "website": "example.com",
        "author": "Test Suite"
    }))
    .expect("config fixture")
}

pub fn kutas() -> Value {
    json!([
        { "name": "Varna", "points": 1, "max_points": 1, "description": "Spiritual bond." },
        { "name": "Vashya", "points": 2, "max_points": 2, "description": "Mutual attraction." },
        { "name": "Tara", "points": 1.5, "max_points": 3, "description": "Birth star harmony." },
        { "name": "Yoni", "points": 3, "max_points": 4, "description": "Physical compatibility." },
        { "name": "Maitri", "points": 5, "max_points": 5, "description": "Moon lord amity." },
        { "name": "Gana", "points": 6, "max_points": 6, "description": "Temperament." },
        { "name": "Bhakoot", "points": 7, "max_points": 7, "description": "Family welfare." },
        { "name": "Nadi", "points": 2.5, "max_points": 8, "description": "Health and progeny." }
    ])
}

pub fn paragraphs(count: usize) -> String {
    (1..=count)
        .map(|i| {
            format!(
                "**Insight {}:** Both charts place the moon in steady signs, so the pair settles \
                 into shared routines quickly. Plans that change at short notice call for \
                 patience, and honest conversation keeps small worries from growing.",
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A recommended pair scoring 28/36 with enough narrative for several pages.
pub fn subject_report() -> SubjectReport {
    serde_json::from_value(json!({
        "primary": { "name": "Arjun Rao", "birth_details": "12 Mar 1994, 06:40, Pune" },
        "partner": { "name": "Meera Iyer", "birth_details": "3 Jul 1996, 18:15, Chennai" },
        "total_score": 28,
        "max_score": 36,
        "kutas": kutas(),
        "manglik": "Compatible",
        "sections": [
            { "title": "OVERVIEW", "content": paragraphs(5) },
            {
                "title": "STRENGTHS",
                "content": "## Emotional bond\n\n- Warm and loyal\n- Shared values\n- Humour"
            },
            { "title": "GUIDANCE", "content": paragraphs(4) }
        ]
    }))
    .expect("subject report fixture")
}

fn entry(name: &str, score: u32, recommended: bool, reasons: &[&str]) -> Value {
    json!({
        "partner": { "name": name },
        "total_score": score,
        "max_score": 36,
        "is_recommended": recommended,
        "kutas": kutas(),
        "rejection_reasons": reasons,
        "one_liner": format!("{} brings a steady, supportive temperament.", name),
        "summary": paragraphs(2)
    })
}

/// Three partners where the highest raw score is not recommended.
pub fn comparison_report() -> ComparisonReport {
    serde_json::from_value(json!({
        "subject": { "name": "Rohan Mehta" },
        "entries": [
            entry("Asha Nair", 30, false, &["Boy has Nadi dosha without cancellation"]),
            entry("Bela Roy", 27, true, &[]),
            entry("Chitra Das", 20, true, &[])
        ]
    }))
    .expect("comparison report fixture")
}

/// Narrative text holding a pipe table with `rows` data rows.
pub fn table_markup(rows: usize) -> String {
    let mut text = String::from("| Planet | Sign | House |\n|---|---|---|\n");
    for i in 1..=rows {
        text.push_str(&format!("| Row{} | Sign{} | {} |\n", i, i, i % 12 + 1));
    }
    text
}
