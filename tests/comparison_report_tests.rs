mod common;

use common::fixtures::*;
use common::{TestResult, render_comparison};
use folio::ComparisonReport;
use folio_layout::{PageKind, PlacementKind};
use folio_report::DocumentKind;

#[test]
fn test_comparison_recommends_the_best_recommended_partner() -> TestResult {
    let pdf = render_comparison(&comparison_report())?;

    // Asha scores highest but is not recommended.
    assert_pdf_contains_text!(pdf, "Final Recommendation: Bela Roy");
    assert_pdf_not_contains_text!(pdf, "Final Recommendation: Asha Nair");
    assert_pdf_contains_text!(pdf, "SCORE COMPARISON");
    assert_pdf_contains_text!(pdf, "Not Rec");
    assert_pdf_contains_text!(pdf, "DETAILED KOOTA BREAKDOWN");
    Ok(())
}

#[test]
fn test_one_score_card_and_bar_per_partner() -> TestResult {
    common::init_logger();
    let artifact = common::generator().generate_comparison(&comparison_report())?;

    let summary_page = artifact
        .placements
        .iter()
        .find(|p| p.page_kind == PageKind::Content)
        .map(|p| p.page)
        .ok_or("no content page")?;
    let cards = artifact
        .placements
        .iter()
        .filter(|p| p.page == summary_page && p.kind == PlacementKind::Card)
        .count();
    // The recommendation card and the row of score cards.
    assert!(cards >= 2, "expected the summary cards on page {}, found {}", summary_page, cards);
    assert_eq!(artifact.placements.iter().filter(|p| p.kind == PlacementKind::Chart).count(), 1);
    Ok(())
}

#[test]
fn test_each_partner_analysis_starts_a_page() -> TestResult {
    let pdf = render_comparison(&comparison_report())?;

    // The summary cards also print upper-cased names, but only analysis titles say ANALYSIS.
    let summary = pdf.page_of("EXECUTIVE SUMMARY").ok_or("summary is missing")?;
    let bela = pdf.page_with_all(&["ANALYSIS", "BELA ROY"]).ok_or("Bela's analysis is missing")?;
    let chitra =
        pdf.page_with_all(&["ANALYSIS", "CHITRA DAS"]).ok_or("Chitra's analysis is missing")?;
    let asha = pdf.page_with_all(&["ANALYSIS", "ASHA NAIR"]).ok_or("Asha's analysis is missing")?;

    // Recommended partners first, then by adjusted score.
    assert!(summary < bela, "summary on {}, first analysis on {}", summary, bela);
    assert!(bela < chitra && chitra < asha, "pages: {} {} {}", bela, chitra, asha);
    assert_eq!(pdf.page_of("WHY NOT RECOMMENDED:"), Some(asha));
    assert_pdf_contains_text!(pdf, "Rohan has Nadi dosha");
    Ok(())
}

#[test]
fn test_comparison_placements_use_the_compact_bands() -> TestResult {
    common::init_logger();
    let generator = common::generator();
    let artifact = generator.generate_comparison(&comparison_report())?;
    let geometry = generator.config().geometry(DocumentKind::Comparison);

    for p in artifact.placements.iter().filter(|p| p.page_kind == PageKind::Content) {
        assert!(p.top >= geometry.content_top - 0.01, "{:?}", p);
        assert!(p.bottom <= geometry.content_bottom + 0.01, "{:?}", p);
    }
    Ok(())
}

#[test]
fn test_nobody_recommended_shows_a_caution() -> TestResult {
    let mut report = comparison_report();
    for entry in &mut report.entries {
        entry.assessment.recommended = false;
    }

    let pdf = render_comparison(&report)?;
    assert_pdf_contains_text!(pdf, "None of the profiles meet the recommended threshold");
    assert_pdf_not_contains_text!(pdf, "Final Recommendation:");
    Ok(())
}

#[test]
fn test_comparison_without_entries_still_renders() -> TestResult {
    let report = ComparisonReport {
        subject: folio_report::Person::new("Rohan Mehta"),
        entries: vec![],
    };

    let pdf = render_comparison(&report)?;
    assert_pdf_min_pages!(pdf, 2);
    assert_pdf_contains_text!(pdf, "COMPARISON REPORT");
    Ok(())
}
