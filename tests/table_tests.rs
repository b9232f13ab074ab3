mod common;

use common::fixtures::*;
use common::{TestResult, render_single};
use folio::SubjectReport;
use folio_layout::PlacementKind;
use folio_report::NarrativeSection;

fn report_with(content: String) -> SubjectReport {
    let mut report = subject_report();
    report.sections = vec![NarrativeSection { title: "PLANETARY POSITIONS".into(), content }];
    report
}

#[test]
fn test_long_table_breaks_between_whole_rows() -> TestResult {
    common::init_logger();
    let report = report_with(table_markup(40));
    let artifact = common::generator().generate_single(&report)?;

    let rows: Vec<_> =
        artifact.placements.iter().filter(|p| p.kind == PlacementKind::TableRow).collect();
    // 40 data rows in the narrative table and the category breakdown rows.
    assert!(rows.len() >= 41, "expected at least 41 table rows, got {}", rows.len());
    assert!(rows.windows(2).all(|w| w[0].page <= w[1].page));

    let pdf = common::GeneratedPdf::from_artifact(artifact)?;
    let first = pdf.page_of("Row1").ok_or("first row missing")?;
    let last = pdf.page_of("Row40").ok_or("last row missing")?;
    assert!(last > first, "a 40-row table should continue on a later page");
    Ok(())
}

#[test]
fn test_malformed_table_still_renders() -> TestResult {
    let content = "| Planet | Sign |\n\
                   | Sun | Leo | Fifth house | extra |\n\
                   | Moon |\n\
                   |---|\n\
                   | Mars | Aries |"
        .to_string();
    let pdf = render_single(&report_with(content))?;

    assert_pdf_contains_text!(pdf, "PLANETARY POSITIONS");
    assert_pdf_contains_text!(pdf, "Fifth house");
    assert_pdf_contains_text!(pdf, "Mars");
    Ok(())
}

#[test]
fn test_table_with_long_cells_wraps_inside_the_column() -> TestResult {
    let content = format!(
        "| Area | Notes |\n|---|---|\n| Temperament | {} |\n| Family | Short |",
        "Both partners value routine and quiet evenings at home. ".repeat(6)
    );
    let pdf = render_single(&report_with(content))?;

    assert_pdf_contains_text!(pdf, "Temperament");
    assert_pdf_contains_text!(pdf, "Family");
    Ok(())
}

#[test]
fn test_category_breakdown_lists_every_kuta() -> TestResult {
    let pdf = render_single(&subject_report())?;

    for kuta in ["Varna", "Vashya", "Tara", "Yoni", "Maitri", "Gana", "Bhakoot", "Nadi"] {
        assert_pdf_contains_text!(pdf, kuta);
    }
    Ok(())
}
