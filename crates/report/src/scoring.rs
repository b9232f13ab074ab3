//! Values derived from an [`Assessment`] for display: ratings, stars, status labels and
//! the ordering of comparison entries.

use crate::model::{Assessment, ComparisonEntry};
use std::cmp::Ordering;

pub const NO_RECOMMENDATION: &str = "None of the profiles meet the recommended threshold";

/// Percentage thresholds shared by the rating text and the star count.
const RATING_BANDS: [(u32, &str, u8); 4] = [
    (90, "Excellent", 5),
    (75, "Very Good", 4),
    (60, "Good", 3),
    (50, "Average", 2),
];

pub fn rating_text(assessment: &Assessment) -> &'static str {
    if !assessment.recommended {
        return "Not Recommended";
    }
    let percent = assessment.percent();
    RATING_BANDS
        .iter()
        .find(|(min, _, _)| percent >= *min)
        .map(|(_, text, _)| *text)
        .unwrap_or("Not Recommended")
}

/// Star rating out of five. Never below one so the row of stars always reads as a rating.
pub fn star_count(assessment: &Assessment) -> u8 {
    if !assessment.recommended {
        return 1;
    }
    let percent = assessment.percent();
    RATING_BANDS
        .iter()
        .find(|(min, _, _)| percent >= *min)
        .map(|(_, _, stars)| *stars)
        .unwrap_or(1)
}

/// Short status label for a comparison entry.
pub fn status_label(assessment: &Assessment) -> &'static str {
    let fraction = assessment.fraction();
    if fraction >= 0.75 {
        "Excellent Match"
    } else if fraction >= 0.6 {
        "Good Match"
    } else if fraction >= 0.45 {
        "Average"
    } else {
        "Challenging"
    }
}

/// Recommended entries first, then by adjusted score (highest first), then by name.
pub fn compare_entries(a: &ComparisonEntry, b: &ComparisonEntry) -> Ordering {
    b.assessment
        .recommended
        .cmp(&a.assessment.recommended)
        .then_with(|| b.assessment.effective_score().cmp(&a.assessment.effective_score()))
        .then_with(|| a.partner.name.cmp(&b.partner.name))
}

pub fn sorted_entries(entries: &[ComparisonEntry]) -> Vec<&ComparisonEntry> {
    let mut sorted: Vec<&ComparisonEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| compare_entries(a, b));
    sorted
}

/// The highest ranked entry that is actually recommended.
pub fn best_match<'a>(sorted: &[&'a ComparisonEntry]) -> Option<&'a ComparisonEntry> {
    sorted.iter().copied().find(|e| e.assessment.recommended)
}

/// Rewrites role words in an upstream rejection reason ("Boy: ...", "Girl has ...") into
/// first names.
pub fn personalize_reason(reason: &str, subject_first: &str, partner_first: &str) -> String {
    reason
        .replace("Boy:", &format!("{}:", subject_first))
        .replace("Girl:", &format!("{}:", partner_first))
        .replace("Boy ", &format!("{} ", subject_first))
        .replace("Girl ", &format!("{} ", partner_first))
}

/// Formats a point value without a trailing `.0` for whole numbers.
pub fn format_points(points: f32) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{:.1}", points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;

    fn assessment(score: u32, recommended: bool) -> Assessment {
        Assessment { total_score: score, recommended, ..Default::default() }
    }

    fn entry(name: &str, score: u32, recommended: bool) -> ComparisonEntry {
        ComparisonEntry {
            partner: Person::new(name),
            assessment: assessment(score, recommended),
            ..Default::default()
        }
    }

    #[test]
    fn rating_bands_follow_the_percentage() {
        assert_eq!(rating_text(&assessment(33, true)), "Excellent");
        assert_eq!(rating_text(&assessment(28, true)), "Very Good");
        assert_eq!(rating_text(&assessment(22, true)), "Good");
        assert_eq!(rating_text(&assessment(18, true)), "Average");
        assert_eq!(rating_text(&assessment(10, true)), "Not Recommended");
        assert_eq!(rating_text(&assessment(35, false)), "Not Recommended");
    }

    #[test]
    fn stars_never_drop_below_one() {
        assert_eq!(star_count(&assessment(33, true)), 5);
        assert_eq!(star_count(&assessment(28, true)), 4);
        assert_eq!(star_count(&assessment(5, true)), 1);
        assert_eq!(star_count(&assessment(36, false)), 1);
    }

    #[test]
    fn status_labels_use_fractions() {
        assert_eq!(status_label(&assessment(27, true)), "Excellent Match");
        assert_eq!(status_label(&assessment(22, true)), "Good Match");
        assert_eq!(status_label(&assessment(17, true)), "Average");
        assert_eq!(status_label(&assessment(10, true)), "Challenging");
    }

    #[test]
    fn recommended_entries_sort_first() {
        let entries =
            vec![entry("Cira", 30, false), entry("Asha", 24, true), entry("Bela", 27, true)];
        let sorted = sorted_entries(&entries);
        let names: Vec<&str> = sorted.iter().map(|e| e.partner.name.as_str()).collect();
        assert_eq!(names, vec!["Bela", "Asha", "Cira"]);
        assert_eq!(best_match(&sorted).map(|e| e.partner.name.as_str()), Some("Bela"));
    }

    #[test]
    fn ties_break_on_name() {
        let entries = vec![entry("Zoya", 20, true), entry("Anya", 20, true)];
        let sorted = sorted_entries(&entries);
        assert_eq!(sorted[0].partner.name, "Anya");
    }

    #[test]
    fn no_best_match_when_nobody_is_recommended() {
        let entries = vec![entry("Asha", 30, false)];
        assert!(best_match(&sorted_entries(&entries)).is_none());
    }

    #[test]
    fn reasons_use_first_names() {
        let reason = "Boy: Mangal dosha active; Girl has Nadi dosha";
        assert_eq!(
            personalize_reason(reason, "Arjun", "Meera"),
            "Arjun: Mangal dosha active; Meera has Nadi dosha"
        );
    }

    #[test]
    fn points_format_compactly() {
        assert_eq!(format_points(8.0), "8");
        assert_eq!(format_points(1.5), "1.5");
    }
}
