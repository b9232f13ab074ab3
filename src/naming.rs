//! File names for generated reports.

use chrono::NaiveDate;

const PREFIX: &str = "Compatibility Report";

/// Joins names as "A", "A and B" or "A, B and C".
fn join_names(names: &[&str]) -> String {
    let names: Vec<&str> = names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()).collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

/// Human-readable file name, e.g. "Compatibility Report - Asha and Ravi - 2026-03-01.pdf".
/// Characters that are not allowed in file names on common platforms are dropped.
pub fn suggested_file_name(names: &[&str], date: NaiveDate) -> String {
    let joined = join_names(names);
    let stem = if joined.is_empty() {
        format!("{} - {}", PREFIX, date.format("%Y-%m-%d"))
    } else {
        format!("{} - {} - {}", PREFIX, joined, date.format("%Y-%m-%d"))
    };
    let safe: String = stem
        .chars()
        .filter(|c| {
            !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') && !c.is_control()
        })
        .collect();
    format!("{}.pdf", safe)
}

/// Lowercase ASCII variant of [`suggested_file_name`], e.g.
/// "compatibility-report-asha-and-ravi-2026-03-01.pdf".
pub fn suggested_slug(names: &[&str], date: NaiveDate) -> String {
    let stem = format!("{} {} {}", PREFIX, join_names(names), date.format("%Y-%m-%d"));
    format!("{}.pdf", slug::slugify(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn pairs_are_joined_with_and() {
        assert_eq!(
            suggested_file_name(&["Asha Nair", "Ravi Kumar"], date()),
            "Compatibility Report - Asha Nair and Ravi Kumar - 2026-03-01.pdf"
        );
    }

    #[test]
    fn longer_lists_use_commas() {
        assert_eq!(join_names(&["A", "B", "C"]), "A, B and C");
        assert_eq!(join_names(&["A", " ", "C"]), "A and C");
    }

    #[test]
    fn unsafe_characters_are_dropped() {
        let name = suggested_file_name(&["A/B", "C:D"], date());
        assert_eq!(name, "Compatibility Report - AB and CD - 2026-03-01.pdf");
    }

    #[test]
    fn slug_is_lowercase_ascii() {
        assert_eq!(
            suggested_slug(&["Asha Nair", "Ravi Kumar"], date()),
            "compatibility-report-asha-nair-and-ravi-kumar-2026-03-01.pdf"
        );
    }

    #[test]
    fn empty_names_still_give_a_name() {
        assert_eq!(suggested_file_name(&[], date()), "Compatibility Report - 2026-03-01.pdf");
    }
}
