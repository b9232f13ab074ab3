use crate::block::Run;

const EMPHASIS: &str = "**";

/// Splits a line into alternating plain/emphasized runs on `**` delimiters.
///
/// Segments at odd positions are emphasized. When the delimiter count is odd the markers
/// cannot be paired, so the whole line is returned as one plain run with its literal text.
pub fn parse_inline(text: &str) -> Vec<Run> {
    let segments: Vec<&str> = text.split(EMPHASIS).collect();
    if segments.len() % 2 == 0 {
        log::trace!("unbalanced emphasis markers, keeping literal text: {:?}", text);
        return if text.is_empty() { Vec::new() } else { vec![Run::plain(text)] };
    }

    segments
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_empty())
        .map(|(i, s)| Run { text: (*s).to_string(), emphasized: i % 2 == 1 })
        .collect()
}

/// Removes balanced `**` markers, keeping the enclosed text.
pub fn strip_emphasis(text: &str) -> String {
    let runs = parse_inline(text);
    runs.into_iter().map(|r| r.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_plain_and_emphasized() {
        let runs = parse_inline("The **Nadi** score is **zero** today");
        assert_eq!(
            runs,
            vec![
                Run::plain("The "),
                Run::emphasized("Nadi"),
                Run::plain(" score is "),
                Run::emphasized("zero"),
                Run::plain(" today"),
            ]
        );
    }

    #[test]
    fn unterminated_marker_degrades_to_literal() {
        let runs = parse_inline("half **open");
        assert_eq!(runs, vec![Run::plain("half **open")]);
    }

    #[test]
    fn empty_input_has_no_runs() {
        assert!(parse_inline("").is_empty());
        assert!(parse_inline("****").is_empty());
    }

    #[test]
    fn strip_keeps_text() {
        assert_eq!(strip_emphasis("**Gana** match"), "Gana match");
        assert_eq!(strip_emphasis("a ** b"), "a ** b");
    }
}
