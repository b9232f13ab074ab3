use super::measure::TextMeasurer;
use folio_markup::Run;
use folio_style::StyleToken;

/// One wrapped line of rich text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineLayout {
    pub items: Vec<LineItem>,
    pub width: f32,
}

/// A contiguous same-emphasis fragment of a line, positioned relative to the line start.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub text: String,
    pub emphasized: bool,
    pub x: f32,
    pub width: f32,
}

struct Token<'a> {
    text: &'a str,
    emphasized: bool,
    space_before: bool,
}

pub(crate) fn wrap_plain(
    measurer: &TextMeasurer,
    text: &str,
    style: &StyleToken,
    max_width: f32,
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let space_width = measurer.text_width(" ", style);
    let gap = style.letter_spacing;
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = measurer.text_width(word, style);
            if line.is_empty() && word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            let joined = line_width + 2.0 * gap + space_width + word_width;
            if !line.is_empty() && joined <= max_width {
                line.push(' ');
                line.push_str(word);
                line_width = joined;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }

            if word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
            } else {
                // Break an overlong word at character boundaries.
                for ch in word.chars() {
                    let char_width = measurer.char_width(ch, style);
                    let extra = if line.is_empty() { char_width } else { gap + char_width };
                    if !line.is_empty() && line_width + extra > max_width {
                        lines.push(std::mem::take(&mut line));
                        line_width = 0.0;
                    }
                    line_width += if line.is_empty() { char_width } else { gap + char_width };
                    line.push(ch);
                }
            }
        }
        lines.push(line);
    }
    lines
}

fn tokenize(runs: &[Run]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pending_space = false;
    for run in runs {
        let mut rest = run.text.as_str();
        while !rest.is_empty() {
            let trimmed = rest.trim_start();
            if trimmed.len() != rest.len() {
                pending_space = true;
            }
            if trimmed.is_empty() {
                break;
            }
            let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
            tokens.push(Token {
                text: &trimmed[..end],
                emphasized: run.emphasized,
                space_before: pending_space,
            });
            pending_space = false;
            rest = &trimmed[end..];
        }
    }
    tokens
}

struct LineBuilder<'m> {
    measurer: &'m TextMeasurer,
    plain: &'m StyleToken,
    emphasized: &'m StyleToken,
    lines: Vec<LineLayout>,
    current: LineLayout,
}

impl<'m> LineBuilder<'m> {
    fn style(&self, emphasized: bool) -> &'m StyleToken {
        if emphasized { self.emphasized } else { self.plain }
    }

    fn width(&self, text: &str, emphasized: bool) -> f32 {
        self.measurer.text_width(text, self.style(emphasized))
    }

    fn new_line(&mut self) {
        if !self.current.items.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
    }

    fn append(&mut self, text: &str, emphasized: bool, with_space: bool) {
        let space = if with_space { self.width(" ", emphasized) } else { 0.0 };
        let merged = match self.current.items.last() {
            Some(last) if last.emphasized == emphasized => {
                let mut joined = last.text.clone();
                if with_space {
                    joined.push(' ');
                }
                joined.push_str(text);
                Some(joined)
            }
            _ => None,
        };

        match merged {
            Some(joined) => {
                let width = self.width(&joined, emphasized);
                if let Some(last) = self.current.items.last_mut() {
                    last.text = joined;
                    last.width = width;
                }
            }
            None => {
                let x = self.current.width + space;
                let width = self.width(text, emphasized);
                self.current.items.push(LineItem {
                    text: text.to_string(),
                    emphasized,
                    x,
                    width,
                });
            }
        }

        if let Some(last) = self.current.items.last() {
            self.current.width = last.x + last.width;
        }
    }
}

/// Breaks emphasized/plain runs into lines no wider than `max_width`.
///
/// Tokens that touch without whitespace (e.g. `word**bold**`) stay together as one word.
pub(crate) fn break_lines(
    measurer: &TextMeasurer,
    runs: &[Run],
    plain: &StyleToken,
    emphasized: &StyleToken,
    max_width: f32,
) -> Vec<LineLayout> {
    let tokens = tokenize(runs);
    let mut words: Vec<Vec<Token>> = Vec::new();
    for token in tokens {
        match words.last_mut() {
            Some(word) if !token.space_before => word.push(token),
            _ => words.push(vec![token]),
        }
    }

    let mut builder = LineBuilder {
        measurer,
        plain,
        emphasized,
        lines: Vec::new(),
        current: LineLayout::default(),
    };

    for word in &words {
        let word_width: f32 = word.iter().map(|t| builder.width(t.text, t.emphasized)).sum();
        let line_is_empty = builder.current.items.is_empty();
        let space = if line_is_empty { 0.0 } else { builder.width(" ", word[0].emphasized) };

        if !line_is_empty && builder.current.width + space + word_width > max_width {
            builder.new_line();
        }

        if word_width > max_width {
            for token in word {
                for (i, ch) in token.text.char_indices() {
                    let piece = &token.text[i..i + ch.len_utf8()];
                    let char_width = builder.width(piece, token.emphasized);
                    if !builder.current.items.is_empty()
                        && builder.current.width + char_width > max_width
                    {
                        builder.new_line();
                    }
                    builder.append(piece, token.emphasized, false);
                }
            }
            continue;
        }

        let mut first = true;
        for token in word {
            let with_space = first && !builder.current.items.is_empty();
            builder.append(token.text, token.emphasized, with_space);
            first = false;
        }
    }
    builder.new_line();
    builder.lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> StyleToken {
        StyleToken::new("Helvetica", 10.0)
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let measurer = TextMeasurer::new();
        let lines = wrap_plain(&measurer, "Shared values", &body(), 500.0);
        assert_eq!(lines, vec!["Shared values"]);
    }

    #[test]
    fn wraps_at_word_boundaries_within_width() {
        let measurer = TextMeasurer::new();
        let style = body();
        let text = "The couple shows strong emotional alignment and shared long term goals";
        let lines = wrap_plain(&measurer, text, &style, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measurer.text_width(line, &style) <= 120.0 + 0.01, "{line:?} overflows");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn overlong_word_is_split_between_characters() {
        let measurer = TextMeasurer::new();
        let style = body();
        let lines = wrap_plain(&measurer, "Supercalifragilisticexpialidocious", &style, 40.0);
        assert!(lines.len() > 2);
        assert_eq!(lines.concat(), "Supercalifragilisticexpialidocious");
        for line in &lines {
            assert!(measurer.text_width(line, &style) <= 40.0 + 0.01);
        }
    }

    #[test]
    fn explicit_newlines_force_breaks() {
        let measurer = TextMeasurer::new();
        let lines = wrap_plain(&measurer, "one\n\ntwo", &body(), 500.0);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn rich_runs_keep_emphasis_per_fragment() {
        let measurer = TextMeasurer::new();
        let plain = body();
        let bold = body().bold();
        let runs = vec![Run::emphasized("Strength:"), Run::plain(" shared values")];
        let lines = break_lines(&measurer, &runs, &plain, &bold, 500.0);
        assert_eq!(lines.len(), 1);
        let items = &lines[0].items;
        assert_eq!(items.len(), 2);
        assert!(items[0].emphasized);
        assert_eq!(items[0].x, 0.0);
        assert_eq!(items[1].text, "shared values");
        assert!(items[1].x > items[0].width);
    }

    #[test]
    fn rich_lines_respect_max_width() {
        let measurer = TextMeasurer::new();
        let plain = body();
        let bold = body().bold();
        let runs = vec![
            Run::plain("Long narrative with "),
            Run::emphasized("several emphasized words"),
            Run::plain(" that must wrap across more than one line of output"),
        ];
        let lines = break_lines(&measurer, &runs, &plain, &bold, 150.0);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(line.width <= 150.0 + 0.01, "line width {} overflows", line.width);
        }
    }

    #[test]
    fn touching_runs_are_not_separated() {
        let measurer = TextMeasurer::new();
        let plain = body();
        let bold = body().bold();
        let runs = vec![Run::plain("pre"), Run::emphasized("fix")];
        let lines = break_lines(&measurer, &runs, &plain, &bold, 500.0);
        let items = &lines[0].items;
        assert_eq!(items[1].x, items[0].width);
    }
}
