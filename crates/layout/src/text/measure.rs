use super::metrics::MetricSet;
use super::wrapper::{LineLayout, break_lines, wrap_plain};
use folio_markup::Run;
use folio_style::StyleToken;

/// Smallest width text is ever wrapped to.
const MIN_WRAP_WIDTH: f32 = 1.0;

/// Result of measuring a text run at a maximum width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub line_count: usize,
    /// Width of the widest wrapped line.
    pub width: f32,
    pub height: f32,
}

/// Measures and wraps text using the Base-14 advance widths.
///
/// Stateless: every method is a pure function of its arguments, so a measure pass and a
/// later draw pass always agree on line breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMeasurer;

impl TextMeasurer {
    pub fn new() -> Self {
        Self
    }

    pub fn char_width(&self, ch: char, style: &StyleToken) -> f32 {
        MetricSet::for_style(style).advance(ch) as f32 * style.size / 1000.0
    }

    /// Unwrapped advance width of a single line of text, including letter spacing.
    pub fn text_width(&self, text: &str, style: &StyleToken) -> f32 {
        let metrics = MetricSet::for_style(style);
        let (count, advance) = text
            .chars()
            .fold((0usize, 0.0f32), |(n, w), ch| (n + 1, w + metrics.advance(ch) as f32));
        let spacing = style.letter_spacing * count.saturating_sub(1) as f32;
        advance * style.size / 1000.0 + spacing
    }

    /// Width of the widest explicit line (`\n` separated), without wrapping.
    pub fn max_line_width(&self, text: &str, style: &StyleToken) -> f32 {
        text.lines()
            .map(|line| self.text_width(line, style))
            .fold(0.0, f32::max)
    }

    pub fn line_height(&self, style: &StyleToken) -> f32 {
        style.line_height()
    }

    /// Greedy word wrap. Words longer than `max_width` are broken between characters.
    pub fn wrap(&self, text: &str, style: &StyleToken, max_width: f32) -> Vec<String> {
        wrap_plain(self, text, style, max_width.max(MIN_WRAP_WIDTH))
    }

    pub fn measure(&self, text: &str, style: &StyleToken, max_width: f32) -> Measurement {
        let lines = self.wrap(text, style, max_width);
        Measurement {
            line_count: lines.len(),
            width: lines
                .iter()
                .map(|line| self.text_width(line, style))
                .fold(0.0, f32::max),
            height: lines.len() as f32 * self.line_height(style),
        }
    }

    /// Wraps emphasized/plain runs, each drawn in its own style.
    pub fn wrap_runs(
        &self,
        runs: &[Run],
        plain: &StyleToken,
        emphasized: &StyleToken,
        max_width: f32,
    ) -> Vec<LineLayout> {
        break_lines(self, runs, plain, emphasized, max_width.max(MIN_WRAP_WIDTH))
    }

    pub fn measure_runs(
        &self,
        runs: &[Run],
        plain: &StyleToken,
        emphasized: &StyleToken,
        max_width: f32,
    ) -> Measurement {
        let lines = self.wrap_runs(runs, plain, emphasized, max_width);
        let line_height = self.line_height(plain).max(self.line_height(emphasized));
        Measurement {
            line_count: lines.len(),
            width: lines.iter().map(|l| l.width).fold(0.0, f32::max),
            height: lines.len() as f32 * line_height,
        }
    }
}
