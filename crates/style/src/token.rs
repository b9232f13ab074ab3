use crate::font::{FontStyle, FontWeight};
use folio_types::Color;
use serde::{Deserialize, Serialize};

/// An immutable bundle of font and color choices used to measure and draw a run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleToken {
    pub family: String,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
    pub size: f32,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub letter_spacing: f32,
}

impl StyleToken {
    pub fn new(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            size,
            color: Color::BLACK,
            letter_spacing: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    /// Vertical advance of one wrapped line.
    pub fn line_height(&self) -> f32 {
        self.size * 1.2
    }
}
