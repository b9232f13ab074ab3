use folio_style::{FontSet, FontWeight, Palette, StyleToken, TextRole};
use folio_types::Color;
use serde::Serialize;

/// Semantic colour of a piece of content, resolved against the [`Palette`] at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Tone {
    #[default]
    Text,
    Secondary,
    Accent,
    Positive,
    Negative,
    Caution,
    /// Pure white, used for totals and cover names.
    Strong,
}

/// Fonts plus palette for one render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Theme {
    pub fonts: FontSet,
    pub palette: Palette,
}

impl Theme {
    pub fn new(fonts: FontSet, palette: Palette) -> Self {
        Self { fonts, palette }
    }

    pub fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Text => self.palette.text,
            Tone::Secondary => self.palette.text_secondary,
            Tone::Accent => self.palette.accent,
            Tone::Positive => self.palette.positive,
            Tone::Negative => self.palette.negative,
            Tone::Caution => self.palette.caution,
            Tone::Strong => Color::WHITE,
        }
    }

    pub fn style(&self, role: TextRole, tone: Tone) -> StyleToken {
        self.fonts.token(role).with_color(self.color(tone))
    }

    /// `role` in `tone` at reduced opacity.
    pub fn faded(&self, role: TextRole, tone: Tone, alpha: f32) -> StyleToken {
        self.fonts.token(role).with_color(self.color(tone).with_alpha(alpha))
    }

    /// `role` in the bold weight of its family.
    pub fn bold(&self, role: TextRole, tone: Tone) -> StyleToken {
        self.style(role, tone).with_weight(FontWeight::Bold)
    }

    pub fn accent_alpha(&self, alpha: f32) -> Color {
        self.palette.accent.with_alpha(alpha)
    }
}
