//! Section renderers. Each one measures its block, reserves space through the page flow and
//! then draws at the cursor.

mod cards;
mod chart;
mod cover;
mod heading;
mod narrative;
mod table;

pub(crate) use cards::{disclaimer, reasons, status, summary, verdict};
pub(crate) use cover::cover;
pub(crate) use narrative::narrative;
pub(crate) use table::table_section;

use crate::chrome::Canvas;
use crate::theme::Theme;
use folio_layout::{LayoutConfig, PageFlow, TextMeasurer};
use folio_render_core::ImageData;
use folio_style::TextRole;

pub(crate) type Flow<S> = PageFlow<Canvas<S>>;

/// Read-only inputs shared by every renderer during one render.
pub(crate) struct Context<'a> {
    pub theme: &'a Theme,
    pub layout: &'a LayoutConfig,
    pub measurer: TextMeasurer,
    pub logo: Option<&'a ImageData>,
}

impl<'a> Context<'a> {
    pub fn new(theme: &'a Theme, layout: &'a LayoutConfig, logo: Option<&'a ImageData>) -> Self {
        Self { theme, layout, measurer: TextMeasurer::new(), logo }
    }

    pub fn line_height(&self, role: TextRole) -> f32 {
        self.measurer.line_height(&self.theme.fonts.token(role))
    }

    /// Space a heading keeps for the block that follows it.
    pub fn keep_allowance(&self) -> f32 {
        self.layout.keep_with_next_lines as f32 * self.line_height(TextRole::Body)
    }
}
