//! The drawing canvas handed to the page flow. It paints per-page boilerplate (background,
//! corner brackets, constellation dots, running header and footer) and offers the small
//! text and shape helpers the section renderers share.

use crate::config::ChromeLayout;
use crate::plan::ChromeText;
use crate::theme::{Theme, Tone};
use folio_layout::{PageChrome, PageInfo, PageKind, TextMeasurer};
use folio_render_core::utils::star_points;
use folio_render_core::{RenderError, RenderSurface, Stroke};
use folio_style::{StyleToken, TextRole};
use folio_types::{Color, Point, Rect};

/// Relative positions of the faint background dots on content pages.
const CONSTELLATION: [(f32, f32); 10] = [
    (0.85, 0.12),
    (0.12, 0.25),
    (0.92, 0.38),
    (0.08, 0.52),
    (0.88, 0.65),
    (0.15, 0.78),
    (0.90, 0.88),
    (0.10, 0.15),
    (0.75, 0.08),
    (0.20, 0.92),
];

const BRACKET_INSET: f32 = 22.0;
const BRACKET_LENGTH: f32 = 18.0;

pub struct Canvas<S: RenderSurface> {
    surface: S,
    theme: Theme,
    text: ChromeText,
    layout: ChromeLayout,
    measurer: TextMeasurer,
}

impl<S: RenderSurface> Canvas<S> {
    pub fn new(surface: S, theme: Theme, text: ChromeText, layout: ChromeLayout) -> Self {
        Self {
            surface,
            theme,
            text,
            layout,
            measurer: TextMeasurer::new(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn measurer(&self) -> &TextMeasurer {
        &self.measurer
    }

    pub fn surface(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Draws one line of text with its line box starting at `top`.
    pub fn text(
        &mut self,
        text: &str,
        x: f32,
        top: f32,
        style: &StyleToken,
    ) -> Result<(), RenderError> {
        if text.is_empty() {
            return Ok(());
        }
        self.surface.draw_text(text, Point::new(x, top), style)
    }

    /// Draws `text` centered on `center_x`. Returns its width.
    pub fn centered(
        &mut self,
        text: &str,
        center_x: f32,
        top: f32,
        style: &StyleToken,
    ) -> Result<f32, RenderError> {
        let width = self.measurer.text_width(text, style);
        self.text(text, center_x - width / 2.0, top, style)?;
        Ok(width)
    }

    pub fn right_aligned(
        &mut self,
        text: &str,
        right: f32,
        top: f32,
        style: &StyleToken,
    ) -> Result<(), RenderError> {
        let width = self.measurer.text_width(text, style);
        self.text(text, right - width, top, style)
    }

    /// Draws pre-wrapped lines stacked from `top`. Returns the height used.
    pub fn lines(
        &mut self,
        lines: &[String],
        x: f32,
        top: f32,
        style: &StyleToken,
    ) -> Result<f32, RenderError> {
        let line_height = self.measurer.line_height(style);
        for (i, line) in lines.iter().enumerate() {
            self.text(line, x, top + i as f32 * line_height, style)?;
        }
        Ok(lines.len() as f32 * line_height)
    }

    pub fn hline(
        &mut self,
        y: f32,
        x1: f32,
        x2: f32,
        color: Color,
        width: f32,
    ) -> Result<(), RenderError> {
        self.surface
            .draw_line(Point::new(x1, y), Point::new(x2, y), &Stroke::new(color, width))
    }

    pub fn diamond(&mut self, center: Point, size: f32, color: Color) -> Result<(), RenderError> {
        let points = [
            Point::new(center.x, center.y - size),
            Point::new(center.x + size, center.y),
            Point::new(center.x, center.y + size),
            Point::new(center.x - size, center.y),
        ];
        self.surface.fill_polygon(&points, color)
    }

    pub fn dot(&mut self, center: Point, radius: f32, color: Color) -> Result<(), RenderError> {
        let rect = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.surface.fill_ellipse(rect, color)
    }

    /// Five vector stars starting at `x`, the first `filled` in `on`, the rest in `off`.
    /// Returns the total width.
    pub fn stars(
        &mut self,
        x: f32,
        top: f32,
        size: f32,
        filled: u8,
        on: Color,
        off: Color,
    ) -> Result<f32, RenderError> {
        let gap = size * 0.5;
        let radius = size / 2.0;
        for i in 0..5u8 {
            let center = Point::new(x + radius + f32::from(i) * (size + gap), top + radius);
            let color = if i < filled { on } else { off };
            self.surface.fill_polygon(&star_points(center, radius, radius * 0.45), color)?;
        }
        Ok(5.0 * size + 4.0 * gap)
    }

    /// `──◆──` centered on `center_x`.
    pub fn ornament(&mut self, center_x: f32, y: f32) -> Result<(), RenderError> {
        let line = self.theme.palette.decoration;
        self.hline(y, center_x - 50.0, center_x - 6.0, line, 0.5)?;
        self.diamond(Point::new(center_x, y), 4.0, self.theme.accent_alpha(0.6))?;
        self.hline(y, center_x + 6.0, center_x + 50.0, line, 0.5)
    }

    fn corner_brackets(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        let stroke = Stroke::new(self.theme.accent_alpha(0.12), 1.0);
        let (near, len) = (BRACKET_INSET, BRACKET_LENGTH);
        let (right, bottom) = (width - near, height - near);
        let corners = [
            (Point::new(near, near), 1.0, 1.0),
            (Point::new(right, near), -1.0, 1.0),
            (Point::new(near, bottom), 1.0, -1.0),
            (Point::new(right, bottom), -1.0, -1.0),
        ];
        for (corner, dx, dy) in corners {
            self.surface
                .draw_line(corner, Point::new(corner.x + dx * len, corner.y), &stroke)?;
            self.surface
                .draw_line(corner, Point::new(corner.x, corner.y + dy * len), &stroke)?;
        }
        Ok(())
    }

    fn constellation(&mut self, page: usize, width: f32, height: f32) -> Result<(), RenderError> {
        let color = self.theme.accent_alpha(0.06);
        let seed = page * 7;
        for (i, (fx, fy)) in CONSTELLATION.iter().enumerate() {
            let radius = ((seed + i * 13) % 3 + 1) as f32;
            self.dot(Point::new(fx * width, fy * height), radius, color)?;
        }
        Ok(())
    }

    fn running_header(&mut self, page: &PageInfo) -> Result<(), RenderError> {
        let geometry = page.geometry;
        let left_style = self
            .theme
            .faded(TextRole::RunningHeader, Tone::Accent, 0.5)
            .with_letter_spacing(2.0);
        let right_style = self.theme.faded(TextRole::RunningHeader, Tone::Accent, 0.4);
        let left = ChromeText::resolve(&self.text.header_left, page.number);
        let right = ChromeText::resolve(&self.text.header_right, page.number);
        let y = self.layout.header_y;
        self.text(&left, geometry.margin, y, &left_style)?;
        self.right_aligned(&right, geometry.page_width - geometry.margin, y, &right_style)?;
        self.hline(
            self.layout.header_rule_y,
            geometry.margin,
            geometry.page_width - geometry.margin,
            self.theme.accent_alpha(0.2),
            0.5,
        )
    }

    fn running_footer(&mut self, page: &PageInfo) -> Result<(), RenderError> {
        let geometry = page.geometry;
        let style = self.theme.faded(TextRole::Tiny, Tone::Accent, 0.3);
        let y = geometry.page_height - self.layout.footer_offset;
        self.hline(
            y - 8.0,
            geometry.margin,
            geometry.page_width - geometry.margin,
            self.theme.accent_alpha(0.1),
            0.5,
        )?;
        let left = ChromeText::resolve(&self.text.footer_left, page.number);
        let right = ChromeText::resolve(&self.text.footer_right, page.number);
        self.text(&left, geometry.margin, y, &style)?;
        self.right_aligned(&right, geometry.page_width - geometry.margin, y, &style)
    }
}

impl<S: RenderSurface> PageChrome for Canvas<S> {
    type Error = RenderError;

    fn begin_page(&mut self, page: &PageInfo) -> Result<(), RenderError> {
        let size = page.geometry.page_size();
        self.surface.begin_page(size)?;
        self.surface.fill_rect(
            Rect::new(0.0, 0.0, size.width, size.height),
            self.theme.palette.background,
        )?;
        if page.kind == PageKind::Content {
            self.corner_brackets(size.width, size.height)?;
            self.constellation(page.number, size.width, size.height)?;
            self.running_header(page)?;
        }
        Ok(())
    }

    fn end_page(&mut self, page: &PageInfo) -> Result<(), RenderError> {
        if page.kind == PageKind::Content {
            self.running_footer(page)?;
        }
        self.surface.end_page()
    }
}
