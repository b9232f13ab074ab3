use crate::error::RenderError;
use crate::image_data::ImageData;
use folio_style::StyleToken;
use folio_types::{Color, Point, Rect, Size};
use serde::Serialize;

/// Line drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Dash on/off lengths; solid when `None`.
    pub dash: Option<(f32, f32)>,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(mut self, on: f32, off: f32) -> Self {
        self.dash = Some((on, off));
        self
    }
}

/// A drawing sink for paginated output.
///
/// Coordinates use a top-left origin with y growing downwards; backends that need a
/// different origin convert internally. Text is positioned by the top of its line box.
/// Every drawing call must happen between `begin_page` and `end_page`.
pub trait RenderSurface {
    /// What the surface produces once finished (bytes, a writer, a recording...).
    type Output;

    fn begin_page(&mut self, size: Size) -> Result<(), RenderError>;

    fn end_page(&mut self) -> Result<(), RenderError>;

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &StyleToken,
    ) -> Result<(), RenderError>;

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), RenderError>;

    fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        color: Color,
    ) -> Result<(), RenderError>;

    fn stroke_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        stroke: &Stroke,
    ) -> Result<(), RenderError>;

    /// Fills the ellipse inscribed in `rect`.
    fn fill_ellipse(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;

    /// Strokes a circular arc. Angles are in degrees, clockwise from twelve o'clock.
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        stroke: &Stroke,
    ) -> Result<(), RenderError>;

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<(), RenderError>;

    fn draw_image(&mut self, image: &ImageData, rect: Rect) -> Result<(), RenderError>;

    /// Closes the document and yields the finished output.
    fn finish(self) -> Result<Self::Output, RenderError>
    where
        Self: Sized;
}
