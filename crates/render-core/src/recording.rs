use crate::error::RenderError;
use crate::image_data::ImageData;
use crate::traits::{RenderSurface, Stroke};
use folio_style::StyleToken;
use folio_types::{Color, Point, Rect, Size};
use serde::Serialize;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Text { text: String, origin: Point, family: String, size: f32, bold: bool, color: Color },
    Line { from: Point, to: Point, stroke: Stroke },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, stroke: Stroke },
    FillRoundedRect { rect: Rect, radius: f32, color: Color },
    StrokeRoundedRect { rect: Rect, radius: f32, stroke: Stroke },
    FillEllipse { rect: Rect, color: Color },
    StrokeArc { center: Point, radius: f32, start: f32, sweep: f32, stroke: Stroke },
    FillPolygon { points: Vec<Point>, color: Color },
    Image { rect: Rect, width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedPage {
    pub size: Size,
    pub commands: Vec<DrawCommand>,
}

impl RecordedPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// Everything a [`RecordingSurface`] saw, page by page.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Recording {
    pub pages: Vec<RecordedPage>,
}

impl Recording {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the first page that draws text containing `needle`.
    pub fn page_of(&self, needle: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.contains_text(needle))
    }

    pub fn all_text(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|p| p.texts()).collect()
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An in-memory [`RenderSurface`] that records every call. Used to inspect layout decisions
/// without producing a real document.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    finished: Vec<RecordedPage>,
    open: Option<RecordedPage>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, command: DrawCommand) -> Result<(), RenderError> {
        let page = self.open.as_mut().ok_or(RenderError::NoOpenPage)?;
        page.commands.push(command);
        Ok(())
    }
}

impl RenderSurface for RecordingSurface {
    type Output = Recording;

    fn begin_page(&mut self, size: Size) -> Result<(), RenderError> {
        if self.open.is_some() {
            return Err(RenderError::PageAlreadyOpen(self.finished.len() + 1));
        }
        self.open = Some(RecordedPage { size, commands: Vec::new() });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        let page = self.open.take().ok_or(RenderError::NoOpenPage)?;
        self.finished.push(page);
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &StyleToken,
    ) -> Result<(), RenderError> {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            family: style.family.clone(),
            size: style.size,
            bold: style.weight.is_bold(),
            color: style.color,
        })
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        self.push(DrawCommand::Line { from, to, stroke: *stroke })
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.push(DrawCommand::FillRect { rect, color })
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), RenderError> {
        self.push(DrawCommand::StrokeRect { rect, stroke: *stroke })
    }

    fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        color: Color,
    ) -> Result<(), RenderError> {
        self.push(DrawCommand::FillRoundedRect { rect, radius, color })
    }

    fn stroke_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        stroke: &Stroke,
    ) -> Result<(), RenderError> {
        self.push(DrawCommand::StrokeRoundedRect { rect, radius, stroke: *stroke })
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.push(DrawCommand::FillEllipse { rect, color })
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        stroke: &Stroke,
    ) -> Result<(), RenderError> {
        self.push(DrawCommand::StrokeArc {
            center,
            radius,
            start: start_degrees,
            sweep: sweep_degrees,
            stroke: *stroke,
        })
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<(), RenderError> {
        self.push(DrawCommand::FillPolygon { points: points.to_vec(), color })
    }

    fn draw_image(&mut self, image: &ImageData, rect: Rect) -> Result<(), RenderError> {
        self.push(DrawCommand::Image { rect, width: image.width, height: image.height })
    }

    fn finish(mut self) -> Result<Recording, RenderError> {
        if let Some(page) = self.open.take() {
            log::warn!("recording finished with an open page; closing it");
            self.finished.push(page);
        }
        Ok(Recording { pages: self.finished })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_per_page() {
        let mut surface = RecordingSurface::new();
        let style = StyleToken::new("Helvetica", 10.0);
        surface.begin_page(Size::new(612.0, 792.0)).unwrap();
        surface.draw_text("first", Point::new(54.0, 72.0), &style).unwrap();
        surface.end_page().unwrap();
        surface.begin_page(Size::new(612.0, 792.0)).unwrap();
        surface.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK).unwrap();
        surface.draw_text("second", Point::new(54.0, 72.0), &style.bold()).unwrap();
        surface.end_page().unwrap();

        let recording = surface.finish().unwrap();
        assert_eq!(recording.page_count(), 2);
        assert_eq!(recording.page_of("second"), Some(1));
        assert_eq!(recording.all_text(), vec!["first", "second"]);
        assert!(recording.to_json().unwrap().contains("\"op\": \"fillRect\""));
    }

    #[test]
    fn drawing_without_a_page_fails() {
        let mut surface = RecordingSurface::new();
        let err = surface
            .fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK)
            .unwrap_err();
        assert!(matches!(err, RenderError::NoOpenPage));
    }

    #[test]
    fn nested_pages_are_rejected() {
        let mut surface = RecordingSurface::new();
        surface.begin_page(Size::new(10.0, 10.0)).unwrap();
        assert!(matches!(
            surface.begin_page(Size::new(10.0, 10.0)),
            Err(RenderError::PageAlreadyOpen(1))
        ));
    }
}
