use crate::helpers::{self, to_win_ansi};
use crate::writer::StreamingPdfWriter;
use folio_layout::MetricSet;
use folio_render_core::utils::{
    PathSegment, arc_path, baseline, ellipse_path, flip_y, rounded_rect_path,
};
use folio_render_core::{ImageData, RenderError, RenderSurface, Stroke};
use folio_style::StyleToken;
use folio_types::{Color, Point, Rect, Size};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::Write;

const FONT_SETS: [MetricSet; 5] = [
    MetricSet::Helvetica,
    MetricSet::HelveticaBold,
    MetricSet::TimesRoman,
    MetricSet::TimesBold,
    MetricSet::Courier,
];

fn font_resource_name(set: MetricSet) -> &'static str {
    match set {
        MetricSet::Helvetica => "F1",
        MetricSet::HelveticaBold => "F2",
        MetricSet::TimesRoman => "F3",
        MetricSet::TimesBold => "F4",
        MetricSet::Courier => "F5",
    }
}

/// Document metadata written to the PDF Info dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
}

impl DocumentInfo {
    fn to_dictionary(&self) -> Option<Dictionary> {
        let mut dict = Dictionary::new();
        let entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Creator", &self.creator),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                dict.set(key, Object::String(to_win_ansi(value), StringFormat::Literal));
            }
        }
        if dict.is_empty() {
            None
        } else {
            dict.set("Producer", Object::string_literal("folio"));
            Some(dict)
        }
    }
}

struct OpenPage {
    size: Size,
    operations: Vec<Operation>,
}

/// A [`RenderSurface`] producing a PDF that references the standard Type1 faces.
///
/// Finishing the surface hands back the underlying writer.
pub struct LopdfSurface<W: Write> {
    writer: StreamingPdfWriter<W>,
    page: Option<OpenPage>,
    ext_states: BTreeMap<String, Dictionary>,
    images: Dictionary,
    info: DocumentInfo,
}

impl<W: Write> LopdfSurface<W> {
    pub fn new(writer: W) -> Result<Self, RenderError> {
        Ok(Self {
            writer: StreamingPdfWriter::new(writer, "1.7")?,
            page: None,
            ext_states: BTreeMap::new(),
            images: Dictionary::new(),
            info: DocumentInfo::default(),
        })
    }

    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    pub fn page_count(&self) -> usize {
        self.writer.page_count()
    }

    fn page(&mut self) -> Result<&mut OpenPage, RenderError> {
        self.page.as_mut().ok_or(RenderError::NoOpenPage)
    }

    /// Name of a graphics state applying `alpha` to fills and strokes, registering it on
    /// first use. Opaque colours need none.
    fn alpha_state(&mut self, alpha: f32) -> Option<String> {
        if alpha >= 1.0 {
            return None;
        }
        let percent = (alpha.clamp(0.0, 1.0) * 100.0).round() as u32;
        let name = format!("GS{:03}", percent);
        self.ext_states.entry(name.clone()).or_insert_with(|| {
            let value = percent as f32 / 100.0;
            dictionary! { "Type" => "ExtGState", "ca" => value, "CA" => value }
        });
        Some(name)
    }

    /// Pushes `body` wrapped in a save/restore pair, with the colour's alpha applied.
    fn emit(&mut self, alpha: f32, body: Vec<Operation>) -> Result<(), RenderError> {
        let state = self.alpha_state(alpha);
        let page = self.page()?;
        page.operations.push(Operation::new("q", vec![]));
        if let Some(state) = state {
            page.operations.push(Operation::new("gs", vec![Object::Name(state.into_bytes())]));
        }
        page.operations.extend(body);
        page.operations.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn page_height(&self) -> Result<f32, RenderError> {
        self.page.as_ref().map(|p| p.size.height).ok_or(RenderError::NoOpenPage)
    }

    fn fill_path(&mut self, segments: &[PathSegment], color: Color) -> Result<(), RenderError> {
        let height = self.page_height()?;
        let mut body = vec![helpers::fill_color(&color)];
        body.extend(helpers::path_operations(segments, height));
        body.push(Operation::new("f", vec![]));
        self.emit(color.a, body)
    }

    fn stroke_path(
        &mut self,
        segments: &[PathSegment],
        stroke: &Stroke,
    ) -> Result<(), RenderError> {
        let height = self.page_height()?;
        let mut body = stroke_setup(stroke);
        body.extend(helpers::path_operations(segments, height));
        body.push(Operation::new("S", vec![]));
        self.emit(stroke.color.a, body)
    }

    fn resources(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for set in FONT_SETS {
            fonts.set(
                font_resource_name(set),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => set.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }

        let mut resources = dictionary! {
            "Font" => fonts,
            "ProcSet" => vec!["PDF".into(), "Text".into(), "ImageB".into(), "ImageC".into()],
        };
        if !self.ext_states.is_empty() {
            let mut states = Dictionary::new();
            for (name, state) in &self.ext_states {
                states.set(name.as_bytes(), state.clone());
            }
            resources.set("ExtGState", states);
        }
        if !self.images.is_empty() {
            resources.set("XObject", self.images.clone());
        }
        resources
    }
}

/// `re` operands for `rect` in PDF space.
fn rect_operands(rect: Rect, page_height: f32) -> Vec<Object> {
    vec![
        rect.x.into(),
        flip_y(rect.bottom(), page_height).into(),
        rect.width.into(),
        rect.height.into(),
    ]
}

fn stroke_setup(stroke: &Stroke) -> Vec<Operation> {
    vec![
        helpers::stroke_color(&stroke.color),
        Operation::new("w", vec![stroke.width.into()]),
        helpers::dash(stroke.dash),
    ]
}

impl<W: Write> RenderSurface for LopdfSurface<W> {
    type Output = W;

    fn begin_page(&mut self, size: Size) -> Result<(), RenderError> {
        if self.page.is_some() {
            return Err(RenderError::PageAlreadyOpen(self.writer.page_count() + 1));
        }
        self.page = Some(OpenPage { size, operations: Vec::new() });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        let page = self.page.take().ok_or(RenderError::NoOpenPage)?;
        let content = Content { operations: page.operations };
        let contents = self.writer.write_content_stream(&content)?;
        self.writer.write_page(contents, page.size.width, page.size.height)?;
        log::debug!(
            "wrote page {} ({} operations)",
            self.writer.page_count(),
            content.operations.len()
        );
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &StyleToken,
    ) -> Result<(), RenderError> {
        if text.is_empty() {
            return Ok(());
        }
        let height = self.page_height()?;
        let font = font_resource_name(MetricSet::for_style(style));
        let y = flip_y(baseline(origin.y, style.size), height);

        let mut body = vec![
            helpers::fill_color(&style.color),
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), style.size.into()]),
        ];
        if style.letter_spacing != 0.0 {
            body.push(Operation::new("Tc", vec![style.letter_spacing.into()]));
        }
        body.push(Operation::new("Td", vec![origin.x.into(), y.into()]));
        let encoded = Object::String(to_win_ansi(text), StringFormat::Literal);
        body.push(Operation::new("Tj", vec![encoded]));
        body.push(Operation::new("ET", vec![]));
        self.emit(style.color.a, body)
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        self.stroke_path(&[PathSegment::MoveTo(from), PathSegment::LineTo(to)], stroke)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        let height = self.page_height()?;
        let body = vec![
            helpers::fill_color(&color),
            Operation::new("re", rect_operands(rect, height)),
            Operation::new("f", vec![]),
        ];
        self.emit(color.a, body)
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), RenderError> {
        let height = self.page_height()?;
        let mut body = stroke_setup(stroke);
        body.push(Operation::new("re", rect_operands(rect, height)));
        body.push(Operation::new("S", vec![]));
        self.emit(stroke.color.a, body)
    }

    fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        color: Color,
    ) -> Result<(), RenderError> {
        self.fill_path(&rounded_rect_path(rect, radius), color)
    }

    fn stroke_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        stroke: &Stroke,
    ) -> Result<(), RenderError> {
        self.stroke_path(&rounded_rect_path(rect, radius), stroke)
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        self.fill_path(&ellipse_path(rect), color)
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        stroke: &Stroke,
    ) -> Result<(), RenderError> {
        if sweep_degrees == 0.0 || radius <= 0.0 {
            return Ok(());
        }
        self.stroke_path(&arc_path(center, radius, start_degrees, sweep_degrees), stroke)
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<(), RenderError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        let mut segments = vec![PathSegment::MoveTo(*first)];
        segments.extend(rest.iter().map(|p| PathSegment::LineTo(*p)));
        segments.push(PathSegment::Close);
        self.fill_path(&segments, color)
    }

    fn draw_image(&mut self, image: &ImageData, rect: Rect) -> Result<(), RenderError> {
        let height = self.page_height()?;

        let mut image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        if let Some(alpha) = &image.alpha {
            let mask = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            };
            let mask = Object::Stream(Stream::new(mask, alpha.clone()));
            let mask_id = self.writer.write_object(&mask)?;
            image_dict.set("SMask", mask_id);
        }
        let stream = Object::Stream(Stream::new(image_dict, image.rgb.clone()));
        let image_id = self.writer.write_object(&stream)?;

        let name = format!("Im{}", self.images.len() + 1);
        self.images.set(name.as_bytes(), image_id);

        let body = vec![
            Operation::new(
                "cm",
                vec![
                    rect.width.into(),
                    0.into(),
                    0.into(),
                    rect.height.into(),
                    rect.x.into(),
                    flip_y(rect.bottom(), height).into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.into_bytes())]),
        ];
        self.emit(1.0, body)
    }

    fn finish(self) -> Result<W, RenderError> {
        if self.page.is_some() {
            return Err(RenderError::Other("document finished with a page still open".to_string()));
        }
        let resources = self.resources();
        let info = self.info.to_dictionary();
        log::info!("finishing PDF with {} pages", self.writer.page_count());
        Ok(self.writer.finish(resources, info)?)
    }
}
