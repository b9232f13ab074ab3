//! The cover page: a centered stack of items from a fixed start, plus lines pinned to the
//! page bottom. Nothing here can break a page.

use super::{Context, Flow};
use crate::error::ComposeError;
use crate::plan::{Cover, CoverItem, CoverText};
use crate::theme::Tone;
use folio_layout::PlacementKind;
use folio_render_core::{RenderSurface, Stroke};
use folio_style::{StyleToken, TextRole};
use folio_types::{Point, Rect};

const BORDER_INSET: f32 = 30.0;
const CORNER_INSET: f32 = 40.0;
const CORNER_LENGTH: f32 = 20.0;
const LOGO_GAP: f32 = 16.0;
const STAR_SIZE: f32 = 18.0;
const STAR_ADVANCE: f32 = 24.0;
const DIAL_WIDTH: f32 = 4.0;
const DIAL_GAP: f32 = 20.0;

fn text_style(ctx: &Context, text: &CoverText) -> StyleToken {
    let mut style = ctx.theme.faded(text.role, text.tone, text.alpha);
    if let Some(size) = text.size {
        style = style.with_size(size);
    }
    if let Some(spacing) = text.letter_spacing {
        style = style.with_letter_spacing(spacing);
    }
    style
}

/// Draws `cover` on the page the flow currently has open.
pub(crate) fn cover<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    cover: &Cover,
) -> Result<(), ComposeError> {
    let geometry = *flow.geometry();
    let center_x = geometry.page_width / 2.0;

    if cover.framed {
        frame(flow, ctx)?;
    }
    flow.add_spacing(cover.start_y - flow.y());

    for item in &cover.items {
        let top = flow.y();
        let advance = match item {
            CoverItem::Logo { size } => match ctx.logo {
                Some(logo) => {
                    let height = size / logo.aspect_ratio().max(f32::EPSILON);
                    let rect = Rect::new(center_x - size / 2.0, top, *size, height);
                    flow.chrome().surface().draw_image(logo, rect)?;
                    height + LOGO_GAP
                }
                None => 0.0,
            },
            CoverItem::Text(text) => {
                flow.chrome().centered(&text.text, center_x, top, &text_style(ctx, text))?;
                text.advance
            }
            CoverItem::Rule { half_width, alpha, diamond, after } => {
                let canvas = flow.chrome();
                let color = ctx.theme.accent_alpha(*alpha);
                canvas.hline(top, center_x - half_width, center_x + half_width, color, 1.0)?;
                if *diamond {
                    canvas.diamond(Point::new(center_x, top), 4.0, ctx.theme.accent_alpha(0.6))?;
                }
                *after
            }
            CoverItem::ScoreDial { fraction, score, max, diameter } => {
                let center = Point::new(center_x, top + diameter / 2.0);
                score_dial(flow, ctx, center, *diameter, *fraction, *score, *max)?;
                diameter + DIAL_GAP
            }
            CoverItem::Stars { filled } => {
                let width = 5.0 * STAR_SIZE + 4.0 * STAR_SIZE * 0.5;
                flow.chrome().stars(
                    center_x - width / 2.0,
                    top,
                    STAR_SIZE,
                    *filled,
                    ctx.theme.palette.accent,
                    ctx.theme.accent_alpha(0.25),
                )?;
                STAR_ADVANCE
            }
            CoverItem::Gap(gap) => {
                flow.add_spacing(*gap);
                continue;
            }
        };
        if advance > 0.0 {
            flow.place(PlacementKind::Cover, advance);
        }
    }

    for (offset, text) in &cover.footer {
        let style = text_style(ctx, text);
        let top = geometry.page_height - offset;
        flow.chrome().centered(&text.text, center_x, top, &style)?;
        flow.record(PlacementKind::Cover, top, ctx.measurer.line_height(&style));
    }
    Ok(())
}

/// Outer border and inner corner brackets.
fn frame<S: RenderSurface>(flow: &mut Flow<S>, ctx: &Context) -> Result<(), ComposeError> {
    let geometry = *flow.geometry();
    let (width, height) = (geometry.page_width, geometry.page_height);
    let surface = flow.chrome().surface();

    let inset = |by: f32| Rect::new(by, by, width - 2.0 * by, height - 2.0 * by);
    let border = inset(BORDER_INSET);
    surface.stroke_rect(border, &Stroke::new(ctx.theme.accent_alpha(0.3), 1.5))?;

    let stroke = Stroke::new(ctx.theme.accent_alpha(0.2), 1.0);
    let inner = inset(CORNER_INSET);
    let corners = [
        (Point::new(inner.x, inner.y), 1.0, 1.0),
        (Point::new(inner.right(), inner.y), -1.0, 1.0),
        (Point::new(inner.x, inner.bottom()), 1.0, -1.0),
        (Point::new(inner.right(), inner.bottom()), -1.0, -1.0),
    ];
    for (corner, dx, dy) in corners {
        surface.draw_line(corner, Point::new(corner.x + dx * CORNER_LENGTH, corner.y), &stroke)?;
        surface.draw_line(corner, Point::new(corner.x, corner.y + dy * CORNER_LENGTH), &stroke)?;
    }
    Ok(())
}

/// Ring with a progress arc from twelve o'clock, the percentage and the raw score inside.
fn score_dial<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    center: Point,
    diameter: f32,
    fraction: f32,
    score: u32,
    max: u32,
) -> Result<(), ComposeError> {
    let radius = diameter / 2.0;
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let percent_style = ctx.theme.style(TextRole::Score, Tone::Strong);
    let label_style = ctx.theme.style(TextRole::Subtitle, Tone::Accent);
    let percent_height = ctx.measurer.line_height(&percent_style);

    let canvas = flow.chrome();
    let track = Stroke::new(ctx.theme.accent_alpha(0.2), DIAL_WIDTH);
    canvas.surface().stroke_arc(center, radius, 0.0, 360.0, &track)?;
    if fraction > 0.0 {
        let progress = Stroke::new(ctx.theme.palette.accent, DIAL_WIDTH);
        canvas.surface().stroke_arc(center, radius, 0.0, fraction * 360.0, &progress)?;
    }

    let percent = format!("{}%", (fraction * 100.0).floor() as u32);
    canvas.centered(&percent, center.x, center.y - percent_height / 2.0 - 6.0, &percent_style)?;
    canvas.centered(
        &format!("{}/{}", score, max),
        center.x,
        center.y + percent_height / 2.0 - 14.0,
        &label_style,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::Canvas;
    use crate::config::{ChromeLayout, DocumentKind};
    use crate::plan::ChromeText;
    use crate::theme::Theme;
    use folio_layout::{LayoutConfig, PageFlow, PageGeometry};
    use folio_render_core::{DrawCommand, RecordingSurface};

    fn render(cover_plan: &Cover) -> (folio_render_core::Recording, Vec<folio_layout::Placement>) {
        let theme = Theme::default();
        let layout = LayoutConfig::default();
        let ctx = Context::new(&theme, &layout, None);
        let canvas = Canvas::new(
            RecordingSurface::new(),
            theme.clone(),
            ChromeText::default(),
            ChromeLayout::for_kind(DocumentKind::SingleSubject),
        );
        let mut flow = PageFlow::new(PageGeometry::letter(), canvas);
        flow.begin_document().unwrap();
        cover(&mut flow, &ctx, cover_plan).unwrap();
        let (canvas, placements) = flow.finish().unwrap();
        (canvas.into_surface().finish().unwrap(), placements)
    }

    #[test]
    fn dial_sweeps_the_score_fraction() {
        let plan = Cover {
            start_y: 160.0,
            framed: false,
            items: vec![CoverItem::ScoreDial {
                fraction: 0.75,
                score: 27,
                max: 36,
                diameter: 120.0,
            }],
            footer: vec![],
        };
        let (recording, _) = render(&plan);
        let sweeps: Vec<f32> = recording.pages[0]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeArc { sweep, .. } => Some(*sweep),
                _ => None,
            })
            .collect();
        assert_eq!(sweeps, vec![360.0, 270.0]);
        assert!(recording.all_text().contains(&"75%"));
        assert!(recording.all_text().contains(&"27/36"));
    }

    #[test]
    fn missing_logo_takes_no_space() {
        let plan = Cover {
            start_y: 160.0,
            framed: true,
            items: vec![
                CoverItem::Logo { size: 50.0 },
                CoverItem::Text(CoverText::new("BRAND", TextRole::Brand, Tone::Accent, 30.0)),
            ],
            footer: vec![(60.0, CoverText::new("example.com", TextRole::Tiny, Tone::Accent, 0.0))],
        };
        let (recording, placements) = render(&plan);
        assert_eq!(placements[0].top, 160.0);
        assert_eq!(placements.len(), 2);
        assert!(placements.iter().all(|p| p.bottom <= PageGeometry::letter().page_height));
        assert_eq!(recording.page_count(), 1);
    }
}
