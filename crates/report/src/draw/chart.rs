use super::{Context, Flow};
use crate::error::ComposeError;
use crate::plan::BarChart;
use crate::theme::Tone;
use folio_layout::PlacementKind;
use folio_render_core::RenderSurface;
use folio_style::TextRole;
use folio_types::Rect;

const LABEL_WIDTH: f32 = 70.0;
/// Room right of the bar area for the value label.
const VALUE_WIDTH: f32 = 50.0;
const BAR_HEIGHT: f32 = 14.0;
const BAR_SPACING: f32 = 6.0;
const TITLE_HEIGHT: f32 = 14.0;
const BAR_RADIUS: f32 = 3.0;

/// Horizontal bars scaled against `chart.max`, one row per bar.
pub(crate) fn bar_chart<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    chart: &BarChart,
) -> Result<(), ComposeError> {
    if chart.bars.is_empty() {
        log::warn!("skipping bar chart '{}' without bars", chart.title);
        return Ok(());
    }
    let height = TITLE_HEIGHT + chart.bars.len() as f32 * (BAR_HEIGHT + BAR_SPACING) + 4.0;
    flow.reserve_space(height + 12.0)?;

    let geometry = *flow.geometry();
    let left = geometry.margin;
    let bar_x = left + LABEL_WIDTH;
    let area = (geometry.content_width() - LABEL_WIDTH - VALUE_WIDTH).max(0.0);
    let top = flow.y();

    let palette = &ctx.theme.palette;
    let label_style = ctx.theme.style(TextRole::Small, Tone::Text);
    let value_style = ctx.theme.bold(TextRole::Small, Tone::Strong);
    let canvas = flow.chrome();
    canvas.text(&chart.title, left, top, &ctx.theme.bold(TextRole::Small, Tone::Secondary))?;

    let mut y = top + TITLE_HEIGHT;
    for bar in &chart.bars {
        let fraction = if chart.max > 0.0 { (bar.value / chart.max).clamp(0.0, 1.0) } else { 0.0 };
        let width = area * fraction;
        let fill = if bar.positive { palette.accent } else { palette.negative };

        canvas.text(&bar.label, left, y + 1.0, &label_style)?;
        let track = Rect::new(bar_x, y, area, BAR_HEIGHT);
        canvas.surface().fill_rounded_rect(track, BAR_RADIUS, palette.table_zebra)?;
        if width > 0.0 {
            let value = Rect::new(bar_x, y, width, BAR_HEIGHT);
            canvas.surface().fill_rounded_rect(value, BAR_RADIUS, fill.with_alpha(0.6))?;
        }
        canvas.text(&bar.value_text, bar_x + width + 4.0, y + 1.0, &value_style)?;
        y += BAR_HEIGHT + BAR_SPACING;
    }

    flow.place(PlacementKind::Chart, height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::Canvas;
    use crate::config::{ChromeLayout, DocumentKind};
    use crate::plan::{Bar, ChromeText};
    use crate::theme::Theme;
    use folio_layout::{LayoutConfig, PageFlow, PageGeometry};
    use folio_render_core::{DrawCommand, RecordingSurface};

    #[test]
    fn bars_scale_against_the_maximum() {
        let theme = Theme::default();
        let layout = LayoutConfig::compact();
        let ctx = Context::new(&theme, &layout, None);
        let canvas = Canvas::new(
            RecordingSurface::new(),
            theme.clone(),
            ChromeText::default(),
            ChromeLayout::for_kind(DocumentKind::Comparison),
        );
        let mut flow = PageFlow::new(PageGeometry::letter(), canvas);
        let bar = |label: &str, value: f32| Bar {
            label: label.into(),
            value,
            value_text: format!("{}/36", value),
            positive: value >= 18.0,
        };
        let chart = BarChart {
            title: "SCORE COMPARISON".into(),
            max: 36.0,
            bars: vec![bar("A", 36.0), bar("B", 9.0)],
        };
        bar_chart(&mut flow, &ctx, &chart).unwrap();

        let (canvas, placements) = flow.finish().unwrap();
        assert_eq!(placements.last().map(|p| p.kind), Some(PlacementKind::Chart));
        let recording = canvas.into_surface().finish().unwrap();
        let widths: Vec<f32> = recording.pages[0]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRoundedRect { rect, .. } => Some(rect.width),
                _ => None,
            })
            .collect();
        // Background and value bar per row.
        assert_eq!(widths.len(), 4);
        assert!((widths[1] - widths[0]).abs() < 0.01);
        assert!((widths[3] - widths[0] / 4.0).abs() < 0.01);
    }
}
