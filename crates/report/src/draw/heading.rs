use super::{Context, Flow};
use crate::error::ComposeError;
use crate::theme::Tone;
use folio_layout::PlacementKind;
use folio_render_core::RenderSurface;
use folio_style::TextRole;

/// Band above a section title that holds the ornament.
const ORNAMENT_BAND: f32 = 10.0;
const TITLE_RULE_GAP: f32 = 6.0;
const SUBHEADING_LEAD: f32 = 12.0;
const SUBHEADING_TAIL: f32 = 4.0;

/// Ornament, title and underline. `keep` is the space the following block needs on the same
/// page; it is reserved together with the title so the title never ends a page.
pub(crate) fn section_title<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    title: &str,
    tone: Tone,
    keep: f32,
) -> Result<(), ComposeError> {
    let geometry = *flow.geometry();
    let style = ctx.theme.style(TextRole::SectionTitle, tone);
    let lines = ctx.measurer.wrap(title, &style, geometry.content_width());
    let text_height = lines.len() as f32 * ctx.measurer.line_height(&style);
    let height = ORNAMENT_BAND + text_height + TITLE_RULE_GAP;

    flow.reserve_space(height + keep)?;
    let top = flow.y();
    let canvas = flow.chrome();
    canvas.ornament(geometry.page_width / 2.0, top + 4.0)?;
    canvas.lines(&lines, geometry.margin, top + ORNAMENT_BAND, &style)?;
    canvas.hline(
        top + ORNAMENT_BAND + text_height + 2.0,
        geometry.margin,
        geometry.margin + geometry.content_width(),
        ctx.theme.accent_alpha(0.15),
        1.0,
    )?;
    flow.place(PlacementKind::Heading, height);
    Ok(())
}

/// Height of a `#` heading inside narrative text.
pub(crate) fn subheading_height(ctx: &Context, text: &str, width: f32) -> f32 {
    let style = ctx.theme.style(TextRole::Subtitle, Tone::Accent);
    SUBHEADING_LEAD + ctx.measurer.measure(text, &style, width).height + SUBHEADING_TAIL
}

/// A hairline followed by the heading text. Reserves `keep` for the following block.
pub(crate) fn subheading<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    text: &str,
    keep: f32,
) -> Result<(), ComposeError> {
    let geometry = *flow.geometry();
    let width = geometry.content_width();
    let style = ctx.theme.style(TextRole::Subtitle, Tone::Accent);
    let height = subheading_height(ctx, text, width);

    flow.reserve_space(height + keep)?;
    let top = flow.y();
    let lines = ctx.measurer.wrap(text, &style, width);
    let canvas = flow.chrome();
    let rule = ctx.theme.accent_alpha(0.1);
    canvas.hline(top + 8.0, geometry.margin, geometry.margin + width, rule, 1.0)?;
    canvas.lines(&lines, geometry.margin, top + SUBHEADING_LEAD, &style)?;
    flow.place(PlacementKind::Heading, height);
    Ok(())
}
