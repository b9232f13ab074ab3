//! Boxed and listed blocks: the verdict card, rejection reasons, per-entry status cards,
//! the executive summary and the closing disclaimer.

use super::chart::bar_chart;
use super::heading::section_title;
use super::{Context, Flow};
use crate::error::ComposeError;
use crate::plan::{
    Disclaimer, ExecutiveSummary, ReasonList, Recommendation, ScoreCard, StatusCard, VerdictCard,
    VerdictValue,
};
use crate::theme::Tone;
use folio_layout::PlacementKind;
use folio_render_core::utils::star_points;
use folio_render_core::{RenderSurface, Stroke};
use folio_style::TextRole;
use folio_types::{Point, Rect};

const CARD_PADDING: f32 = 16.0;
const CARD_TITLE: f32 = 22.0;
const VERDICT_LINE: f32 = 18.0;
const VERDICT_LABEL_WIDTH: f32 = 140.0;
const CARD_RADIUS: f32 = 8.0;
const CROSS: &str = "\u{d7}";

/// Framed card with a title and label/value lines.
pub(crate) fn verdict<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    card: &VerdictCard,
) -> Result<(), ComposeError> {
    let geometry = *flow.geometry();
    let (left, width) = (geometry.margin, geometry.content_width());
    let lines = card.lines.len() as f32 * VERDICT_LINE;
    let height = CARD_PADDING + CARD_TITLE + lines + CARD_PADDING + 8.0;

    flow.reserve_space(height + 20.0)?;
    let top = flow.y();
    let palette = &ctx.theme.palette;
    let canvas = flow.chrome();
    let rect = Rect::new(left, top, width, height);
    canvas.surface().fill_rect(rect, palette.card)?;
    canvas.surface().stroke_rect(rect, &Stroke::new(ctx.theme.accent_alpha(0.3), 1.0))?;

    let inner = left + CARD_PADDING;
    let title = ctx.theme.style(TextRole::SectionTitle, Tone::Accent);
    canvas.text(&card.title, inner, top + CARD_PADDING, &title)?;

    let label_style = ctx.theme.bold(TextRole::Body, Tone::Text);
    let star_size = ctx.theme.fonts.body_size;
    let mut y = top + CARD_PADDING + CARD_TITLE + 4.0;
    for line in &card.lines {
        canvas.text(&line.label, inner, y, &label_style)?;
        let value_x = inner + VERDICT_LABEL_WIDTH;
        match &line.value {
            VerdictValue::Text(value) => {
                canvas.text(value, value_x, y, &ctx.theme.bold(TextRole::Body, line.tone))?;
            }
            VerdictValue::Stars(filled) => {
                canvas.stars(
                    value_x,
                    y + 1.0,
                    star_size,
                    *filled,
                    ctx.theme.color(line.tone),
                    ctx.theme.accent_alpha(0.25),
                )?;
            }
        }
        y += VERDICT_LINE;
    }

    flow.place(PlacementKind::Card, height);
    flow.add_spacing(16.0);
    Ok(())
}

/// Bulleted rejection reasons. The title is kept with the first reason.
pub(crate) fn reasons<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    list: &ReasonList,
) -> Result<(), ComposeError> {
    if list.reasons.is_empty() {
        return Ok(());
    }
    if list.compact {
        compact_reasons(flow, ctx, list)
    } else {
        full_reasons(flow, ctx, list)
    }
}

fn full_reasons<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    list: &ReasonList,
) -> Result<(), ComposeError> {
    const TITLE_HEIGHT: f32 = 26.0;
    const INDENT: f32 = 8.0;
    const GAP: f32 = 6.0;

    let geometry = *flow.geometry();
    let width = geometry.content_width() - 2.0 * INDENT;
    let title_style = ctx.theme.style(TextRole::SectionTitle, Tone::Negative);
    let style = ctx.theme.faded(TextRole::Body, Tone::Negative, 0.9);
    let line_height = ctx.measurer.line_height(&style);
    let wrapped: Vec<Vec<String>> = list
        .reasons
        .iter()
        .map(|reason| ctx.measurer.wrap(&format!("{}  {}", CROSS, reason), &style, width))
        .collect();

    let first = wrapped.first().map_or(0.0, |lines| lines.len() as f32 * line_height);
    flow.reserve_space(TITLE_HEIGHT + first + GAP)?;
    let top = flow.y();
    flow.chrome().text(&list.title, geometry.margin, top, &title_style)?;
    flow.place(PlacementKind::Heading, TITLE_HEIGHT);

    for lines in &wrapped {
        let height = lines.len() as f32 * line_height;
        flow.reserve_space(height + GAP)?;
        let top = flow.y();
        flow.chrome().lines(lines, geometry.margin + INDENT, top, &style)?;
        flow.place(PlacementKind::ListItem, height);
        flow.add_spacing(GAP);
    }
    flow.add_spacing(10.0);
    Ok(())
}

fn compact_reasons<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    list: &ReasonList,
) -> Result<(), ComposeError> {
    const TITLE_HEIGHT: f32 = 14.0;
    const MIN_ROW: f32 = 14.0;

    let geometry = *flow.geometry();
    let title_style = ctx.theme.faded(TextRole::Small, Tone::Negative, 0.8).bold();
    let marker_style = ctx.theme.style(TextRole::Small, Tone::Negative);
    let style = ctx.theme.style(TextRole::Small, Tone::Secondary);
    let line_height = ctx.measurer.line_height(&style);
    let wrapped: Vec<Vec<String>> = list
        .reasons
        .iter()
        .map(|reason| ctx.measurer.wrap(reason, &style, geometry.content_width() - 24.0))
        .collect();
    let row_height = |lines: &[String]| (lines.len() as f32 * line_height + 4.0).max(MIN_ROW);

    let first = wrapped.first().map_or(0.0, |lines| row_height(lines));
    flow.reserve_space(TITLE_HEIGHT + first)?;
    let top = flow.y();
    flow.chrome().text(&list.title, geometry.margin, top, &title_style)?;
    flow.place(PlacementKind::Heading, TITLE_HEIGHT);

    for lines in &wrapped {
        let height = row_height(lines);
        flow.reserve_space(height)?;
        let top = flow.y();
        let canvas = flow.chrome();
        canvas.text(CROSS, geometry.margin + 4.0, top, &marker_style)?;
        canvas.lines(lines, geometry.margin + 16.0, top, &style)?;
        flow.place(PlacementKind::ListItem, height);
    }
    flow.add_spacing(4.0);
    Ok(())
}

/// Titled one-line card with the score, the status label and an optional note.
pub(crate) fn status<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    card: &StatusCard,
) -> Result<(), ComposeError> {
    const HEIGHT: f32 = 40.0;

    section_title(flow, ctx, &card.title, Tone::Accent, HEIGHT + 4.0)?;
    flow.reserve_space(HEIGHT + 4.0)?;
    let geometry = *flow.geometry();
    let top = flow.y();
    let left = geometry.margin;
    let tone = if card.positive { Tone::Positive } else { Tone::Negative };
    let border = if card.positive {
        ctx.theme.accent_alpha(0.3)
    } else {
        ctx.theme.palette.negative.with_alpha(0.3)
    };

    let canvas = flow.chrome();
    let rect = Rect::new(left, top, geometry.content_width(), HEIGHT);
    canvas.surface().fill_rounded_rect(rect, CARD_RADIUS, ctx.theme.palette.card)?;
    canvas.surface().stroke_rounded_rect(rect, CARD_RADIUS, &Stroke::new(border, 1.0))?;
    let score_style = ctx.theme.style(TextRole::Heading, Tone::Accent);
    canvas.text(&card.score, left + 12.0, top + 10.0, &score_style)?;
    canvas.text(&card.label, left + 90.0, top + 10.0, &ctx.theme.bold(TextRole::Body, tone))?;
    if let Some(note) = &card.note {
        let note_style = ctx.theme.style(TextRole::Small, Tone::Secondary);
        canvas.text(note, left + 90.0, top + 26.0, &note_style)?;
    }
    flow.place(PlacementKind::Card, HEIGHT);
    flow.add_spacing(8.0);
    Ok(())
}

/// Recommendation banner, one score card per entry, the footnote and the bar chart.
pub(crate) fn summary<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    summary: &ExecutiveSummary,
) -> Result<(), ComposeError> {
    const BANNER: f32 = 48.0;

    section_title(flow, ctx, &summary.title, Tone::Accent, BANNER + 4.0)?;
    recommendation(flow, ctx, &summary.recommendation, BANNER)?;
    flow.add_spacing(10.0);

    if summary.cards.is_empty() {
        log::warn!("executive summary has no entries to show");
    } else {
        score_cards(flow, ctx, &summary.cards)?;
        footnote(flow, ctx, &summary.footnote)?;
        flow.add_spacing(10.0);
    }

    bar_chart(flow, ctx, &summary.chart)?;
    flow.add_spacing(6.0);
    Ok(())
}

fn recommendation<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    banner: &Recommendation,
    height: f32,
) -> Result<(), ComposeError> {
    flow.reserve_space(height + 4.0)?;
    let geometry = *flow.geometry();
    let (left, width) = (geometry.margin, geometry.content_width());
    let top = flow.y();

    let (headline, detail, headline_top) = match banner.tone {
        Tone::Accent => (
            ctx.theme.style(TextRole::SectionTitle, Tone::Accent),
            ctx.theme.style(TextRole::Body, Tone::Secondary),
            8.0,
        ),
        tone => (
            ctx.theme.bold(TextRole::Body, tone),
            ctx.theme.style(TextRole::Small, Tone::Secondary),
            10.0,
        ),
    };
    // The detail gets one line; the banner has a fixed height.
    let detail_line = ctx
        .measurer
        .wrap(&banner.detail, &detail, width - 60.0)
        .into_iter()
        .next()
        .unwrap_or_default();

    let canvas = flow.chrome();
    let rect = Rect::new(left, top, width, height);
    canvas.surface().fill_rounded_rect(rect, CARD_RADIUS, ctx.theme.palette.card)?;
    canvas
        .surface()
        .stroke_rounded_rect(rect, CARD_RADIUS, &Stroke::new(ctx.theme.accent_alpha(0.4), 1.0))?;
    let badge = star_points(Point::new(left + 22.0, top + 22.0), 9.0, 4.0);
    canvas.surface().fill_polygon(&badge, ctx.theme.color(banner.tone))?;
    canvas.text(&banner.headline, left + 40.0, top + headline_top, &headline)?;
    canvas.text(&detail_line, left + 40.0, top + 28.0, &detail)?;
    flow.place(PlacementKind::Card, height);
    flow.add_spacing(2.0);
    Ok(())
}

fn score_cards<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    cards: &[ScoreCard],
) -> Result<(), ComposeError> {
    const HEIGHT: f32 = 90.0;
    const SPACING: f32 = 8.0;

    flow.reserve_space(HEIGHT + SPACING)?;
    let geometry = *flow.geometry();
    let top = flow.y();
    let count = cards.len() as f32;
    let card_width = (geometry.content_width() - SPACING * (count - 1.0)) / count;

    let name_style = ctx.theme.bold(TextRole::Small, Tone::Strong);
    let score_style = ctx.theme.style(TextRole::Heading, Tone::Accent).with_size(20.0);
    let actual_style = ctx.theme.style(TextRole::Tiny, Tone::Secondary);

    let canvas = flow.chrome();
    for (i, card) in cards.iter().enumerate() {
        let x = geometry.margin + (card_width + SPACING) * i as f32;
        let center = x + card_width / 2.0;
        let tone = if card.positive { Tone::Positive } else { Tone::Negative };
        let border = if card.positive {
            ctx.theme.accent_alpha(0.4)
        } else {
            ctx.theme.palette.negative.with_alpha(0.3)
        };

        let rect = Rect::new(x, top, card_width, HEIGHT);
        canvas.surface().fill_rounded_rect(rect, CARD_RADIUS, ctx.theme.palette.card)?;
        canvas.surface().stroke_rounded_rect(rect, CARD_RADIUS, &Stroke::new(border, 1.0))?;
        canvas.centered(&card.name, center, top + 8.0, &name_style)?;
        canvas.dot(Point::new(center, top + 25.0), 3.0, ctx.theme.color(tone))?;
        canvas.centered(&card.score, center, top + 32.0, &score_style)?;
        canvas.centered(&card.actual, center, top + 56.0, &actual_style)?;
        canvas.centered(&card.badge, center, top + 72.0, &ctx.theme.bold(TextRole::Small, tone))?;
    }
    flow.place(PlacementKind::Card, HEIGHT);
    flow.add_spacing(2.0);
    Ok(())
}

fn footnote<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    text: &str,
) -> Result<(), ComposeError> {
    const HEIGHT: f32 = 12.0;

    if text.is_empty() {
        return Ok(());
    }
    let style = ctx.theme.faded(TextRole::Tiny, Tone::Secondary, 0.5).italic().with_size(7.0);
    flow.reserve_space(HEIGHT)?;
    let center = flow.geometry().page_width / 2.0;
    let top = flow.y();
    flow.chrome().centered(text, center, top, &style)?;
    flow.place(PlacementKind::Note, HEIGHT);
    Ok(())
}

/// Rule, heading, centered body and copyright line.
pub(crate) fn disclaimer<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    disclaimer: &Disclaimer,
) -> Result<(), ComposeError> {
    const RULE_INSET: f32 = 80.0;
    const HEADING_OFFSET: f32 = 12.0;
    const BODY_OFFSET: f32 = 26.0;
    const MIN_BODY: f32 = 26.0;

    let geometry = *flow.geometry();
    let heading_style = ctx.theme.faded(TextRole::Small, Tone::Accent, 0.5);
    let body_style = ctx.theme.style(TextRole::Tiny, Tone::Secondary);
    let copyright_style = ctx.theme.faded(TextRole::Tiny, Tone::Secondary, 0.6);
    let body = ctx
        .measurer
        .wrap(&disclaimer.body, &body_style, geometry.content_width() - 2.0 * 40.0);
    let body_height = (body.len() as f32 * ctx.measurer.line_height(&body_style)).max(MIN_BODY);
    let height = BODY_OFFSET + body_height + ctx.measurer.line_height(&copyright_style);

    flow.reserve_space(height.max(60.0))?;
    let top = flow.y();
    let center = geometry.page_width / 2.0;
    let canvas = flow.chrome();
    canvas.hline(
        top,
        geometry.margin + RULE_INSET,
        geometry.margin + geometry.content_width() - RULE_INSET,
        ctx.theme.palette.decoration,
        1.0,
    )?;
    canvas.centered(&disclaimer.heading, center, top + HEADING_OFFSET, &heading_style)?;
    let line_height = ctx.measurer.line_height(&body_style);
    for (i, line) in body.iter().enumerate() {
        canvas.centered(line, center, top + BODY_OFFSET + i as f32 * line_height, &body_style)?;
    }
    let copyright_top = top + BODY_OFFSET + body_height;
    canvas.centered(&disclaimer.copyright, center, copyright_top, &copyright_style)?;
    flow.place(PlacementKind::Note, height);
    Ok(())
}
