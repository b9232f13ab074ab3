//! Narrative text: parsed blocks are measured up front, then flowed with orphan control.

use super::heading::{section_title, subheading, subheading_height};
use super::table::{MeasuredTable, inline_table, measure};
use super::{Context, Flow};
use crate::error::ComposeError;
use crate::plan::{Narrative, TableSpec};
use crate::theme::Tone;
use folio_layout::{LineLayout, PlacementKind, keep_with_next};
use folio_markup::{ContentBlock, Item, Run};
use folio_render_core::RenderSurface;
use folio_style::TextRole;

const BULLET: &str = "\u{2022}";
const MARKER_GAP: f32 = 4.0;
const DIVIDER_HEIGHT: f32 = 16.0;

/// A parsed item with everything needed to place it.
enum Prepared {
    Spacing,
    Heading { text: String, height: f32 },
    Text(TextBlock),
    Table { spec: TableSpec, measured: MeasuredTable },
    Divider,
}

struct TextBlock {
    lines: Vec<LineLayout>,
    line_height: f32,
    /// Offset of the text from the left margin.
    indent: f32,
    /// List marker and its offset from the left margin.
    marker: Option<(String, f32)>,
    kind: PlacementKind,
}

impl TextBlock {
    fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }
}

impl Prepared {
    /// `(height, first unit)` of a non-heading block as seen by a heading above it.
    fn extent(&self, ctx: &Context) -> Option<(f32, f32)> {
        match self {
            Prepared::Spacing | Prepared::Heading { .. } => None,
            Prepared::Text(block) => Some((block.height(), block.line_height)),
            Prepared::Table { measured, .. } => {
                Some((measured.plan.total_height(), measured.first_unit(ctx)))
            }
            Prepared::Divider => Some((DIVIDER_HEIGHT, DIVIDER_HEIGHT)),
        }
    }
}

fn prepare(ctx: &Context, items: Vec<Item>, width: f32) -> Result<Vec<Prepared>, ComposeError> {
    let plain = ctx.theme.style(TextRole::Body, Tone::Text);
    let bold = ctx.theme.bold(TextRole::Body, Tone::Text);
    let line_height = ctx.measurer.line_height(&plain).max(ctx.measurer.line_height(&bold));
    let text = |runs: &[Run], indent: f32, marker: Option<(String, f32)>, kind: PlacementKind| {
        TextBlock {
            lines: ctx.measurer.wrap_runs(runs, &plain, &bold, width - indent),
            line_height,
            indent,
            marker,
            kind,
        }
    };

    let mut prepared = Vec::with_capacity(items.len());
    for item in items {
        let block = match item {
            Item::Spacing => {
                prepared.push(Prepared::Spacing);
                continue;
            }
            Item::Block(block) => block,
        };
        prepared.push(match block {
            ContentBlock::Heading(heading) => Prepared::Heading {
                height: subheading_height(ctx, &heading, width),
                text: heading,
            },
            ContentBlock::Paragraph(runs) => {
                Prepared::Text(text(&runs, 0.0, None, PlacementKind::Paragraph))
            }
            ContentBlock::ListItem { runs, ordinal } => {
                let marker = match ordinal {
                    Some(n) => format!("{}.", n),
                    None => BULLET.to_string(),
                };
                let marker_width = ctx.measurer.text_width(&marker, &plain) + MARKER_GAP;
                let indent = ctx.layout.list_indent + marker_width.max(10.0);
                let marker = Some((marker, ctx.layout.list_indent));
                Prepared::Text(text(&runs, indent, marker, PlacementKind::ListItem))
            }
            ContentBlock::Table(rows) if rows.is_empty() => continue,
            ContentBlock::Table(rows) => {
                let spec = TableSpec::from_rows(&rows);
                let measured = measure(ctx, &spec, width)?;
                Prepared::Table { spec, measured }
            }
            ContentBlock::Divider => Prepared::Divider,
        });
    }
    Ok(prepared)
}

/// Space a heading must keep for what follows it in `blocks`, spacing skipped.
///
/// A heading directly followed by another heading keeps that heading together with
/// everything the second one keeps in turn.
fn keep_for_next(ctx: &Context, blocks: &[Prepared]) -> f32 {
    let Some(pos) = blocks.iter().position(|b| !matches!(b, Prepared::Spacing)) else {
        return 0.0;
    };
    match &blocks[pos] {
        Prepared::Heading { height, .. } => height + keep_for_next(ctx, &blocks[pos + 1..]),
        block => block.extent(ctx).map_or(0.0, |(height, first)| {
            keep_with_next(0.0, first, height, ctx.keep_allowance())
        }),
    }
}

pub(crate) fn narrative<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    section: &Narrative,
) -> Result<(), ComposeError> {
    let geometry = *flow.geometry();
    let blocks = prepare(ctx, folio_markup::parse(&section.content), geometry.content_width())?;

    let mut after_heading = false;
    if let Some(title) = &section.title {
        section_title(flow, ctx, title, Tone::Accent, keep_for_next(ctx, &blocks))?;
        after_heading = true;
    }

    for (i, block) in blocks.iter().enumerate() {
        match block {
            Prepared::Spacing => {
                // A heading's reservation does not cover blank lines under it.
                if !after_heading && !flow.is_at_page_top() {
                    flow.add_spacing(ctx.layout.paragraph_spacing);
                }
                continue;
            }
            Prepared::Heading { text, .. } => {
                subheading(flow, ctx, text, keep_for_next(ctx, &blocks[i + 1..]))?;
                after_heading = true;
                continue;
            }
            Prepared::Text(text) => {
                // Blocks under a heading flow line by line so the heading's reservation holds.
                let split = after_heading || text.height() > geometry.content_height();
                draw_text(flow, ctx, text, split)?;
            }
            Prepared::Table { spec, measured } => {
                inline_table(flow, ctx, spec, measured, !after_heading)?
            }
            Prepared::Divider => divider(flow, ctx)?,
        }
        after_heading = false;
    }
    Ok(())
}

fn draw_text<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    block: &TextBlock,
    split: bool,
) -> Result<(), ComposeError> {
    let margin = flow.geometry().margin;
    let plain = ctx.theme.style(TextRole::Body, Tone::Text);
    let bold = ctx.theme.bold(TextRole::Body, Tone::Text);
    let line_height = block.line_height;

    if !split {
        flow.reserve_space(block.height())?;
    }
    let block_top = flow.y();

    for (n, line) in block.lines.iter().enumerate() {
        let top = if split {
            flow.reserve_space(line_height)?;
            flow.y()
        } else {
            block_top + n as f32 * line_height
        };
        let canvas = flow.chrome();
        if n == 0 {
            if let Some((marker, offset)) = &block.marker {
                canvas.text(marker, margin + offset, top, &plain)?;
            }
        }
        for item in &line.items {
            let style = if item.emphasized { &bold } else { &plain };
            canvas.text(&item.text, margin + block.indent + item.x, top, style)?;
        }
        if split {
            flow.place(block.kind, line_height);
        }
    }
    if !split {
        flow.place(block.kind, block.height());
    }
    flow.add_spacing(ctx.layout.block_gap);
    Ok(())
}

fn divider<S: RenderSurface>(flow: &mut Flow<S>, ctx: &Context) -> Result<(), ComposeError> {
    let geometry = *flow.geometry();
    flow.reserve_space(DIVIDER_HEIGHT)?;
    let y = flow.y() + DIVIDER_HEIGHT / 2.0;
    flow.chrome().hline(
        y,
        geometry.margin + 80.0,
        geometry.margin + geometry.content_width() - 80.0,
        ctx.theme.palette.decoration,
        0.8,
    )?;
    flow.place(PlacementKind::Divider, DIVIDER_HEIGHT);
    Ok(())
}
