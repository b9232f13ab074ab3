//! Table rendering: measures a [`TableSpec`], then flows it row by row. Rows never split;
//! a row that does not fit starts a new page and the frame is closed per page fragment.

use super::heading::section_title;
use super::{Context, Flow};
use crate::error::ComposeError;
use crate::plan::{RowBand, TableCell, TableSection, TableSpec};
use crate::theme::Tone;
use folio_layout::{PlacementKind, TablePlan, TableSolver, check_fit};
use folio_render_core::{RenderSurface, Stroke};
use folio_style::{StyleToken, TextRole};
use folio_types::{Point, Rect};

const TABLE_GAP: f32 = 8.0;
const ORPHAN_SLACK: f32 = 10.0;

/// A table plan whose row heights account for the style of every cell.
pub(crate) struct MeasuredTable {
    pub plan: TablePlan,
    styles: Vec<Vec<StyleToken>>,
}

impl MeasuredTable {
    /// Space reserved before the first row: the whole table when small, capped otherwise.
    pub fn first_unit(&self, ctx: &Context) -> f32 {
        (self.plan.total_height() + ORPHAN_SLACK).min(ctx.layout.table_reserve_cap)
    }
}

fn cell_style(ctx: &Context, band: RowBand, cell: &TableCell) -> StyleToken {
    match band {
        RowBand::Header => ctx.theme.style(TextRole::TableHeader, cell.tone),
        _ if cell.bold => ctx.theme.bold(TextRole::TableCell, cell.tone),
        _ => ctx.theme.style(TextRole::TableCell, cell.tone),
    }
}

pub(crate) fn measure(
    ctx: &Context,
    spec: &TableSpec,
    width: f32,
) -> Result<MeasuredTable, ComposeError> {
    let solver = TableSolver::new(&ctx.measurer, &ctx.layout.table);
    let header = ctx.theme.style(TextRole::TableHeader, Tone::Accent);
    let body = ctx.theme.style(TextRole::TableCell, Tone::Text);
    let mut plan = solver.layout(&spec.texts(), width, &header, &body, &spec.columns)?;

    let styles: Vec<Vec<StyleToken>> = spec
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|cell| cell_style(ctx, row.band, cell)).collect())
        .collect();
    for (i, row) in spec.rows.iter().enumerate() {
        let cells: Vec<(&str, &StyleToken)> = row
            .cells
            .iter()
            .zip(&styles[i])
            .map(|(cell, style)| (cell.text.as_str(), style))
            .collect();
        let height = solver.styled_row_height(&cells, &plan);
        plan.row_heights[i] = height;
    }
    Ok(MeasuredTable { plan, styles })
}

/// A titled table followed by its legend.
pub(crate) fn table_section<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    section: &TableSection,
) -> Result<(), ComposeError> {
    if section.table.rows.is_empty() {
        log::warn!("skipping a table without rows");
        return Ok(());
    }
    let width = flow.geometry().content_width();
    let measured = measure(ctx, &section.table, width)?;
    match &section.title {
        Some(title) => section_title(flow, ctx, title, Tone::Accent, measured.first_unit(ctx))?,
        None => {
            flow.reserve_space(measured.first_unit(ctx))?;
        }
    }
    draw_rows(flow, ctx, &section.table, &measured)?;

    if let Some(legend) = &section.legend {
        let style = ctx.theme.faded(TextRole::Tiny, Tone::Secondary, 0.5);
        let lines = ctx.measurer.wrap(legend, &style, width);
        let height = lines.len() as f32 * ctx.measurer.line_height(&style);
        flow.reserve_space(height)?;
        let top = flow.y();
        let margin = flow.geometry().margin;
        flow.chrome().lines(&lines, margin, top, &style)?;
        flow.place(PlacementKind::Note, height);
        flow.add_spacing(TABLE_GAP);
    }
    Ok(())
}

/// A table inside narrative text, without title or legend.
pub(crate) fn inline_table<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    spec: &TableSpec,
    measured: &MeasuredTable,
    reserve_first: bool,
) -> Result<(), ComposeError> {
    if reserve_first {
        flow.reserve_space(measured.first_unit(ctx))?;
    }
    draw_rows(flow, ctx, spec, measured)
}

fn draw_rows<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    spec: &TableSpec,
    measured: &MeasuredTable,
) -> Result<(), ComposeError> {
    let geometry = *flow.geometry();
    let plan = &measured.plan;
    let left = geometry.margin;
    let offsets = plan.column_offsets();
    let palette = &ctx.theme.palette;
    let slack = ctx.layout.row_reserve_slack;

    let mut fragment_top = flow.y();
    let mut body_index = 0usize;

    for (i, row) in spec.rows.iter().enumerate() {
        let height = plan.row_heights[i];
        if height > geometry.content_height() {
            log::warn!(
                "table row {} is {:.1}pt tall, more than a page of content; it will overflow",
                i,
                height
            );
        }

        let breaking = !flow.is_at_page_top()
            && check_fit(flow.y(), height + slack, geometry.content_bottom).should_break;
        if breaking && flow.y() > fragment_top {
            frame(flow, ctx, plan, fragment_top)?;
        }
        if flow.reserve_space(height + slack)? {
            fragment_top = flow.y();
        }

        let top = flow.y();
        let band_rect = Rect::new(left, top, plan.width(), height);
        let fill = match row.band {
            RowBand::Header | RowBand::Total => Some(palette.table_header),
            RowBand::Highlight => Some(ctx.theme.accent_alpha(0.12)),
            RowBand::Body => {
                body_index += 1;
                (body_index % 2 == 0).then_some(palette.table_zebra)
            }
        };
        let canvas = flow.chrome();
        if let Some(color) = fill {
            canvas.surface().fill_rect(band_rect, color)?;
        }
        for (c, cell) in row.cells.iter().enumerate().take(plan.column_count()) {
            let style = &measured.styles[i][c];
            let lines = ctx.measurer.wrap(&cell.text, style, plan.text_width(c));
            let x = left + offsets[c] + plan.cell_padding;
            canvas.lines(&lines, x, top + plan.cell_padding, style)?;
        }
        canvas.hline(top + height, left, left + plan.width(), palette.table_border, 0.5)?;
        flow.place(PlacementKind::TableRow, height);
    }

    frame(flow, ctx, plan, fragment_top)?;
    flow.add_spacing(TABLE_GAP);
    Ok(())
}

/// Outer border and column separators for the rows drawn on the current page.
fn frame<S: RenderSurface>(
    flow: &mut Flow<S>,
    ctx: &Context,
    plan: &TablePlan,
    top: f32,
) -> Result<(), ComposeError> {
    let bottom = flow.y();
    if bottom <= top {
        return Ok(());
    }
    let left = flow.geometry().margin;
    let border = ctx.theme.palette.table_border;
    let surface = flow.chrome().surface();
    let outline = Rect::new(left, top, plan.width(), bottom - top);
    surface.stroke_rect(outline, &Stroke::new(border, 1.0))?;
    let hairline = Stroke::new(border, 0.5);
    for offset in plan.column_offsets().iter().skip(1) {
        let x = left + offset;
        surface.draw_line(Point::new(x, top), Point::new(x, bottom), &hairline)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::TableRow;
    use crate::theme::Theme;
    use folio_layout::{ColumnMode, LayoutConfig};
    use folio_style::Dimension;

    #[test]
    fn bold_cells_are_measured_in_bold() {
        let theme = Theme::default();
        let layout = LayoutConfig::default();
        let ctx = Context::new(&theme, &layout, None);
        let long = "Cancelled dosha restored by the seventh house lord aspect ".repeat(2);
        let plain = TableSpec {
            columns: ColumnMode::Declared(vec![Dimension::Pt(80.0), Dimension::Auto]),
            rows: vec![
                TableRow::new(RowBand::Header, vec![TableCell::new("A"), TableCell::new("B")]),
                TableRow::new(
                    RowBand::Body,
                    vec![TableCell::new("x"), TableCell::new(long.clone())],
                ),
            ],
        };
        let mut bold = plain.clone();
        bold.rows[1].cells[1] = TableCell::new(long).bold();

        let plain = measure(&ctx, &plain, 300.0).unwrap();
        let bold = measure(&ctx, &bold, 300.0).unwrap();
        assert!(bold.plan.row_heights[1] >= plain.plan.row_heights[1]);
        assert_eq!(plain.plan.column_widths[0], 80.0);
    }

    #[test]
    fn small_tables_reserve_their_full_height() {
        let theme = Theme::default();
        let layout = LayoutConfig::default();
        let ctx = Context::new(&theme, &layout, None);
        let spec = TableSpec::from_rows(&[vec!["A".into()], vec!["1".into()]]);
        let measured = measure(&ctx, &spec, 300.0).unwrap();
        assert_eq!(measured.first_unit(&ctx), measured.plan.total_height() + ORPHAN_SLACK);
    }
}
