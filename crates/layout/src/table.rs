//! Column width and row height resolution for grid tables.

use crate::LayoutError;
use crate::config::TableMetrics;
use crate::text::TextMeasurer;
use folio_style::{Dimension, StyleToken};

const EPSILON: f32 = 0.01;

/// How column widths are chosen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColumnMode {
    /// Widths follow the widest measured cell of each column; the last column takes the rest.
    #[default]
    Measured,
    /// One declared width per column. `Auto` columns share whatever the others leave.
    Declared(Vec<Dimension>),
}

/// Resolved geometry of a table. Row 0 is the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePlan {
    pub column_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    pub cell_padding: f32,
}

impl TablePlan {
    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    pub fn total_height(&self) -> f32 {
        self.row_heights.iter().sum()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Left edge of each column relative to the table's left edge.
    pub fn column_offsets(&self) -> Vec<f32> {
        self.column_widths
            .iter()
            .scan(0.0, |x, w| {
                let left = *x;
                *x += w;
                Some(left)
            })
            .collect()
    }

    /// Width available to text inside a cell of `column`.
    pub fn text_width(&self, column: usize) -> f32 {
        self.column_widths
            .get(column)
            .map(|w| (w - 2.0 * self.cell_padding).max(1.0))
            .unwrap_or(1.0)
    }
}

/// Computes [`TablePlan`]s from cell text using a [`TextMeasurer`].
pub struct TableSolver<'a> {
    measurer: &'a TextMeasurer,
    metrics: &'a TableMetrics,
}

impl<'a> TableSolver<'a> {
    pub fn new(measurer: &'a TextMeasurer, metrics: &'a TableMetrics) -> Self {
        Self { measurer, metrics }
    }

    pub fn layout(
        &self,
        rows: &[Vec<String>],
        content_width: f32,
        header_style: &StyleToken,
        cell_style: &StyleToken,
        mode: &ColumnMode,
    ) -> Result<TablePlan, LayoutError> {
        if !(content_width > 0.0) {
            return Err(LayoutError::InvalidWidth(content_width));
        }

        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        let column_widths = match mode {
            ColumnMode::Measured => {
                self.measured_widths(rows, column_count, content_width, header_style, cell_style)
            }
            ColumnMode::Declared(specs) => {
                if specs.len() != column_count {
                    return Err(LayoutError::ColumnMismatch {
                        declared: specs.len(),
                        found: column_count,
                    });
                }
                self.declared_widths(specs, content_width)
            }
        };

        let mut plan = TablePlan {
            column_widths,
            row_heights: Vec::with_capacity(rows.len()),
            cell_padding: self.metrics.cell_padding,
        };
        plan.row_heights = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let style = if i == 0 { header_style } else { cell_style };
                self.row_height(row, &plan, style)
            })
            .collect();

        log::debug!(
            "table plan: {} columns {:?}, {} rows, total height {:.1}",
            plan.column_count(),
            plan.column_widths,
            plan.row_heights.len(),
            plan.total_height()
        );
        Ok(plan)
    }

    /// Measured cell text height (without padding) for one cell.
    pub fn cell_height(
        &self,
        text: &str,
        column: usize,
        plan: &TablePlan,
        style: &StyleToken,
    ) -> f32 {
        self.measurer.measure(text, style, plan.text_width(column)).height
    }

    /// Height of a row whose cells each carry their own style. Cells beyond the plan's
    /// column count are ignored.
    pub fn styled_row_height(&self, cells: &[(&str, &StyleToken)], plan: &TablePlan) -> f32 {
        let content = cells
            .iter()
            .take(plan.column_count())
            .enumerate()
            .map(|(c, (text, style))| self.cell_height(text, c, plan, style))
            .fold(0.0, f32::max);
        (content + 2.0 * plan.cell_padding + 2.0).max(self.metrics.min_row_height)
    }

    fn row_height(&self, row: &[String], plan: &TablePlan, style: &StyleToken) -> f32 {
        let cells: Vec<(&str, &StyleToken)> =
            row.iter().map(|text| (text.as_str(), style)).collect();
        self.styled_row_height(&cells, plan)
    }

    fn legibility_floor(&self, column_count: usize, content_width: f32) -> f32 {
        self.metrics
            .min_column_width
            .min(content_width / column_count.max(1) as f32)
    }

    fn measured_widths(
        &self,
        rows: &[Vec<String>],
        column_count: usize,
        content_width: f32,
        header_style: &StyleToken,
        cell_style: &StyleToken,
    ) -> Vec<f32> {
        match column_count {
            0 => return Vec::new(),
            1 => return vec![content_width],
            _ => {}
        }

        let floor = self.legibility_floor(column_count, content_width);
        let cap = content_width * self.metrics.max_column_fraction;
        let mut widths: Vec<f32> = (0..column_count - 1)
            .map(|c| {
                let widest = rows
                    .iter()
                    .enumerate()
                    .filter_map(|(i, row)| {
                        let style = if i == 0 { header_style } else { cell_style };
                        row.get(c).map(|cell| self.measurer.max_line_width(cell, style))
                    })
                    .fold(0.0, f32::max);
                (widest + self.metrics.measure_padding).min(cap).max(floor)
            })
            .collect();

        let fixed: f32 = widths.iter().sum();
        let remainder = content_width - fixed;
        let fits = fixed < content_width * self.metrics.equal_split_threshold;
        if fits && remainder + EPSILON >= floor {
            widths.push(remainder);
            widths
        } else {
            log::debug!(
                "measured columns need {:.1} of {:.1}; splitting equally",
                fixed,
                content_width
            );
            vec![content_width / column_count as f32; column_count]
        }
    }

    fn declared_widths(&self, specs: &[Dimension], content_width: f32) -> Vec<f32> {
        let floor = self.legibility_floor(specs.len(), content_width);
        let mut widths: Vec<f32> = specs
            .iter()
            .map(|spec| match spec {
                Dimension::Pt(w) => w.max(0.0),
                Dimension::Percent(p) => (p / 100.0 * content_width).max(0.0),
                Dimension::Auto => 0.0,
            })
            .collect();
        let auto_indices: Vec<usize> = specs
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Dimension::Auto))
            .map(|(i, _)| i)
            .collect();

        let fixed: f32 = widths.iter().sum();
        let reserved_for_auto = auto_indices.len() as f32 * floor;
        if fixed + reserved_for_auto > content_width && fixed > 0.0 {
            // Over-declared: shrink the explicit columns so the auto columns keep their floor.
            let scale = (content_width - reserved_for_auto).max(0.0) / fixed;
            for (i, w) in widths.iter_mut().enumerate() {
                if !auto_indices.contains(&i) {
                    *w *= scale;
                }
            }
        }

        let remaining = content_width - widths.iter().sum::<f32>();
        if auto_indices.is_empty() {
            if let Some(last) = widths.last_mut() {
                *last += remaining;
            }
        } else {
            let share = remaining / auto_indices.len() as f32;
            for i in auto_indices {
                widths[i] = share;
            }
        }
        widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles() -> (StyleToken, StyleToken) {
        let cell = StyleToken::new("Helvetica", 10.0);
        (cell.clone().bold(), cell)
    }

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn assert_conserved(plan: &TablePlan, width: f32) {
        assert!(
            (plan.width() - width).abs() < EPSILON,
            "{:?} does not sum to {}",
            plan.column_widths,
            width
        );
    }

    #[test]
    fn measured_columns_give_the_rest_to_the_last() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::default();
        let solver = TableSolver::new(&measurer, &metrics);
        let (header, cell) = styles();
        let table = rows(&[
            &["Koota", "Score", "Analysis"],
            &["Nadi", "8", "Healthy genetic match"],
        ]);
        let plan = solver.layout(&table, 496.0, &header, &cell, &ColumnMode::Measured).unwrap();

        assert_eq!(plan.column_count(), 3);
        assert_conserved(&plan, 496.0);
        assert_eq!(plan.column_widths[0], 70.0);
        assert!(plan.column_widths[2] > plan.column_widths[0]);
    }

    #[test]
    fn wide_columns_are_capped_at_35_percent() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::default();
        let solver = TableSolver::new(&measurer, &metrics);
        let (header, cell) = styles();
        let long = "an extremely long first column value that would starve the others of space";
        let table = rows(&[&["A", "B"], &[long, "x"]]);
        let plan = solver.layout(&table, 400.0, &header, &cell, &ColumnMode::Measured).unwrap();
        assert!((plan.column_widths[0] - 140.0).abs() < EPSILON);
        assert_conserved(&plan, 400.0);
    }

    #[test]
    fn crowded_tables_fall_back_to_equal_columns() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::default();
        let solver = TableSolver::new(&measurer, &metrics);
        let (header, cell) = styles();
        let wide = "quite a long heading";
        let table = rows(&[&[wide, wide, wide, "last"]]);
        let plan = solver.layout(&table, 400.0, &header, &cell, &ColumnMode::Measured).unwrap();
        for w in &plan.column_widths {
            assert!((w - 100.0).abs() < EPSILON);
        }
    }

    #[test]
    fn narrow_tables_still_conserve_width() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::default();
        let solver = TableSolver::new(&measurer, &metrics);
        let (header, cell) = styles();
        let table = rows(&[&["a", "b", "c", "d", "e", "f", "g", "h"]]);
        let plan = solver.layout(&table, 200.0, &header, &cell, &ColumnMode::Measured).unwrap();
        assert_conserved(&plan, 200.0);
        assert!(plan.column_widths.iter().all(|w| *w > 0.0));
    }

    #[test]
    fn row_heights_cover_wrapped_content() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::default();
        let solver = TableSolver::new(&measurer, &metrics);
        let (header, cell) = styles();
        let table = rows(&[
            &["Area", "Notes"],
            &[
                "Gana",
                "A long explanation that certainly wraps over several lines when the column is \
                 narrow enough",
            ],
            &["Nadi"],
        ]);
        let plan = solver.layout(&table, 200.0, &header, &cell, &ColumnMode::Measured).unwrap();

        for (r, row) in table.iter().enumerate() {
            let style = if r == 0 { &header } else { &cell };
            for (c, text) in row.iter().enumerate() {
                let measured = solver.cell_height(text, c, &plan, style);
                assert!(measured <= plan.row_heights[r] - 2.0 * plan.cell_padding + EPSILON);
            }
            assert!(plan.row_heights[r] >= metrics.min_row_height);
        }
        assert!(plan.row_heights[1] > plan.row_heights[2]);
    }

    #[test]
    fn styled_rows_measure_each_cell_in_its_own_style() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::default();
        let solver = TableSolver::new(&measurer, &metrics);
        let (bold, cell) = styles();
        let table = rows(&[&["Area", "Notes"], &["Yoni", "short"]]);
        let plan = solver.layout(&table, 300.0, &bold, &cell, &ColumnMode::Measured).unwrap();

        let text = "a bold note long enough to wrap inside the notes column more than once";
        let plain = solver.styled_row_height(&[("Yoni", &cell), (text, &cell)], &plan);
        let heavy = solver.styled_row_height(&[("Yoni", &cell), (text, &bold)], &plan);
        assert!(heavy >= plain);
        assert!(plain >= metrics.min_row_height);
    }

    #[test]
    fn declared_columns_share_the_remainder() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::compact();
        let solver = TableSolver::new(&measurer, &metrics);
        let (header, cell) = styles();
        let table = rows(&[&["Area", "Asha", "Bela", "Cira"]]);
        let mode = ColumnMode::Declared(vec![
            Dimension::Pt(72.0),
            Dimension::Auto,
            Dimension::Auto,
            Dimension::Auto,
        ]);
        let plan = solver.layout(&table, 504.0, &header, &cell, &mode).unwrap();
        assert_eq!(plan.column_widths, vec![72.0, 144.0, 144.0, 144.0]);
    }

    #[test]
    fn declared_without_auto_stretches_last_column() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::default();
        let solver = TableSolver::new(&measurer, &metrics);
        let (header, cell) = styles();
        let table = rows(&[&["a", "b"]]);
        let mode = ColumnMode::Declared(vec![Dimension::Pt(100.0), Dimension::Percent(25.0)]);
        let plan = solver.layout(&table, 400.0, &header, &cell, &mode).unwrap();
        assert_eq!(plan.column_widths, vec![100.0, 300.0]);
    }

    #[test]
    fn declared_count_must_match_rows() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::default();
        let solver = TableSolver::new(&measurer, &metrics);
        let (header, cell) = styles();
        let table = rows(&[&["a", "b", "c"]]);
        let mode = ColumnMode::Declared(vec![Dimension::Auto]);
        let err = solver.layout(&table, 400.0, &header, &cell, &mode).unwrap_err();
        assert!(matches!(err, LayoutError::ColumnMismatch { declared: 1, found: 3 }));
    }

    #[test]
    fn zero_width_is_rejected() {
        let measurer = TextMeasurer::new();
        let metrics = TableMetrics::default();
        let solver = TableSolver::new(&measurer, &metrics);
        let (header, cell) = styles();
        let result = solver.layout(&rows(&[&["a"]]), 0.0, &header, &cell, &ColumnMode::Measured);
        assert!(matches!(result, Err(LayoutError::InvalidWidth(_))));
    }
}
