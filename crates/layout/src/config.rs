/// Sizing rules for laid-out tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableMetrics {
    /// Inset applied on every side of a cell.
    pub cell_padding: f32,
    pub min_row_height: f32,
    /// Minimum legibility width for a measured column. Reduced automatically when the table
    /// is too narrow to give every column this much.
    pub min_column_width: f32,
    /// Added to the widest measured cell of a column.
    pub measure_padding: f32,
    /// Largest share of the table width any non-last measured column may take.
    pub max_column_fraction: f32,
    /// When the non-last columns need at least this share, all columns become equal.
    pub equal_split_threshold: f32,
}

impl Default for TableMetrics {
    fn default() -> Self {
        Self {
            cell_padding: 5.0,
            min_row_height: 22.0,
            min_column_width: 70.0,
            measure_padding: 20.0,
            max_column_fraction: 0.35,
            equal_split_threshold: 0.70,
        }
    }
}

impl TableMetrics {
    /// Tighter metrics used when several partner columns share one page width.
    pub fn compact() -> Self {
        Self {
            cell_padding: 4.0,
            min_row_height: 18.0,
            min_column_width: 60.0,
            measure_padding: 16.0,
            ..Self::default()
        }
    }
}

/// Pagination rules shared by every document shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub table: TableMetrics,
    /// Body lines that must fit below a heading before it may be placed.
    pub keep_with_next_lines: usize,
    /// Upper bound on the space reserved before a table starts.
    pub table_reserve_cap: f32,
    /// Extra space demanded per table row on top of its height.
    pub row_reserve_slack: f32,
    /// Vertical gap produced by a blank narrative line.
    pub paragraph_spacing: f32,
    /// Gap left under every paragraph and list item.
    pub block_gap: f32,
    /// Left indent of list items.
    pub list_indent: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            table: TableMetrics::default(),
            keep_with_next_lines: 4,
            table_reserve_cap: 200.0,
            row_reserve_slack: 4.0,
            paragraph_spacing: 6.0,
            block_gap: 3.0,
            list_indent: 12.0,
        }
    }
}

impl LayoutConfig {
    pub fn compact() -> Self {
        Self {
            table: TableMetrics::compact(),
            table_reserve_cap: 180.0,
            paragraph_spacing: 4.0,
            block_gap: 2.0,
            list_indent: 10.0,
            ..Self::default()
        }
    }
}
