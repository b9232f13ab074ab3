use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Layout width must be positive, got {0:.2}.")]
    InvalidWidth(f32),
    #[error("Table declares {declared} column widths but its rows have {found} columns.")]
    ColumnMismatch { declared: usize, found: usize },
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
}

pub mod config;
pub mod flow;
pub mod table;
pub mod text;

pub use self::config::{LayoutConfig, TableMetrics};
pub use self::flow::{
    check_fit, keep_with_next, Cursor, PageChrome, PageFlow, PageInfo, PageKind, Placement,
    PlacementKind,
};
pub use self::table::{ColumnMode, TablePlan, TableSolver};
pub use self::text::{LineItem, LineLayout, Measurement, MetricSet, TextMeasurer};

pub use folio_types::{PageGeometry, Rect, Size};

/// Rejects geometries whose header or footer bands leave no content area.
pub fn validate_geometry(geometry: &PageGeometry) -> Result<(), LayoutError> {
    if geometry.is_valid() {
        Ok(())
    } else {
        Err(LayoutError::InvalidGeometry(format!(
            "content band {:.1}..{:.1} does not fit a {:.1}x{:.1} page with margin {:.1}",
            geometry.content_top,
            geometry.content_bottom,
            geometry.page_width,
            geometry.page_height,
            geometry.margin
        )))
    }
}
