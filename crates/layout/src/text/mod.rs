//! Text measurement and line breaking over the built-in font metrics.

pub mod measure;
pub mod metrics;
pub mod wrapper;

pub use measure::{Measurement, TextMeasurer};
pub use metrics::MetricSet;
pub use wrapper::{LineItem, LineLayout};
