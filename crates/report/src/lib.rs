//! Report models, document plans and the page composer.
//!
//! A report is turned into a [`DocumentPlan`] by one of the plan builders and then drawn by
//! the [`Composer`] onto any [`folio_render_core::RenderSurface`].

pub mod chrome;
pub mod compose;
pub mod config;
mod draw;
pub mod error;
pub mod model;
pub mod plan;
pub mod scoring;
pub mod theme;

pub use chrome::Canvas;
pub use compose::{ComposeState, Composer, RenderedArtifact};
pub use config::{ChromeLayout, DocumentKind, ReportConfig};
pub use error::ComposeError;
pub use model::{
    Assessment, CategoryRow, ComparisonEntry, ComparisonReport, NarrativeSection, Person,
    SubjectReport,
};
pub use plan::{DocumentPlan, Section};
pub use theme::{Theme, Tone};
