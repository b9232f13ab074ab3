use folio_render_core::RenderError;
use folio_report::ComposeError;
use folio_style::StyleError;
use thiserror::Error;

/// Everything that can stop a report from being produced.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid style value: {0}")]
    Style(#[from] StyleError),
}
