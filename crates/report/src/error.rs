use folio_layout::LayoutError;
use folio_render_core::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Render surface failure: {0}")]
    Render(#[from] RenderError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Invalid composer transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
