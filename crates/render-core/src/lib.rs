//! Core rendering abstractions for folio documents.
//!
//! This crate provides the drawing sink used by the composer:
//! - `RenderSurface` trait with page lifecycle and drawing primitives
//! - `RecordingSurface`, an in-memory sink that records every command
//! - Decoded image data and shared geometry helpers for backends

mod error;
mod image_data;
mod recording;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use image_data::ImageData;
pub use recording::{DrawCommand, RecordedPage, Recording, RecordingSurface};
pub use traits::{RenderSurface, Stroke};
