//! Turns packed pages into output documents.

mod json;
mod pdf;

pub use json::JsonRenderer;
pub use pdf::PdfRenderer;

use std::io;

use shelfpack::PackOutput;
use thiserror::Error;

use crate::image::PreparedImage;

/// A packed layout, ready to be rendered. Positions are top-down and in points.
pub type Layout = PackOutput<PreparedImage>;

pub trait Renderer {
    fn render(&mut self, layout: &Layout) -> Result<(), RenderError>;
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("couldn't write PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("couldn't write layout: {0}")]
    Json(#[from] serde_json::Error),
}
