//! Error types for the renderer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can surface from rendering or writing an image.
///
/// Geometric and numeric degeneracies are never errors: they resolve to a
/// miss or an absorbed ray inside the tracer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("a render worker panicked")]
    WorkerPanicked,

    #[error("render finished with {received} of {expected} tiles")]
    IncompleteRender { expected: usize, received: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;
