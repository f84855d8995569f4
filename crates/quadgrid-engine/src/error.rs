//! Error taxonomy for grid sketches.
//!
//! Nothing here is recovered from: callers log the error and return.

use std::path::PathBuf;

/// Domain errors raised while bringing a grid sketch up or feeding it images.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Context, shader, or buffer creation failed.
    #[error("fatal initialization error: {0}")]
    FatalInit(String),

    /// A single image failed to load or decode.
    #[error("failed to load image #{index} ({}): {reason}", path.display())]
    LoadFailure {
        index: usize,
        path: PathBuf,
        #[source]
        reason: image::ImageError,
    },

    /// A symbol the renderer binds by name is absent from the shader source.
    #[error("shader `{program}` is missing expected symbol `{name}`")]
    MissingUniform { program: String, name: String },
}

impl GridError {
    pub fn fatal(msg: impl Into<String>) -> Self {
        GridError::FatalInit(msg.into())
    }
}
