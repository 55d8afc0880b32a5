/// Convenience result type used across pathview.
pub type PathviewResult<T> = Result<T, PathviewError>;

/// Top-level error taxonomy used by the display engine.
#[derive(thiserror::Error, Debug)]
pub enum PathviewError {
    /// A style index outside the range of registered paths.
    #[error("style index out of range: {index} (registered paths: {len})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of registered paths at the time of the call.
        len: usize,
    },

    /// A draw-mode value outside the supported set (`lines`, `dots`).
    #[error("unsupported draw mode: {0}")]
    UnsupportedDrawMode(String),

    /// Invalid user-provided style or display data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PathviewError {
    /// Build a [`PathviewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PathviewError::UnsupportedDrawMode`] value.
    pub fn unsupported_draw_mode(mode: impl Into<String>) -> Self {
        Self::UnsupportedDrawMode(mode.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
