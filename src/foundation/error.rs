use crate::pose::landmark::PoseLandmark;

/// Convenience result type used across the crate.
pub type TryOnResult<T> = Result<T, TryOnError>;

/// Top-level error taxonomy.
///
/// Only `Validation`, `Serde` and `Other` can surface from setup paths. The per-frame garment path
/// recovers from the rest locally so the video feed keeps rendering.
#[derive(thiserror::Error, Debug)]
pub enum TryOnError {
    /// Invalid user-provided data (canvas sizes, landmark frames, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// A landmark the garment is anchored on is absent or below the visibility threshold.
    #[error("missing anchor: {0:?}")]
    MissingAnchor(PoseLandmark),

    /// A color value that is not `#RRGGBB`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Errors raised while rasterizing or reading back a surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TryOnError {
    /// Build a [`TryOnError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TryOnError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TryOnError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
