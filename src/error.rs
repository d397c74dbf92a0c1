//! Error type shared by the projection core.

use thiserror::Error;

/// Errors that can occur while building the icosahedron or unwrapping an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnwrapError {
    #[error("Invalid face resolution: {0} (must be at least 1)")]
    InvalidResolution(u32),
    #[error("Invalid face offset: {offset} (supported values are 0..={max})")]
    InvalidFaceOffset { offset: u32, max: u32 },
    #[error("Invalid face index: {0} (must be in 0..20)")]
    InvalidFaceIndex(usize),
    #[error("Expected {expected} face images, got {actual}")]
    FaceCount { expected: usize, actual: usize },
    #[error("Face image at position {position} is face {face}")]
    FaceOrder { position: usize, face: usize },
    #[error("Face {face} has resolution {actual}, expected {expected}")]
    ResolutionMismatch { face: usize, expected: u32, actual: u32 },
    #[error("Source image has zero dimension: {width}x{height}")]
    EmptySource { width: u32, height: u32 },
    #[error("Source buffer holds {actual} bytes, expected {expected}")]
    SourceBufferSize { expected: usize, actual: usize },
    #[error("Degenerate direction on face {face} at pixel ({x}, {y})")]
    DegenerateDirection { face: usize, x: u32, y: u32 },
    #[error("Icosahedron construction failed: {0}")]
    Topology(String),
}

impl UnwrapError {
    /// Returns true for errors caused by an invalid parameter value.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            UnwrapError::InvalidResolution(_)
                | UnwrapError::InvalidFaceOffset { .. }
                | UnwrapError::InvalidFaceIndex(_)
                | UnwrapError::FaceCount { .. }
                | UnwrapError::FaceOrder { .. }
                | UnwrapError::ResolutionMismatch { .. }
        )
    }

    /// Returns true for errors caused by an unusable source raster.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            UnwrapError::EmptySource { .. } | UnwrapError::SourceBufferSize { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UnwrapError>;
