//! Error types for radio image analysis.

use thiserror::Error;

/// Result type alias using AnalysisError.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised by geometry, profiling and detection operations.
///
/// Every error is returned synchronously to the immediate caller. Nothing in
/// this workspace retries or returns partial results.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A beam-relative operation was requested on an image without a beam.
    #[error("image has no restoring beam: {0}")]
    MissingBeam(String),

    /// Angular unit pair is not in the conversion table.
    #[error("unsupported unit conversion from '{from}' to '{to}'")]
    UnsupportedUnit { from: String, to: String },

    /// Peak detection neighborhood violates the odd/bounds constraints.
    #[error("invalid neighborhood: {0}")]
    InvalidNeighborhood(String),

    /// Two grids that must share dimensions do not.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// A scalar argument is outside its valid range.
    #[error("invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// A region mask carries no usable weight.
    #[error("degenerate region mask: {0}")]
    DegenerateMask(String),

    /// Serialized image or config could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AnalysisError {
    /// Create a MissingBeam error.
    pub fn missing_beam(operation: impl Into<String>) -> Self {
        Self::MissingBeam(operation.into())
    }

    /// Create an UnsupportedUnit error.
    pub fn unsupported_unit(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnsupportedUnit {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create an InvalidNeighborhood error.
    pub fn invalid_neighborhood(msg: impl Into<String>) -> Self {
        Self::InvalidNeighborhood(msg.into())
    }

    /// Create a ShapeMismatch error from two `(width, height)` pairs.
    pub fn shape_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a DegenerateMask error.
    pub fn degenerate_mask(msg: impl Into<String>) -> Self {
        Self::DegenerateMask(msg.into())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = AnalysisError::shape_mismatch((10, 10), (8, 10));
        assert_eq!(err.to_string(), "shape mismatch: expected 10x10, got 8x10");
    }

    #[test]
    fn test_unsupported_unit_message() {
        let err = AnalysisError::unsupported_unit("deg", "arcsec");
        assert_eq!(
            err.to_string(),
            "unsupported unit conversion from 'deg' to 'arcsec'"
        );
    }
}
