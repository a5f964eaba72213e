//! Graphics error types.

use thiserror::Error;

/// Errors that can occur in the graphics system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphicsError {
    /// An invalid parameter was provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A shader program could not be created.
    #[error("shader program '{program}' creation failed: {reason}")]
    ShaderCreationFailed {
        /// Name of the program that failed.
        program: String,
        /// Why creation failed.
        reason: String,
    },
    /// A graphics pipeline could not be created.
    #[error("pipeline creation failed: {0}")]
    PipelineCreationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphicsError::InvalidParameter("buffer size cannot be zero".to_string());
        assert_eq!(err.to_string(), "invalid parameter: buffer size cannot be zero");

        let err = GraphicsError::ShaderCreationFailed {
            program: "haze".to_string(),
            reason: "not found in shader library".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "shader program 'haze' creation failed: not found in shader library"
        );
    }
}
