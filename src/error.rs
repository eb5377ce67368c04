/// Error types shared across the application
///
/// Every variant carries an owned message so errors can travel inside iced
/// messages, which must be `Clone`. Errors from non-clonable sources
/// (reqwest, std::io) are converted to strings at the boundary.

use thiserror::Error;

/// Errors surfaced to the user during a session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// The provided file or payload is not a usable image.
    #[error("{0}")]
    InvalidInput(String),

    /// Camera could not be opened (permission denied or no device).
    #[error("Unable to access camera. Please allow camera permissions.")]
    Camera(String),

    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The endpoint returned a non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure talking to the endpoint.
    #[error("Failed to generate image. Please check your connection and try again.")]
    Network(String),

    /// The endpoint responded but supplied no inline image part.
    #[error("The AI did not return an image. Please try again with a different photo or mode.")]
    NoImageReturned,

    /// Base64 or image payload could not be decoded.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// Filesystem failure while reading or saving an image.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type alias used throughout the application.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Api {
            status: 404,
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Not found");

        let err = AppError::InvalidInput("Please upload an image file.".into());
        assert_eq!(err.to_string(), "Please upload an image file.");
    }

    #[test]
    fn test_no_image_message_is_user_facing() {
        assert!(AppError::NoImageReturned
            .to_string()
            .contains("did not return an image"));
    }

    #[test]
    fn test_errors_are_clonable() {
        // iced messages require Clone; this is a compile-time guarantee,
        // the assertion just keeps the test meaningful.
        let err = AppError::Camera("device busy".into());
        assert_eq!(err.clone(), err);
    }
}
