//! Error types for the upload widget.
//!
//! - [`UploadError`] - per-submission failures; `Display` is the text shown
//!   to the user
//! - [`ConfigError`] - invalid widget configuration
//! - [`WidgetError`] - initialization failures returned to the hosting page

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::config::format_size;

// =============================================================================
// Upload Errors
// =============================================================================

/// Failures of a single upload attempt.
///
/// Every variant is terminal for its attempt; the user retries manually.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Submit pressed with an empty file input.
    #[error("Please select a file to upload")]
    NoFileSelected,

    /// Selected file is larger than the configured limit.
    #[error("File size exceeds the maximum limit of {}", limit_label(.limit))]
    FileTooLarge { size: u64, limit: u64 },

    /// Request completed with a status other than 200.
    #[error("Upload failed: {status_text}")]
    ServerRejection { status: u16, status_text: String },

    /// Request never completed (network error, abort, request setup).
    #[error("Upload failed. Please try again.")]
    Transport,

    /// A previous submission is still running or about to reload the page.
    #[error("An upload is already in progress")]
    Busy,
}

impl UploadError {
    /// Whether the user should see an alert for this error.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, UploadError::Busy)
    }
}

fn limit_label(limit: &u64) -> String {
    format_size(*limit)
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JS value could not be decoded into a config.
    #[error("Failed to decode widget config: {0}")]
    Decode(String),

    /// A field holds an unusable value.
    #[error("Invalid widget config: {0}")]
    Invalid(String),
}

// =============================================================================
// Initialization Errors
// =============================================================================

/// Errors returned by the initialization entry points.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A DOM call failed or an element had an unexpected type.
    #[error("DOM error: {0}")]
    Dom(String),
}

impl WidgetError {
    /// Wrap a JS exception thrown by a DOM call.
    pub fn dom(context: &str, err: JsValue) -> Self {
        WidgetError::Dom(format!("{}: {:?}", context, err))
    }
}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Result type for initialization.
pub type WidgetResult<T> = Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            UploadError::NoFileSelected.to_string(),
            "Please select a file to upload"
        );
        assert_eq!(
            UploadError::FileTooLarge { size: 150 * 1024 * 1024, limit: 100 * 1024 * 1024 }
                .to_string(),
            "File size exceeds the maximum limit of 100MB"
        );
        assert_eq!(
            UploadError::ServerRejection {
                status: 500,
                status_text: "Internal Server Error".into(),
            }
            .to_string(),
            "Upload failed: Internal Server Error"
        );
        assert_eq!(UploadError::Transport.to_string(), "Upload failed. Please try again.");
    }

    #[test]
    fn test_busy_is_not_user_facing() {
        assert!(!UploadError::Busy.is_user_facing());
        assert!(UploadError::Transport.is_user_facing());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: WidgetError = ConfigError::Invalid("fieldName must not be empty".into()).into();
        assert!(err.to_string().contains("fieldName"));
    }
}
