//! Widget configuration.
//!
//! Defaults match the server-rendered upload page. A hosting page can
//! override any of them by passing a plain object to `initWithConfig`;
//! keys are the camelCase field names of [`WidgetConfig`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::ConfigError;

/// Maximum file size accepted for upload (in bytes).
///
/// 100 MiB limit.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Delay between the completion message and the page reload.
pub const RELOAD_DELAY_MS: u32 = 1_000;

/// Multipart part name carrying the file bytes.
pub const FILE_FIELD_NAME: &str = "file";

/// The only status code treated as a successful upload.
pub const SUCCESS_STATUS: u16 = 200;

pub const UPLOAD_FORM_SELECTOR: &str = r#"form[enctype="multipart/form-data"]"#;
pub const FILE_INPUT_SELECTOR: &str = r#"input[type="file"]"#;
pub const SUBMIT_BUTTON_SELECTOR: &str = r#"button[type="submit"]"#;

/// Submit button label while a transfer is running.
pub const BUSY_LABEL: &str = "Uploading...";

/// Progress text shown once the server accepted the file.
pub const COMPLETE_TEXT: &str = "Upload complete!";

/// Runtime configuration for [`crate::UploadWidget`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Selector for the upload form.
    pub form_selector: String,
    /// Selector for every file input validated on change.
    pub file_input_selector: String,
    /// Selector for the submit control, relative to the form.
    pub submit_selector: String,
    /// Multipart part name.
    pub field_name: String,
    /// Size limit in bytes; larger files are rejected.
    pub max_file_size: u64,
    /// Submit label while a transfer is running.
    pub busy_label: String,
    /// Progress text after the server accepted the file.
    pub complete_text: String,
    /// Delay before reloading after a successful upload.
    pub reload_delay_ms: u32,
    /// `log` level name for the console logger.
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            form_selector: UPLOAD_FORM_SELECTOR.to_string(),
            file_input_selector: FILE_INPUT_SELECTOR.to_string(),
            submit_selector: SUBMIT_BUTTON_SELECTOR.to_string(),
            field_name: FILE_FIELD_NAME.to_string(),
            max_file_size: MAX_FILE_SIZE,
            busy_label: BUSY_LABEL.to_string(),
            complete_text: COMPLETE_TEXT.to_string(),
            reload_delay_ms: RELOAD_DELAY_MS,
            log_level: "debug".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Decode a config object handed over by the hosting page.
    ///
    /// `undefined` and `null` yield the defaults.
    pub fn from_js(value: JsValue) -> Result<Self, ConfigError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| ConfigError::Decode(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would leave the widget unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size == 0 {
            return Err(ConfigError::Invalid("maxFileSize must be greater than zero".into()));
        }
        if self.field_name.trim().is_empty() {
            return Err(ConfigError::Invalid("fieldName must not be empty".into()));
        }
        for (key, selector) in [
            ("formSelector", &self.form_selector),
            ("fileInputSelector", &self.file_input_selector),
            ("submitSelector", &self.submit_selector),
        ] {
            if selector.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", key)));
            }
        }
        self.level()?;
        Ok(())
    }

    /// Parsed console log level.
    pub fn level(&self) -> Result<log::Level, ConfigError> {
        log::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::Invalid(format!("unknown logLevel `{}`", self.log_level)))
    }
}

/// Human-readable size limit, e.g. `100MB`.
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    match bytes {
        b if b >= GIB && b % GIB == 0 => format!("{}GB", b / GIB),
        b if b >= MIB && b % MIB == 0 => format!("{}MB", b / MIB),
        b if b >= KIB && b % KIB == 0 => format!("{}KB", b / KIB),
        b => format!("{} bytes", b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_is_100_mib() {
        let config = WidgetConfig::default();
        assert_eq!(config.max_file_size, 104_857_600);
        assert_eq!(config.field_name, "file");
        assert_eq!(config.reload_delay_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "maxFileSize": 1048576, "busyLabel": "Sending..." }"#;
        let config: WidgetConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.max_file_size, 1_048_576);
        assert_eq!(config.busy_label, "Sending...");
        assert_eq!(config.form_selector, UPLOAD_FORM_SELECTOR);
        assert_eq!(config.complete_text, COMPLETE_TEXT);
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let zero = WidgetConfig { max_file_size: 0, ..Default::default() };
        assert!(zero.validate().is_err());

        let no_field = WidgetConfig { field_name: "  ".into(), ..Default::default() };
        assert!(no_field.validate().is_err());

        let no_form = WidgetConfig { form_selector: String::new(), ..Default::default() };
        let err = no_form.validate().unwrap_err();
        assert!(err.to_string().contains("formSelector"));

        let bad_level = WidgetConfig { log_level: "loud".into(), ..Default::default() };
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let config = WidgetConfig { log_level: "WARN".into(), ..Default::default() };
        assert_eq!(config.level().unwrap(), log::Level::Warn);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(MAX_FILE_SIZE), "100MB");
        assert_eq!(format_size(2 * 1024 * 1024 * 1024), "2GB");
        assert_eq!(format_size(512 * 1024), "512KB");
        assert_eq!(format_size(1000), "1000 bytes");
    }
}
