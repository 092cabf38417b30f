//! Fileshare - Upload widget
//!
//! A WebAssembly widget that takes over the multipart upload form of the
//! server-rendered fileshare pages: it checks file sizes on selection,
//! sends the file asynchronously, shows upload progress and reloads the
//! page once the server accepted the file.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  submit   ┌───────────────┐  TransferEvent  ┌──────────────┐
//! │ UploadWidget │──────────▶│ UploadSession │◀────────────────│ start_upload │
//! │  (DOM glue)  │◀──────────│ (state rules) │                 │    (XHR)     │
//! └──────────────┘ UiEffect  └───────────────┘                 └──────────────┘
//!        │
//!        ▼
//! ProgressIndicator (Leptos), alerts, reload
//! ```
//!
//! # Modules
//!
//! - [`config`] - Constants and [`WidgetConfig`]
//! - [`error`] - Upload, config and initialization errors
//! - [`types`] - Shared types (FileMeta, TransferEvent, UiEffect, ...)
//! - [`validation`] - File presence and size rules
//! - [`session`] - Submission state machine
//! - [`components`] - Widget binding and progress indicator
//! - [`services`] - XHR upload, alerts and reload

use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod types;
pub mod validation;
pub mod session;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Files
    FileMeta,
    // Transfer
    Progress, TransferEvent,
    // Session
    SubmissionState, UiEffect,
};

// Errors
pub use error::{ConfigError, UploadError, WidgetError, WidgetResult};

pub use session::UploadSession;

// Components
pub use components::*;

// =============================================================================
// Entry points
// =============================================================================

/// Attach the widget with the default configuration.
///
/// Call once, after the page's upload form is in the DOM.
#[wasm_bindgen]
pub fn init() -> Result<(), JsValue> {
    start(WidgetConfig::default())?;
    Ok(())
}

/// Attach the widget with overrides from a plain JS object.
///
/// Keys are camelCase field names of [`WidgetConfig`]; missing keys keep
/// their defaults.
#[wasm_bindgen(js_name = initWithConfig)]
pub fn init_with_config(config: JsValue) -> Result<(), JsValue> {
    let config = WidgetConfig::from_js(config).map_err(WidgetError::from)?;
    start(config)?;
    Ok(())
}

fn start(config: WidgetConfig) -> WidgetResult<()> {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(config.level()?);

    log::info!("🦀 Fileshare upload widget starting");

    match UploadWidget::initialize(config)? {
        // The widget is kept alive by its event handlers.
        Some(_widget) => log::debug!("Upload widget ready"),
        None => log::debug!("Upload widget idle: nothing to submit"),
    }
    Ok(())
}
