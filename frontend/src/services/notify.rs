//! Browser-level side effects: blocking alerts and page reload.

use gloo_timers::future::TimeoutFuture;

/// Show a blocking alert.
pub fn notify(message: &str) {
    log::warn!("🔔 {}", message);
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        log::error!("Failed to show alert: {:?}", e);
    }
}

/// Reload the current page so the server renders the new file list.
pub fn reload_page() {
    log::info!("🔄 Reloading page");
    if let Err(e) = gloo_utils::window().location().reload() {
        log::error!("Failed to reload page: {:?}", e);
    }
}

/// Wait `delay_ms`, then reload.
pub async fn reload_after(delay_ms: u32) {
    TimeoutFuture::new(delay_ms).await;
    reload_page();
}
