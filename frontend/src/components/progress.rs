//! Upload progress indicator.
//!
//! Renders the fixed fragment the page stylesheet expects:
//!
//! ```text
//! div.upload-progress
//! └── div.progress-container
//!     ├── div.progress-bar   (width: N%)
//!     └── div.progress-text  ("N%" or the completion message)
//! ```

use leptos::*;

/// Reactive state behind one mounted [`ProgressIndicator`].
#[derive(Clone, Copy, Debug)]
pub struct ProgressHandle {
    width: RwSignal<f64>,
    text: RwSignal<String>,
    visible: RwSignal<bool>,
}

impl ProgressHandle {
    pub fn new() -> Self {
        Self {
            width: create_rw_signal(0.0),
            text: create_rw_signal("0%".to_string()),
            visible: create_rw_signal(true),
        }
    }

    /// Back to 0% and visible, for a new attempt.
    pub fn reset(&self) {
        self.width.set(0.0);
        self.text.set("0%".to_string());
        self.visible.set(true);
    }

    pub fn update(&self, width: f64, text: String) {
        self.width.set(width);
        self.text.set(text);
    }

    pub fn set_text(&self, text: String) {
        self.text.set(text);
    }

    pub fn hide(&self) {
        self.visible.set(false);
    }
}

impl Default for ProgressHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ProgressIndicator(handle: ProgressHandle) -> impl IntoView {
    view! {
        <div
            class="upload-progress"
            style=move || if handle.visible.get() { "" } else { "display: none;" }
        >
            <div class="progress-container">
                <div
                    class="progress-bar"
                    style=move || format!("width: {}%;", handle.width.get())
                ></div>
                <div class="progress-text">{move || handle.text.get()}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hide_keeps_last_values() {
        let runtime = create_runtime();
        let handle = ProgressHandle::new();

        handle.update(40.0, "40%".to_string());
        handle.hide();

        assert!(!handle.visible.get_untracked());
        assert_eq!(handle.width.get_untracked(), 40.0);
        assert_eq!(handle.text.get_untracked(), "40%");
        runtime.dispose();
    }

    #[test]
    fn test_reset_after_hide_shows_empty_bar() {
        let runtime = create_runtime();
        let handle = ProgressHandle::new();

        handle.update(80.0, "80%".to_string());
        handle.hide();
        handle.reset();

        assert!(handle.visible.get_untracked());
        assert_eq!(handle.width.get_untracked(), 0.0);
        assert_eq!(handle.text.get_untracked(), "0%");
        runtime.dispose();
    }

    #[test]
    fn test_completion_text_keeps_width() {
        let runtime = create_runtime();
        let handle = ProgressHandle::new();

        handle.update(100.0, "100%".to_string());
        handle.set_text("Upload complete!".to_string());

        assert_eq!(handle.width.get_untracked(), 100.0);
        assert_eq!(handle.text.get_untracked(), "Upload complete!");
        assert!(handle.visible.get_untracked());
        runtime.dispose();
    }
}
