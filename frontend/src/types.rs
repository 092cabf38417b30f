//! Common types shared by the session, services and components.
//!
//! # Categories
//!
//! - **File Types** - what the widget knows about a selected file
//! - **Transfer Types** - progress and terminal events of one request
//! - **Session Types** - submission state and requested DOM mutations

use web_sys::File;

use crate::config::SUCCESS_STATUS;

// =============================================================================
// File Types
// =============================================================================

/// Snapshot of a selected file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    /// File name as reported by the browser
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size }
    }
}

impl From<&File> for FileMeta {
    fn from(file: &File) -> Self {
        // `File.size` is a JS number; sizes are integral and non-negative.
        Self::new(file.name(), file.size().max(0.0) as u64)
    }
}

// =============================================================================
// Transfer Types
// =============================================================================

/// Bytes sent so far out of a known total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub loaded: u64,
    pub total: u64,
}

impl Progress {
    /// Returns `None` when the total is unknown.
    pub fn new(loaded: u64, total: u64) -> Option<Self> {
        (total > 0).then_some(Self { loaded, total })
    }

    /// Share of bytes sent, in percent, clamped to `0..=100`.
    pub fn percent(&self) -> f64 {
        (self.loaded as f64 / self.total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Events observed on one request, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum TransferEvent {
    /// Upload progress with a computable length.
    Progress(Progress),
    /// The server answered.
    Completed { status: u16, status_text: String },
    /// The request failed before a response arrived, or was aborted.
    Failed,
}

impl TransferEvent {
    /// Terminal events end the request; nothing follows them.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransferEvent::Progress(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransferEvent::Completed { status, .. } if *status == SUCCESS_STATUS)
    }
}

// =============================================================================
// Session Types
// =============================================================================

/// Lifecycle of the widget's current submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Request sent, waiting for a terminal event
    InFlight,
    /// Server returned 200; page reload pending
    Succeeded,
    /// Last attempt failed; a new one may start
    Failed,
}

impl SubmissionState {
    /// Whether a new submission may start.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed)
    }
}

/// DOM mutation requested by the session, applied in order.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEffect {
    /// Disable the submit control and show `label`.
    DisableSubmit { label: String },
    /// Enable the submit control and restore `label`.
    RestoreSubmit { label: String },
    /// Create or reuse the progress indicator, reset to 0% and visible.
    ShowProgress,
    /// Bar width in percent and the text next to it.
    SetProgress { width: f64, text: String },
    SetProgressText(String),
    HideProgress,
    /// Blocking alert.
    Notify(String),
    /// Reload the page after `delay_ms`.
    ScheduleReload { delay_ms: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_requires_known_total() {
        assert!(Progress::new(10, 0).is_none());
        assert_eq!(Progress::new(50, 100).unwrap().percent(), 50.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        let overshoot = Progress::new(120, 100).unwrap();
        assert_eq!(overshoot.percent(), 100.0);
    }

    #[test]
    fn test_terminal_events() {
        assert!(!TransferEvent::Progress(Progress { loaded: 1, total: 2 }).is_terminal());
        assert!(TransferEvent::Failed.is_terminal());

        let ok = TransferEvent::Completed { status: 200, status_text: "OK".into() };
        let created = TransferEvent::Completed { status: 201, status_text: "Created".into() };
        assert!(ok.is_terminal() && ok.is_success());
        assert!(!created.is_success());
    }

    #[test]
    fn test_state_accepts_submission() {
        assert!(SubmissionState::Idle.accepts_submission());
        assert!(SubmissionState::Failed.accepts_submission());
        assert!(!SubmissionState::InFlight.accepts_submission());
        assert!(!SubmissionState::Succeeded.accepts_submission());
    }
}
