//! Submission state machine.
//!
//! [`UploadSession`] owns the rules of one widget: when a submission may
//! start, how transfer events map to progress, and how each outcome is
//! reported. It never touches the DOM; it returns [`UiEffect`]s that the
//! widget applies in order.
//!
//! ```text
//!            begin()            Completed(200)
//!   Idle ──────────────▶ InFlight ─────────────▶ Succeeded
//!    ▲                      │
//!    │                      │ Completed(!200) / Failed
//!    │      begin()         ▼
//!    └──────────────────  Failed
//! ```

use crate::config::{WidgetConfig, SUCCESS_STATUS};
use crate::error::UploadError;
use crate::types::{FileMeta, Progress, SubmissionState, TransferEvent, UiEffect};
use crate::validation::{check_file_size, require_file};

#[derive(Debug)]
pub struct UploadSession {
    config: WidgetConfig,
    state: SubmissionState,
    /// Submit label captured when the current attempt started.
    original_label: Option<String>,
    /// Highest percentage reported for the current attempt.
    last_percent: f64,
    file: Option<FileMeta>,
}

impl UploadSession {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            state: SubmissionState::Idle,
            original_label: None,
            last_percent: 0.0,
            file: None,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// File of the current or last attempt.
    pub fn file(&self) -> Option<&FileMeta> {
        self.file.as_ref()
    }

    /// Start a submission for `file`.
    ///
    /// `submit_label` is the current text of the submit control; it is
    /// restored if the attempt fails. On error nothing changes and no
    /// request must be sent. `Busy` wins over every other check, so a
    /// running upload never triggers a validation alert.
    pub fn begin(
        &mut self,
        file: Option<&FileMeta>,
        submit_label: &str,
    ) -> Result<Vec<UiEffect>, UploadError> {
        if !self.state.accepts_submission() {
            return Err(UploadError::Busy);
        }
        let file = require_file(file)?;
        check_file_size(file, self.config.max_file_size)?;

        log::info!("📤 Uploading {} ({} bytes)", file.name, file.size);

        self.state = SubmissionState::InFlight;
        self.original_label = Some(submit_label.to_string());
        self.last_percent = 0.0;
        self.file = Some(file.clone());

        Ok(vec![
            UiEffect::DisableSubmit { label: self.config.busy_label.clone() },
            UiEffect::ShowProgress,
        ])
    }

    /// Feed one transfer event; returns the DOM changes it causes.
    ///
    /// Events outside an in-flight attempt are ignored.
    pub fn apply(&mut self, event: TransferEvent) -> Vec<UiEffect> {
        if self.state != SubmissionState::InFlight {
            log::debug!("Ignoring {:?} in state {:?}", event, self.state);
            return Vec::new();
        }

        match event {
            TransferEvent::Progress(progress) => self.progress(progress),
            TransferEvent::Completed { status, .. } if status == SUCCESS_STATUS => {
                log::info!("✅ Upload complete");
                self.state = SubmissionState::Succeeded;
                self.original_label = None;
                vec![
                    UiEffect::SetProgressText(self.config.complete_text.clone()),
                    UiEffect::ScheduleReload { delay_ms: self.config.reload_delay_ms },
                ]
            }
            TransferEvent::Completed { status, status_text } => {
                let status_text = if status_text.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    status_text
                };
                self.fail(UploadError::ServerRejection { status, status_text })
            }
            TransferEvent::Failed => self.fail(UploadError::Transport),
        }
    }

    fn progress(&mut self, progress: Progress) -> Vec<UiEffect> {
        let percent = progress.percent();
        if percent < self.last_percent {
            return Vec::new();
        }
        self.last_percent = percent;
        log::debug!("Upload progress {}/{} bytes", progress.loaded, progress.total);

        vec![UiEffect::SetProgress {
            width: percent,
            text: format!("{}%", percent.round() as u32),
        }]
    }

    fn fail(&mut self, err: UploadError) -> Vec<UiEffect> {
        log::warn!("❌ {}", err);
        self.state = SubmissionState::Failed;
        let label = self.original_label.take().unwrap_or_default();

        vec![
            UiEffect::Notify(err.to_string()),
            UiEffect::RestoreSubmit { label },
            UiEffect::HideProgress,
        ]
    }
}
