//! Upload widget bound to the server-rendered page.
//!
//! Handles file selection checks, submission interception, the progress
//! indicator and the reload once the server accepted the file.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, File, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::components::{ProgressHandle, ProgressIndicator};
use crate::config::WidgetConfig;
use crate::error::{UploadError, WidgetError, WidgetResult};
use crate::services::{notify, reload_after, start_upload, Transfer};
use crate::session::UploadSession;
use crate::types::{FileMeta, TransferEvent, UiEffect};
use crate::validation::validate_selection;

/// Controller for the page's multipart upload form.
pub struct UploadWidget {
    config: WidgetConfig,
    form: HtmlFormElement,
    session: RefCell<UploadSession>,
    /// Mounted on first submission, reused afterwards.
    progress: Cell<Option<ProgressHandle>>,
    started_at: Cell<Option<DateTime<Utc>>>,
}

impl UploadWidget {
    /// Bind size checks to every file input and submission handling to the
    /// upload form.
    ///
    /// Returns `Ok(None)` when the page has no upload form; file inputs are
    /// still checked in that case.
    pub fn initialize(config: WidgetConfig) -> WidgetResult<Option<Rc<Self>>> {
        config.validate()?;
        let document = gloo_utils::document();

        bind_size_checks(&document, &config)?;

        let form = match document
            .query_selector(&config.form_selector)
            .map_err(|e| WidgetError::dom("query upload form", e))?
        {
            Some(element) => element.dyn_into::<HtmlFormElement>().map_err(|_| {
                WidgetError::Dom(format!("`{}` does not match a form", config.form_selector))
            })?,
            None => {
                log::info!("No upload form on this page");
                return Ok(None);
            }
        };

        let widget = Rc::new(Self {
            session: RefCell::new(UploadSession::new(config.clone())),
            config,
            form,
            progress: Cell::new(None),
            started_at: Cell::new(None),
        });
        widget.bind_submit()?;

        log::info!("📎 Upload form bound to {}", widget.form.action());
        Ok(Some(widget))
    }

    fn bind_submit(self: &Rc<Self>) -> WidgetResult<()> {
        let widget = Rc::clone(self);
        let on_submit = Closure::wrap(Box::new(move |ev: Event| {
            widget.on_submit(ev);
        }) as Box<dyn FnMut(Event)>);

        self.form
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
            .map_err(|e| WidgetError::dom("bind submit handler", e))?;
        // The handler lives as long as the page.
        on_submit.forget();
        Ok(())
    }

    fn on_submit(self: &Rc<Self>, ev: Event) {
        ev.prevent_default();

        let file = self.selected_file();
        let meta = file.as_ref().map(FileMeta::from);
        let label = self
            .submit_button()
            .and_then(|button| button.text_content())
            .unwrap_or_default();

        let begun = self.session.borrow_mut().begin(meta.as_ref(), &label);
        let effects = match begun {
            Ok(effects) => effects,
            Err(err) if err.is_user_facing() => {
                notify(&err.to_string());
                return;
            }
            Err(err) => {
                log::warn!("Submission ignored: {}", err);
                return;
            }
        };
        self.apply(effects);

        let started = match file {
            Some(file) => start_upload(&self.form.action(), &self.config.field_name, &file),
            None => Err(UploadError::NoFileSelected),
        };
        match started {
            Ok((transfer, events)) => {
                self.started_at.set(Some(Utc::now()));
                let widget = Rc::clone(self);
                spawn_local(async move {
                    widget.drive(transfer, events).await;
                });
            }
            Err(err) => {
                log::error!("Could not start upload: {}", err);
                let effects = self.session.borrow_mut().apply(TransferEvent::Failed);
                self.apply(effects);
            }
        }
    }

    /// Consume transfer events until the terminal one.
    async fn drive(self: Rc<Self>, transfer: Transfer, mut events: UnboundedReceiver<TransferEvent>) {
        while let Some(event) = events.next().await {
            let terminal = event.is_terminal();
            let success = event.is_success();
            let effects = self.session.borrow_mut().apply(event);
            self.apply(effects);

            if terminal {
                if let Some(started) = self.started_at.take() {
                    let elapsed = Utc::now() - started;
                    log::info!(
                        "Upload {} after {} ms",
                        if success { "finished" } else { "stopped" },
                        elapsed.num_milliseconds()
                    );
                }
                break;
            }
        }
        drop(transfer);
    }

    fn apply(&self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::DisableSubmit { label } => self.set_submit(true, &label),
                UiEffect::RestoreSubmit { label } => self.set_submit(false, &label),
                UiEffect::ShowProgress => self.progress_indicator().reset(),
                UiEffect::SetProgress { width, text } => self.progress_indicator().update(width, text),
                UiEffect::SetProgressText(text) => self.progress_indicator().set_text(text),
                UiEffect::HideProgress => self.progress_indicator().hide(),
                UiEffect::Notify(message) => notify(&message),
                UiEffect::ScheduleReload { delay_ms } => spawn_local(reload_after(delay_ms)),
            }
        }
    }

    /// Indicator appended to the form, mounted on first use.
    fn progress_indicator(&self) -> ProgressHandle {
        if let Some(handle) = self.progress.get() {
            return handle;
        }

        let slot = Rc::new(Cell::new(None));
        let mounted = Rc::clone(&slot);
        let parent: HtmlElement = self.form.clone().unchecked_into();
        mount_to(parent, move || {
            let handle = ProgressHandle::new();
            mounted.set(Some(handle));
            view! { <ProgressIndicator handle=handle/> }
        });

        let handle = slot.get().unwrap_or_default();
        self.progress.set(Some(handle));
        handle
    }

    fn selected_file(&self) -> Option<File> {
        self.form
            .query_selector(&self.config.file_input_selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
    }

    fn submit_button(&self) -> Option<HtmlButtonElement> {
        self.form
            .query_selector(&self.config.submit_selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok())
    }

    fn set_submit(&self, disabled: bool, label: &str) {
        if let Some(button) = self.submit_button() {
            button.set_disabled(disabled);
            button.set_text_content(Some(label));
        }
    }
}

/// Reject oversized selections on every file input of the page.
fn bind_size_checks(document: &Document, config: &WidgetConfig) -> WidgetResult<()> {
    let inputs = document
        .query_selector_all(&config.file_input_selector)
        .map_err(|e| WidgetError::dom("query file inputs", e))?;
    let limit = config.max_file_size;

    for index in 0..inputs.length() {
        let Some(input) = inputs
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };

        let on_change = Closure::wrap(Box::new(move |ev: Event| {
            let Some(input) = ev
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let selected = input
                .files()
                .and_then(|files| files.get(0))
                .map(|file| FileMeta::from(&file));

            if let Err(err) = validate_selection(selected.as_ref(), limit) {
                input.set_value("");
                notify(&err.to_string());
            }
        }) as Box<dyn FnMut(Event)>);

        input
            .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
            .map_err(|e| WidgetError::dom("bind change handler", e))?;
        on_change.forget();
    }

    log::debug!("Size check bound to {} file input(s)", inputs.length());
    Ok(())
}
