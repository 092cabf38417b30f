//! Multipart file upload with progress events.
//!
//! `fetch` exposes no upload progress, so the request goes through
//! `XMLHttpRequest`. Its callbacks push [`TransferEvent`]s into a single
//! channel; the receiver yields them in the order the browser fired them,
//! which puts every upload progress event before the terminal one.

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, FormData, ProgressEvent, XmlHttpRequest};

use crate::error::UploadError;
use crate::types::{Progress, TransferEvent};

/// A running upload.
///
/// Holds the request callbacks; dropping it before the terminal
/// event would make the browser call freed closures, so keep it until the
/// event stream yields `Completed` or `Failed`.
pub struct Transfer {
    _on_progress: Closure<dyn FnMut(ProgressEvent)>,
    _on_load: Closure<dyn FnMut(Event)>,
    _on_error: Closure<dyn FnMut(Event)>,
    _on_abort: Closure<dyn FnMut(Event)>,
}

/// POST `file` as the multipart part `field` to `url`.
///
/// Returns the running transfer and the stream of its events.
pub fn start_upload(
    url: &str,
    field: &str,
    file: &File,
) -> Result<(Transfer, UnboundedReceiver<TransferEvent>), UploadError> {
    let form_data = FormData::new().map_err(|e| setup_failed("create FormData", e))?;
    form_data
        .append_with_blob(field, file)
        .map_err(|e| setup_failed("append file", e))?;

    let xhr = XmlHttpRequest::new().map_err(|e| setup_failed("create request", e))?;
    let (tx, rx) = mpsc::unbounded();

    let on_progress = {
        let tx = tx.clone();
        Closure::wrap(Box::new(move |ev: ProgressEvent| {
            if let Some(event) = progress_event(ev.length_computable(), ev.loaded(), ev.total()) {
                emit(&tx, event);
            }
        }) as Box<dyn FnMut(ProgressEvent)>)
    };

    let on_load = {
        let tx = tx.clone();
        let xhr = xhr.clone();
        Closure::wrap(Box::new(move |_: Event| {
            let status = xhr.status().unwrap_or(0);
            let status_text = xhr.status_text().unwrap_or_default();
            emit(&tx, TransferEvent::Completed { status, status_text });
        }) as Box<dyn FnMut(Event)>)
    };

    let on_error = {
        let tx = tx.clone();
        Closure::wrap(Box::new(move |_: Event| {
            log::error!("Upload request failed at the network level");
            emit(&tx, TransferEvent::Failed);
        }) as Box<dyn FnMut(Event)>)
    };

    let on_abort = Closure::wrap(Box::new(move |_: Event| {
        log::warn!("Upload request aborted");
        emit(&tx, TransferEvent::Failed);
    }) as Box<dyn FnMut(Event)>);

    xhr.open("POST", url).map_err(|e| setup_failed("open request", e))?;

    let upload = xhr.upload().map_err(|e| setup_failed("access upload target", e))?;
    upload
        .add_event_listener_with_callback("progress", on_progress.as_ref().unchecked_ref())
        .map_err(|e| setup_failed("listen for progress", e))?;
    for (kind, callback) in [("load", &on_load), ("error", &on_error), ("abort", &on_abort)] {
        xhr.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| setup_failed("listen for completion", e))?;
    }

    // A synchronous throw from `send` leaves the request unsent, so no
    // listener can fire after the closures are dropped on this path.
    xhr.send_with_opt_form_data(Some(&form_data))
        .map_err(|e| setup_failed("send request", e))?;

    log::debug!("📡 POST {} ({} bytes)", url, file.size());

    let transfer = Transfer {
        _on_progress: on_progress,
        _on_load: on_load,
        _on_error: on_error,
        _on_abort: on_abort,
    };
    Ok((transfer, rx))
}

/// Map an upload `progress` event to a [`TransferEvent`].
///
/// Events without a computable length or with a zero total carry no
/// usable ratio and are dropped.
pub fn progress_event(length_computable: bool, loaded: f64, total: f64) -> Option<TransferEvent> {
    if !length_computable {
        return None;
    }
    Progress::new(loaded.max(0.0) as u64, total.max(0.0) as u64).map(TransferEvent::Progress)
}

fn emit(tx: &UnboundedSender<TransferEvent>, event: TransferEvent) {
    if tx.unbounded_send(event).is_err() {
        log::debug!("Upload event dropped, receiver is gone");
    }
}

fn setup_failed(step: &str, err: JsValue) -> UploadError {
    log::error!("Failed to {}: {:?}", step, err);
    UploadError::Transport
}
