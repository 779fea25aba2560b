use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::api::{Transcription, UploadFile};
use crate::components::use_api_client;
use crate::error::ApiError;

/// Upload form: file picker, submit button, progress bar.
///
/// Selected files are read into memory on selection and kept until an
/// upload succeeds, so a failed upload can be retried without re-picking.
/// The control surface is disabled while an upload is in flight.
#[component]
pub fn UploadCard(on_upload_complete: EventHandler<Vec<Transcription>>) -> Element {
    let mut selected = use_signal(Vec::<UploadFile>::new);
    let mut uploading = use_signal(|| false);
    let progress = use_signal(|| 0u8);
    let mut upload_error = use_signal(String::new);

    let client = use_api_client();

    // Read picked files into memory; a new selection replaces the old one
    let handle_file_change = move |evt: FormEvent| {
        spawn(async move {
            let mut picked = Vec::new();
            for file in evt.files() {
                let name = file.name();
                match file.read_bytes().await {
                    Ok(bytes) => {
                        picked.push(UploadFile::new(name, bytes.to_vec()));
                    }
                    Err(e) => {
                        error!("Failed to read {}: {}", name, e);
                    }
                }
            }
            selected.set(picked);
            upload_error.set(String::new());
        });
    };

    let submit_client = client.clone();
    let handle_submit = move |_| {
        // Validation failure stays local; no request is issued
        if selected.read().is_empty() {
            upload_error.set(ApiError::NoFilesSelected.user_message());
            return;
        }

        uploading.set(true);
        let mut progress_start = progress;
        progress_start.set(0);
        upload_error.set(String::new());

        let files = selected.read().clone();
        let client = submit_client.clone();

        // Progress flows through a channel: the sender side is driven by the
        // transport, the receiver side updates the signal on the UI task.
        let (tx, mut rx) = futures_channel::mpsc::unbounded::<u8>();
        let mut progress_for_rx = progress;
        spawn(async move {
            while let Some(pct) = rx.next().await {
                progress_for_rx.set(pct);
            }
        });

        let mut selected_for_spawn = selected;
        let mut uploading_for_spawn = uploading;
        let mut error_for_spawn = upload_error;
        let mut progress_for_spawn = progress;
        spawn(async move {
            match client.upload_files(files, Some(tx)).await {
                Ok(records) => {
                    info!("Uploaded {} file(s)", records.len());
                    selected_for_spawn.set(Vec::new());
                    progress_for_spawn.set(0);
                    uploading_for_spawn.set(false);
                    on_upload_complete.call(records);
                }
                Err(e) => {
                    error!("{e}");
                    // Keep the selection so the user can retry as-is
                    error_for_spawn.set(e.user_message());
                    uploading_for_spawn.set(false);
                }
            }
        });
    };

    let file_count = selected.read().len();

    rsx! {
        section { class: "sc-upload-card",
            div { class: "sc-upload-row",
                input {
                    class: "sc-file-input",
                    r#type: "file",
                    multiple: true,
                    accept: "audio/*",
                    disabled: uploading(),
                    onchange: handle_file_change,
                }
                button {
                    class: "sc-btn sc-btn--primary",
                    disabled: uploading() || file_count == 0,
                    onclick: handle_submit,
                    if uploading() {
                        "Uploading..."
                    } else {
                        "Upload Files"
                    }
                }
            }

            if !upload_error.read().is_empty() {
                div { class: "sc-upload-error", "{upload_error}" }
            }

            if uploading() {
                div { class: "sc-progress",
                    div {
                        class: "sc-progress-bar",
                        style: "width: {progress}%;",
                    }
                    div { class: "sc-progress-text", "{progress}%" }
                }
            }

            if file_count > 0 {
                div { class: "sc-selected-files",
                    h3 { class: "sc-selected-title", "Selected Files:" }
                    ul {
                        for file in selected.read().iter() {
                            li { key: "{file.name}", "{file.name}" }
                        }
                    }
                }
            }
        }
    }
}
