//! UI components for the Scribe application.
//!
//! - [`App`]: root view; owns the transcription list and orchestrates
//!   initial load, search, and the post-upload merge
//! - [`UploadCard`]: file selection and upload with progress
//! - [`SearchBar`]: query input with explicit clear
//! - [`TranscriptionList`]: pure rendering of the record sequence
//!
//! # Data flow
//!
//! One-way: the root owns all list state, children receive read-only copies
//! plus `EventHandler` callbacks. Shared infrastructure goes through Dioxus
//! context:
//!
//! ```ignore
//! // Access the API client from any component
//! let client = use_api_client();
//!
//! // Check backend reachability
//! match use_backend_status().read().clone() {
//!     BackendStatus::Online => { /* ... */ }
//!     BackendStatus::Pending | BackendStatus::Unreachable(_) => { /* ... */ }
//! }
//! ```

mod list_state;
mod search_bar;
mod transcription_list;
mod upload_card;

pub use search_bar::SearchBar;
pub use transcription_list::TranscriptionList;
pub use upload_card::UploadCard;

use crate::api::{ApiClient, Transcription};
use crate::utils::SignalExt;
use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use list_state::ListState;

/// Messages for the list-loading coroutine
pub enum LoadMessage {
    /// Fetch the unfiltered list
    LoadAll,
    /// Fetch records matching a query
    Search(String),
}

/// Backend reachability, probed once at startup
#[derive(Clone, PartialEq)]
pub enum BackendStatus {
    /// Probe not finished yet
    Pending,
    /// Health endpoint answered
    Online,
    /// Health endpoint failed; calls will likely fail too
    Unreachable(String),
}

/// API client context provider
pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>()
}

/// Backend status context provider
pub fn use_backend_status() -> Signal<BackendStatus> {
    use_context::<Signal<BackendStatus>>()
}

#[component]
pub fn App() -> Element {
    // Shared API client; clones reuse one connection pool
    use_context_provider(ApiClient::from_env);

    let backend_status = use_signal(|| BackendStatus::Pending);
    use_context_provider(|| backend_status);

    // Root-owned list state: fetched in bulk, held for the page lifetime.
    // Request ordering (the latest issued query wins) lives in [`ListState`].
    let state = use_signal(ListState::new);
    let search_query = use_signal(String::new);

    let client = use_api_client();

    let load_task = use_coroutine({
        let state_signal = state;
        let client = client.clone();

        move |mut rx: UnboundedReceiver<LoadMessage>| {
            let client = client.clone();
            async move {
                while let Some(msg) = rx.next().await {
                    let mut state_for_issue = state_signal;
                    let token = state_for_issue.mutate(|s| s.issue());

                    // Each fetch runs as its own task; a response that was
                    // superseded while in flight is rejected by settle.
                    let client = client.clone();
                    let mut state_for_spawn = state_signal;
                    spawn(async move {
                        let result = match &msg {
                            LoadMessage::Search(query) if !query.trim().is_empty() => {
                                client.search(query).await
                            }
                            _ => client.list().await,
                        };

                        let loaded = result.as_ref().map(Vec::len).ok();
                        if let Err(e) = &result {
                            // Full detail to the log; the banner shows the
                            // short user message.
                            error!("{e}");
                        }

                        if state_for_spawn.mutate(|s| s.settle(token, result)) {
                            if let Some(count) = loaded {
                                info!("Loaded {count} transcription(s)");
                            }
                        } else {
                            info!("Discarding stale response for request #{token}");
                        }
                    });
                }
            }
        }
    });

    // Initial load
    use_effect(move || {
        load_task.send(LoadMessage::LoadAll);
    });

    // One-shot backend liveness probe for the footer status line
    let health_client = client.clone();
    let status_signal = backend_status;
    use_effect(move || {
        let client = health_client.clone();
        let mut status = status_signal;
        spawn(async move {
            match client.health().await {
                Ok(health) => {
                    info!("Backend online (status: {})", health.status);
                    status.set(BackendStatus::Online);
                }
                Err(e) => {
                    error!("{e}");
                    status.set(BackendStatus::Unreachable(e.to_string()));
                }
            }
        });
    });

    let mut query_signal = search_query;
    let handle_search = move |query: String| {
        query_signal.set(query.clone());
        // An empty query never goes over the wire; it means "show everything"
        if query.trim().is_empty() {
            load_task.send(LoadMessage::LoadAll);
        } else {
            load_task.send(LoadMessage::Search(query));
        }
    };

    // Optimistic merge: the upload response is already validated against the
    // record schema, so prepend without a refetch.
    let mut state_for_upload = state;
    let handle_upload_complete = move |uploaded: Vec<Transcription>| {
        info!("Merging {} uploaded transcription(s)", uploaded.len());
        state_for_upload.mutate(|s| s.merge_uploaded(uploaded));
    };

    let error_message = state
        .read()
        .error
        .as_ref()
        .map(|e| e.user_message())
        .unwrap_or_default();

    let status_text = match backend_status.read().clone() {
        BackendStatus::Pending => "Checking backend...",
        BackendStatus::Online => "Backend connected",
        BackendStatus::Unreachable(_) => "Backend unreachable - uploads and search will fail",
    };

    rsx! {
        div { class: "sc-app",
            header { class: "sc-header",
                h1 { class: "sc-title", "Audio Transcription App" }
                p { class: "sc-subtitle", "Upload audio files and get transcriptions" }
            }

            UploadCard { on_upload_complete: handle_upload_complete }

            section { class: "sc-library",
                h2 { class: "sc-library-title", "Transcriptions" }

                SearchBar { on_search: handle_search }

                if !error_message.is_empty() {
                    // Stale list data stays visible under the banner
                    div { class: "sc-error-banner", "Error: {error_message}" }
                }

                if state.read().loading {
                    div { class: "sc-loading", "Loading transcriptions..." }
                } else {
                    TranscriptionList {
                        transcriptions: state.read().transcriptions.clone(),
                        search_query: search_query.read().clone(),
                    }
                }
            }

            footer { class: "sc-footer",
                span { class: "sc-footer-text", "{status_text}" }
            }
        }
    }
}
