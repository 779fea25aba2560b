use dioxus::prelude::*;

use crate::api::Transcription;
use crate::utils::format_created_at;

/// Pick the empty-state message: "no matches" while a search is active,
/// otherwise the getting-started hint.
pub(crate) fn empty_state_message(search_query: &str) -> String {
    if search_query.is_empty() {
        "No transcriptions available. Upload an audio file to get started.".to_string()
    } else {
        format!("No transcriptions found matching \"{}\"", search_query)
    }
}

/// Pure rendering of the transcription records, in the order received.
#[component]
pub fn TranscriptionList(transcriptions: Vec<Transcription>, search_query: String) -> Element {
    if transcriptions.is_empty() {
        let message = empty_state_message(&search_query);
        return rsx! {
            div { class: "sc-list-empty", "{message}" }
        };
    }

    rsx! {
        div { class: "sc-list",
            for record in transcriptions.iter() {
                TranscriptionItem { key: "{record.id}", record: record.clone() }
            }
        }
    }
}

#[component]
fn TranscriptionItem(record: Transcription) -> Element {
    let created = format_created_at(&record.created_at);

    rsx! {
        article { class: "sc-list-item",
            h3 { class: "sc-item-title", "{record.filename}" }
            p { class: "sc-item-text", "{record.text}" }
            div { class: "sc-item-date", "{created}" }
        }
    }
}
