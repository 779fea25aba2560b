use dioxus::prelude::*;

/// Search input with submit and explicit clear.
///
/// Submitting a non-empty, trimmed query invokes `on_search` with it; the
/// Clear button resets the input and invokes `on_search` with an empty
/// string, which the parent treats as "show the unfiltered list". No
/// debouncing and no minimum length.
#[component]
pub fn SearchBar(on_search: EventHandler<String>) -> Element {
    let mut query = use_signal(String::new);

    let handle_submit = move |_| {
        let current = query.read().clone();
        if !current.trim().is_empty() {
            on_search.call(current);
        }
    };

    let handle_keypress = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter {
            let current = query.read().clone();
            if !current.trim().is_empty() {
                on_search.call(current);
            }
        }
    };

    let handle_clear = move |_| {
        query.set(String::new());
        on_search.call(String::new());
    };

    rsx! {
        div { class: "sc-search-row",
            input {
                class: "sc-search-input",
                r#type: "text",
                placeholder: "Search transcriptions...",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
                onkeypress: handle_keypress,
            }
            button {
                class: "sc-btn sc-btn--primary",
                onclick: handle_submit,
                "Search"
            }
            if !query.read().is_empty() {
                button {
                    class: "sc-btn sc-btn--ghost",
                    onclick: handle_clear,
                    "Clear"
                }
            }
        }
    }
}
