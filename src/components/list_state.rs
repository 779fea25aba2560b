//! Root view state for the transcription list.
//!
//! Kept free of any Dioxus runtime dependency so the request-ordering rules
//! are testable: the root component holds a `Signal<ListState>` and drives
//! these methods through it, but the decisions live here.

use crate::api::Transcription;
use crate::error::ApiError;

/// List view state plus the bookkeeping for in-flight fetches.
///
/// Every list/search request is tagged with a token from a monotonic
/// counter. A response may only be applied while its token is still the
/// latest issued one; re-issuing (a newer search, or a reset to the full
/// list) invalidates every response still in flight. This makes the most
/// recently issued query win regardless of response arrival order.
#[derive(Clone, PartialEq)]
pub(crate) struct ListState {
    pub(crate) transcriptions: Vec<Transcription>,
    pub(crate) loading: bool,
    pub(crate) error: Option<ApiError>,
    latest_token: u64,
}

impl ListState {
    pub(crate) fn new() -> Self {
        Self {
            transcriptions: Vec::new(),
            loading: true,
            error: None,
            latest_token: 0,
        }
    }

    /// Start a new request: bump the token and enter the loading state.
    /// The returned token must be handed back to [`Self::settle`].
    pub(crate) fn issue(&mut self) -> u64 {
        self.latest_token += 1;
        self.loading = true;
        self.latest_token
    }

    /// Apply a finished request, unless it has been superseded.
    ///
    /// Returns `false` (and changes nothing, not even `loading`) when
    /// `token` is no longer the latest issued one. Otherwise the result is
    /// applied: a success replaces the list and clears any previous error, a
    /// failure keeps the last good list visible under the error; either way
    /// loading ends.
    pub(crate) fn settle(
        &mut self,
        token: u64,
        result: Result<Vec<Transcription>, ApiError>,
    ) -> bool {
        if token != self.latest_token {
            return false;
        }
        match result {
            Ok(records) => {
                self.transcriptions = records;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e);
            }
        }
        self.loading = false;
        true
    }

    /// Prepend freshly uploaded records. Loading and error are untouched;
    /// an upload completing never disturbs the list view state.
    pub(crate) fn merge_uploaded(&mut self, uploaded: Vec<Transcription>) {
        self.transcriptions.splice(0..0, uploaded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> Transcription {
        Transcription {
            id,
            filename: format!("take-{id}.mp3"),
            unique_filename: None,
            text: format!("transcript {id}"),
            created_at: "2023-06-15T09:30:00".to_string(),
        }
    }

    #[test]
    fn latest_issued_request_wins_out_of_order() {
        let mut state = ListState::new();

        // A slow full-list fetch, then the user searches before it lands
        let list_token = state.issue();
        let search_token = state.issue();

        assert!(state.settle(search_token, Ok(vec![record(2)])));
        assert!(!state.loading);
        assert_eq!(state.transcriptions, vec![record(2)]);

        // The stale list response arrives late and must change nothing
        assert!(!state.settle(list_token, Ok(vec![record(1), record(3)])));
        assert_eq!(state.transcriptions, vec![record(2)]);
        assert!(!state.loading);
    }

    #[test]
    fn stale_settle_leaves_loading_on_while_latest_is_in_flight() {
        let mut state = ListState::new();
        let first = state.issue();
        let second = state.issue();

        // The superseded response lands first; the view must keep showing
        // the loading state until the current request settles.
        assert!(!state.settle(first, Ok(vec![record(1)])));
        assert!(state.loading);

        assert!(state.settle(second, Ok(Vec::new())));
        assert!(!state.loading);
    }

    #[test]
    fn stale_failure_does_not_raise_an_error() {
        let mut state = ListState::new();
        let first = state.issue();
        let second = state.issue();

        assert!(!state.settle(first, Err(ApiError::Fetch("timed out".to_string()))));
        assert_eq!(state.error, None);

        assert!(state.settle(second, Ok(vec![record(4)])));
        assert_eq!(state.error, None);
        assert_eq!(state.transcriptions, vec![record(4)]);
    }

    #[test]
    fn failure_keeps_last_good_list_and_success_clears_error() {
        let mut state = ListState::new();
        let token = state.issue();
        assert!(state.settle(token, Ok(vec![record(1)])));

        let token = state.issue();
        assert!(state.settle(token, Err(ApiError::Search("502".to_string()))));
        assert_eq!(state.transcriptions, vec![record(1)], "stale data stays visible");
        assert!(state.error.is_some());
        assert!(!state.loading);

        let token = state.issue();
        assert!(state.settle(token, Ok(vec![record(2)])));
        assert_eq!(state.error, None);
    }

    #[test]
    fn merge_uploaded_prepends_without_touching_view_state() {
        let mut state = ListState::new();
        let token = state.issue();
        assert!(state.settle(token, Ok(vec![record(1)])));

        state.merge_uploaded(vec![record(7), record(8)]);
        assert_eq!(state.transcriptions, vec![record(7), record(8), record(1)]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }
}
