//! Extension trait for Dioxus signals.
//!
//! Signal mutation otherwise needs a three-step read-clone/modify/write-back
//! dance at every call site:
//!
//! ```ignore
//! let mut records = signal.read().clone();
//! records.insert(0, record);
//! signal.set(records);
//! ```
//!
//! `SignalExt::mutate` folds that into one call.

use dioxus::prelude::*;

/// Mutation helper for `Signal<T>`.
pub trait SignalExt<T: Clone + 'static> {
    /// Mutate the signal's value in place: read-clone, apply `f`, write back.
    /// Returns whatever `f` returns, so state methods with results can be
    /// driven through the signal in one call.
    ///
    /// ```ignore
    /// let token = state.mutate(|s| s.issue());
    /// ```
    fn mutate<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

impl<T: Clone + 'static> SignalExt<T> for Signal<T> {
    fn mutate<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut value = self.read().clone();
        let out = f(&mut value);
        self.set(value);
        out
    }
}

// Tests are omitted: mutate is a thin wrapper over Signal::read/set, which
// need a live Dioxus runtime and are covered by dioxus itself.
