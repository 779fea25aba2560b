//! Utility modules shared across the UI.

pub mod formatting;
pub mod signal_ext;

// Re-export commonly used items
pub use formatting::format_created_at;
pub use signal_ext::SignalExt;
