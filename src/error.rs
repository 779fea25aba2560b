//! Error types for the Scribe client.

use thiserror::Error;

/// Errors surfaced by the transcription API layer.
///
/// Each variant keeps the underlying transport or decoding detail so logs
/// stay diagnostic. The UI never renders `Display` directly; it calls
/// [`ApiError::user_message`], which reduces the error to the short string
/// shown to the user while the full detail goes to the log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Listing transcriptions failed
    #[error("fetching transcriptions failed: {0}")]
    Fetch(String),
    /// The search request failed
    #[error("searching transcriptions failed: {0}")]
    Search(String),
    /// The upload request failed in transport or on the server
    #[error("uploading files failed: {0}")]
    Upload(String),
    /// The upload response did not match the transcription record schema
    #[error("unexpected upload response: {0}")]
    BadResponse(String),
    /// Submit was attempted with an empty file selection
    #[error("no files selected for upload")]
    NoFilesSelected,
    /// The backend health probe failed
    #[error("health check failed: {0}")]
    Health(String),
}

impl ApiError {
    /// The short, fixed message rendered in the UI for this error.
    ///
    /// Fetch and search intentionally collapse to a fixed string; upload is
    /// the only path that carries its detail through to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Fetch(_) => "Failed to fetch transcriptions".to_string(),
            ApiError::Search(_) => "Failed to search transcriptions".to_string(),
            ApiError::Upload(detail) => format!("Failed to upload files: {}", detail),
            ApiError::BadResponse(detail) => format!("Failed to upload files: {}", detail),
            ApiError::NoFilesSelected => "Please select at least one file".to_string(),
            ApiError::Health(_) => "Backend unreachable".to_string(),
        }
    }
}
