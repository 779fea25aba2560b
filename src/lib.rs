//! Scribe - single-page client for an audio-transcription service.
//!
//! Users upload audio files, an external backend transcribes them, and this
//! client lists and searches the resulting transcriptions. The backend is an
//! opaque collaborator reached through three HTTP endpoints
//! (`/api/transcriptions`, `/api/search`, `/api/transcribe`); everything in
//! this crate is presentation-layer.
//!
//! # Architecture
//!
//! - **API client**: thin `reqwest` wrappers over the backend endpoints,
//!   with upload-progress reporting and structured errors
//! - **Components**: Dioxus UI with one-way data flow - the root component
//!   owns the transcription list, children receive data and callbacks
//!
//! # Platform Support
//!
//! - **Web (WASM)**: runs in the browser against the same-origin backend
//! - **Desktop**: macOS/Windows/Linux, backend address taken from
//!   `SCRIBE_API_URL` (default `http://127.0.0.1:8000/api`)

// Enforce memory safety: forbid all unsafe code
#![forbid(unsafe_code)]

pub mod api;
pub mod components;
pub mod error;
pub mod utils;
