//! HTTP client for the transcription backend.
//!
//! This module wraps reqwest to provide thin call wrappers over the backend
//! endpoints. reqwest works on both native and WASM platforms:
//! - Native: uses hyper with rustls-tls, pooled connections, 30 second timeout
//! - WASM: uses the browser fetch() API internally
//!
//! Failures are normalized into [`ApiError`] variants that keep the original
//! transport or server detail; presentation decides how much of it to show.

mod types;

pub use types::{normalize_upload_response, Health, Transcription, UploadFile};

use dioxus::logger::tracing::warn;
use futures_channel::mpsc::UnboundedSender;
use url::Url;

use crate::error::ApiError;

/// Fallback backend address when no override is configured.
///
/// The reference backend listens on port 8000 and serves the API under
/// `/api` behind the dev proxy.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Chunk size for streamed upload bodies; each chunk sent advances the
/// progress callback, so this bounds progress granularity.
#[cfg(not(target_arch = "wasm32"))]
const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// Budget for list/search/health round trips on the pooled client.
#[cfg(not(target_arch = "wasm32"))]
const FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Uploads get their own budget: transfer time scales with file size, and a
/// multi-file audio upload on a slow link can legitimately outlast
/// [`FETCH_TIMEOUT`].
#[cfg(not(target_arch = "wasm32"))]
const UPLOAD_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10 * 60);

/// Global HTTP client for connection pooling.
///
/// reqwest::Client pools connections internally, so sharing one client
/// across requests avoids a handshake per call. The WASM client is a cheap
/// handle over fetch() and is constructed per `ApiClient` instead.
#[cfg(not(target_arch = "wasm32"))]
static HTTP_CLIENT: once_cell::sync::Lazy<reqwest::Client> = once_cell::sync::Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("Scribe/", env!("CARGO_PKG_VERSION")))
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
});

#[cfg(not(target_arch = "wasm32"))]
fn shared_client() -> reqwest::Client {
    HTTP_CLIENT.clone()
}

#[cfg(target_arch = "wasm32")]
fn shared_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Backend address resolution.
///
/// Native builds read `SCRIBE_API_URL`, falling back to [`DEFAULT_API_URL`];
/// web builds talk to the window origin, matching the dev-proxy layout where
/// the client and the API share a host.
#[cfg(not(target_arch = "wasm32"))]
fn default_base() -> Url {
    let raw = std::env::var("SCRIBE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    Url::parse(&raw).unwrap_or_else(|e| {
        warn!("Ignoring invalid SCRIBE_API_URL '{}': {}", raw, e);
        Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
    })
}

#[cfg(target_arch = "wasm32")]
fn default_base() -> Url {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    Url::parse(&format!("{}/api", origin)).unwrap_or_else(|e| {
        warn!("Ignoring unusable window origin '{}': {}", origin, e);
        Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
    })
}

/// Client for the transcription backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApiClient {
    /// Client pointed at the platform-default backend address.
    pub fn from_env() -> Self {
        Self::with_base(default_base())
    }

    /// Client pointed at an explicit base URL (e.g. `http://host:8000/api`).
    pub fn with_base(base: Url) -> Self {
        Self {
            http: shared_client(),
            base,
        }
    }

    /// Fetch every transcription, newest first (ordering is server-defined).
    pub async fn list(&self) -> Result<Vec<Transcription>, ApiError> {
        let url = self.endpoint("transcriptions");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::Fetch(e.to_string()))?;
        response
            .json::<Vec<Transcription>>()
            .await
            .map_err(|e| ApiError::Fetch(e.to_string()))
    }

    /// Fetch transcriptions matching `query` (matching is server-defined).
    ///
    /// Never called with an empty query; callers substitute [`Self::list`]
    /// for the "show everything" case, since the backend rejects an empty
    /// query parameter.
    pub async fn search(&self, query: &str) -> Result<Vec<Transcription>, ApiError> {
        let url = self.search_url(query);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Search(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::Search(e.to_string()))?;
        response
            .json::<Vec<Transcription>>()
            .await
            .map_err(|e| ApiError::Search(e.to_string()))
    }

    /// Probe backend liveness (`GET /health`, beside the `/api` prefix).
    pub async fn health(&self) -> Result<Health, ApiError> {
        let url = self.health_url();
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Health(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::Health(e.to_string()))?;
        response
            .json::<Health>()
            .await
            .map_err(|e| ApiError::Health(e.to_string()))
    }

    /// Upload audio files for transcription.
    ///
    /// Files go up as one multipart request with the `files` field repeated
    /// per file. Progress percentages (0-100) are pushed into `progress` as
    /// the body is sent; on web, fetch() cannot observe upload progress, so
    /// a single 100 is reported on completion. The response is validated
    /// against the record schema before being returned, so callers can merge
    /// it straight into the displayed list.
    ///
    /// An empty `files` set is rejected locally without touching the network.
    pub async fn upload_files(
        &self,
        files: Vec<UploadFile>,
        progress: Option<UnboundedSender<u8>>,
    ) -> Result<Vec<Transcription>, ApiError> {
        if files.is_empty() {
            return Err(ApiError::NoFilesSelected);
        }

        let url = self.endpoint("transcribe");
        let form = build_multipart(files, progress.clone())?;

        let request = self.http.post(url).multipart(form);
        // Override the pooled client's timeout: it is sized for list/search
        // round trips, not for streaming a large body. (The wasm builder has
        // no timeout method; the browser governs fetch() lifetimes there.)
        #[cfg(not(target_arch = "wasm32"))]
        let request = request.timeout(UPLOAD_TIMEOUT);

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        let payload = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        // fetch() reports nothing while the body is in flight; the request
        // completing is the first observable progress on web.
        #[cfg(target_arch = "wasm32")]
        if let Some(tx) = &progress {
            let _ = tx.unbounded_send(100);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = progress;

        normalize_upload_response(payload)
    }

    /// `<base>/<segment>`, tolerating a trailing slash on the base.
    fn endpoint(&self, segment: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url
    }

    /// `<base>/search?query=<form-encoded query>`.
    fn search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint("search");
        url.query_pairs_mut().append_pair("query", query);
        url
    }

    /// `/health` lives at the server root, not under the `/api` prefix.
    fn health_url(&self) -> Url {
        let mut url = self.base.clone();
        url.set_path("/health");
        url.set_query(None);
        url
    }
}

/// Native upload machinery: each file part is a counting byte stream so
/// progress tracks bytes actually handed to the transport, aggregated
/// across all files in the request.
#[cfg(not(target_arch = "wasm32"))]
mod native_upload {
    use super::{ApiError, UploadFile, UPLOAD_CHUNK_BYTES};
    use bytes::Bytes;
    use futures_channel::mpsc::UnboundedSender;
    use futures_util::{Stream, StreamExt};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    /// Yields `bytes` in fixed-size chunks, pushing the cumulative percent
    /// of `total` into `progress` as each chunk is polled. `sent` is shared
    /// between the per-file streams of one request.
    pub(super) fn counting_stream(
        bytes: Vec<u8>,
        sent: Arc<AtomicU64>,
        total: u64,
        progress: Option<UnboundedSender<u8>>,
    ) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
        let chunks: Vec<Bytes> = bytes
            .chunks(UPLOAD_CHUNK_BYTES)
            .map(Bytes::copy_from_slice)
            .collect();
        futures_util::stream::iter(chunks).map(move |chunk| {
            let done = sent.fetch_add(chunk.len() as u64, Ordering::Relaxed) + chunk.len() as u64;
            if let Some(tx) = &progress {
                let pct = (done.min(total) * 100 / total) as u8;
                let _ = tx.unbounded_send(pct);
            }
            Ok(chunk)
        })
    }

    pub(super) fn build_form(
        files: Vec<UploadFile>,
        progress: Option<UnboundedSender<u8>>,
    ) -> Result<reqwest::multipart::Form, ApiError> {
        let total: u64 = files.iter().map(|f| f.bytes.len() as u64).sum();
        let total = total.max(1);
        let sent = Arc::new(AtomicU64::new(0));

        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let len = file.bytes.len() as u64;
            let counted =
                counting_stream(file.bytes, Arc::clone(&sent), total, progress.clone());
            let part = reqwest::multipart::Part::stream_with_length(
                reqwest::Body::wrap_stream(counted),
                len,
            )
            .file_name(file.name)
            .mime_str(file.content_type)
            .map_err(|e| ApiError::Upload(e.to_string()))?;
            form = form.part("files", part);
        }
        Ok(form)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_multipart(
    files: Vec<UploadFile>,
    progress: Option<UnboundedSender<u8>>,
) -> Result<reqwest::multipart::Form, ApiError> {
    native_upload::build_form(files, progress)
}

/// Web: fetch() takes the whole body up front, so parts are plain byte
/// buffers and progress is reported once on completion by the caller.
#[cfg(target_arch = "wasm32")]
fn build_multipart(
    files: Vec<UploadFile>,
    _progress: Option<UnboundedSender<u8>>,
) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for file in files {
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(file.content_type)
            .map_err(|e| ApiError::Upload(e.to_string()))?;
        form = form.part("files", part);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    fn client() -> ApiClient {
        ApiClient::with_base(Url::parse("http://localhost:8000/api").expect("valid base"))
    }

    #[test]
    fn default_api_url_parses() {
        assert!(Url::parse(DEFAULT_API_URL).is_ok());
    }

    #[test]
    fn endpoint_joins_under_base() {
        assert_eq!(
            client().endpoint("transcriptions").as_str(),
            "http://localhost:8000/api/transcriptions"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client =
            ApiClient::with_base(Url::parse("http://localhost:8000/api/").expect("valid base"));
        assert_eq!(
            client.endpoint("transcriptions").as_str(),
            "http://localhost:8000/api/transcriptions"
        );
    }

    #[test]
    fn search_url_encodes_query() {
        assert_eq!(
            client().search_url("hello world").as_str(),
            "http://localhost:8000/api/search?query=hello+world"
        );
        assert_eq!(
            client().search_url("caffè & crème").as_str(),
            "http://localhost:8000/api/search?query=caff%C3%A8+%26+cr%C3%A8me"
        );
    }

    #[test]
    fn health_url_sits_beside_api_prefix() {
        assert_eq!(
            client().health_url().as_str(),
            "http://localhost:8000/health"
        );
    }

    #[test]
    fn upload_timeout_outlives_fetch_timeout() {
        // Uploads stream arbitrarily large bodies; clamping them to the
        // fetch budget would abort big files on slow links mid-transfer.
        assert!(UPLOAD_TIMEOUT > FETCH_TIMEOUT);
    }

    #[tokio::test]
    async fn upload_with_no_files_is_rejected_locally() {
        // Port 9 (discard) is never listening; a network attempt would fail
        // with a different error than the local validation rejection.
        let client = ApiClient::with_base(Url::parse("http://127.0.0.1:9/api").expect("valid"));
        let result = client.upload_files(Vec::new(), None).await;
        assert_eq!(result, Err(ApiError::NoFilesSelected));
    }

    #[tokio::test]
    async fn upload_progress_reaches_one_hundred() {
        use std::sync::atomic::AtomicU64;
        use std::sync::Arc;

        // Drain the per-file counting streams the way reqwest polls the
        // part bodies: progress must rise monotonically and end at 100.
        let first = vec![0u8; 150 * 1024];
        let second = vec![0u8; 50 * 1024];
        let total = (first.len() + second.len()) as u64;
        let sent = Arc::new(AtomicU64::new(0));
        let (tx, rx) = futures_channel::mpsc::unbounded::<u8>();

        for bytes in [first, second] {
            let stream =
                native_upload::counting_stream(bytes, Arc::clone(&sent), total, Some(tx.clone()));
            let chunks: Vec<_> = stream.collect().await;
            assert!(chunks.iter().all(|c| c.is_ok()));
        }
        drop(tx);

        let reported: Vec<u8> = rx.collect().await;
        assert!(!reported.is_empty());
        assert!(reported.windows(2).all(|w| w[0] <= w[1]), "monotonic");
        assert_eq!(*reported.last().expect("at least one report"), 100);
    }
}
