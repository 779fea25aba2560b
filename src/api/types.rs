//! Wire types for the transcription backend.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A transcription record as returned by the backend.
///
/// Created server-side when an upload finishes transcribing; the client only
/// displays records, never mutates them. `created_at` is the backend's
/// ISO 8601 string, kept verbatim on the wire (the backend emits naive local
/// timestamps without an offset, so eager `DateTime` parsing would reject
/// real payloads; display parsing is lenient instead).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub id: u64,
    pub filename: String,
    /// Server-side storage name; present in backend payloads, never displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_filename: Option<String>,
    pub text: String,
    pub created_at: String,
}

/// Response of the backend health probe.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
}

/// An audio file read into memory by the upload form, ready for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Build an upload file, inferring the MIME type from the extension.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name);
        Self {
            name,
            content_type,
            bytes,
        }
    }
}

/// MIME type for an audio filename, by extension.
fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}

/// Validate the upload response against the transcription record schema.
///
/// The backend returns a JSON array of the newly created records, but that
/// contract is implementation-defined, so the response is normalized instead
/// of assumed: a single record object is accepted and wrapped, anything else
/// is rejected before it can be merged into the displayed list.
pub fn normalize_upload_response(value: serde_json::Value) -> Result<Vec<Transcription>, ApiError> {
    match value {
        serde_json::Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| ApiError::BadResponse(e.to_string()))
        }
        serde_json::Value::Object(_) => serde_json::from_value::<Transcription>(value)
            .map(|record| vec![record])
            .map_err(|e| ApiError::BadResponse(e.to_string())),
        other => Err(ApiError::BadResponse(format!(
            "expected a record or an array of records, got: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transcription_parses_backend_payload() {
        let record: Transcription = serde_json::from_value(json!({
            "id": 1,
            "filename": "recording.mp3",
            "unique_filename": "3f2b9c1e-recording.mp3",
            "text": "This is a test transcription",
            "created_at": "2023-01-01T00:00:00Z"
        }))
        .expect("backend payload should parse");

        assert_eq!(record.id, 1);
        assert_eq!(record.filename, "recording.mp3");
        assert_eq!(record.text, "This is a test transcription");
        assert_eq!(record.created_at, "2023-01-01T00:00:00Z");
    }

    #[test]
    fn transcription_tolerates_missing_unique_filename() {
        let record: Transcription = serde_json::from_value(json!({
            "id": 2,
            "filename": "memo.wav",
            "text": "quarterly numbers",
            "created_at": "2023-06-15T09:30:00"
        }))
        .expect("unique_filename is optional");
        assert_eq!(record.unique_filename, None);
    }

    #[test]
    fn normalize_accepts_array_of_records() {
        let records = normalize_upload_response(json!([
            { "id": 3, "filename": "a.mp3", "text": "one", "created_at": "2023-01-01T00:00:00" },
            { "id": 4, "filename": "b.mp3", "text": "two", "created_at": "2023-01-02T00:00:00" }
        ]))
        .expect("array response should normalize");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].filename, "b.mp3");
    }

    #[test]
    fn normalize_wraps_single_record() {
        let records = normalize_upload_response(json!({
            "id": 5, "filename": "solo.mp3", "text": "just one", "created_at": "2023-01-03T00:00:00"
        }))
        .expect("single record should normalize");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 5);
    }

    #[test]
    fn normalize_rejects_non_record_shapes() {
        assert!(matches!(
            normalize_upload_response(json!("transcribed!")),
            Err(ApiError::BadResponse(_))
        ));
        assert!(matches!(
            normalize_upload_response(json!([{ "unexpected": true }])),
            Err(ApiError::BadResponse(_))
        ));
    }

    #[test]
    fn upload_file_infers_audio_mime_types() {
        assert_eq!(UploadFile::new("take1.MP3", vec![]).content_type, "audio/mpeg");
        assert_eq!(UploadFile::new("memo.wav", vec![]).content_type, "audio/wav");
        assert_eq!(UploadFile::new("call.m4a", vec![]).content_type, "audio/mp4");
        assert_eq!(
            UploadFile::new("mystery", vec![]).content_type,
            "application/octet-stream"
        );
    }
}
