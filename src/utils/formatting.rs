//! Display formatting for transcription metadata.

use chrono::{DateTime, NaiveDateTime};

/// Render a backend `created_at` string for display.
///
/// The backend emits ISO 8601, but not consistently: records created by the
/// reference implementation carry naive local timestamps
/// (`2023-06-15T09:30:00`), while other deployments append an offset or `Z`.
/// Both parse; anything else passes through verbatim rather than erroring,
/// since a timestamp is never worth failing a render over.
pub fn format_created_at(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY_FORMAT).to_string();
    }
    raw.to_string()
}

const DISPLAY_FORMAT: &str = "%b %-d, %Y %H:%M";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_timestamps() {
        assert_eq!(format_created_at("2023-01-01T00:00:00Z"), "Jan 1, 2023 00:00");
        assert_eq!(
            format_created_at("2024-11-30T18:45:10+00:00"),
            "Nov 30, 2024 18:45"
        );
    }

    #[test]
    fn formats_naive_backend_timestamps() {
        assert_eq!(
            format_created_at("2023-06-15T09:30:00"),
            "Jun 15, 2023 09:30"
        );
        assert_eq!(
            format_created_at("2023-06-15T09:30:00.123456"),
            "Jun 15, 2023 09:30"
        );
    }

    #[test]
    fn unparseable_input_passes_through() {
        assert_eq!(format_created_at("yesterday-ish"), "yesterday-ish");
        assert_eq!(format_created_at(""), "");
    }
}
