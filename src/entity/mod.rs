mod note;

pub use note::{Note, NotePatch};

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Default title given to new notes and to stored notes missing one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Generate a fresh note identifier (hyphenated UUID v4).
pub fn new_note_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time as an ISO-8601 UTC string with millisecond precision,
/// e.g. `2026-10-19T08:30:00.123Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_id_is_uuid_v4() {
        let id = new_note_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id, id.to_lowercase());
    }

    #[test]
    fn test_new_note_ids_differ() {
        assert_ne!(new_note_id(), new_note_id());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        // 2026-10-19T08:30:00.123Z
        assert_eq!(ts.len(), 24);
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
