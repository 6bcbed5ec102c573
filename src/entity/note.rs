// src/entity/note.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{new_note_id, timestamp_now};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Partial update for a note. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl Note {
    /// A blank note with a fresh id, stamped now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_note_id(),
            title: title.into(),
            content: String::new(),
            updated_at: timestamp_now(),
        }
    }

    /// Merge the provided fields and re-stamp `updated_at`.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = timestamp_now();
    }

    /// Lenient decode of one stored entry.
    ///
    /// Entries that are not objects or lack a string `id` yield `None`.
    /// Missing (or non-string) `title`, `content` and `updatedAt` are
    /// backfilled with `default_title`, an empty body and the current time.
    pub fn from_stored(value: &Value, default_title: &str) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id")?.as_str()?.to_string();

        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            id,
            title: text("title").unwrap_or_else(|| default_title.to_string()),
            content: text("content").unwrap_or_default(),
            updated_at: text("updatedAt").unwrap_or_else(timestamp_now),
        })
    }
}
