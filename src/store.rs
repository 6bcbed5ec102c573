//! The note store: an ordered collection of notes plus a selection pointer,
//! written through to a [`KeyValueStore`] after every mutation.
//!
//! Order is most-recently-touched first. `create` and `update` splice the
//! note to the front, so the persisted array order is the display order
//! read back at the next startup.

use std::collections::HashSet;

use serde_json::Value;

use crate::config::StoreConfig;
use crate::entity::{new_note_id, Note, NotePatch};
use crate::error::{NoteError, Result};
use crate::storage::KeyValueStore;

/// Ordered notes plus the current selection, mirrored to `S`
pub struct NoteStore<S: KeyValueStore> {
    notes: Vec<Note>,
    selected_id: Option<String>,
    backend: S,
    config: StoreConfig,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Hydrate a store from `backend`.
    ///
    /// Missing, unreadable or corrupt data never fails: the store starts
    /// empty (or unselected) instead. Nothing is written back here.
    pub fn open(backend: S, config: StoreConfig) -> Self {
        let notes = load_notes(&backend, &config);
        let selected_id = load_selected(&backend, &config);

        tracing::debug!(
            notes = notes.len(),
            selected = selected_id.as_deref().unwrap_or("-"),
            "hydrated note store"
        );

        Self {
            notes,
            selected_id,
            backend,
            config,
        }
    }

    /// Hydrate with the default configuration
    pub fn with_defaults(backend: S) -> Self {
        Self::open(backend, StoreConfig::default())
    }

    /// Current notes, most recently touched first
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Currently selected id. May name a note that does not exist if it was
    /// set through [`select`](Self::select).
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The selected note, if the selection points at one
    pub fn selected(&self) -> Option<&Note> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    /// Number of notes held
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the store holds no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Configuration the store was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Borrow the storage backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Consume the store and return its storage backend
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Snapshot copy of the collection; changing it does not touch the store
    pub fn list(&self) -> Vec<Note> {
        self.notes.clone()
    }

    /// Find a note by exact id
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Create a blank note at the front of the collection and select it.
    pub fn create(&mut self) -> String {
        let mut note = Note::new(self.config.default_title.clone());
        while self.get(&note.id).is_some() {
            note.id = new_note_id();
        }

        let id = note.id.clone();
        self.notes.insert(0, note);
        self.selected_id = Some(id.clone());

        self.persist_notes();
        self.persist_selected();

        tracing::debug!(id = %id, "created note");
        id
    }

    /// Merge `patch` into the note, re-stamp it and move it to the front.
    /// Unknown ids are ignored.
    pub fn update(&mut self, id: &str, patch: NotePatch) {
        let Some(idx) = self.notes.iter().position(|n| n.id == id) else {
            tracing::debug!(id, "update ignored, note not found");
            return;
        };

        let mut note = self.notes.remove(idx);
        note.apply(patch);
        self.notes.insert(0, note);

        self.persist_notes();
    }

    /// Remove the note and clear the selection if it pointed at it.
    pub fn delete(&mut self, id: &str) {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() != before {
            tracing::debug!(id, "deleted note");
        }
        self.persist_notes();

        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
            self.persist_selected();
        }
    }

    /// Set the selection as given. The id is not checked against the
    /// collection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected_id = id.map(str::to_string);
        self.persist_selected();
    }

    fn persist_notes(&mut self) {
        if let Err(e) = self.write_notes() {
            tracing::warn!(error = %e, key = %self.config.notes_key, "failed to persist notes");
        }
    }

    fn write_notes(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.notes)?;
        self.backend.set_item(&self.config.notes_key, &json)
    }

    fn persist_selected(&mut self) {
        let key = &self.config.selected_key;
        // An empty id is stored as an absent key, same as no selection
        let result = match self.selected_id.as_deref() {
            Some(id) if !id.is_empty() => self.backend.set_item(key, id),
            _ => self.backend.remove_item(key),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, key = %key, "failed to persist selection");
        }
    }
}

fn load_notes<S: KeyValueStore>(backend: &S, config: &StoreConfig) -> Vec<Note> {
    let raw = match backend.get_item(&config.notes_key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "notes unreadable, starting empty");
            return Vec::new();
        }
    };

    let entries: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %NoteError::from(e), "stored notes are corrupt, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut notes = Vec::with_capacity(entries.len());
    for entry in &entries {
        match Note::from_stored(entry, &config.default_title) {
            Some(note) if seen.insert(note.id.clone()) => notes.push(note),
            Some(note) => tracing::debug!(id = %note.id, "dropping duplicate stored note"),
            None => tracing::debug!("dropping stored entry without an id"),
        }
    }
    notes
}

fn load_selected<S: KeyValueStore>(backend: &S, config: &StoreConfig) -> Option<String> {
    match backend.get_item(&config.selected_key) {
        Ok(id) => id.filter(|id| !id.is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "selection unreadable");
            None
        }
    }
}
