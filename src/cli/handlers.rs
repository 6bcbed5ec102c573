use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::entity::{Note, NotePatch};
use crate::error::{NoteError, Result};
use crate::storage::{KeyValueStore, SqliteStorage};
use crate::store::NoteStore;

const DATA_DIR_ENV: &str = "NOTEKEEPER_DIR";
const DEFAULT_DATA_DIR: &str = ".notekeeper";

/// Pick the data directory: explicit flag, then $NOTEKEEPER_DIR, then ./.notekeeper
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn open_store(data_dir: &Path) -> Result<NoteStore<SqliteStorage>> {
    let config = StoreConfig::load(data_dir)?;
    let storage = SqliteStorage::open(data_dir)?;
    Ok(NoteStore::open(storage, config))
}

/// Find a note by full id, or by an id prefix matching exactly one note
pub fn resolve_id<S: KeyValueStore>(store: &NoteStore<S>, id: &str) -> Result<String> {
    if store.get(id).is_some() {
        return Ok(id.to_string());
    }

    let mut matches = store.notes().iter().filter(|n| n.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(note), None) if !id.is_empty() => Ok(note.id.clone()),
        (Some(_), _) => Err(NoteError::AmbiguousId(id.to_string())),
        (None, _) => Err(NoteError::NoteNotFound(id.to_string())),
    }
}

/// First seven characters of an id, cut on a char boundary
fn short_id(id: &str) -> &str {
    id.char_indices().nth(7).map_or(id, |(i, _)| &id[..i])
}

/// Read content from stdin. Empty input means "no new content".
fn read_stdin_content() -> Result<Option<String>> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(Some(content).filter(|c| !c.is_empty()))
}

fn print_note(note: &Note, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("{} - {}", note.id, note.title);
        println!("Updated: {}", note.updated_at);
        if !note.content.is_empty() {
            println!();
            println!("{}", note.content);
        }
    }
    Ok(())
}

pub fn handle_new(data_dir: &Path, title: Option<String>, stdin: bool, json: bool) -> Result<()> {
    let mut store = open_store(data_dir)?;

    let id = store.create();

    let mut patch = NotePatch {
        title,
        content: None,
    };
    if stdin {
        patch.content = read_stdin_content()?;
    }
    if !patch.is_empty() {
        store.update(&id, patch);
    }

    let note = store
        .get(&id)
        .ok_or_else(|| NoteError::Storage("Failed to retrieve created note".to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("Created note {} - {}", short_id(&note.id), note.title);
    }

    Ok(())
}

pub fn handle_list(data_dir: &Path, json: bool) -> Result<()> {
    let store = open_store(data_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(store.notes())?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No notes yet. Run 'notekeeper new' to create one.");
        return Ok(());
    }

    let selected = store.selected_id();
    for note in store.notes() {
        let marker = if selected == Some(note.id.as_str()) { "*" } else { " " };
        println!(
            "{} {}  {}  {}",
            marker,
            short_id(&note.id),
            note.updated_at,
            note.title
        );
    }

    Ok(())
}

pub fn handle_show(data_dir: &Path, id: String, json: bool) -> Result<()> {
    let store = open_store(data_dir)?;
    let id = resolve_id(&store, &id)?;
    let note = store.get(&id).ok_or_else(|| NoteError::NoteNotFound(id.clone()))?;
    print_note(note, json)
}

pub fn handle_edit(
    data_dir: &Path,
    id: String,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let mut store = open_store(data_dir)?;
    let id = resolve_id(&store, &id)?;

    let mut patch = NotePatch { title, content };
    if stdin {
        patch.content = read_stdin_content()?;
    }

    if patch.is_empty() {
        println!("Nothing to update. Pass --title, --content or --stdin.");
        return Ok(());
    }

    store.update(&id, patch);

    let updated = store
        .get(&id)
        .ok_or_else(|| NoteError::Storage("Failed to retrieve updated note".to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(updated)?);
    } else {
        println!("Updated note {} - {}", short_id(&updated.id), updated.title);
    }

    Ok(())
}

pub fn handle_delete(data_dir: &Path, id: String, force: bool) -> Result<()> {
    let mut store = open_store(data_dir)?;
    let id = resolve_id(&store, &id)?;
    let title = store
        .get(&id)
        .map(|n| n.title.clone())
        .unwrap_or_default();

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete note {} - {}? [y/N] ", short_id(&id), title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(NoteError::Storage(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    store.delete(&id);

    println!("Deleted note {} - {}", short_id(&id), title);

    Ok(())
}

pub fn handle_select(data_dir: &Path, id: Option<String>, clear: bool) -> Result<()> {
    let mut store = open_store(data_dir)?;

    if clear {
        store.select(None);
        println!("Selection cleared.");
        return Ok(());
    }

    let Some(id) = id else {
        return Err(NoteError::Storage("Pass a note id or --clear".to_string()));
    };
    // The store accepts any id; the CLI only selects notes that exist.
    let id = resolve_id(&store, &id)?;
    store.select(Some(&id));

    let title = store.get(&id).map(|n| n.title.as_str()).unwrap_or_default();
    println!("Selected note {} - {}", short_id(&id), title);

    Ok(())
}

pub fn handle_current(data_dir: &Path, json: bool) -> Result<()> {
    let store = open_store(data_dir)?;

    match store.selected() {
        Some(note) => print_note(note, json),
        None if json => {
            println!("null");
            Ok(())
        }
        None => {
            println!("No note selected.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store_with_ids(ids: &[&str]) -> NoteStore<MemoryStorage> {
        let notes: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| serde_json::json!({ "id": id }))
            .collect();
        let mut storage = MemoryStorage::new();
        storage
            .set_item("notes-app:v1", &serde_json::to_string(&notes).unwrap())
            .unwrap();
        NoteStore::with_defaults(storage)
    }

    #[test]
    fn test_resolve_full_id() {
        let store = store_with_ids(&["abc", "abcd"]);
        assert_eq!(resolve_id(&store, "abc").unwrap(), "abc");
    }

    #[test]
    fn test_resolve_unique_prefix() {
        let store = store_with_ids(&["abc123", "def456"]);
        assert_eq!(resolve_id(&store, "de").unwrap(), "def456");
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let store = store_with_ids(&["abc123", "abd456"]);
        let result = resolve_id(&store, "ab");
        assert!(matches!(result, Err(NoteError::AmbiguousId(_))));
    }

    #[test]
    fn test_resolve_unknown_id() {
        let store = store_with_ids(&["abc123"]);
        let result = resolve_id(&store, "zzz");
        assert!(matches!(result, Err(NoteError::NoteNotFound(_))));
    }

    #[test]
    fn test_resolve_empty_prefix_with_single_note_is_ambiguous() {
        let store = store_with_ids(&["abc123"]);
        assert!(resolve_id(&store, "").is_err());
    }

    #[test]
    fn test_resolve_data_dir_prefers_flag() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/notes")));
        assert_eq!(dir, PathBuf::from("/tmp/notes"));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789"), "0123456");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_short_id_non_ascii() {
        // 'é' spans bytes 6..8
        assert_eq!(short_id("abcdefé-1"), "abcdefé");
        assert_eq!(short_id("ééééééééé"), "ééééééé");
        assert_eq!(short_id("日本"), "日本");
    }

    #[test]
    fn test_list_with_non_ascii_id() {
        let tmp = tempfile::TempDir::new().unwrap();
        {
            let mut storage = SqliteStorage::open(tmp.path()).unwrap();
            storage
                .set_item("notes-app:v1", r#"[{"id":"abcdefé-1","title":"x"}]"#)
                .unwrap();
        }

        assert!(handle_list(tmp.path(), false).is_ok());
        assert!(handle_show(tmp.path(), "abcdefé".to_string(), false).is_ok());
    }
}
