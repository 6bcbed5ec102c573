pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use entity::{Note, NotePatch};
pub use error::{NoteError, Result};
pub use storage::{KeyValueStore, MemoryStorage, SqliteStorage};
pub use store::NoteStore;
