use rusqlite::{Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::data::ImageRecord;
use crate::error::MuseumResult;

/// Storage key holding the gallery as a JSON array
pub const GALLERY_KEY: &str = "coupleMuseumImages";

/// Minimal key/value storage, shaped like a browser's local storage
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> MuseumResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> MuseumResult<()>;
}

/// SQLite-backed key/value storage living in the user's data directory.
pub struct SqliteStorage {
    conn: Connection,
    db_path: PathBuf,
}

impl SqliteStorage {
    /// Open (or create) the storage database inside `dir`.
    ///
    /// Default location when no directory is configured:
    /// - Linux: ~/.local/share/memory-museum/memory_museum.db
    /// - macOS: ~/Library/Application Support/memory-museum/memory_museum.db
    /// - Windows: %APPDATA%\memory-museum\memory_museum.db
    pub fn open(dir: &Path) -> MuseumResult<Self> {
        std::fs::create_dir_all(dir)?;
        let db_path = dir.join("memory_museum.db");

        let conn = Connection::open(&db_path)?;
        info!("📁 Storage initialized at: {}", db_path.display());

        let storage = SqliteStorage { conn, db_path };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Directory used when `--data-dir` is not given
    pub fn default_dir() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("memory-museum");
        Some(path)
    }

    fn init_schema(&self) -> MuseumResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS storage (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> MuseumResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> MuseumResult<()> {
        self.conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("db_path", &self.db_path)
            .finish()
    }
}

/// In-memory storage, used in tests and when the database cannot be opened
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> MuseumResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> MuseumResult<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_item(&self, key: &str) -> MuseumResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> MuseumResult<()> {
        (**self).set_item(key, value)
    }
}

/// Repository of memories shown by the carousel
pub trait GalleryStore {
    /// Every stored record, oldest first. Never fails: unreadable data is an empty gallery.
    fn load(&self) -> Vec<ImageRecord>;

    /// Append one record and return the updated sequence. Unlike `load`, stored
    /// data that cannot be read is an error and is left untouched.
    fn append(&self, record: ImageRecord) -> MuseumResult<Vec<ImageRecord>>;
}

/// The gallery persisted as one JSON array under [`GALLERY_KEY`].
///
/// There is no edit or delete and no size bound: embedded images grow the
/// stored value without limit.
#[derive(Debug)]
pub struct Gallery<S> {
    storage: S,
}

impl<S: KeyValueStorage> Gallery<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Strict read: an absent key is an empty gallery, anything unreadable is an error
    fn read_records(&self) -> MuseumResult<Vec<ImageRecord>> {
        match self.storage.get_item(GALLERY_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}

impl<S: KeyValueStorage> GalleryStore for Gallery<S> {
    fn load(&self) -> Vec<ImageRecord> {
        // Anything other than an array of records counts as an empty gallery
        self.read_records().unwrap_or_else(|e| {
            warn!("⚠️  Ignoring unreadable gallery data: {}", e);
            Vec::new()
        })
    }

    fn append(&self, record: ImageRecord) -> MuseumResult<Vec<ImageRecord>> {
        let mut records = self.read_records()?;
        records.push(record);

        let json = serde_json::to_string(&records)?;
        self.storage.set_item(GALLERY_KEY, &json)?;

        debug!("🖼️  Gallery now holds {} memories ({} bytes)", records.len(), json.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MuseumError;

    fn record(id: i64, caption: &str) -> ImageRecord {
        ImageRecord::new(id, "data:image/png;base64,AAAA", "Memory", caption)
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let gallery = Gallery::new(MemoryStorage::default());
        assert!(gallery.load().is_empty());
    }

    #[test]
    fn test_load_swallows_malformed_json() {
        let storage = MemoryStorage::default();
        storage.set_item(GALLERY_KEY, "{not json").unwrap();
        assert!(Gallery::new(storage).load().is_empty());
    }

    #[test]
    fn test_load_rejects_non_array() {
        let storage = MemoryStorage::default();
        storage.set_item(GALLERY_KEY, r#"{"id":1,"src":"a","alt":"b","caption":"c"}"#).unwrap();
        assert!(Gallery::new(storage).load().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let gallery = Gallery::new(MemoryStorage::default());
        gallery.append(record(1, "first")).unwrap();
        let records = gallery.append(record(2, "second")).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].caption, "first");
        assert_eq!(records[1].caption, "second");
        assert_eq!(gallery.load(), records);
    }

    #[test]
    fn test_append_over_corrupt_data_writes_nothing() {
        let storage = MemoryStorage::default();
        storage.set_item(GALLERY_KEY, "[1, 2").unwrap();
        let gallery = Gallery::new(storage);

        let err = gallery.append(record(7, "fresh")).unwrap_err();
        assert!(matches!(err, MuseumError::Json(_)));
        assert_eq!(gallery.storage.get_item(GALLERY_KEY).unwrap().as_deref(), Some("[1, 2"));
    }

    #[test]
    fn test_append_keeps_gallery_with_incomplete_record() {
        let stored = r#"[{"id":1,"src":"a.png","alt":"A","caption":"first"},{"id":2,"src":"b.png","caption":"second"}]"#;
        let storage = MemoryStorage::default();
        storage.set_item(GALLERY_KEY, stored).unwrap();
        let gallery = Gallery::new(storage);

        assert!(gallery.load().is_empty());
        assert!(gallery.append(record(3, "third")).is_err());
        assert_eq!(gallery.storage.get_item(GALLERY_KEY).unwrap().as_deref(), Some(stored));
    }

    #[test]
    fn test_sqlite_storage_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        {
            let gallery = Gallery::new(SqliteStorage::open(dir.path()).unwrap());
            gallery.append(record(1, "kept")).unwrap();
        }

        let storage = SqliteStorage::open(dir.path()).unwrap();
        assert!(storage.path().ends_with("memory_museum.db"));
        let gallery = Gallery::new(storage);
        assert_eq!(gallery.load(), vec![record(1, "kept")]);
    }

    #[test]
    fn test_sqlite_set_item_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::open(dir.path()).unwrap();
        storage.set_item("k", "one").unwrap();
        storage.set_item("k", "two").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("two"));
        assert_eq!(storage.get_item("missing").unwrap(), None);
    }
}
