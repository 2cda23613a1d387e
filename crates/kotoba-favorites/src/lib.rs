//! SQLite store for saved words.
//!
//! One `favorites` table, unique on `(word, definition)`. A duplicate insert
//! is a no-op reported as [`InsertOutcome::Duplicate`].

use std::path::Path;

use kotoba_core::favorites::FavoriteRecord;
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FavoritesResult<T> = Result<T, FavoritesError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Added,
    /// Already saved, nothing written
    Duplicate,
}

pub struct FavoritesStore {
    conn: Mutex<Connection>,
}

impl FavoritesStore {
    /// Open or create the store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> FavoritesResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            ",
        )?;
        tracing::info!("Opened favorites store at {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> FavoritesResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> FavoritesResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER PRIMARY KEY,
                word TEXT NOT NULL,
                reading TEXT,
                definition TEXT NOT NULL,
                UNIQUE(word, definition)
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn insert(&self, record: &FavoriteRecord) -> FavoritesResult<InsertOutcome> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "INSERT OR IGNORE INTO favorites (word, reading, definition) VALUES (?1, ?2, ?3)",
            params![record.word, record.reading, record.definition],
        )?;

        if changed == 0 {
            tracing::debug!("'{}' already in favorites", record.word);
            Ok(InsertOutcome::Duplicate)
        } else {
            tracing::debug!("Added '{}' to favorites", record.word);
            Ok(InsertOutcome::Added)
        }
    }

    /// All records, newest first
    pub fn list(&self) -> FavoritesResult<Vec<FavoriteRecord>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT word, reading, definition FROM favorites ORDER BY id DESC")?;
        let rows = stmt.query_map([], |row| {
            Ok(FavoriteRecord {
                word: row.get(0)?,
                reading: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                definition: row.get(2)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Returns whether a record was deleted
    pub fn remove(&self, word: &str, definition: &str) -> FavoritesResult<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "DELETE FROM favorites WHERE word = ?1 AND definition = ?2",
            params![word, definition],
        )?;
        Ok(changed > 0)
    }

    pub fn count(&self) -> FavoritesResult<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
