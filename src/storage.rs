//! SQLite persistence for journal entries.
//!
//! Every operation opens its own connection, runs a single statement and
//! drops the connection again. There is no pool and no transaction that
//! spans more than one call.

use crate::emotions::Emotion;
use crate::models::{EmotionCounts, EmotionEntry};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type StorageResult<T> = Result<T, StorageError>;

const ENTRY_COLUMNS: &str = "id, date, emotion_type, note, created_at";

#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> StorageResult<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Runs `op` on the blocking pool so handlers never stall the runtime
    /// on SQLite I/O.
    pub async fn blocking<T, F>(&self, op: F) -> StorageResult<T>
    where
        F: FnOnce(&EntryStore) -> StorageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || op(&store)).await?
    }

    /// Creates the database file's parent directory and the `emotions` table.
    pub fn init_schema(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        self.connect()?.execute_batch(
            "CREATE TABLE IF NOT EXISTS emotions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT UNIQUE NOT NULL,
                emotion_type TEXT NOT NULL,
                note TEXT,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );",
        )?;
        Ok(())
    }

    pub fn upsert_entry(&self, date: &str, emotion: Emotion, note: Option<&str>) -> StorageResult<()> {
        self.upsert_entry_at(date, emotion, note, Utc::now().naive_utc())
    }

    /// Inserts the entry for `date`, or overwrites the existing one in place
    /// (the row id is kept, everything else including `created_at` replaced).
    pub fn upsert_entry_at(
        &self,
        date: &str,
        emotion: Emotion,
        note: Option<&str>,
        now: NaiveDateTime,
    ) -> StorageResult<()> {
        self.connect()?.execute(
            "INSERT INTO emotions (date, emotion_type, note, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                emotion_type = excluded.emotion_type,
                note = excluded.note,
                created_at = excluded.created_at",
            params![date, emotion, note, now],
        )?;
        Ok(())
    }

    pub fn get_entry(&self, date: &str) -> StorageResult<Option<EmotionEntry>> {
        let conn = self.connect()?;
        let entry = conn
            .query_row(
                &format!("SELECT {ENTRY_COLUMNS} FROM emotions WHERE date = ?1"),
                params![date],
                entry_from_row,
            )
            .optional()?;
        Ok(entry)
    }

    pub fn list_recent(&self, limit: u32) -> StorageResult<Vec<EmotionEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM emotions ORDER BY date DESC LIMIT ?1"
        ))?;
        let rows = stmt.query_map(params![limit], entry_from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub fn list_all(&self) -> StorageResult<Vec<EmotionEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM emotions ORDER BY date DESC"
        ))?;
        let rows = stmt.query_map([], entry_from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Every (date, emotion) pair, oldest first.
    pub fn list_calendar(&self) -> StorageResult<Vec<(String, Emotion)>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT date, emotion_type FROM emotions ORDER BY date")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Counts entries per emotion among dates starting with `prefix`
    /// (normally a `YYYY-MM` month). The match is literal, so `%` and `_`
    /// in the prefix have no wildcard meaning.
    pub fn count_by_emotion_for_month_prefix(&self, prefix: &str) -> StorageResult<EmotionCounts> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT emotion_type, COUNT(*)
             FROM emotions
             WHERE substr(date, 1, length(?1)) = ?1
             GROUP BY emotion_type",
        )?;
        let rows = stmt.query_map(params![prefix], |row| {
            Ok((row.get::<_, Emotion>(0)?, row.get::<_, u32>(1)?))
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Returns whether a row was removed. Missing dates are not an error.
    pub fn delete_entry(&self, date: &str) -> StorageResult<bool> {
        let affected = self
            .connect()?
            .execute("DELETE FROM emotions WHERE date = ?1", params![date])?;
        Ok(affected > 0)
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<EmotionEntry> {
    Ok(EmotionEntry {
        id: row.get(0)?,
        date: row.get(1)?,
        emotion_type: row.get(2)?,
        note: row.get(3)?,
        created_at: row.get(4)?,
    })
}
