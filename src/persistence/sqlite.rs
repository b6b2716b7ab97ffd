use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::persistence::repository::{slot_key, SlotStore, SLOT_KEY_PREFIX};

const SLOT_SCHEMA_VERSION: i64 = 1;

const SLOT_DB_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS slot_meta (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  schema_version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS character_slots (
  storage_key TEXT PRIMARY KEY,
  payload TEXT NOT NULL
);
"#;

#[derive(Debug)]
pub enum SlotDbError {
    Sqlite(rusqlite::Error),
    InvalidData(String),
}

impl std::fmt::Display for SlotDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotDbError::Sqlite(err) => write!(f, "sqlite error: {}", err),
            SlotDbError::InvalidData(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for SlotDbError {}

impl From<rusqlite::Error> for SlotDbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}

/// SQLite-backed slot storage. Each slot is one row holding the record JSON.
pub struct SlotDb {
    conn: Connection,
}

impl SlotDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SlotDbError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, SlotDbError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, SlotDbError> {
        let mut db = Self { conn };
        db.conn.execute_batch(SLOT_DB_SCHEMA)?;
        db.ensure_slot_meta()?;
        Ok(db)
    }

    pub fn read(&self, slot: &str) -> Result<Option<String>, SlotDbError> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM character_slots WHERE storage_key = ?1",
                params![slot_key(slot)],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    pub fn write(&mut self, slot: &str, payload: &str) -> Result<(), SlotDbError> {
        self.conn.execute(
            "INSERT INTO character_slots (storage_key, payload) VALUES (?1, ?2) \
             ON CONFLICT(storage_key) DO UPDATE SET payload = excluded.payload",
            params![slot_key(slot), payload],
        )?;
        Ok(())
    }

    /// Slot names that currently hold a value, sorted.
    pub fn list_slots(&self) -> Result<Vec<String>, SlotDbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT storage_key FROM character_slots ORDER BY storage_key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut slots = Vec::new();
        for row in rows {
            let key = row?;
            match key.strip_prefix(SLOT_KEY_PREFIX) {
                Some(slot) => slots.push(slot.to_string()),
                None => {
                    return Err(SlotDbError::InvalidData(format!(
                        "unexpected storage key {}",
                        key
                    )))
                }
            }
        }
        Ok(slots)
    }

    fn ensure_slot_meta(&mut self) -> Result<(), SlotDbError> {
        let version = self
            .conn
            .query_row(
                "SELECT schema_version FROM slot_meta WHERE id = 1",
                [],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        match version {
            Some(version) if version == SLOT_SCHEMA_VERSION => Ok(()),
            Some(version) => Err(SlotDbError::InvalidData(format!(
                "slot_meta version mismatch (schema {}, expected {})",
                version, SLOT_SCHEMA_VERSION
            ))),
            None => {
                self.conn.execute(
                    "INSERT INTO slot_meta (id, schema_version) VALUES (1, ?1)",
                    params![SLOT_SCHEMA_VERSION],
                )?;
                Ok(())
            }
        }
    }
}

impl SlotStore for SlotDb {
    fn get(&self, slot: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        Ok(SlotDb::read(self, slot)?)
    }

    fn put(&mut self, slot: &str, payload: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(SlotDb::write(self, slot, payload)?)
    }

    fn occupied(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        Ok(self.list_slots()?)
    }
}
