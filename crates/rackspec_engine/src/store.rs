use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use rackspec_core::{FieldMap, SpecRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A record for this URL is already stored. The store is append-only per
    /// URL, so this is the expected outcome for a repeat scrape, not a fault.
    #[error("a record for this url already exists")]
    Conflict,
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// One row of the listing projection: just enough to render a table of what
/// has been scraped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSummary {
    pub model_name: String,
    pub date_scraped: String,
    pub url: String,
}

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS chassis_specs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT UNIQUE,
    model_name TEXT,
    date_scraped TEXT,
    cpu_socket TEXT,
    cpu_count TEXT,
    max_tdp TEXT,
    total_tdp TEXT,
    memory_type TEXT,
    dimm_slots TEXT,
    power_supply TEXT,
    rack_unit TEXT,
    drive_bays TEXT,
    m2_slots TEXT
);
";

const RECORD_COLUMNS: &str = "url, model_name, date_scraped, cpu_socket, cpu_count, max_tdp, \
     total_tdp, memory_type, dimm_slots, power_supply, rack_unit, drive_bays, m2_slots";

/// SQLite-backed record store. URL uniqueness is enforced by the table
/// itself; `insert` surfaces the constraint violation as
/// [`StoreError::Conflict`] so callers get one authoritative dedup signal
/// even under concurrent scrapes of the same URL.
pub struct SpecStore {
    conn: Mutex<Connection>,
}

impl SpecStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoning panic cannot corrupt sqlite state, so recover the guard.
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Inserts a record, failing with [`StoreError::Conflict`] when the URL
    /// is already present. Nothing is updated in that case.
    pub fn insert(&self, record: &SpecRecord) -> Result<(), StoreError> {
        let conn = self.conn();
        let result = conn.execute(
            "INSERT INTO chassis_specs (url, model_name, date_scraped, cpu_socket, cpu_count, \
             max_tdp, total_tdp, memory_type, dimm_slots, power_supply, rack_unit, drive_bays, \
             m2_slots) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                record.url,
                record.model_name,
                record.date_scraped,
                record.fields.cpu_socket,
                record.fields.cpu_count,
                record.fields.max_tdp,
                record.fields.total_tdp,
                record.fields.memory_type,
                record.fields.dimm_slots,
                record.fields.power_supply,
                record.fields.rack_unit,
                record.fields.drive_bays,
                record.fields.m2_slots,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Conflict),
            Err(err) => Err(StoreError::Sqlite(err)),
        }
    }

    pub fn exists(&self, url: &str) -> Result<bool, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT 1 FROM chassis_specs WHERE url = ?1 LIMIT 1")?;
        Ok(stmt.exists(params![url])?)
    }

    /// Summaries of every stored record, in insertion order.
    pub fn list(&self) -> Result<Vec<StoredSummary>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT model_name, date_scraped, url FROM chassis_specs ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredSummary {
                    model_name: row.get(0)?,
                    date_scraped: row.get(1)?,
                    url: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// First stored record carrying this model name, oldest wins when two
    /// URLs derive the same name.
    pub fn get_by_model(&self, model_name: &str) -> Result<Option<SpecRecord>, StoreError> {
        let conn = self.conn();
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM chassis_specs WHERE model_name = ?1 ORDER BY id LIMIT 1"
        );
        let record = conn
            .query_row(&sql, params![model_name], record_from_row)
            .optional()?;
        Ok(record)
    }

    pub fn all_records(&self) -> Result<Vec<SpecRecord>, StoreError> {
        let conn = self.conn();
        let sql = format!("SELECT {RECORD_COLUMNS} FROM chassis_specs ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Removes every row for the model name and reports how many went away.
    /// Zero is a normal answer, not an error.
    pub fn delete_by_model(&self, model_name: &str) -> Result<usize, StoreError> {
        let conn = self.conn();
        let deleted = conn.execute(
            "DELETE FROM chassis_specs WHERE model_name = ?1",
            params![model_name],
        )?;
        Ok(deleted)
    }
}

fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SpecRecord> {
    let cpu_count: Option<String> = row.get(4)?;
    Ok(SpecRecord {
        url: row.get(0)?,
        model_name: row.get(1)?,
        date_scraped: row.get(2)?,
        fields: FieldMap {
            cpu_socket: row.get(3)?,
            // Rows written before the count column was populated read back
            // as the single-socket default.
            cpu_count: cpu_count.unwrap_or_else(|| "1".to_string()),
            max_tdp: row.get(5)?,
            total_tdp: row.get(6)?,
            memory_type: row.get(7)?,
            dimm_slots: row.get(8)?,
            power_supply: row.get(9)?,
            rack_unit: row.get(10)?,
            drive_bays: row.get(11)?,
            m2_slots: row.get(12)?,
        },
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
