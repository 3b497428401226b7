//! SQLite-backed archive store.
//!
//! Reads go through a small pool of read-only connections picked round-robin.
//! The schema is created (or validated) once, through a short-lived write
//! connection, when the store is opened.

use super::schema::ARCHIVE_VERSIONED_SCHEMAS;
use super::session::{ArchiveStore, Row, StoreError, StoreSession, Value};
use crate::server::metrics;
use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Clone)]
pub struct SqliteArchiveStore {
    read_pool: Arc<Vec<Mutex<Connection>>>,
    read_index: Arc<AtomicUsize>,
}

fn create_or_validate_schema(conn: &Connection) -> Result<()> {
    let latest_schema = ARCHIVE_VERSIONED_SCHEMAS
        .last()
        .context("No archive schema defined")?;

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!(
            "Creating archive db schema at version {}",
            latest_schema.version
        );
        return latest_schema.create(conn);
    }

    latest_schema
        .validate(conn)
        .context("Archive database schema does not match the expected layout")
}

impl SqliteArchiveStore {
    /// Opens (creating if needed) the archive database at `db_path`.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `read_pool_size` - Number of read-only connections shared by request handlers
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path = db_path.as_ref();
        anyhow::ensure!(read_pool_size > 0, "read_pool_size must be at least 1");

        {
            let setup_conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .context("Failed to open archive database")?;
            create_or_validate_schema(&setup_conn)?;
        }

        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let read_conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .context("Failed to open read-only archive connection")?;
            read_pool.push(Mutex::new(read_conn));
        }

        let store = SqliteArchiveStore {
            read_pool: Arc::new(read_pool),
            read_index: Arc::new(AtomicUsize::new(0)),
        };

        let counts = store.counts()?;
        info!(
            "Opened live archive: {} artists, {} concerts, {} songs",
            counts.artists, counts.concerts, counts.songs
        );
        Ok(store)
    }

    fn checkout(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.read_pool.len();
        self.read_pool[index].lock().map_err(|_| {
            metrics::record_db_connection_error();
            StoreError::Unavailable(format!("read connection {} is poisoned", index))
        })
    }

    /// Row counts of the main entities, for start-up logging and metrics.
    pub fn counts(&self) -> Result<ArchiveCounts, StoreError> {
        let conn = self.checkout()?;
        let counts = conn.query_row(
            "SELECT (SELECT COUNT(*) FROM artists),
                    (SELECT COUNT(*) FROM concerts),
                    (SELECT COUNT(*) FROM songs)",
            [],
            |r| {
                Ok(ArchiveCounts {
                    artists: r.get::<_, i64>(0)? as usize,
                    concerts: r.get::<_, i64>(1)? as usize,
                    songs: r.get::<_, i64>(2)? as usize,
                })
            },
        )?;
        Ok(counts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveCounts {
    pub artists: usize,
    pub concerts: usize,
    pub songs: usize,
}

impl ArchiveStore for SqliteArchiveStore {
    fn session(&self) -> Result<Box<dyn StoreSession + '_>, StoreError> {
        Ok(Box::new(SqliteSession {
            conn: self.checkout()?,
        }))
    }
}

/// Holds one pooled connection until dropped.
pub struct SqliteSession<'a> {
    conn: MutexGuard<'a, Connection>,
}

fn to_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Integer(v),
        ValueRef::Real(v) => Value::Real(v),
        ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
        // No archive column stores blobs; surface them as lossy text.
        ValueRef::Blob(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
    }
}

impl StoreSession for SqliteSession<'_> {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, StoreError> {
        let start = Instant::now();
        let mut stmt = self.conn.prepare_cached(sql)?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let mut fields = Vec::with_capacity(column_names.len());
                for (index, name) in column_names.iter().enumerate() {
                    fields.push((name.clone(), to_value(row.get_ref(index)?)));
                }
                Ok(Row::new(fields))
            })?
            .collect::<rusqlite::Result<Vec<Row>>>()?;

        let elapsed = start.elapsed();
        metrics::record_db_query(elapsed);
        debug!("query returned {} rows in {:?}", rows.len(), elapsed);
        Ok(rows)
    }
}
