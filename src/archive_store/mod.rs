mod schema;
mod session;
mod sqlite_store;

pub use schema::ARCHIVE_VERSIONED_SCHEMAS;
pub use session::{ArchiveStore, Row, StoreError, StoreSession, Value};
pub use sqlite_store::{ArchiveCounts, SqliteArchiveStore, SqliteSession};
