mod versioned_schema;

pub use versioned_schema::{Column, ForeignKey, SqlType, Table, VersionedSchema};

/// Offset applied to `PRAGMA user_version` so archive databases are
/// distinguishable from arbitrary SQLite files.
pub const BASE_DB_VERSION: usize = 77000;
