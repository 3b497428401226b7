//! The narrow query boundary the archive engine talks to.
//!
//! A session executes one parameterized, read-only statement at a time and
//! hands back every row as an ordered list of named, typed fields. Nothing
//! above this module knows which database is behind it.

use chrono::NaiveDate;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use thiserror::Error;

/// Builds a parameter slice for [`StoreSession::query`].
///
/// ```ignore
/// session.query(SQL, query_params![artist.id, slug])?;
/// ```
#[macro_export]
macro_rules! query_params {
    () => {
        &[] as &[$crate::archive_store::Value]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::archive_store::Value::from($param)),+] as &[$crate::archive_store::Value]
    };
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("column '{0}' missing from result row")]
    MissingColumn(String),

    #[error("column '{column}' holds {actual}, expected {expected}")]
    UnexpectedType {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("column '{column}' holds an invalid date '{value}'")]
    InvalidDate { column: String, value: String },
}

/// A single typed field value, used both for bound parameters and result cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
            Value::Date(_) => "date",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Integer(v) => ToSqlOutput::Borrowed(ValueRef::Integer(*v)),
            Value::Real(v) => ToSqlOutput::Borrowed(ValueRef::Real(*v)),
            Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Bool(v) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*v as i64)),
            Value::Date(v) => ToSqlOutput::Owned(rusqlite::types::Value::Text(
                v.format(DATE_FORMAT).to_string(),
            )),
        })
    }
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// One result row: field names in select order, each paired with its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        Row { fields }
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn value(&self, column: &str) -> Result<&Value, StoreError> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .ok_or_else(|| StoreError::MissingColumn(column.to_string()))
    }

    fn mismatch(column: &str, expected: &'static str, actual: &Value) -> StoreError {
        StoreError::UnexpectedType {
            column: column.to_string(),
            expected,
            actual: actual.type_name(),
        }
    }

    pub fn get_opt_i64(&self, column: &str) -> Result<Option<i64>, StoreError> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Integer(v) => Ok(Some(*v)),
            Value::Bool(v) => Ok(Some(*v as i64)),
            other => Err(Self::mismatch(column, "integer", other)),
        }
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, StoreError> {
        self.get_opt_i64(column)?
            .ok_or_else(|| Self::mismatch(column, "integer", &Value::Null))
    }

    pub fn get_opt_text(&self, column: &str) -> Result<Option<String>, StoreError> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Text(v) => Ok(Some(v.clone())),
            Value::Date(v) => Ok(Some(v.format(DATE_FORMAT).to_string())),
            other => Err(Self::mismatch(column, "text", other)),
        }
    }

    pub fn get_text(&self, column: &str) -> Result<String, StoreError> {
        self.get_opt_text(column)?
            .ok_or_else(|| Self::mismatch(column, "text", &Value::Null))
    }

    /// Booleans are stored as integers; NULL reads as `false`.
    pub fn get_bool(&self, column: &str) -> Result<bool, StoreError> {
        match self.value(column)? {
            Value::Null => Ok(false),
            Value::Bool(v) => Ok(*v),
            Value::Integer(v) => Ok(*v != 0),
            other => Err(Self::mismatch(column, "boolean", other)),
        }
    }

    pub fn get_opt_date(&self, column: &str) -> Result<Option<NaiveDate>, StoreError> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Date(v) => Ok(Some(*v)),
            Value::Text(v) => NaiveDate::parse_from_str(v, DATE_FORMAT)
                .map(Some)
                .map_err(|_| StoreError::InvalidDate {
                    column: column.to_string(),
                    value: v.clone(),
                }),
            other => Err(Self::mismatch(column, "date", other)),
        }
    }

    pub fn get_date(&self, column: &str) -> Result<NaiveDate, StoreError> {
        self.get_opt_date(column)?
            .ok_or_else(|| Self::mismatch(column, "date", &Value::Null))
    }
}

/// A request-scoped handle on the store.
///
/// Implementations hold whatever resource backs the session (a pooled
/// connection, typically) and give it back when dropped.
pub trait StoreSession {
    /// Executes a read-only statement with positional parameters (`?1`, `?2`, ...)
    /// and returns every resulting row in order.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, StoreError>;

    /// Convenience for statements expected to return zero or one row.
    fn query_opt(&self, sql: &str, params: &[Value]) -> Result<Option<Row>, StoreError> {
        Ok(self.query(sql, params)?.into_iter().next())
    }
}

/// Hands out sessions. Shared across request handlers.
pub trait ArchiveStore: Send + Sync {
    fn session(&self) -> Result<Box<dyn StoreSession + '_>, StoreError>;
}
