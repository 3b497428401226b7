use crate::archive_store::StoreError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Artist,
    Concert,
    Song,
    Era,
}

impl NotFoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotFoundKind::Artist => "artist",
            NotFoundKind::Concert => "concert",
            NotFoundKind::Song => "song",
            NotFoundKind::Era => "era",
        }
    }
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("{0} not found")]
    NotFound(NotFoundKind),

    #[error("archive store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ArchiveError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ArchiveError::NotFound(_) => "not_found",
            ArchiveError::StoreUnavailable(_) => "store_unavailable",
            ArchiveError::InvalidInput(_) => "invalid_input",
        }
    }
}

/// Turns an absent lookup result into [`ArchiveError::NotFound`].
pub trait OptionExt<T> {
    fn or_not_found(self, kind: NotFoundKind) -> Result<T, ArchiveError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_not_found(self, kind: NotFoundKind) -> Result<T, ArchiveError> {
        self.ok_or(ArchiveError::NotFound(kind))
    }
}

lazy_static! {
    static ref YEAR_PATTERN: Regex = Regex::new(r"^[1-3][0-9]{3}$").expect("Invalid year pattern");
}

/// A calendar year accepted as a listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Year(i32);

impl Year {
    pub fn parse(raw: &str) -> Result<Self, ArchiveError> {
        if !YEAR_PATTERN.is_match(raw) {
            return Err(ArchiveError::InvalidInput(format!(
                "'{}' is not a four digit year",
                raw
            )));
        }
        raw.parse::<i32>()
            .map(Year)
            .map_err(|e| ArchiveError::InvalidInput(e.to_string()))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
