//! Concert listings and their year facets.

use super::concert::{assemble, ConcertFetch};
use super::error::Year;
use super::models::{Artist, Concert, Era};
use super::sql::{concert_select, latest_versions};
use crate::archive_store::{Row, StoreError, StoreSession};
use crate::query_params;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

pub const DEFAULT_UPCOMING_LIMIT: usize = 200;

pub(crate) const CONCERTS_FOR_ARTIST_SQL: &str = concat!(
    concert_select!(),
    "WHERE c.artist_id = ?1 ",
    "ORDER BY c.date"
);

pub(crate) const CONCERTS_FOR_YEAR_SQL: &str = concat!(
    concert_select!(),
    "WHERE c.artist_id = ?1 AND CAST(strftime('%Y', c.date) AS INTEGER) = ?2 ",
    "ORDER BY c.date"
);

pub(crate) const YEARS_FOR_ARTIST_SQL: &str = concat!(
    "SELECT DISTINCT CAST(strftime('%Y', date) AS INTEGER) AS year ",
    "FROM concerts WHERE artist_id = ?1 ",
    "ORDER BY year"
);

pub(crate) const CONCERTS_FOR_ERA_SQL: &str = concat!(
    concert_select!(),
    "WHERE c.artist_id = ?1 AND c.era_id = ?2 ",
    "ORDER BY c.date"
);

pub(crate) const UPCOMING_CONCERTS_SQL: &str = concat!(
    concert_select!(),
    "WHERE c.artist_id = ?1 AND c.date > ?2 ",
    "ORDER BY c.date ",
    "LIMIT ?3"
);

pub(crate) const CONCERTS_WITH_SONG_SQL: &str = concat!(
    concert_select!(),
    "WHERE c.artist_id = ?1 AND c.concert_id IN (",
    "SELECT se.concert_id FROM setlist_entries se ",
    "JOIN (",
    latest_versions!(),
    ") lv ON lv.concert_id = se.concert_id AND lv.version = se.version ",
    "WHERE se.song_id = ?2",
    ") ",
    "ORDER BY c.date"
);

/// A listing together with every year the artist has concerts in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConcertListing {
    pub concerts: Vec<Concert>,
    pub years_available: BTreeSet<i32>,
}

fn assemble_all(
    session: &dyn StoreSession,
    artist: &Artist,
    rows: Vec<Row>,
) -> Result<Vec<Concert>, StoreError> {
    rows.iter()
        .map(|row| assemble(session, artist, row, ConcertFetch::BARE))
        .collect()
}

/// Lists an artist's concerts by date, optionally only those of one year.
///
/// The year is matched in the query. Unfiltered, the facets come from the
/// listing itself; filtered, they take a separate distinct-years query so the
/// other years stay visible without fetching them.
pub fn list_for_artist(
    session: &dyn StoreSession,
    artist: &Artist,
    year: Option<Year>,
) -> Result<ConcertListing, StoreError> {
    match year {
        None => {
            let concerts = assemble_all(
                session,
                artist,
                session.query(CONCERTS_FOR_ARTIST_SQL, query_params![artist.id])?,
            )?;
            let years_available = concerts.iter().map(|c| c.date.year()).collect();
            Ok(ConcertListing {
                concerts,
                years_available,
            })
        }
        Some(year) => {
            let concerts = assemble_all(
                session,
                artist,
                session.query(
                    CONCERTS_FOR_YEAR_SQL,
                    query_params![artist.id, year.value()],
                )?,
            )?;
            Ok(ConcertListing {
                concerts,
                years_available: years_for_artist(session, artist)?,
            })
        }
    }
}

pub fn years_for_artist(
    session: &dyn StoreSession,
    artist: &Artist,
) -> Result<BTreeSet<i32>, StoreError> {
    session
        .query(YEARS_FOR_ARTIST_SQL, query_params![artist.id])?
        .iter()
        .map(|row| row.get_i64("year").map(|year| year as i32))
        .collect()
}

pub fn list_for_era(
    session: &dyn StoreSession,
    artist: &Artist,
    era: &Era,
) -> Result<Vec<Concert>, StoreError> {
    let rows = session.query(CONCERTS_FOR_ERA_SQL, query_params![artist.id, era.id])?;
    assemble_all(session, artist, rows)
}

/// Concerts strictly after `today`, soonest first.
pub fn list_upcoming(
    session: &dyn StoreSession,
    artist: &Artist,
    today: NaiveDate,
    limit: usize,
) -> Result<Vec<Concert>, StoreError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = session.query(UPCOMING_CONCERTS_SQL, query_params![artist.id, today, limit])?;
    assemble_all(session, artist, rows)
}

/// Concerts whose latest setlist includes the song, by date.
pub fn concerts_with_song(
    session: &dyn StoreSession,
    artist: &Artist,
    song_id: i64,
) -> Result<Vec<Concert>, StoreError> {
    let rows = session.query(CONCERTS_WITH_SONG_SQL, query_params![artist.id, song_id])?;
    assemble_all(session, artist, rows)
}
