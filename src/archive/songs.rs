//! Song statistics and song detail.

use super::listing::concerts_with_song;
use super::models::{Artist, Concert, Song};
use super::sql::{latest_versions, original_artist_joins, song_columns};
use crate::archive_store::{StoreError, StoreSession};
use crate::query_params;
use serde::Serialize;
use tracing::debug;

/// One row per song of the artist. A song counts once per concert whose
/// latest setlist includes it, however often it was played there.
pub(crate) const SONG_PERFORMANCE_COUNTS_SQL: &str = concat!(
    "WITH performed AS (",
    "SELECT DISTINCT se.song_id, se.concert_id ",
    "FROM setlist_entries se ",
    "JOIN (",
    latest_versions!(),
    ") lv ON lv.concert_id = se.concert_id AND lv.version = se.version ",
    "JOIN concerts c ON c.concert_id = se.concert_id ",
    "WHERE c.artist_id = ?1",
    ") ",
    "SELECT NULL AS lyrics, COUNT(p.concert_id) AS performance_count, ",
    song_columns!(),
    " FROM songs s",
    original_artist_joins!(),
    "LEFT JOIN performed p ON p.song_id = s.song_id ",
    "WHERE s.artist_id = ?1 ",
    "GROUP BY s.song_id ",
    "ORDER BY performance_count DESC, s.title, s.song_id"
);

pub(crate) const SONG_BY_SLUG_SQL: &str = concat!(
    "SELECT s.lyrics, ",
    song_columns!(),
    " FROM songs s",
    original_artist_joins!(),
    "WHERE s.artist_id = ?1 AND s.song_url = ?2"
);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SongCount {
    pub song: Song,
    pub count: usize,
}

/// A song with every concert it was played at, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SongDetail {
    pub song: Song,
    pub concerts: Vec<Concert>,
}

impl SongDetail {
    pub fn first_performance(&self) -> Option<&Concert> {
        self.concerts.first()
    }

    pub fn latest_performance(&self) -> Option<&Concert> {
        self.concerts.last()
    }
}

/// Every song of the artist with its performance count, most played first.
/// Songs never played are included with a count of zero.
pub fn song_performance_counts(
    session: &dyn StoreSession,
    artist: &Artist,
) -> Result<Vec<SongCount>, StoreError> {
    session
        .query(SONG_PERFORMANCE_COUNTS_SQL, query_params![artist.id])?
        .iter()
        .map(|row| {
            let count = row.get_i64("performance_count")? as usize;
            let mut song = Song::from_row(row)?;
            song.performance_count = Some(count);
            Ok(SongCount { song, count })
        })
        .collect()
}

pub fn song_detail(
    session: &dyn StoreSession,
    artist: &Artist,
    song_slug: &str,
) -> Result<Option<SongDetail>, StoreError> {
    let Some(row) = session.query_opt(SONG_BY_SLUG_SQL, query_params![artist.id, song_slug])?
    else {
        debug!("No song '{}' for artist '{}'", song_slug, artist.short_name);
        return Ok(None);
    };
    let mut song = Song::from_row(&row)?;
    let concerts = concerts_with_song(session, artist, song.id)?;
    song.performance_count = Some(concerts.len());
    Ok(Some(SongDetail { song, concerts }))
}
