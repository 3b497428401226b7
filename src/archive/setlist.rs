//! Latest-version setlist resolution.

use super::models::{Setlist, SetlistEntry};
use super::sql::{original_artist_joins, song_columns};
use crate::archive_store::{StoreError, StoreSession};
use crate::query_params;

pub(crate) const LATEST_VERSION_SQL: &str = concat!(
    "SELECT sv.version, sv.complete ",
    "FROM setlist_versions sv ",
    "JOIN concerts c ON c.concert_id = sv.concert_id ",
    "WHERE c.artist_id = ?1 AND sv.concert_id = ?2 ",
    "ORDER BY sv.version DESC ",
    "LIMIT 1"
);

pub(crate) const SETLIST_ENTRIES_SQL: &str = concat!(
    "SELECT se.song_order, se.notes AS entry_notes, NULL AS lyrics, ",
    song_columns!(),
    " FROM setlist_entries se ",
    "JOIN songs s ON s.song_id = se.song_id",
    original_artist_joins!(),
    "WHERE se.concert_id = ?1 AND se.version = ?2 ",
    "ORDER BY se.song_order"
);

/// Resolves the authoritative setlist of a concert: the entries of its highest
/// version, in playing order.
///
/// Returns `None` when the concert has no setlist version at all. A version
/// with no entries yet is still a setlist, just an empty one.
pub fn resolve_latest_setlist(
    session: &dyn StoreSession,
    artist_id: i64,
    concert_id: i64,
) -> Result<Option<Setlist>, StoreError> {
    let latest =
        match session.query_opt(LATEST_VERSION_SQL, query_params![artist_id, concert_id])? {
            Some(row) => row,
            None => return Ok(None),
        };
    let version = latest.get_i64("version")?;
    let complete = latest.get_bool("complete")?;

    let entries = session
        .query(SETLIST_ENTRIES_SQL, query_params![concert_id, version])?
        .iter()
        .map(SetlistEntry::from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Setlist::new(concert_id, version, complete, entries)))
}
