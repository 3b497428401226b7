use super::models::{Artist, Era};
use crate::archive_store::{StoreError, StoreSession};
use crate::query_params;

pub(crate) const ERAS_FOR_ARTIST_SQL: &str = concat!(
    "SELECT era_id, artist_id, era_identifier, era_tile ",
    "FROM eras WHERE artist_id = ?1 ",
    "ORDER BY era_id"
);

pub(crate) const ERA_BY_SLUG_SQL: &str = concat!(
    "SELECT era_id, artist_id, era_identifier, era_tile ",
    "FROM eras WHERE artist_id = ?1 AND era_identifier = ?2"
);

/// Eras come out in the order they were entered, which is chronological.
pub fn list_eras(session: &dyn StoreSession, artist: &Artist) -> Result<Vec<Era>, StoreError> {
    session
        .query(ERAS_FOR_ARTIST_SQL, query_params![artist.id])?
        .iter()
        .map(Era::from_row)
        .collect()
}

pub fn find_era(
    session: &dyn StoreSession,
    artist: &Artist,
    era_slug: &str,
) -> Result<Option<Era>, StoreError> {
    session
        .query_opt(ERA_BY_SLUG_SQL, query_params![artist.id, era_slug])?
        .map(|row| Era::from_row(&row))
        .transpose()
}
