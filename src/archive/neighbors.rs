//! Chronological neighbors of a concert.
//!
//! Concerts are ranked by date within the artist; the neighbors are the
//! concerts ranked immediately before and after the target. Concerts sharing
//! a date have no defined relative order, so their neighbors may come out in
//! either order.

use super::concert::{assemble, ConcertFetch, CONCERT_BY_ID_SQL};
use super::models::{Artist, ConcertNeighbors};
use crate::archive_store::{StoreError, StoreSession};
use crate::query_params;
use tracing::warn;

pub(crate) const NEIGHBORS_SQL: &str = concat!(
    "WITH ranked AS (",
    "SELECT concert_id, concert_friendly_url, ROW_NUMBER() OVER (ORDER BY date) AS rn ",
    "FROM concerts WHERE artist_id = ?1",
    "), target AS (",
    "SELECT rn FROM ranked WHERE concert_friendly_url = ?2",
    ") ",
    "SELECT r.concert_id, r.rn - t.rn AS rank_offset ",
    "FROM ranked r JOIN target t ON r.rn IN (t.rn - 1, t.rn + 1) ",
    "ORDER BY r.rn"
);

/// Finds the concerts right before and after `concert_slug`.
///
/// Neighbors are assembled bare: no setlist and, above all, no neighbors of
/// their own. Resolution is a single hop.
pub fn resolve_neighbors(
    session: &dyn StoreSession,
    artist: &Artist,
    concert_slug: &str,
) -> Result<ConcertNeighbors, StoreError> {
    let mut neighbors = ConcertNeighbors {
        previous: None,
        next: None,
    };

    for ranked in session.query(NEIGHBORS_SQL, query_params![artist.id, concert_slug])? {
        let concert_id = ranked.get_i64("concert_id")?;
        let row = session.query_opt(CONCERT_BY_ID_SQL, query_params![artist.id, concert_id])?;
        let Some(row) = row else {
            warn!("Neighbor concert {} vanished while resolving", concert_id);
            continue;
        };
        let concert = Box::new(assemble(session, artist, &row, ConcertFetch::BARE)?);

        match ranked.get_i64("rank_offset")? {
            -1 => neighbors.previous = Some(concert),
            1 => neighbors.next = Some(concert),
            _ => {}
        }
    }

    Ok(neighbors)
}
