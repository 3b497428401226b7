//! Concert assembly.

use super::media::concert_media;
use super::models::{Artist, Concert, ConcertDetails};
use super::neighbors::resolve_neighbors;
use super::recordings::concert_recordings;
use super::setlist::resolve_latest_setlist;
use super::sql::concert_select;
use crate::archive_store::{Row, StoreError, StoreSession};
use crate::query_params;
use tracing::debug;

pub(crate) const CONCERT_BY_SLUG_SQL: &str = concat!(
    concert_select!(),
    "WHERE c.artist_id = ?1 AND c.concert_friendly_url = ?2"
);

pub(crate) const CONCERT_BY_ID_SQL: &str =
    concat!(concert_select!(), "WHERE c.artist_id = ?1 AND c.concert_id = ?2");

/// What to resolve on top of the concert's own row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConcertFetch {
    pub setlist: bool,
    pub neighbors: bool,
}

impl ConcertFetch {
    pub const FULL: ConcertFetch = ConcertFetch {
        setlist: true,
        neighbors: true,
    };

    /// Used for neighbors and listings.
    pub const BARE: ConcertFetch = ConcertFetch {
        setlist: false,
        neighbors: false,
    };
}

impl Default for ConcertFetch {
    fn default() -> Self {
        Self::FULL
    }
}

/// Builds a concert from one `concert_select!` row, resolving its latest
/// setlist and its neighbors when asked to.
pub fn assemble(
    session: &dyn StoreSession,
    artist: &Artist,
    row: &Row,
    fetch: ConcertFetch,
) -> Result<Concert, StoreError> {
    let mut concert = Concert::from_row(row)?;
    if fetch.setlist {
        concert.setlist = resolve_latest_setlist(session, artist.id, concert.id)?;
    }
    if fetch.neighbors {
        concert.neighbors = Some(resolve_neighbors(session, artist, &concert.slug)?);
    }
    Ok(concert)
}

pub fn find_concert(
    session: &dyn StoreSession,
    artist: &Artist,
    concert_slug: &str,
    fetch: ConcertFetch,
) -> Result<Option<Concert>, StoreError> {
    match session.query_opt(CONCERT_BY_SLUG_SQL, query_params![artist.id, concert_slug])? {
        Some(row) => assemble(session, artist, &row, fetch).map(Some),
        None => {
            debug!(
                "No concert '{}' for artist '{}'",
                concert_slug, artist.short_name
            );
            Ok(None)
        }
    }
}

/// A fully resolved concert together with its media and recordings.
pub fn concert_details(
    session: &dyn StoreSession,
    artist: &Artist,
    concert_slug: &str,
) -> Result<Option<ConcertDetails>, StoreError> {
    let Some(concert) = find_concert(session, artist, concert_slug, ConcertFetch::FULL)? else {
        return Ok(None);
    };
    let media = concert_media(session, concert.id)?;
    let recordings = concert_recordings(session, concert.id)?;
    Ok(Some(ConcertDetails {
        concert,
        media,
        recordings,
    }))
}
