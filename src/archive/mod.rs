//! The concert history engine: resolves slugs into fully assembled concerts,
//! setlists, listings and song statistics on top of an [`ArchiveStore`].
//!
//! [`ArchiveStore`]: crate::archive_store::ArchiveStore

mod artists;
mod concert;
mod eras;
mod error;
mod facade;
mod listing;
mod media;
pub mod models;
mod neighbors;
mod recordings;
mod setlist;
mod songs;
mod sql;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use artists::find_artist;
pub use concert::{assemble, concert_details, find_concert, ConcertFetch};
pub use eras::{find_era, list_eras};
pub use error::{ArchiveError, NotFoundKind, OptionExt, Year};
pub use facade::{
    ConcertArchive, EraListing, HomeSummary, HOME_UPCOMING_LIMIT, HOME_UPDATES_LIMIT,
};
pub use listing::{
    concerts_with_song, list_for_artist, list_for_era, list_upcoming, years_for_artist,
    ConcertListing, DEFAULT_UPCOMING_LIMIT,
};
pub use media::concert_media;
pub use models::*;
pub use neighbors::resolve_neighbors;
pub use recordings::concert_recordings;
pub use setlist::resolve_latest_setlist;
pub use songs::{song_detail, song_performance_counts, SongCount, SongDetail};
pub use updates::recent_updates;

mod updates;
