//! Entry points of the archive.
//!
//! Each call checks one session out of the store, runs its queries on it and
//! gives it back on return, whether it succeeded or not. Nothing is kept
//! between calls.

use super::artists::find_artist;
use super::concert::{concert_details, find_concert, ConcertFetch};
use super::eras::{find_era, list_eras};
use super::error::{ArchiveError, Year};
use super::listing::{self, ConcertListing, DEFAULT_UPCOMING_LIMIT};
use super::models::{Artist, Concert, ConcertDetails, Era, Update};
use super::songs::{song_detail, song_performance_counts, SongCount, SongDetail};
use super::updates::recent_updates;
use crate::archive_store::{ArchiveStore, StoreSession};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;

pub const HOME_UPCOMING_LIMIT: usize = 10;
pub const HOME_UPDATES_LIMIT: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EraListing {
    pub era: Era,
    pub concerts: Vec<Concert>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HomeSummary {
    pub artist: Option<Artist>,
    pub eras: Vec<Era>,
    pub upcoming: Vec<Concert>,
    pub updates: Vec<Update>,
}

#[derive(Clone)]
pub struct ConcertArchive {
    store: Arc<dyn ArchiveStore>,
}

impl ConcertArchive {
    pub fn new(store: Arc<dyn ArchiveStore>) -> Self {
        ConcertArchive { store }
    }

    fn with_session<T>(
        &self,
        work: impl FnOnce(&dyn StoreSession) -> Result<T, ArchiveError>,
    ) -> Result<T, ArchiveError> {
        let session = self.store.session()?;
        work(session.as_ref())
    }

    pub fn get_artist(&self, short_name: &str) -> Result<Option<Artist>, ArchiveError> {
        self.with_session(|session| Ok(find_artist(session, short_name)?))
    }

    pub fn get_concert(
        &self,
        artist: &Artist,
        concert_slug: &str,
        fetch: ConcertFetch,
    ) -> Result<Option<Concert>, ArchiveError> {
        self.with_session(|session| Ok(find_concert(session, artist, concert_slug, fetch)?))
    }

    pub fn get_concert_details(
        &self,
        artist: &Artist,
        concert_slug: &str,
    ) -> Result<Option<ConcertDetails>, ArchiveError> {
        self.with_session(|session| Ok(concert_details(session, artist, concert_slug)?))
    }

    pub fn list_concerts(
        &self,
        artist: &Artist,
        year: Option<Year>,
    ) -> Result<ConcertListing, ArchiveError> {
        self.with_session(|session| Ok(listing::list_for_artist(session, artist, year)?))
    }

    /// Concerts after today, at most `limit` of them (200 by default).
    pub fn list_upcoming(
        &self,
        artist: &Artist,
        limit: Option<usize>,
    ) -> Result<Vec<Concert>, ArchiveError> {
        let limit = limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);
        self.with_session(|session| {
            Ok(listing::list_upcoming(session, artist, today(), limit)?)
        })
    }

    /// `None` when the era is unknown for this artist.
    pub fn list_by_era(
        &self,
        artist: &Artist,
        era_slug: &str,
    ) -> Result<Option<EraListing>, ArchiveError> {
        self.with_session(|session| {
            let Some(era) = find_era(session, artist, era_slug)? else {
                return Ok(None);
            };
            let concerts = listing::list_for_era(session, artist, &era)?;
            Ok(Some(EraListing { era, concerts }))
        })
    }

    pub fn list_eras(&self, artist: &Artist) -> Result<Vec<Era>, ArchiveError> {
        self.with_session(|session| Ok(list_eras(session, artist)?))
    }

    pub fn get_song(
        &self,
        artist: &Artist,
        song_slug: &str,
    ) -> Result<Option<SongDetail>, ArchiveError> {
        self.with_session(|session| Ok(song_detail(session, artist, song_slug)?))
    }

    pub fn list_songs(&self, artist: &Artist) -> Result<Vec<SongCount>, ArchiveError> {
        self.with_session(|session| Ok(song_performance_counts(session, artist)?))
    }

    pub fn recent_updates(&self, limit: Option<usize>) -> Result<Vec<Update>, ArchiveError> {
        self.with_session(|session| Ok(recent_updates(session, limit)?))
    }

    /// Everything the landing page shows. An unknown primary artist still
    /// gets the archive-wide updates.
    pub fn home_summary(&self, primary_short_name: &str) -> Result<HomeSummary, ArchiveError> {
        self.with_session(|session| {
            let updates = recent_updates(session, Some(HOME_UPDATES_LIMIT))?;
            let Some(artist) = find_artist(session, primary_short_name)? else {
                return Ok(HomeSummary {
                    artist: None,
                    eras: Vec::new(),
                    upcoming: Vec::new(),
                    updates,
                });
            };
            Ok(HomeSummary {
                eras: list_eras(session, &artist)?,
                upcoming: listing::list_upcoming(
                    session,
                    &artist,
                    today(),
                    HOME_UPCOMING_LIMIT,
                )?,
                artist: Some(artist),
                updates,
            })
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
