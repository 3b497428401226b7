//! Archive entities.
//!
//! Every entity read from the store has a single `from_row` decoder; the
//! plain constructors are for building values in code.

use crate::archive_store::{Row, StoreError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// Artists, places and eras
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub short_name: String,
}

impl Artist {
    pub fn new(id: i64, name: &str, short_name: &str) -> Self {
        Artist {
            id,
            name: name.to_string(),
            short_name: short_name.to_string(),
        }
    }

    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Artist {
            id: row.get_i64("artist_id")?,
            name: row.get_text("artist_name")?,
            short_name: row.get_text("short_name")?,
        })
    }
}

/// Each part may be unknown on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl Location {
    pub fn new(country: Option<&str>, state: Option<&str>, city: Option<&str>) -> Self {
        Location {
            country: country.map(str::to_string),
            state: state.map(str::to_string),
            city: city.map(str::to_string),
        }
    }

    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Location {
            country: row.get_opt_text("country")?,
            state: row.get_opt_text("state")?,
            city: row.get_opt_text("city")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.state.is_none() && self.city.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub name: String,
    pub location: Location,
}

impl Venue {
    /// Only rows carrying a venue name produce a venue.
    pub fn from_row(row: &Row) -> Result<Option<Self>, StoreError> {
        match row.get_opt_text("venue_name")? {
            Some(name) => Ok(Some(Venue {
                name,
                location: Location::from_row(row)?,
            })),
            None => Ok(None),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Era {
    pub id: i64,
    pub artist_id: i64,
    pub identifier: String,
    pub tile: Option<String>,
}

impl Era {
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Era {
            id: row.get_i64("era_id")?,
            artist_id: row.get_i64("artist_id")?,
            identifier: row.get_text("era_identifier")?,
            tile: row.get_opt_text("era_tile")?,
        })
    }
}

// =============================================================================
// Songs and setlists
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Song {
    pub id: i64,
    pub artist_id: i64,
    pub title: String,
    pub slug: String,
    pub lyrics: Option<String>,
    pub notes: Option<String>,
    /// The covered song, if this is a cover. Only one hop is ever resolved.
    pub original_song_id: Option<i64>,
    pub original_artist_name: Option<String>,
    /// Filled in by the views that compute it.
    pub performance_count: Option<usize>,
}

impl Song {
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Song {
            id: row.get_i64("song_id")?,
            artist_id: row.get_i64("artist_id")?,
            title: row.get_text("title")?,
            slug: row.get_text("song_url")?,
            lyrics: row
                .get_opt_text("lyrics")?
                .map(|lyrics| lyrics.trim_start().to_string()),
            notes: row.get_opt_text("notes")?,
            original_song_id: row.get_opt_i64("original_song_id")?,
            original_artist_name: row.get_opt_text("original_artist_name")?,
            performance_count: None,
        })
    }

    pub fn is_cover(&self) -> bool {
        self.original_song_id.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SetlistEntry {
    pub song: Song,
    pub order: i64,
    pub notes: Option<String>,
}

impl SetlistEntry {
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(SetlistEntry {
            song: Song::from_row(row)?,
            order: row.get_i64("song_order")?,
            notes: row.get_opt_text("entry_notes")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Setlist {
    pub concert_id: i64,
    pub version: i64,
    pub complete: bool,
    pub entries: Vec<SetlistEntry>,
}

impl Setlist {
    pub fn new(concert_id: i64, version: i64, complete: bool, entries: Vec<SetlistEntry>) -> Self {
        Setlist {
            concert_id,
            version,
            complete,
            entries,
        }
    }
}

// =============================================================================
// Recordings and media
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recording {
    pub id: i64,
    pub source_type: Option<String>,
    pub recording_type: Option<String>,
    pub taper: Option<String>,
    pub length: Option<i64>,
    pub lineage: Option<String>,
    pub notes: Option<String>,
    pub complete: bool,
    pub files: Vec<String>,
    pub preview_urls: Vec<String>,
}

impl Recording {
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Recording {
            id: row.get_i64("recording_id")?,
            source_type: row.get_opt_text("source_name")?,
            recording_type: row.get_opt_text("recording_name")?,
            taper: row.get_opt_text("taper")?,
            length: row.get_opt_i64("length")?,
            lineage: row.get_opt_text("lineage")?,
            notes: row.get_opt_text("notes")?,
            complete: row.get_bool("complete")?,
            files: Vec::new(),
            preview_urls: Vec::new(),
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    Setlist,
    Ticket,
    PosterFlyer,
    LiveShot,
    TourItinerary,
    Other,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 6] = [
        MediaCategory::Setlist,
        MediaCategory::Ticket,
        MediaCategory::PosterFlyer,
        MediaCategory::LiveShot,
        MediaCategory::TourItinerary,
        MediaCategory::Other,
    ];

    /// Unknown categories fall back to `Other`.
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "setlist" => MediaCategory::Setlist,
            "ticket" => MediaCategory::Ticket,
            "poster_flyer" => MediaCategory::PosterFlyer,
            "live_shot" => MediaCategory::LiveShot,
            "tour_itinerary" => MediaCategory::TourItinerary,
            _ => MediaCategory::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Media {
    pub id: i64,
    pub concert_id: i64,
    pub url: String,
    pub category: MediaCategory,
}

impl Media {
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        let category = row
            .get_opt_text("media_type")?
            .map(|t| MediaCategory::from_db_str(&t))
            .unwrap_or(MediaCategory::Other);
        Ok(Media {
            id: row.get_i64("media_id")?,
            concert_id: row.get_i64("concert_id")?,
            url: row.get_text("media_url")?,
            category,
        })
    }
}

/// Media of a concert keyed by category. Every category is always present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MediaGroups(BTreeMap<MediaCategory, Vec<Media>>);

impl MediaGroups {
    pub fn new() -> Self {
        MediaGroups(
            MediaCategory::ALL
                .iter()
                .map(|category| (*category, Vec::new()))
                .collect(),
        )
    }

    pub fn push(&mut self, media: Media) {
        self.0.entry(media.category).or_default().push(media);
    }

    pub fn get(&self, category: MediaCategory) -> &[Media] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MediaGroups {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Updates and concerts
// =============================================================================

/// An archive changelog entry, pointing at a concert by its slugs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Update {
    pub date: NaiveDate,
    pub blurb: Option<String>,
    pub artist_short_name: String,
    pub concert_slug: String,
}

impl Update {
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Update {
            date: row.get_date("update_date")?,
            blurb: row.get_opt_text("blurb")?,
            artist_short_name: row.get_text("short_name")?,
            concert_slug: row.get_text("concert_friendly_url")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConcertNeighbors {
    pub previous: Option<Box<Concert>>,
    pub next: Option<Box<Concert>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Concert {
    pub id: i64,
    pub artist_id: i64,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub slug: String,
    pub venue: Option<Venue>,
    pub location: Location,
    pub era_id: Option<i64>,
    pub era_identifier: Option<String>,
    pub tour: Option<String>,
    pub has_setlist: bool,
    pub has_recordings: bool,
    pub has_media: bool,
    pub setlist: Option<Setlist>,
    pub neighbors: Option<ConcertNeighbors>,
}

impl Concert {
    /// Decodes the listing columns. Setlist and neighbors are left for the
    /// assembler.
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Concert {
            id: row.get_i64("concert_id")?,
            artist_id: row.get_i64("artist_id")?,
            date: row.get_date("date")?,
            notes: row.get_opt_text("notes")?,
            slug: row.get_text("concert_friendly_url")?,
            venue: Venue::from_row(row)?,
            location: Location::from_row(row)?,
            era_id: row.get_opt_i64("era_id")?,
            era_identifier: row.get_opt_text("era_identifier")?,
            tour: row.get_opt_text("tour_name")?,
            has_setlist: row.get_bool("has_setlist")?,
            has_recordings: row.get_bool("has_recordings")?,
            has_media: row.get_bool("has_media")?,
            setlist: None,
            neighbors: None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConcertDetails {
    pub concert: Concert,
    pub media: MediaGroups,
    pub recordings: Vec<Recording>,
}
