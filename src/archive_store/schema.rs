//! SQLite schema for the live archive.
//!
//! Locations are normalized into country/state/city lookup tables, setlists
//! are stored per version, and recordings and media hang off concerts through
//! mapping tables. Dates are ISO-8601 `YYYY-MM-DD` text.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, ForeignKey, SqlType, Table, VersionedSchema};

const ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "artist_id",
};

const CONCERT_FK: ForeignKey = ForeignKey {
    foreign_table: "concerts",
    foreign_column: "concert_id",
};

const SONG_FK: ForeignKey = ForeignKey {
    foreign_table: "songs",
    foreign_column: "song_id",
};

const RECORDING_FK: ForeignKey = ForeignKey {
    foreign_table: "recordings",
    foreign_column: "recording_id",
};

// =============================================================================
// Artists, places, eras and tours
// =============================================================================

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("artist_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("artist_name", &SqlType::Text, non_null = true),
        sqlite_column!("short_name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["short_name"]],
};

const COUNTRIES_TABLE: Table = Table {
    name: "countries",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const STATES_TABLE: Table = Table {
    name: "states",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const CITIES_TABLE: Table = Table {
    name: "cities",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

/// Any of the three parts may be missing independently.
const LOCATIONS_TABLE: Table = Table {
    name: "locations",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("fk_country_id", &SqlType::Integer),
        sqlite_column!("fk_state_id", &SqlType::Integer),
        sqlite_column!("fk_city_id", &SqlType::Integer),
    ],
    indices: &[],
    unique_constraints: &[],
};

const VENUES_TABLE: Table = Table {
    name: "venues",
    columns: &[
        sqlite_column!("venue_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("venue_name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const ERAS_TABLE: Table = Table {
    name: "eras",
    columns: &[
        sqlite_column!("era_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
        sqlite_column!("era_identifier", &SqlType::Text, non_null = true),
        sqlite_column!("era_tile", &SqlType::Text),
    ],
    indices: &[("idx_eras_artist", "artist_id")],
    unique_constraints: &[&["artist_id", "era_identifier"]],
};

const CONCERT_TOURS_TABLE: Table = Table {
    name: "concert_tours",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

// =============================================================================
// Concerts, songs and setlists
// =============================================================================

const CONCERTS_TABLE: Table = Table {
    name: "concerts",
    columns: &[
        sqlite_column!("concert_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
        sqlite_column!("date", &SqlType::Text, non_null = true),
        sqlite_column!("notes", &SqlType::Text),
        sqlite_column!("concert_friendly_url", &SqlType::Text, non_null = true),
        sqlite_column!("venue_id", &SqlType::Integer),
        sqlite_column!("location_id", &SqlType::Integer),
        sqlite_column!("era_id", &SqlType::Integer),
        sqlite_column!("tour_id", &SqlType::Integer),
    ],
    indices: &[
        ("idx_concerts_artist_date", "artist_id, date"),
        ("idx_concerts_era", "era_id"),
    ],
    unique_constraints: &[&["artist_id", "concert_friendly_url"]],
};

/// `original_song_id` points at the covered song, possibly another artist's.
const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("song_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("song_url", &SqlType::Text, non_null = true),
        sqlite_column!("lyrics", &SqlType::Text),
        sqlite_column!("notes", &SqlType::Text),
        sqlite_column!("original_song_id", &SqlType::Integer),
    ],
    indices: &[("idx_songs_artist", "artist_id")],
    unique_constraints: &[&["artist_id", "song_url"]],
};

/// One row per setlist version of a concert.
const SETLIST_VERSIONS_TABLE: Table = Table {
    name: "setlist_versions",
    columns: &[
        sqlite_column!(
            "concert_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&CONCERT_FK)
        ),
        sqlite_column!("version", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "complete",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
    ],
    indices: &[],
    unique_constraints: &[&["concert_id", "version"]],
};

const SETLIST_ENTRIES_TABLE: Table = Table {
    name: "setlist_entries",
    columns: &[
        sqlite_column!(
            "concert_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&CONCERT_FK)
        ),
        sqlite_column!("version", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "song_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&SONG_FK)
        ),
        sqlite_column!("song_order", &SqlType::Integer, non_null = true),
        sqlite_column!("notes", &SqlType::Text),
    ],
    indices: &[
        ("idx_setlist_entries_concert_version", "concert_id, version"),
        ("idx_setlist_entries_song", "song_id"),
    ],
    unique_constraints: &[],
};

// =============================================================================
// Recordings
// =============================================================================

const SOURCE_TYPES_TABLE: Table = Table {
    name: "source_types",
    columns: &[
        sqlite_column!("source_type_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("source_name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const RECORDING_TYPES_TABLE: Table = Table {
    name: "recording_types",
    columns: &[
        sqlite_column!("recording_type_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("recording_name", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const RECORDINGS_TABLE: Table = Table {
    name: "recordings",
    columns: &[
        sqlite_column!("recording_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("source_type_id", &SqlType::Integer),
        sqlite_column!("recording_type_id", &SqlType::Integer),
        sqlite_column!("taper", &SqlType::Text),
        sqlite_column!("length", &SqlType::Integer),
        sqlite_column!("lineage", &SqlType::Text),
        sqlite_column!("notes", &SqlType::Text),
        sqlite_column!(
            "complete",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
    ],
    indices: &[],
    unique_constraints: &[],
};

/// A recording may be linked from several concerts and vice versa.
const CONCERT_RECORDING_MAPPING_TABLE: Table = Table {
    name: "concert_recording_mapping",
    columns: &[
        sqlite_column!(
            "concert_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&CONCERT_FK)
        ),
        sqlite_column!(
            "recording_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&RECORDING_FK)
        ),
    ],
    indices: &[("idx_concert_recording_concert", "concert_id")],
    unique_constraints: &[&["concert_id", "recording_id"]],
};

const RECORDING_FILES_TABLE: Table = Table {
    name: "recording_files",
    columns: &[
        sqlite_column!(
            "recording_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&RECORDING_FK)
        ),
        sqlite_column!("file_url", &SqlType::Text, non_null = true),
        sqlite_column!(
            "is_public",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
    ],
    indices: &[("idx_recording_files_recording", "recording_id")],
    unique_constraints: &[],
};

const RECORDING_PREVIEW_URLS_TABLE: Table = Table {
    name: "recording_preview_urls",
    columns: &[
        sqlite_column!(
            "recording_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&RECORDING_FK)
        ),
        sqlite_column!("preview_url", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_recording_previews_recording", "recording_id")],
    unique_constraints: &[],
};

// =============================================================================
// Media and updates
// =============================================================================

const MEDIA_TABLE: Table = Table {
    name: "media",
    columns: &[
        sqlite_column!("media_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("media_url", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const MEDIA_TYPES_TABLE: Table = Table {
    name: "media_types",
    columns: &[
        sqlite_column!("media_type_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("media_type", &SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const MEDIA_CONCERT_TABLE: Table = Table {
    name: "media_concert",
    columns: &[
        sqlite_column!(
            "concert_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&CONCERT_FK)
        ),
        sqlite_column!("media_id", &SqlType::Integer, non_null = true),
        sqlite_column!("media_type_id", &SqlType::Integer),
    ],
    indices: &[("idx_media_concert_concert", "concert_id")],
    unique_constraints: &[],
};

const UPDATES_TABLE: Table = Table {
    name: "updates",
    columns: &[
        sqlite_column!("update_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("update_date", &SqlType::Text, non_null = true),
        sqlite_column!(
            "concert_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&CONCERT_FK)
        ),
        sqlite_column!("blurb", &SqlType::Text),
    ],
    indices: &[("idx_updates_date", "update_date")],
    unique_constraints: &[],
};

pub const ARCHIVE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTISTS_TABLE,
        COUNTRIES_TABLE,
        STATES_TABLE,
        CITIES_TABLE,
        LOCATIONS_TABLE,
        VENUES_TABLE,
        ERAS_TABLE,
        CONCERT_TOURS_TABLE,
        CONCERTS_TABLE,
        SONGS_TABLE,
        SETLIST_VERSIONS_TABLE,
        SETLIST_ENTRIES_TABLE,
        SOURCE_TYPES_TABLE,
        RECORDING_TYPES_TABLE,
        RECORDINGS_TABLE,
        CONCERT_RECORDING_MAPPING_TABLE,
        RECORDING_FILES_TABLE,
        RECORDING_PREVIEW_URLS_TABLE,
        MEDIA_TABLE,
        MEDIA_TYPES_TABLE,
        MEDIA_CONCERT_TABLE,
        UPDATES_TABLE,
    ],
}];
