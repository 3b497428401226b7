//! SQL fragments shared by the archive queries.
//!
//! These expand to string literals so statements can be assembled with
//! `concat!` and stay fully static. Values are always bound as parameters.

/// Song columns shared by every song-shaped query. Expects `s` for the song
/// and `oa` for the covered song's artist (see [`original_artist_joins`]).
macro_rules! song_columns {
    () => {
        "s.song_id, s.artist_id, s.title, s.song_url, s.notes, s.original_song_id, \
         oa.artist_name AS original_artist_name"
    };
}

/// Resolves a cover's original artist, one hop only.
macro_rules! original_artist_joins {
    () => {
        " LEFT JOIN songs os ON os.song_id = s.original_song_id \
          LEFT JOIN artists oa ON oa.artist_id = os.artist_id "
    };
}

/// Latest setlist version of every concert that has one, as `(concert_id, version)`.
macro_rules! latest_versions {
    () => {
        "SELECT concert_id, MAX(version) AS version FROM setlist_versions GROUP BY concert_id"
    };
}

/// Listing columns of a concert, `c`, with its place, era and tour joined in.
///
/// The `has_*` flags are existence checks so listings never need a query per
/// concert. They count any linked setlist version, recording or media item.
macro_rules! concert_select {
    () => {
        "SELECT c.concert_id, c.artist_id, c.date, c.notes, c.concert_friendly_url, \
                v.venue_name, co.name AS country, st.name AS state, ci.name AS city, \
                c.era_id, e.era_identifier, ct.name AS tour_name, \
                EXISTS (SELECT 1 FROM setlist_versions sv \
                        WHERE sv.concert_id = c.concert_id) AS has_setlist, \
                EXISTS (SELECT 1 FROM concert_recording_mapping crm \
                        WHERE crm.concert_id = c.concert_id) AS has_recordings, \
                EXISTS (SELECT 1 FROM media_concert mc \
                        WHERE mc.concert_id = c.concert_id) AS has_media \
         FROM concerts c \
         LEFT JOIN venues v ON v.venue_id = c.venue_id \
         LEFT JOIN locations l ON l.id = c.location_id \
         LEFT JOIN countries co ON co.id = l.fk_country_id \
         LEFT JOIN states st ON st.id = l.fk_state_id \
         LEFT JOIN cities ci ON ci.id = l.fk_city_id \
         LEFT JOIN eras e ON e.era_id = c.era_id \
         LEFT JOIN concert_tours ct ON ct.id = c.tour_id "
    };
}

pub(crate) use concert_select;
pub(crate) use latest_versions;
pub(crate) use original_artist_joins;
pub(crate) use song_columns;
