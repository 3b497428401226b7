//! Test archive creation
//!
//! The server only ever reads the archive, so the data goes in through a
//! separate connection with plain SQL, after the store created the schema.

use anyhow::Result;
use live_archive_server::archive_store::SqliteArchiveStore;
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

const TEST_ARCHIVE_SQL: &str = "
    INSERT INTO artists (artist_id, artist_name, short_name) VALUES
        (1, 'Rage Against the Machine', 'rage');

    INSERT INTO countries (id, name) VALUES (1, 'Mexico'), (2, 'United States');
    INSERT INTO states (id, name) VALUES (1, 'New York'), (2, 'Massachusetts');
    INSERT INTO cities (id, name) VALUES (1, 'Mexico City'), (2, 'New York'), (3, 'Boston');
    INSERT INTO locations (id, fk_country_id, fk_state_id, fk_city_id) VALUES
        (1, 1, NULL, 1),
        (2, 2, 1, 2),
        (3, 2, 2, 3);
    INSERT INTO venues (venue_id, venue_name) VALUES
        (1, 'Palacio de los Deportes'),
        (2, 'Roseland Ballroom');

    INSERT INTO eras (era_id, artist_id, era_identifier, era_tile) VALUES
        (1, 1, 'evil-empire', 'evil-empire.jpg');
    INSERT INTO concert_tours (id, name) VALUES (1, 'Evil Empire Tour');

    INSERT INTO concerts
        (concert_id, artist_id, date, notes, concert_friendly_url, venue_id, location_id, era_id, tour_id)
    VALUES
        (1, 1, '1996-04-10', 'Filmed', 'mexico-city', 1, 1, 1, 1),
        (2, 1, '1997-08-01', NULL, 'new-york', 2, 2, 1, 1),
        (3, 1, '1997-08-02', NULL, 'boston', NULL, 3, NULL, NULL),
        (4, 1, '2999-01-01', NULL, 'reunion', NULL, NULL, NULL, NULL);

    INSERT INTO songs (song_id, artist_id, title, song_url, lyrics, notes, original_song_id) VALUES
        (1, 1, 'Bulls on Parade', 'bulls-on-parade', 'Come wit it now', NULL, NULL),
        (2, 1, 'People of the Sun', 'people-of-the-sun', NULL, NULL, NULL),
        (3, 1, 'Down Rodeo', 'down-rodeo', NULL, NULL, NULL);

    INSERT INTO setlist_versions (concert_id, version, complete) VALUES
        (1, 1, 1),
        (2, 1, 0),
        (2, 2, 1),
        (3, 1, 1);
    INSERT INTO setlist_entries (concert_id, version, song_id, song_order, notes) VALUES
        (1, 1, 1, 1, NULL),
        (1, 1, 2, 2, NULL),
        (2, 1, 2, 1, NULL),
        (2, 2, 1, 1, NULL),
        (2, 2, 2, 2, NULL),
        (2, 2, 1, 3, 'Encore'),
        (3, 1, 1, 1, NULL);

    INSERT INTO source_types (source_type_id, source_name) VALUES (1, 'Audience');
    INSERT INTO recording_types (recording_type_id, recording_name) VALUES (1, 'FLAC');
    INSERT INTO recordings
        (recording_id, source_type_id, recording_type_id, taper, length, lineage, notes, complete)
    VALUES
        (1, 1, 1, NULL, 5400, NULL, NULL, 1);
    INSERT INTO concert_recording_mapping (concert_id, recording_id) VALUES (1, 1);
    INSERT INTO recording_files (recording_id, file_url, is_public) VALUES
        (1, 'mexico-city-1.flac', 1),
        (1, 'mexico-city-master.flac', 0);

    INSERT INTO media_types (media_type_id, media_type) VALUES (1, 'poster_flyer');
    INSERT INTO media (media_id, media_url) VALUES (1, 'mexico-city-poster.jpg');
    INSERT INTO media_concert (concert_id, media_id, media_type_id) VALUES (1, 1, 1);

    INSERT INTO updates (update_id, update_date, concert_id, blurb) VALUES
        (1, '2022-01-01', 1, 'Added audio'),
        (2, '2022-02-02', 2, 'New setlist');
";

/// Creates a temporary archive database filled with the test concerts.
/// Returns (temp_dir, archive_db_path)
pub fn create_test_archive() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("archive.db");

    // Creates the schema
    let _store = SqliteArchiveStore::new(&db_path, 1)?;

    let conn = Connection::open(&db_path)?;
    conn.execute_batch(TEST_ARCHIVE_SQL)?;

    Ok((dir, db_path))
}
