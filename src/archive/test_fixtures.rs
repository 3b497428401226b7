//! Shared archive fixtures for unit tests.

use super::models::Artist;
use crate::archive_store::{ArchiveStore, Row, SqliteArchiveStore, StoreError, StoreSession, Value};
use rusqlite::Connection;
use std::cell::RefCell;
use std::path::PathBuf;
use tempfile::TempDir;

pub const RAGE_ID: i64 = 1;
pub const DYLAN_ID: i64 = 2;

pub const BOMBTRACK_ID: i64 = 1;
pub const KILLING_ID: i64 = 2;
pub const MAGGIES_FARM_ID: i64 = 3;
pub const FREEDOM_ID: i64 = 4;
pub const DYLAN_MAGGIES_FARM_ID: i64 = 10;

pub const CONCERT_A_ID: i64 = 1;
pub const CONCERT_B_ID: i64 = 2;
pub const CONCERT_C_ID: i64 = 3;

/// Rage: concerts `a` (1991-03-01), `b` (1992-07-04), `c` (1993-01-01) and a
/// far future `farewell`. Concert `b` has two setlist versions; `freedom` was
/// never played; `a` plays `bombtrack` twice.
const RAGE_ARCHIVE_SQL: &str = "
    INSERT INTO artists (artist_id, artist_name, short_name) VALUES
        (1, 'Rage Against the Machine', 'rage'),
        (2, 'Bob Dylan', 'dylan');

    INSERT INTO countries (id, name) VALUES (1, 'United States'), (2, 'Germany');
    INSERT INTO states (id, name) VALUES (1, 'California');
    INSERT INTO cities (id, name) VALUES (1, 'Los Angeles'), (2, 'Berlin');
    INSERT INTO locations (id, fk_country_id, fk_state_id, fk_city_id) VALUES
        (1, 1, 1, 1),
        (2, 2, NULL, 2),
        (3, 1, NULL, NULL);
    INSERT INTO venues (venue_id, venue_name) VALUES
        (1, 'Whisky a Go Go'),
        (2, 'Huxleys Neue Welt');

    INSERT INTO eras (era_id, artist_id, era_identifier, era_tile) VALUES
        (1, 1, 'early-days', 'early.jpg'),
        (2, 1, 'lollapalooza', NULL);
    INSERT INTO concert_tours (id, name) VALUES (1, 'Lollapalooza 1993');

    INSERT INTO concerts
        (concert_id, artist_id, date, notes, concert_friendly_url, venue_id, location_id, era_id, tour_id)
    VALUES
        (1, 1, '1991-03-01', 'First show', 'a', 1, 1, 1, NULL),
        (2, 1, '1992-07-04', NULL, 'b', 2, 2, 1, NULL),
        (3, 1, '1993-01-01', NULL, 'c', NULL, 3, 2, 1),
        (4, 1, '2999-06-01', NULL, 'farewell', NULL, NULL, NULL, NULL),
        (5, 2, '1965-07-25', NULL, 'newport', NULL, NULL, NULL, NULL);

    INSERT INTO songs (song_id, artist_id, title, song_url, lyrics, notes, original_song_id) VALUES
        (1, 1, 'Bombtrack', 'bombtrack', '
   Burn, burn, yes ya gonna burn', NULL, NULL),
        (2, 1, 'Killing in the Name', 'killing-in-the-name', NULL, NULL, NULL),
        (3, 1, 'Maggie''s Farm', 'maggies-farm', NULL, 'Cover', 10),
        (4, 1, 'Freedom', 'freedom', NULL, NULL, NULL),
        (10, 2, 'Maggie''s Farm', 'maggies-farm', NULL, NULL, NULL);

    INSERT INTO setlist_versions (concert_id, version, complete) VALUES
        (1, 1, 1),
        (2, 1, 1),
        (2, 2, 0),
        (3, 1, 1),
        (5, 1, 1);
    INSERT INTO setlist_entries (concert_id, version, song_id, song_order, notes) VALUES
        (1, 1, 1, 1, NULL),
        (1, 1, 2, 2, 'Extended intro'),
        (1, 1, 1, 3, 'Encore'),
        (2, 1, 1, 1, NULL),
        (2, 2, 2, 1, NULL),
        (3, 1, 3, 2, NULL),
        (3, 1, 2, 1, NULL),
        (5, 1, 10, 1, NULL);

    INSERT INTO source_types (source_type_id, source_name) VALUES (1, 'Audience'), (2, 'Soundboard');
    INSERT INTO recording_types (recording_type_id, recording_name) VALUES (1, 'FLAC'), (2, 'MP3');
    INSERT INTO recordings
        (recording_id, source_type_id, recording_type_id, taper, length, lineage, notes, complete)
    VALUES
        (1, 1, 1, 'Zack', 3600, 'DAT > WAV > FLAC', NULL, 1),
        (2, 2, 2, NULL, NULL, NULL, 'Partial', 0);
    INSERT INTO concert_recording_mapping (concert_id, recording_id) VALUES (1, 1), (1, 2), (2, 2);
    INSERT INTO recording_files (recording_id, file_url, is_public) VALUES
        (1, 'a-1.flac', 1),
        (1, 'a-private.flac', 0),
        (1, 'a-2.flac', 1);
    INSERT INTO recording_preview_urls (recording_id, preview_url) VALUES (1, 'a-preview.mp3');

    INSERT INTO media_types (media_type_id, media_type) VALUES
        (1, 'setlist'), (2, 'ticket'), (3, 'poster_flyer'),
        (4, 'live_shot'), (5, 'tour_itinerary'), (6, 'sticker');
    INSERT INTO media (media_id, media_url) VALUES (1, 'a-ticket.jpg'), (2, 'a-sticker.jpg');
    INSERT INTO media_concert (concert_id, media_id, media_type_id) VALUES (1, 1, 2), (1, 2, 6);

    INSERT INTO updates (update_id, update_date, concert_id, blurb) VALUES
        (1, '2020-01-02', 1, 'Added a recording'),
        (2, '2021-05-05', 3, 'Added the setlist'),
        (3, '2021-05-05', 2, NULL);
";

pub struct ArchiveFixture {
    pub store: SqliteArchiveStore,
    pub db_path: PathBuf,
    _temp_dir: TempDir,
}

impl ArchiveFixture {
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("archive.db");
        let store = SqliteArchiveStore::new(&db_path, 2).unwrap();
        ArchiveFixture {
            store,
            db_path,
            _temp_dir: temp_dir,
        }
    }

    pub fn rage() -> Self {
        let fixture = Self::empty();
        fixture.execute_batch(RAGE_ARCHIVE_SQL);
        fixture
    }

    /// Writes through a separate connection; the store itself is read-only.
    pub fn execute_batch(&self, sql: &str) {
        let conn = Connection::open(&self.db_path).unwrap();
        conn.execute_batch(sql).unwrap();
    }

    pub fn session(&self) -> Box<dyn StoreSession + '_> {
        self.store.session().unwrap()
    }

    pub fn rage_artist(&self) -> Artist {
        Artist::new(RAGE_ID, "Rage Against the Machine", "rage")
    }

    pub fn dylan_artist(&self) -> Artist {
        Artist::new(DYLAN_ID, "Bob Dylan", "dylan")
    }
}

/// Records every statement executed through it.
pub struct CountingSession<'a> {
    inner: Box<dyn StoreSession + 'a>,
    executed: RefCell<Vec<String>>,
}

impl<'a> CountingSession<'a> {
    pub fn new(inner: Box<dyn StoreSession + 'a>) -> Self {
        CountingSession {
            inner,
            executed: RefCell::new(Vec::new()),
        }
    }

    pub fn count(&self, sql: &str) -> usize {
        self.executed.borrow().iter().filter(|s| *s == sql).count()
    }

    pub fn total(&self) -> usize {
        self.executed.borrow().len()
    }
}

impl StoreSession for CountingSession<'_> {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, StoreError> {
        self.executed.borrow_mut().push(sql.to_string());
        self.inner.query(sql, params)
    }
}

/// Fails every statement, as a store that went away would.
pub struct FailingSession;

impl StoreSession for FailingSession {
    fn query(&self, _sql: &str, _params: &[Value]) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
