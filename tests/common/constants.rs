//! Shared constants for end-to-end tests
//!
//! They describe the archive built by the fixtures. When the test data
//! changes, update only this file and `fixtures.rs`.

// ============================================================================
// Test Archive Slugs
// ============================================================================

pub const ARTIST: &str = "rage";
pub const ARTIST_NAME: &str = "Rage Against the Machine";

/// 1996-04-10, the oldest concert; has media and a recording.
pub const CONCERT_MEXICO_CITY: &str = "mexico-city";

/// 1997-08-01, two setlist versions.
pub const CONCERT_NEW_YORK: &str = "new-york";

/// 1997-08-02, outside any era.
pub const CONCERT_BOSTON: &str = "boston";

/// Far in the future, so always upcoming.
pub const CONCERT_REUNION: &str = "reunion";

pub const ERA: &str = "evil-empire";

pub const SONG_BULLS: &str = "bulls-on-parade";
pub const SONG_PEOPLE: &str = "people-of-the-sun";

/// Never played anywhere.
pub const SONG_DOWN_RODEO: &str = "down-rodeo";

pub const BULLS_PERFORMANCES: u64 = 3;
pub const PEOPLE_PERFORMANCES: u64 = 2;

pub const CONCERT_COUNT: usize = 4;
pub const UPDATE_COUNT: usize = 2;

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
