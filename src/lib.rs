//! Concert history archive: setlists, recordings and song statistics of an
//! artist's live performances, served as JSON over HTTP.

pub mod archive;
pub mod archive_store;
pub mod config;
pub mod server;
pub mod sqlite_persistence;
