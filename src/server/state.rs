use axum::extract::FromRef;
use std::time::Instant;

use crate::archive::ConcertArchive;

use super::ServerConfig;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub archive: ConcertArchive,
}

impl ServerState {
    pub fn new(config: ServerConfig, archive: ConcertArchive) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            archive,
        }
    }
}

impl FromRef<ServerState> for ConcertArchive {
    fn from_ref(input: &ServerState) -> Self {
        input.archive.clone()
    }
}
