mod file_config;

pub use file_config::FileConfig;

use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that take part in config resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub archive_db: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub read_pool_size: usize,
    pub primary_artist: String,
    pub static_uri: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub archive_db: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub read_pool_size: usize,
    pub primary_artist: String,
    pub static_uri: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let archive_db = file
            .archive_db
            .map(PathBuf::from)
            .or_else(|| cli.archive_db.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("archive_db must be given on the command line or in the config file")
            })?;

        // The file itself may be created on first start, its directory may not.
        let parent = archive_db
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        if !parent.is_dir() {
            bail!("Archive database directory does not exist: {:?}", parent);
        }

        let logging_level = match file.logging_level {
            Some(raw) => match parse_logging_level(&raw) {
                Some(level) => level,
                None => bail!("Unknown logging level in config file: {}", raw),
            },
            None => cli.logging_level.clone(),
        };

        let read_pool_size = file.read_pool_size.unwrap_or(cli.read_pool_size);
        if read_pool_size == 0 {
            bail!("read_pool_size must be at least 1");
        }

        let primary_artist = file
            .primary_artist
            .unwrap_or_else(|| cli.primary_artist.clone());
        if primary_artist.trim().is_empty() {
            bail!("primary_artist must not be empty");
        }

        Ok(Self {
            archive_db,
            port: file.port.unwrap_or(cli.port),
            metrics_port: file.metrics_port.unwrap_or(cli.metrics_port),
            logging_level,
            content_cache_age_sec: file
                .content_cache_age_sec
                .unwrap_or(cli.content_cache_age_sec),
            read_pool_size,
            primary_artist,
            static_uri: file.static_uri.unwrap_or_else(|| cli.static_uri.clone()),
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            content_cache_age_sec: self.content_cache_age_sec,
            primary_artist: self.primary_artist.clone(),
            static_uri: self.static_uri.clone(),
        }
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
