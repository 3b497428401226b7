use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use live_archive_server::archive::ConcertArchive;
use live_archive_server::archive_store::SqliteArchiveStore;
use live_archive_server::config::{AppConfig, CliConfig, FileConfig};
use live_archive_server::server::{self, run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// SQLite archive database, created with an empty schema if missing.
    #[clap(value_parser = parse_path)]
    pub archive_db: Option<PathBuf>,

    /// TOML file whose values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    #[clap(short, long, default_value_t = 3002)]
    pub port: u16,

    #[clap(long, default_value_t = 9092)]
    pub metrics_port: u16,

    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    #[clap(long, default_value_t = 3600)]
    pub content_cache_age_sec: usize,

    #[clap(long, default_value_t = 4)]
    pub read_pool_size: usize,

    #[clap(long, default_value = "rage")]
    pub primary_artist: String,

    #[clap(long, default_value = "https://ratmlive.sfo2.digitaloceanspaces.com")]
    pub static_uri: String,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            archive_db: self.archive_db.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            content_cache_age_sec: self.content_cache_age_sec,
            read_pool_size: self.read_pool_size,
            primary_artist: self.primary_artist.clone(),
            static_uri: self.static_uri.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Initializing metrics...");
    server::metrics::init_metrics();

    info!("Opening SQLite archive database at {:?}...", config.archive_db);
    let store = SqliteArchiveStore::new(&config.archive_db, config.read_pool_size)?;
    server::metrics::init_archive_metrics(&store.counts()?);

    let archive = ConcertArchive::new(Arc::new(store));

    info!(
        "Ready to serve '{}' at port {}!",
        config.primary_artist, config.port
    );
    run_server(config.server_config(), archive).await
}
