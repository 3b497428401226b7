use anyhow::{Context, Result};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::metrics::metrics_handler;
use super::{http_cache, log_requests, state::ServerState, ServerConfig};
#[cfg(feature = "slowdown")]
use super::slowdown_request;
use crate::archive::{
    ArchiveError, Artist, Concert, ConcertArchive, ConcertFetch, HomeSummary, NotFoundKind,
    OptionExt, SongCount, SongDetail, Year,
};

type ApiResult = Result<Response, ArchiveError>;

#[derive(Serialize)]
struct HomeView {
    uptime: String,
    static_uri: String,
    #[serde(flatten)]
    summary: HomeSummary,
}

#[derive(Serialize)]
struct SongsView {
    songs: Vec<SongCount>,
    max_performance_count: usize,
}

#[derive(Serialize)]
struct SongView<'a> {
    #[serde(flatten)]
    detail: &'a SongDetail,
    first_performance: Option<&'a Concert>,
    latest_performance: Option<&'a Concert>,
}

#[derive(Deserialize, Debug, Default)]
struct ConcertsQuery {
    year: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct LimitQuery {
    limit: Option<String>,
}

fn parse_limit(raw: &str) -> Result<usize, ArchiveError> {
    raw.parse::<usize>()
        .map_err(|_| ArchiveError::InvalidInput(format!("'{}' is not a valid limit", raw)))
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

fn resolve_artist(archive: &ConcertArchive, short_name: &str) -> Result<Artist, ArchiveError> {
    archive
        .get_artist(short_name)?
        .or_not_found(NotFoundKind::Artist)
}

async fn home(State(state): State<ServerState>) -> ApiResult {
    let summary = state.archive.home_summary(&state.config.primary_artist)?;
    Ok(Json(HomeView {
        uptime: format_uptime(state.start_time.elapsed()),
        static_uri: state.config.static_uri.clone(),
        summary,
    })
    .into_response())
}

async fn get_update_archive(State(archive): State<ConcertArchive>) -> ApiResult {
    Ok(Json(archive.recent_updates(None)?).into_response())
}

async fn get_artist(
    State(archive): State<ConcertArchive>,
    Path(artist): Path<String>,
) -> ApiResult {
    Ok(Json(resolve_artist(&archive, &artist)?).into_response())
}

async fn get_concerts(
    State(archive): State<ConcertArchive>,
    Path(artist): Path<String>,
    Query(query): Query<ConcertsQuery>,
) -> ApiResult {
    // Rejected before the store is touched.
    let year = query.year.as_deref().map(Year::parse).transpose()?;
    let artist = resolve_artist(&archive, &artist)?;
    Ok(Json(archive.list_concerts(&artist, year)?).into_response())
}

async fn get_upcoming_concerts(
    State(archive): State<ConcertArchive>,
    Path(artist): Path<String>,
    Query(query): Query<LimitQuery>,
) -> ApiResult {
    let limit = query.limit.as_deref().map(parse_limit).transpose()?;
    let artist = resolve_artist(&archive, &artist)?;
    Ok(Json(archive.list_upcoming(&artist, limit)?).into_response())
}

async fn get_concert(
    State(archive): State<ConcertArchive>,
    Path((artist, concert)): Path<(String, String)>,
) -> ApiResult {
    let artist = resolve_artist(&archive, &artist)?;
    let details = archive
        .get_concert_details(&artist, &concert)?
        .or_not_found(NotFoundKind::Concert)?;
    Ok(Json(details).into_response())
}

async fn get_songs(
    State(archive): State<ConcertArchive>,
    Path(artist): Path<String>,
) -> ApiResult {
    let artist = resolve_artist(&archive, &artist)?;
    let songs = archive.list_songs(&artist)?;
    let max_performance_count = songs.first().map(|s| s.count).unwrap_or(0);
    Ok(Json(SongsView {
        songs,
        max_performance_count,
    })
    .into_response())
}

async fn get_song(
    State(archive): State<ConcertArchive>,
    Path((artist, song)): Path<(String, String)>,
) -> ApiResult {
    let artist = resolve_artist(&archive, &artist)?;
    let detail = archive
        .get_song(&artist, &song)?
        .or_not_found(NotFoundKind::Song)?;
    Ok(Json(SongView {
        detail: &detail,
        first_performance: detail.first_performance(),
        latest_performance: detail.latest_performance(),
    })
    .into_response())
}

async fn get_eras(
    State(archive): State<ConcertArchive>,
    Path(artist): Path<String>,
) -> ApiResult {
    let artist = resolve_artist(&archive, &artist)?;
    Ok(Json(archive.list_eras(&artist)?).into_response())
}

async fn get_era(
    State(archive): State<ConcertArchive>,
    Path((artist, era)): Path<(String, String)>,
) -> ApiResult {
    let artist = resolve_artist(&archive, &artist)?;
    let listing = archive
        .list_by_era(&artist, &era)?
        .or_not_found(NotFoundKind::Era)?;
    Ok(Json(listing).into_response())
}

/// Used by neighbors' links: the concert alone, with its setlist but
/// without media or recordings.
async fn get_concert_summary(
    State(archive): State<ConcertArchive>,
    Path((artist, concert)): Path<(String, String)>,
) -> ApiResult {
    let artist = resolve_artist(&archive, &artist)?;
    let concert = archive
        .get_concert(&artist, &concert, ConcertFetch::FULL)?
        .or_not_found(NotFoundKind::Concert)?;
    Ok(Json(concert).into_response())
}

pub fn make_app(config: ServerConfig, archive: ConcertArchive) -> Result<Router> {
    let state = ServerState::new(config.clone(), archive);

    let content_routes: Router = Router::new()
        .route("/update-archive", get(get_update_archive))
        .route("/artists/{artist}", get(get_artist))
        .route("/artists/{artist}/concerts", get(get_concerts))
        .route("/artists/{artist}/upcoming", get(get_upcoming_concerts))
        .route("/artists/{artist}/concerts/{concert}", get(get_concert))
        .route(
            "/artists/{artist}/concerts/{concert}/summary",
            get(get_concert_summary),
        )
        .route("/artists/{artist}/songs", get(get_songs))
        .route("/artists/{artist}/songs/{song}", get(get_song))
        .route("/artists/{artist}/eras", get(get_eras))
        .route("/artists/{artist}/eras/{era}", get(get_era))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ))
        .with_state(state.clone());

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    let mut app: Router = home_router.merge(content_routes);

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(config: ServerConfig, archive: ConcertArchive) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, archive)?;

    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;
    info!("Serving metrics on port {}", metrics_port);
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            tracing::error!("Metrics server stopped: {}", err);
        }
    });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Serving the live archive on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
