use super::RequestsLoggingLevel;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub metrics_port: u16,
    pub content_cache_age_sec: usize,
    /// Short name of the artist the home summary is about.
    pub primary_artist: String,
    /// Base URI media and recording files are served from, passed through to clients.
    pub static_uri: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3002,
            metrics_port: 9092,
            content_cache_age_sec: 3600,
            primary_artist: "rage".to_string(),
            static_uri: "https://ratmlive.sfo2.digitaloceanspaces.com".to_string(),
        }
    }
}
