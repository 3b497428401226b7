pub mod config;
mod error_response;
mod http_layers;
pub mod metrics;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error_response::ErrorKind;
pub use http_layers::*;
pub use server::{make_app, make_metrics_app, run_server};
