//! HTTP mapping of archive failures.

use crate::archive::ArchiveError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

/// Error kind attached to failed responses, so the request logging layer can
/// count it against the matched route.
#[derive(Clone, Copy, Debug)]
pub struct ErrorKind(pub &'static str);

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ArchiveError {
    fn into_response(self) -> Response {
        let status = match &self {
            ArchiveError::NotFound(_) => StatusCode::NOT_FOUND,
            ArchiveError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ArchiveError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        match &self {
            ArchiveError::StoreUnavailable(err) => error!("Archive store failure: {}", err),
            other => debug!("Request rejected: {}", other),
        }

        let kind = self.kind();
        let body = ErrorBody {
            error: kind,
            message: self.to_string(),
        };
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorKind(kind));
        response
    }
}
