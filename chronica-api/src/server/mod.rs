use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
};
use chronica_db::client::{BlogStore, DbError};
use json::Json;
use serde::Serialize;
use std::{path::Path, sync::Arc};
use thiserror::Error;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};
use tracing::error;

mod json;
mod routes;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, FromRef)]
pub struct ServerState {
    pub store: Arc<dyn BlogStore>,
}

/// Full application router: the JSON API under `/api`, static assets for
/// everything else, and the entry document as the fallback for unmatched
/// non-API paths so client-side navigation keeps working.
pub fn app(state: ServerState, static_dir: &Path) -> Router {
    let assets =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .merge(routes::routes())
        .route("/api", any(api_fallback))
        .route("/api/{*rest}", any(api_fallback))
        .method_not_allowed_fallback(api_fallback)
        .with_state(state)
        .fallback_service(assets)
        .layer(CorsLayer::permissive())
}

async fn api_fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("API endpoint not found: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error("Error fetching blogs: {0}")]
    ListBlogs(DbError),
    #[error("Error creating blog: {0}")]
    CreateBlog(DbError),
    #[error("Error saving contact: {0}")]
    CreateContact(DbError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_) | ServerError::PathRejection(_) => StatusCode::NOT_FOUND,
            ServerError::JsonRejection(_) => StatusCode::BAD_REQUEST,
            ServerError::JsonResponse(_) | ServerError::ListBlogs(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            // An unreachable store is a server-side condition on every
            // route; only a write the store itself rejects is the request's
            // fault.
            ServerError::CreateBlog(error) | ServerError::CreateContact(error) => {
                if error.is_unavailable() {
                    StatusCode::INTERNAL_SERVER_ERROR
                } else {
                    StatusCode::BAD_REQUEST
                }
            }
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        let error_response = ErrorResponse {
            message: self.to_string(),
        };
        (status, Json(error_response)).into_response()
    }
}
