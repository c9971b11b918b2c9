use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::records::{RecordSource, RecordStore, RecordsError};
use crate::stats::ViewCache;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub source: Arc<dyn RecordSource>,
    pub views: Arc<Mutex<ViewCache>>,
}

impl AppState {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            store: RecordStore::new(),
            source,
            views: Arc::new(Mutex::new(ViewCache::new())),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Records(#[from] RecordsError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Records(
                RecordsError::Loading | RecordsError::NotLoaded | RecordsError::Unavailable(_),
            ) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Records(RecordsError::Http(_) | RecordsError::Decode(_)) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
