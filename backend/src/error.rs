//! Errors of the settings store and their HTTP mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("settings serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResponseError for SettingsError {
    fn status_code(&self) -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(format!("Error accessing settings: {}", self))
    }
}
