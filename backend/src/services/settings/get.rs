//! # Settings Retrieval Service
//!
//! Backs `GET /api/settings`. The stored row is run through the resolver in
//! fill-defaults mode by [`SettingsStore::load`](crate::store::SettingsStore::load),
//! so the response is always a complete canonical configuration, even for a
//! fresh database or a row written by an older revision.

use actix_web::{web, HttpResponse};

use crate::error::SettingsError;
use crate::state::AppState;

/// Actix web handler for the `GET /api/settings` endpoint.
///
/// # Returns
/// - `200 OK` with the `CanonicalConfig` as JSON.
/// - `503 Service Unavailable` if the settings database cannot be read.
pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, SettingsError> {
    let config = state.store.load()?;
    Ok(HttpResponse::Ok().json(config))
}
