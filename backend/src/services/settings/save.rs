//! # Settings Save Service
//!
//! Backs `POST /api/settings/save`.
//!
//! ## Workflow
//!
//! 1.  **Payload**: the body is a flat JSON object with the settings form's
//!     field names. Values may be strings, numbers or booleans; anything else
//!     is treated as absent. Unknown keys are ignored.
//!
//! 2.  **Resolution**: the stored configuration is loaded and the payload is
//!     resolved against it. Only the placement corner inherits from the stored
//!     configuration; every other field is taken from the payload or defaulted.
//!
//! 3.  **Persistence**: the resolved configuration replaces the stored row and
//!     is returned to the caller.

use actix_web::{web, HttpResponse};
use common::model::raw::RawSettingsInput;
use log::debug;

use crate::error::SettingsError;
use crate::state::AppState;

/// Actix web handler for the `POST /api/settings/save` endpoint.
///
/// # Returns
/// - `200 OK` with the resolved `CanonicalConfig` as JSON.
/// - `503 Service Unavailable` if the settings database cannot be read or written.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<RawSettingsInput>,
) -> Result<HttpResponse, SettingsError> {
    debug!("saving settings: {:?}", payload);
    let config = state.store.apply(&payload)?;
    Ok(HttpResponse::Ok().json(config))
}
