//! # Settings Service Module
//!
//! Routes under `/api/settings` read and update the persisted widget
//! configuration.
//!
//! ## Sub-modules:
//! - `get`: returns the current canonical configuration.
//! - `save`: resolves a submitted settings map against the stored
//!   configuration and persists the result.

mod get;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all settings-related API endpoints.
const API_PATH: &str = "/api/settings";

/// Configures and returns the Actix `Scope` for the settings routes.
///
/// # Registered Routes:
///
/// *   **`GET ""`**:
///     - **Handler**: `get::process`
///     - **Description**: Returns the stored configuration as canonical JSON,
///       with defaults filled in for anything missing.
///
/// *   **`POST /save`**:
///     - **Handler**: `save::process`
///     - **Description**: Accepts a flat settings object (the same field names
///       the settings form posts, legacy aliases included). Invalid values fall
///       back to their defaults, so the request only fails when the store
///       itself is unavailable.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("/save", post().to(save::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::DirectoryIconOverrides;
    use crate::state::AppState;
    use crate::store::SettingsStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::config::{CanonicalConfig, Corner, Layout};
    use serde_json::json;

    fn state(dir: &tempfile::TempDir) -> AppState {
        AppState::new(
            SettingsStore::new(dir.path().join("dock.sqlite")),
            DirectoryIconOverrides::new(dir.path().join("icons")),
        )
    }

    #[actix_web::test]
    async fn get_returns_defaults_for_a_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&dir)))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let config: CanonicalConfig = test::call_and_read_body_json(&app, req).await;
        assert_eq!(config, CanonicalConfig::default());
    }

    #[actix_web::test]
    async fn save_resolves_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(&dir)))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/settings/save")
            .set_json(json!({
                "phone_number": "+48 600 000 000",
                "layout": "floating",
                "position": "left",
                "vertical": "top",
                "bar_color": "not-a-color",
                "offset_x": 24,
            }))
            .to_request();
        let saved: CanonicalConfig = test::call_and_read_body_json(&app, req).await;
        assert_eq!(saved.layout, Layout::Floating);
        assert_eq!(saved.corner, Corner::TopLeft);
        assert_eq!(saved.bar_color.as_str(), "#1e73be");
        assert_eq!(saved.offset.x, 24);

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let loaded: CanonicalConfig = test::call_and_read_body_json(&app, req).await;
        assert_eq!(loaded, saved);
    }

    #[actix_web::test]
    async fn unavailable_store_maps_to_503() {
        let dir = tempfile::tempdir().unwrap();
        let broken = AppState::new(
            SettingsStore::new(dir.path().join("missing").join("dock.sqlite")),
            DirectoryIconOverrides::new(dir.path()),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(broken))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
