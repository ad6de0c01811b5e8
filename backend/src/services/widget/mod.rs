//! # Widget Service Module
//!
//! `GET /api/widget` returns the rendered widget markup for hosts that
//! inject it into their own pages.

use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};

use crate::error::SettingsError;
use crate::state::AppState;

const API_PATH: &str = "/api/widget";

/// Configures and returns the Actix `Scope` for the widget route.
///
/// # Registered Routes:
///
/// *   **`GET ""`**:
///     - **Handler**: `process`
///     - **Description**: Rendered markup as `text/html`, or `204 No Content`
///       when no channel is enabled.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

async fn process(state: web::Data<AppState>) -> Result<HttpResponse, SettingsError> {
    Ok(match state.render_widget()? {
        Some(markup) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(markup),
        None => HttpResponse::NoContent().finish(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::DirectoryIconOverrides;
    use crate::store::SettingsStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use common::model::raw::RawSettingsInput;
    use serde_json::json;

    #[actix_web::test]
    async fn renders_once_a_channel_is_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("dock.sqlite"));
        let state = AppState::new(store.clone(), DirectoryIconOverrides::new(dir.path()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(configure_routes()),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/widget").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        store
            .apply(&RawSettingsInput::from_value(&json!({ "email_address": "hello@example.com" })))
            .unwrap();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/widget").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("mailto:hello@example.com"));
        assert!(body.contains(r#"data-layout="bar""#));
    }
}
