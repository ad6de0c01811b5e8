mod config;
mod error;
mod icons;
mod renderer;
mod services;
mod state;
mod store;

use crate::config::AppConfig;
use crate::icons::DirectoryIconOverrides;
use crate::state::AppState;
use crate::store::SettingsStore;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded frontend bundle. `index.html` doubles as the demo host
/// page and gets the rendered widget injected before `</body>`.
async fn serve_embedded(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(_) if file_path == "index.html" => serve_index(&state),
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => serve_index(&state),
    }
}

fn serve_index(state: &AppState) -> HttpResponse {
    let Some(index) = STATIC_DIR.get_file("index.html") else {
        return HttpResponse::NotFound().body("Not Found");
    };
    let page = String::from_utf8_lossy(index.contents());

    let widget = match state.render_widget() {
        Ok(widget) => widget.unwrap_or_default(),
        Err(e) => {
            warn!("widget not rendered: {}", e);
            String::new()
        }
    };

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(renderer::inject_widget(&page, &widget))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();
    let url = config.url();

    let store = SettingsStore::new(&config.db_path);
    if let Err(e) = store.init() {
        warn!("settings database {} is not usable yet: {}", config.db_path.display(), e);
    }
    let state = AppState::new(store, DirectoryIconOverrides::new(&config.icons_dir));

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(256 * 1024))
            .app_data(web::Data::new(state.clone()))
            .service(services::settings::configure_routes())
            .service(services::widget::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
