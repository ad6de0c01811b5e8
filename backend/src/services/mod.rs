//! HTTP endpoints, grouped by resource. Each sub-module exposes a
//! `configure_routes()` returning its Actix `Scope`.

pub mod settings;
pub mod widget;
