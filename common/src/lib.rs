//! Shared core of the contact dock: the settings model, the configuration
//! resolver, icon resolution and the DOM-free widget controller.
//!
//! Used natively by the backend (resolving, persisting and rendering the
//! configuration) and compiled to wasm by the frontend (driving the widget).

pub mod icons;
pub mod model;
pub mod resolver;
pub mod widget;

pub use resolver::{fill_defaults, resolve};
