//! Shared application state.
//!
//! `AppState` is built once in `main.rs` and handed to every worker as
//! `web::Data`. It holds no connection or cache of its own: the settings store
//! opens SQLite per request and the icon overrides read the directory per
//! lookup, so cloning it is just cloning two paths.

use crate::icons::DirectoryIconOverrides;
use crate::store::SettingsStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: SettingsStore,
    pub overrides: DirectoryIconOverrides,
}

impl AppState {
    pub fn new(store: SettingsStore, overrides: DirectoryIconOverrides) -> Self {
        Self { store, overrides }
    }

    /// Markup of the widget for the stored configuration, `None` when nothing
    /// is renderable.
    pub fn render_widget(&self) -> Result<Option<String>, crate::error::SettingsError> {
        let config = self.store.load()?;
        Ok(crate::renderer::render(&config, &self.overrides))
    }
}
