//! # Settings Store
//!
//! Persists the canonical widget configuration in a small SQLite options
//! table, one JSON document per option name.
//!
//! The document is the flat settings field map (`CanonicalConfig::to_raw`),
//! not the nested canonical shape. Reading runs it back through the resolver
//! in fill-defaults mode, so rows written by older revisions (for example
//! placement stored only as `position` + `vertical`) are migrated on read and
//! newly added fields pick up their defaults.

use std::path::{Path, PathBuf};

use common::model::config::CanonicalConfig;
use common::model::raw::RawSettingsInput;
use common::{fill_defaults, resolve};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::SettingsError;

/// Option name under which the configuration is stored.
pub const OPTION_NAME: &str = "contact_dock_options";

#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn connect(&self) -> Result<Connection, SettingsError> {
        let conn = Connection::open(&self.path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS options (name TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(conn)
    }

    /// Creates the database and its table if needed.
    pub fn init(&self) -> Result<(), SettingsError> {
        self.connect().map(|_| ())
    }

    /// Current configuration. A missing or unreadable row yields the defaults.
    pub fn load(&self) -> Result<CanonicalConfig, SettingsError> {
        let conn = self.connect()?;
        let stored: Option<String> = conn
            .query_row(
                "SELECT value FROM options WHERE name = ?1",
                params![OPTION_NAME],
                |row| row.get(0),
            )
            .optional()?;

        let raw = match stored {
            Some(json) => serde_json::from_str::<RawSettingsInput>(&json).unwrap_or_else(|e| {
                warn!("stored settings are not valid JSON, using defaults: {}", e);
                RawSettingsInput::default()
            }),
            None => RawSettingsInput::default(),
        };
        Ok(fill_defaults(&raw))
    }

    pub fn save(&self, config: &CanonicalConfig) -> Result<(), SettingsError> {
        let json = serde_json::to_string(&config.to_raw())?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT OR REPLACE INTO options (name, value) VALUES (?1, ?2)",
            params![OPTION_NAME, json],
        )?;
        Ok(())
    }

    /// Resolves submitted settings against the stored configuration and
    /// persists the result.
    pub fn apply(&self, raw: &RawSettingsInput) -> Result<CanonicalConfig, SettingsError> {
        let previous = self.load()?;
        let config = resolve(raw, &previous);
        self.save(&config)?;
        info!(
            "settings saved: {} channel(s), {} layout, {} corner",
            config.channels.len(),
            config.layout.as_str(),
            config.corner.as_str()
        );
        Ok(config)
    }

    #[cfg(test)]
    pub(crate) fn write_raw_json(&self, json: &str) -> Result<(), SettingsError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT OR REPLACE INTO options (name, value) VALUES (?1, ?2)",
            params![OPTION_NAME, json],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::channel::ChannelKind;
    use common::model::config::{Corner, Layout};
    use serde_json::json;

    fn temp_store() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("dock.sqlite"));
        (dir, store)
    }

    #[test]
    fn empty_database_loads_defaults() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load().unwrap(), CanonicalConfig::default());
    }

    #[test]
    fn apply_persists_the_resolved_config() {
        let (_dir, store) = temp_store();
        let raw = RawSettingsInput::from_value(&json!({
            "whatsapp_number": "+48 600-000-000",
            "layout": "floating",
            "corner": "top-left",
        }));
        let saved = store.apply(&raw).unwrap();
        assert_eq!(saved.layout, Layout::Floating);
        assert_eq!(store.load().unwrap(), saved);
        assert_eq!(
            store.load().unwrap().channel(ChannelKind::Whatsapp).unwrap().target,
            "+48600000000"
        );
    }

    #[test]
    fn corner_survives_a_form_that_omits_it() {
        let (_dir, store) = temp_store();
        store
            .apply(&RawSettingsInput::from_value(&json!({ "corner": "bottom-left" })))
            .unwrap();
        let saved = store
            .apply(&RawSettingsInput::from_value(&json!({ "phone_number": "600" })))
            .unwrap();
        assert_eq!(saved.corner, Corner::BottomLeft);
    }

    #[test]
    fn legacy_rows_migrate_on_read() {
        let (_dir, store) = temp_store();
        store
            .write_raw_json(r#"{"position":"left","vertical":"top","phone_number":"600","size":"lg"}"#)
            .unwrap();
        let config = store.load().unwrap();
        assert_eq!(config.corner, Corner::TopLeft);
        assert!(config.is_renderable());
    }

    #[test]
    fn corrupt_row_loads_defaults() {
        let (_dir, store) = temp_store();
        store.write_raw_json("{not json").unwrap();
        assert_eq!(store.load().unwrap(), CanonicalConfig::default());
    }
}
