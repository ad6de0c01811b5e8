//! Server configuration, read from the environment.

use log::warn;
use std::path::PathBuf;

/// Runtime settings of the host process.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file holding the persisted widget configuration.
    pub db_path: PathBuf,
    /// Directory searched for `<channel>.svg` icon overrides.
    pub icons_dir: PathBuf,
    /// Open the demo page in the default browser once the server is up.
    pub open_browser: bool,
}

impl AppConfig {
    /// Reads configuration from environment variables with defaults.
    ///
    /// | Variable            | Default               |
    /// |---------------------|-----------------------|
    /// | `DOCK_HOST`         | `127.0.0.1`           |
    /// | `DOCK_PORT`         | `8080`                |
    /// | `DOCK_DB_PATH`      | `contact_dock.sqlite` |
    /// | `DOCK_ICONS_DIR`    | `icons`               |
    /// | `DOCK_OPEN_BROWSER` | `1`                   |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("DOCK_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("DOCK_PORT={} is not a valid port, using 8080", raw);
                8080
            }),
            None => 8080,
        };

        Self {
            host: lookup("DOCK_HOST").unwrap_or_else(|| "127.0.0.1".into()),
            port,
            db_path: lookup("DOCK_DB_PATH")
                .unwrap_or_else(|| "contact_dock.sqlite".into())
                .into(),
            icons_dir: lookup("DOCK_ICONS_DIR").unwrap_or_else(|| "icons".into()).into(),
            open_browser: lookup("DOCK_OPEN_BROWSER")
                .map(|raw| !matches!(raw.trim(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = config(&[]);
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert_eq!(config.db_path, PathBuf::from("contact_dock.sqlite"));
        assert_eq!(config.icons_dir, PathBuf::from("icons"));
        assert!(config.open_browser);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("DOCK_HOST", "0.0.0.0"),
            ("DOCK_PORT", "9000"),
            ("DOCK_DB_PATH", "/tmp/dock.sqlite"),
            ("DOCK_OPEN_BROWSER", "0"),
        ]);
        assert_eq!(config.url(), "http://0.0.0.0:9000");
        assert_eq!(config.db_path, PathBuf::from("/tmp/dock.sqlite"));
        assert!(!config.open_browser);
    }

    #[test]
    fn malformed_port_falls_back() {
        assert_eq!(config(&[("DOCK_PORT", "eighty")]).port, 8080);
    }
}
