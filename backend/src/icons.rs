use std::fs;
use std::path::{Path, PathBuf};

use common::icons::IconOverrides;
use common::model::channel::ChannelKind;
use log::debug;

/// Operator-provided icons read from `<dir>/<slug>.svg`.
///
/// Files are read on every lookup so replacing an icon takes effect without
/// a restart. A missing or unreadable file means "no override".
#[derive(Clone, Debug)]
pub struct DirectoryIconOverrides {
    dir: PathBuf,
}

impl DirectoryIconOverrides {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, kind: ChannelKind) -> PathBuf {
        self.dir.join(format!("{}.svg", kind.slug()))
    }
}

impl IconOverrides for DirectoryIconOverrides {
    fn svg_override(&self, kind: ChannelKind) -> Option<String> {
        let path = self.path_for(kind);
        match fs::read_to_string(&path) {
            Ok(svg) => Some(svg),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    debug!("ignoring icon override {}: {}", path.display(), e);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_slug_named_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("phone.svg"), "<svg><path d=\"M0 0\"/></svg>").unwrap();
        let overrides = DirectoryIconOverrides::new(dir.path());

        assert!(overrides.svg_override(ChannelKind::Phone).unwrap().contains("<path"));
        assert!(overrides.svg_override(ChannelKind::Email).is_none());
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let overrides = DirectoryIconOverrides::new("/nonexistent/contact-dock-icons");
        assert!(overrides.svg_override(ChannelKind::Whatsapp).is_none());
    }
}
