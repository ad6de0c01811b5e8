use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").expect("hex color pattern"));

static RGB_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").expect("rgb color pattern")
});

/// A CSS color restricted to `#RGB`, `#RRGGBB` or `rgb(r, g, b)`.
///
/// Values are kept verbatim (after trimming) so that an accepted color
/// round-trips unchanged through the settings store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CssColor(String);

impl CssColor {
    /// Accepts `raw` if, once trimmed, it is a hex literal or an `rgb()`
    /// triple with every channel in `0..=255`.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if HEX_COLOR.is_match(value) {
            return Some(CssColor(value.to_string()));
        }
        let caps = RGB_COLOR.captures(value)?;
        let in_range = (1..=3).all(|i| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u16>().ok())
                .is_some_and(|channel| channel <= 255)
        });
        in_range.then(|| CssColor(value.to_string()))
    }

    /// Parses `raw`, falling back to `fallback` for anything malformed.
    pub fn parse_or(raw: Option<&str>, fallback: CssColor) -> Self {
        raw.and_then(CssColor::parse).unwrap_or(fallback)
    }

    pub(crate) fn from_static(value: &'static str) -> Self {
        CssColor(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
