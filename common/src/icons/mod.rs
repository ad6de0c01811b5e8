//! Icon source resolution.
//!
//! A channel's icon markup is picked by tier: an on-disk SVG override for the
//! channel slug wins whenever it survives sanitization; otherwise the
//! configured [`IconSource`] decides, and every custom source falls back to
//! the built-in default glyph when it yields nothing usable. Unsanitized
//! markup never reaches the output.

mod glyphs;
mod sanitizer;

use std::sync::LazyLock;

use regex::Regex;

use crate::model::channel::{Channel, ChannelKind, IconSource};

pub use glyphs::{brand_glyph, default_glyph};
pub use sanitizer::{ALLOWED_ELEMENTS, DROPPED_ELEMENTS, PRESENTATION_ATTRIBUTES, sanitize_svg};

/// An HTML/XML tag, including one left unterminated at the end of input.
pub(crate) static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("markup tag pattern"));

/// Lookup of operator-provided SVG files, keyed by channel slug.
pub trait IconOverrides {
    /// Raw, unsanitized SVG for `kind`, if one is provided.
    fn svg_override(&self, kind: ChannelKind) -> Option<String>;
}

/// Override source for hosts without an override directory.
pub struct NoOverrides;

impl IconOverrides for NoOverrides {
    fn svg_override(&self, _kind: ChannelKind) -> Option<String> {
        None
    }
}

/// Produces the icon markup for `channel`.
pub fn icon_markup(channel: &Channel, overrides: &dyn IconOverrides) -> String {
    if let Some(svg) = overrides
        .svg_override(channel.kind)
        .map(|raw| sanitize_svg(&raw))
        .filter(|svg| !svg.is_empty())
    {
        return svg;
    }

    match channel.icon_source {
        IconSource::OfficialBrand => brand_glyph(channel.kind).to_string(),
        IconSource::CustomSvg => {
            let svg = sanitize_svg(&channel.icon_data);
            if svg.is_empty() {
                default_glyph(channel.kind)
            } else {
                svg
            }
        }
        IconSource::CustomClass => {
            let class = sanitize_class(&channel.icon_data);
            if class.is_empty() {
                default_glyph(channel.kind)
            } else {
                format!(r#"<span class="{}" aria-hidden="true"></span>"#, class)
            }
        }
        IconSource::Default => default_glyph(channel.kind),
    }
}

/// Reduces icon data to a single class token: markup is stripped, then every
/// character outside `[A-Za-z0-9_-]` is removed.
pub fn sanitize_class(raw: &str) -> String {
    MARKUP_TAG
        .replace_all(raw, "")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Save-time cleanup of per-channel icon data: markup goes through the SVG
/// sanitizer, anything else is kept as trimmed text.
pub fn sanitize_icon_data(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('<') {
        sanitize_svg(trimmed)
    } else {
        trimmed.chars().filter(|c| !c.is_control()).collect()
    }
}
