//! Configuration resolver.
//!
//! Turns a `RawSettingsInput` (whatever the settings form or the settings store
//! handed over) into a `CanonicalConfig`. Resolution is total: every field has
//! a deterministic fallback and nothing here returns an error. The only
//! observable effect of bad input is that a channel with an invalid target is
//! left out.
//!
//! Fallback rules, by field family:
//! - contact targets: validated per kind, invalid ⇒ empty ⇒ channel dropped;
//! - colors: hex or `rgb()`, else the field's brand default;
//! - enums: exact allow-list match, else the field default (never `previous`);
//! - corner: explicit corner, then legacy `edge`+`side`, then `previous`,
//!   then `bottom-right`;
//! - offsets: integers, non-numeric ⇒ 0, absent ⇒ default.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use url::Url;

use crate::icons::{MARKUP_TAG, sanitize_icon_data};
use crate::model::channel::{Channel, ChannelKind, IconSource};
use crate::model::color::CssColor;
use crate::model::config::{
    CanonicalConfig, Corner, DEFAULT_BAR_COLOR, DEFAULT_GLYPH_CLOSED, DEFAULT_GLYPH_OPEN, DEFAULT_OFFSET_X,
    DEFAULT_OFFSET_Y, Edge, Layout, Offset, Side, Size, ToggleGlyphs, Visibility,
};
use crate::model::raw::RawSettingsInput;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email pattern")
});

const FALSY: [&str; 5] = ["", "0", "false", "no", "off"];

/// Resolves `raw` against the previously stored configuration.
///
/// `previous` is consulted only for the corner, the single field with a
/// migration history. Running the resolver again over its own output (or
/// over the same input twice) yields the same configuration.
pub fn resolve(raw: &RawSettingsInput, previous: &CanonicalConfig) -> CanonicalConfig {
    let channels = ChannelKind::ALL
        .iter()
        .filter_map(|kind| resolve_channel(raw, *kind))
        .collect();

    CanonicalConfig {
        channels,
        layout: raw.layout.as_deref().and_then(Layout::parse).unwrap_or_default(),
        corner: resolve_corner(raw, Some(previous.corner)),
        offset: Offset {
            x: parse_offset(raw.offset_x.as_deref(), DEFAULT_OFFSET_X),
            y: parse_offset(raw.offset_y.as_deref(), DEFAULT_OFFSET_Y),
            extra_y: parse_offset(raw.cookie_offset.as_deref(), 0),
        },
        visibility: raw.visibility.as_deref().and_then(Visibility::parse).unwrap_or_default(),
        size: raw.size.as_deref().and_then(Size::parse).unwrap_or_default(),
        pulse_animation: parse_flag(raw.pulse.as_deref()),
        toggle_glyphs: ToggleGlyphs {
            closed: resolve_glyph(raw.toggle_icon_closed.as_deref(), DEFAULT_GLYPH_CLOSED),
            open: resolve_glyph(raw.toggle_icon_open.as_deref(), DEFAULT_GLYPH_OPEN),
        },
        bar_color: CssColor::parse_or(raw.bar_color.as_deref(), CssColor::from_static(DEFAULT_BAR_COLOR)),
    }
}

/// Read-only resolution used at render time: fills every missing field with
/// its default and migrates legacy placement fields.
pub fn fill_defaults(raw: &RawSettingsInput) -> CanonicalConfig {
    resolve(raw, &CanonicalConfig::default())
}

fn resolve_channel(raw: &RawSettingsInput, kind: ChannelKind) -> Option<Channel> {
    let fields = raw.channel_fields(kind);
    let target = fields.target.map(|value| validate_target(kind, value)).unwrap_or_default();
    if target.is_empty() {
        if fields.target.is_some_and(|value| !value.trim().is_empty()) {
            debug!("dropping {} channel: target failed validation", kind.slug());
        }
        return None;
    }

    Some(Channel {
        kind,
        target,
        color: CssColor::parse_or(fields.color, kind.brand_color()),
        icon_source: fields.icon_mode.and_then(IconSource::parse).unwrap_or_default(),
        icon_data: fields.icon_data.map(sanitize_icon_data).unwrap_or_default(),
    })
}

/// Validates a channel target; returns the normalized target or an empty
/// string when the channel must be disabled.
pub fn validate_target(kind: ChannelKind, raw: &str) -> String {
    match kind {
        ChannelKind::Whatsapp | ChannelKind::Phone => sanitize_contact_number(raw),
        ChannelKind::Email => sanitize_email(raw),
        ChannelKind::Youtube | ChannelKind::Facebook | ChannelKind::Instagram | ChannelKind::Linkedin => {
            sanitize_url(raw)
        }
    }
}

/// Keeps digits and a single leading `+`. A number without any digit is
/// treated as empty.
pub fn sanitize_contact_number(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.trim_start().chars() {
        if ch.is_ascii_digit() || (ch == '+' && cleaned.is_empty()) {
            cleaned.push(ch);
        }
    }
    if cleaned.chars().any(|ch| ch.is_ascii_digit()) {
        cleaned
    } else {
        String::new()
    }
}

pub fn sanitize_email(raw: &str) -> String {
    let trimmed = raw.trim();
    if EMAIL.is_match(trimmed) {
        trimmed.to_string()
    } else {
        String::new()
    }
}

/// Normalizes an absolute `http(s)` URL. A bare domain such as
/// `youtube.com/@shop` is read as `https://`.
pub fn sanitize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let parsed = match Url::parse(trimmed) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{}", trimmed)),
        Err(e) => Err(e),
    };
    match parsed {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty()) => {
            url.to_string()
        }
        _ => String::new(),
    }
}

/// Resolves the anchored corner, in priority order: explicit `corner`,
/// legacy `edge` + `side`, `previous`, `bottom-right`.
pub fn resolve_corner(raw: &RawSettingsInput, previous: Option<Corner>) -> Corner {
    if let Some(corner) = raw.corner.as_deref().and_then(Corner::parse) {
        return corner;
    }
    let legacy_edge = raw.edge.as_deref().and_then(Edge::parse);
    let legacy_side = raw.side.as_deref().and_then(Side::parse);
    if let (Some(edge), Some(side)) = (legacy_edge, legacy_side) {
        return Corner::from_parts(edge, side);
    }
    previous.unwrap_or_default()
}

/// Parses a pixel offset. Negative values are kept; non-numeric input is 0.
pub fn parse_offset(raw: Option<&str>, default: i32) -> i32 {
    let Some(value) = raw else {
        return default;
    };
    let value = value.trim();
    if let Ok(parsed) = value.parse::<i32>() {
        return parsed;
    }
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed.trunc().clamp(i32::MIN as f64, i32::MAX as f64) as i32,
        _ => 0,
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| !FALSY.contains(&value.trim().to_ascii_lowercase().as_str()))
}

/// Plain-text glyph: markup and control characters are removed.
fn resolve_glyph(raw: Option<&str>, default: &str) -> String {
    let text = raw
        .map(|value| MARKUP_TAG.replace_all(value, "").chars().filter(|c| !c.is_control()).collect::<String>())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        default.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawSettingsInput {
        RawSettingsInput::from_value(&value)
    }

    #[test]
    fn explicit_corner_wins_over_legacy_fields() {
        let input = raw(json!({ "corner": "top-left", "side": "right", "edge": "bottom" }));
        assert_eq!(resolve(&input, &CanonicalConfig::default()).corner, Corner::TopLeft);
    }

    #[test]
    fn legacy_side_and_edge_synthesize_corner() {
        let input = raw(json!({ "side": "left", "edge": "top" }));
        assert_eq!(resolve(&input, &CanonicalConfig::default()).corner, Corner::TopLeft);
    }

    #[test]
    fn previous_corner_is_kept_when_input_has_none() {
        let previous = CanonicalConfig {
            corner: Corner::BottomLeft,
            ..CanonicalConfig::default()
        };
        assert_eq!(resolve(&raw(json!({})), &previous).corner, Corner::BottomLeft);
    }

    #[test]
    fn corner_defaults_to_bottom_right() {
        assert_eq!(resolve_corner(&raw(json!({})), None), Corner::BottomRight);
    }

    #[test]
    fn invalid_corner_falls_through_to_legacy_then_previous() {
        let input = raw(json!({ "corner": "center", "position": "left", "vertical": "bottom" }));
        assert_eq!(resolve_corner(&input, Some(Corner::TopRight)), Corner::BottomLeft);

        let input = raw(json!({ "corner": "center", "side": "left" }));
        assert_eq!(resolve_corner(&input, Some(Corner::TopRight)), Corner::TopRight);
    }

    #[test]
    fn corner_resolution_does_not_drift_across_saves() {
        let input = raw(json!({ "side": "left", "edge": "top" }));
        let mut config = CanonicalConfig::default();
        for _ in 0..5 {
            config = resolve(&input, &config);
            assert_eq!(config.corner, Corner::TopLeft);
        }
    }

    #[test]
    fn whatsapp_number_is_stripped_to_digits() {
        let input = raw(json!({ "whatsapp_number": "+48 600-000-000" }));
        let config = fill_defaults(&input);
        let channel = config.channel(ChannelKind::Whatsapp).unwrap();
        assert_eq!(channel.target, "+48600000000");
    }

    #[test]
    fn contact_number_keeps_only_leading_plus() {
        assert_eq!(sanitize_contact_number("  +1 (555) 010+9"), "+15550109");
        assert_eq!(sanitize_contact_number("+"), "");
        assert_eq!(sanitize_contact_number("call me"), "");
    }

    #[test]
    fn invalid_email_drops_the_channel() {
        let input = raw(json!({ "email_address": "not-an-email", "phone_number": "600" }));
        let config = fill_defaults(&input);
        assert!(config.channel(ChannelKind::Email).is_none());
        assert_eq!(config.channels.len(), 1);
    }

    #[test]
    fn valid_email_is_trimmed() {
        assert_eq!(sanitize_email("  kontakt@example.com "), "kontakt@example.com");
        assert_eq!(sanitize_email("a@b"), "");
        assert_eq!(sanitize_email("a b@example.com"), "");
    }

    #[test]
    fn social_urls_are_normalized() {
        assert_eq!(sanitize_url(" https://www.youtube.com/@shop "), "https://www.youtube.com/@shop");
        assert_eq!(sanitize_url("facebook.com/shop"), "https://facebook.com/shop");
        assert_eq!(sanitize_url("https://instagram.com"), "https://instagram.com/");
        assert_eq!(sanitize_url("javascript:alert(1)"), "");
        assert_eq!(sanitize_url("not a url"), "");
        assert_eq!(sanitize_url("ftp://example.com/file"), "");
    }

    #[test]
    fn channels_follow_kind_precedence_not_input_order() {
        let input = raw(json!({
            "linkedin_url": "https://linkedin.com/company/x",
            "email_address": "a@example.com",
            "youtube_url": "https://youtube.com/@x",
            "phone_number": "600100200",
            "whatsapp_number": "48600100200",
        }));
        let kinds: Vec<_> = fill_defaults(&input).channels.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChannelKind::Whatsapp,
                ChannelKind::Phone,
                ChannelKind::Email,
                ChannelKind::Youtube,
                ChannelKind::Linkedin,
            ]
        );
    }

    #[test]
    fn malformed_colors_use_brand_defaults() {
        let input = raw(json!({
            "whatsapp_number": "600",
            "whatsapp_color": "blue",
            "phone_number": "600",
            "phone_color": "#12",
            "email_address": "a@example.com",
            "email_color": "rgb(30, 115, 190)",
            "bar_color": "#1e73be",
        }));
        let config = fill_defaults(&input);
        assert_eq!(config.channel(ChannelKind::Whatsapp).unwrap().color.as_str(), "#25D366");
        assert_eq!(config.channel(ChannelKind::Phone).unwrap().color.as_str(), "#1e73be");
        assert_eq!(config.channel(ChannelKind::Email).unwrap().color.as_str(), "rgb(30, 115, 190)");
        assert_eq!(config.bar_color.as_str(), "#1e73be");
    }

    #[test]
    fn unknown_enum_values_use_defaults_not_previous() {
        let previous = CanonicalConfig {
            layout: Layout::Floating,
            size: Size::Large,
            visibility: Visibility::MobileOnly,
            ..CanonicalConfig::default()
        };
        let input = raw(json!({ "layout": "Floating", "size": "xl", "visibility": "tablet" }));
        let config = resolve(&input, &previous);
        assert_eq!(config.layout, Layout::Bar);
        assert_eq!(config.size, Size::Medium);
        assert_eq!(config.visibility, Visibility::Everywhere);
    }

    #[test]
    fn legacy_enum_spellings_are_accepted() {
        let input = raw(json!({
            "size": "sm",
            "visibility": "desktop",
            "phone_number": "600",
            "icon_mode_phone": "official",
        }));
        let config = fill_defaults(&input);
        assert_eq!(config.size, Size::Small);
        assert_eq!(config.visibility, Visibility::DesktopOnly);
        assert_eq!(config.channel(ChannelKind::Phone).unwrap().icon_source, IconSource::OfficialBrand);
    }

    #[test]
    fn offsets_keep_negatives_and_zero_out_garbage() {
        assert_eq!(parse_offset(Some("-12"), 16), -12);
        assert_eq!(parse_offset(Some(" 40 "), 16), 40);
        assert_eq!(parse_offset(Some("7.9"), 16), 7);
        assert_eq!(parse_offset(Some("abc"), 16), 0);
        assert_eq!(parse_offset(Some(""), 16), 0);
        assert_eq!(parse_offset(None, 16), 16);
    }

    #[test]
    fn extra_y_is_resolved_from_cookie_offset() {
        let config = fill_defaults(&raw(json!({ "offset_y": "10", "cookie_offset": "60" })));
        assert_eq!(config.offset.y, 10);
        assert_eq!(config.offset.extra_y, 60);
        assert_eq!(config.offset.effective_y(), 70);
    }

    #[test]
    fn glyphs_are_plain_text() {
        let config = fill_defaults(&raw(json!({
            "toggle_icon_closed": "<b>+</b>",
            "toggle_icon_open": "<script></script>",
        })));
        assert_eq!(config.toggle_glyphs.closed, "+");
        assert_eq!(config.toggle_glyphs.open, DEFAULT_GLYPH_OPEN);
    }

    #[test]
    fn glyphs_and_icon_classes_strip_markup_alike() {
        let hostile = "★<img src=x onerror=alert(1)";
        let config = fill_defaults(&raw(json!({ "toggle_icon_closed": hostile })));
        assert_eq!(config.toggle_glyphs.closed, "★");
        assert_eq!(crate::icons::sanitize_class("fa-star<img src=x"), "fa-star");
    }

    #[test]
    fn pulse_flag_reads_form_checkbox_values() {
        assert!(fill_defaults(&raw(json!({ "pulse": "1" }))).pulse_animation);
        assert!(fill_defaults(&raw(json!({ "pulse": true }))).pulse_animation);
        assert!(!fill_defaults(&raw(json!({ "pulse": "no" }))).pulse_animation);
        assert!(!fill_defaults(&raw(json!({}))).pulse_animation);
    }

    #[test]
    fn resolve_is_idempotent() {
        let input = raw(json!({
            "whatsapp_number": "+48 600-000-000",
            "email_address": "bad",
            "youtube_url": "youtube.com/@x",
            "bar_color": "red",
            "corner": "top_right",
            "offset_x": "-4",
            "offset_y": "x",
            "size": "lg",
            "layout": "floating",
            "icon_mode_whatsapp": "svg",
            "icon_whatsapp": "<svg viewBox=\"0 0 1 1\"><script>x</script><path d=\"M0 0\"/></svg>",
        }));
        let previous = CanonicalConfig::default();
        let once = resolve(&input, &previous);
        let twice = resolve(&input, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn canonical_config_round_trips_through_raw() {
        let input = raw(json!({
            "phone_number": "600",
            "facebook_url": "https://facebook.com/shop",
            "instagram_url": "https://instagram.com/shop",
            "corner": "bottom-left",
            "offset_x": "0",
            "cookie_offset": "48",
            "pulse": "yes",
            "toggle_icon_closed": "≡",
            "icon_mode_facebook": "custom-class",
            "icon_facebook": "fa-facebook",
        }));
        let config = fill_defaults(&input);
        let round_tripped = resolve(&config.to_raw(), &CanonicalConfig::default());
        assert_eq!(round_tripped, config);
    }

    #[test]
    fn resolve_never_panics_on_hostile_input() {
        let input = raw(json!({
            "phone_number": "\u{0}\u{1}+",
            "email_address": "@@@",
            "linkedin_url": "https://",
            "offset_x": "99999999999999999999",
            "bar_color": "rgb(999,999,999)",
            "icon_mode_phone": "",
            "icon_phone": "<svg><svg",
            "toggle_icon_open": "\u{7}",
        }));
        let config = fill_defaults(&input);
        assert!(config.channels.is_empty());
        assert_eq!(config.offset.x, i32::MAX);
        assert_eq!(config.bar_color.as_str(), DEFAULT_BAR_COLOR);
    }
}
