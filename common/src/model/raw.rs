//! Loosely-typed settings input.
//!
//! The settings form (and every older revision of it) submits a flat map of
//! field name to scalar. `RawSettingsInput` names every field the resolver
//! knows about; each one is optional and holds the submitted value as text.
//! Numbers and booleans are stringified, nested values and `null` count as
//! absent, unknown keys are ignored. Building one never fails.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::model::channel::ChannelKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawSettingsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner: Option<String>,
    /// Legacy horizontal placement, read from `side` or `position`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// Legacy vertical placement, read from `edge` or `vertical`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<String>,
    /// Reserved extra vertical space, read from `cookie_offset` or `extra_y`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_offset: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_icon_closed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_icon_open: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_mode_whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_mode_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_mode_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_mode_youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_mode_facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_mode_instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_mode_linkedin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_linkedin: Option<String>,
}

/// Borrowed view of the four per-channel fields.
pub struct ChannelFields<'a> {
    pub target: Option<&'a str>,
    pub color: Option<&'a str>,
    pub icon_mode: Option<&'a str>,
    pub icon_data: Option<&'a str>,
}

pub struct ChannelFieldsMut<'a> {
    pub target: &'a mut Option<String>,
    pub color: &'a mut Option<String>,
    pub icon_mode: &'a mut Option<String>,
    pub icon_data: &'a mut Option<String>,
}

impl RawSettingsInput {
    /// Builds the input from an arbitrary JSON value. Anything other than an
    /// object yields an empty input.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let field = |keys: &[&str]| keys.iter().find_map(|key| map.get(*key).and_then(scalar_text));
        Self {
            phone_number: field(&["phone_number"]),
            whatsapp_number: field(&["whatsapp_number"]),
            email_address: field(&["email_address"]),
            youtube_url: field(&["youtube_url"]),
            facebook_url: field(&["facebook_url"]),
            instagram_url: field(&["instagram_url"]),
            linkedin_url: field(&["linkedin_url"]),
            bar_color: field(&["bar_color"]),
            whatsapp_color: field(&["whatsapp_color"]),
            phone_color: field(&["phone_color"]),
            email_color: field(&["email_color"]),
            youtube_color: field(&["youtube_color"]),
            facebook_color: field(&["facebook_color"]),
            instagram_color: field(&["instagram_color"]),
            linkedin_color: field(&["linkedin_color"]),
            visibility: field(&["visibility"]),
            layout: field(&["layout"]),
            corner: field(&["corner"]),
            side: field(&["side", "position"]),
            edge: field(&["edge", "vertical"]),
            offset_x: field(&["offset_x"]),
            offset_y: field(&["offset_y"]),
            cookie_offset: field(&["cookie_offset", "extra_y"]),
            size: field(&["size"]),
            pulse: field(&["pulse"]),
            toggle_icon_closed: field(&["toggle_icon_closed"]),
            toggle_icon_open: field(&["toggle_icon_open"]),
            icon_mode_whatsapp: field(&["icon_mode_whatsapp"]),
            icon_mode_phone: field(&["icon_mode_phone"]),
            icon_mode_email: field(&["icon_mode_email"]),
            icon_mode_youtube: field(&["icon_mode_youtube"]),
            icon_mode_facebook: field(&["icon_mode_facebook"]),
            icon_mode_instagram: field(&["icon_mode_instagram"]),
            icon_mode_linkedin: field(&["icon_mode_linkedin"]),
            icon_whatsapp: field(&["icon_whatsapp"]),
            icon_phone: field(&["icon_phone"]),
            icon_email: field(&["icon_email"]),
            icon_youtube: field(&["icon_youtube"]),
            icon_facebook: field(&["icon_facebook"]),
            icon_instagram: field(&["icon_instagram"]),
            icon_linkedin: field(&["icon_linkedin"]),
        }
    }

    pub fn channel_fields(&self, kind: ChannelKind) -> ChannelFields<'_> {
        let (target, color, icon_mode, icon_data) = match kind {
            ChannelKind::Whatsapp => (
                &self.whatsapp_number,
                &self.whatsapp_color,
                &self.icon_mode_whatsapp,
                &self.icon_whatsapp,
            ),
            ChannelKind::Phone => (&self.phone_number, &self.phone_color, &self.icon_mode_phone, &self.icon_phone),
            ChannelKind::Email => (&self.email_address, &self.email_color, &self.icon_mode_email, &self.icon_email),
            ChannelKind::Youtube => (
                &self.youtube_url,
                &self.youtube_color,
                &self.icon_mode_youtube,
                &self.icon_youtube,
            ),
            ChannelKind::Facebook => (
                &self.facebook_url,
                &self.facebook_color,
                &self.icon_mode_facebook,
                &self.icon_facebook,
            ),
            ChannelKind::Instagram => (
                &self.instagram_url,
                &self.instagram_color,
                &self.icon_mode_instagram,
                &self.icon_instagram,
            ),
            ChannelKind::Linkedin => (
                &self.linkedin_url,
                &self.linkedin_color,
                &self.icon_mode_linkedin,
                &self.icon_linkedin,
            ),
        };
        ChannelFields {
            target: target.as_deref(),
            color: color.as_deref(),
            icon_mode: icon_mode.as_deref(),
            icon_data: icon_data.as_deref(),
        }
    }

    pub fn channel_fields_mut(&mut self, kind: ChannelKind) -> ChannelFieldsMut<'_> {
        let (target, color, icon_mode, icon_data) = match kind {
            ChannelKind::Whatsapp => (
                &mut self.whatsapp_number,
                &mut self.whatsapp_color,
                &mut self.icon_mode_whatsapp,
                &mut self.icon_whatsapp,
            ),
            ChannelKind::Phone => (
                &mut self.phone_number,
                &mut self.phone_color,
                &mut self.icon_mode_phone,
                &mut self.icon_phone,
            ),
            ChannelKind::Email => (
                &mut self.email_address,
                &mut self.email_color,
                &mut self.icon_mode_email,
                &mut self.icon_email,
            ),
            ChannelKind::Youtube => (
                &mut self.youtube_url,
                &mut self.youtube_color,
                &mut self.icon_mode_youtube,
                &mut self.icon_youtube,
            ),
            ChannelKind::Facebook => (
                &mut self.facebook_url,
                &mut self.facebook_color,
                &mut self.icon_mode_facebook,
                &mut self.icon_facebook,
            ),
            ChannelKind::Instagram => (
                &mut self.instagram_url,
                &mut self.instagram_color,
                &mut self.icon_mode_instagram,
                &mut self.icon_instagram,
            ),
            ChannelKind::Linkedin => (
                &mut self.linkedin_url,
                &mut self.linkedin_color,
                &mut self.icon_mode_linkedin,
                &mut self.icon_linkedin,
            ),
        };
        ChannelFieldsMut {
            target,
            color,
            icon_mode,
            icon_data,
        }
    }
}

impl<'de> Deserialize<'de> for RawSettingsInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stringifies_scalars_and_drops_nested_values() {
        let raw = RawSettingsInput::from_value(&json!({
            "offset_x": 12,
            "pulse": true,
            "layout": null,
            "corner": ["top-left"],
            "phone_number": "+48 600",
            "unknown_field": "ignored",
        }));
        assert_eq!(raw.offset_x.as_deref(), Some("12"));
        assert_eq!(raw.pulse.as_deref(), Some("1"));
        assert_eq!(raw.layout, None);
        assert_eq!(raw.corner, None);
        assert_eq!(raw.phone_number.as_deref(), Some("+48 600"));
    }

    #[test]
    fn reads_legacy_aliases() {
        let raw = RawSettingsInput::from_value(&json!({
            "position": "left",
            "vertical": "top",
            "extra_y": "40",
        }));
        assert_eq!(raw.side.as_deref(), Some("left"));
        assert_eq!(raw.edge.as_deref(), Some("top"));
        assert_eq!(raw.cookie_offset.as_deref(), Some("40"));
    }

    #[test]
    fn canonical_name_wins_over_alias() {
        let raw = RawSettingsInput::from_value(&json!({ "side": "right", "position": "left" }));
        assert_eq!(raw.side.as_deref(), Some("right"));
    }

    #[test]
    fn non_object_input_is_empty() {
        assert_eq!(RawSettingsInput::from_value(&json!("corner")), RawSettingsInput::default());
        let raw: RawSettingsInput = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(raw, RawSettingsInput::default());
    }

    #[test]
    fn serialization_skips_absent_fields() {
        let raw = RawSettingsInput {
            corner: Some("top-left".to_string()),
            ..RawSettingsInput::default()
        };
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!({ "corner": "top-left" }));
    }

    #[test]
    fn channel_fields_map_to_named_keys() {
        let mut raw = RawSettingsInput::default();
        *raw.channel_fields_mut(ChannelKind::Linkedin).target = Some("https://linkedin.com/in/x".into());
        assert_eq!(raw.linkedin_url.as_deref(), Some("https://linkedin.com/in/x"));
        assert_eq!(
            raw.channel_fields(ChannelKind::Linkedin).target,
            Some("https://linkedin.com/in/x")
        );
    }
}
