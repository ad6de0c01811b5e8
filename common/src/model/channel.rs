use serde::{Deserialize, Serialize};

use crate::model::color::CssColor;

/// One contact method that can appear as a link in the widget panel.
///
/// The declaration order is the rendering order: messaging first, then the
/// direct channels, then the social profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelKind {
    Whatsapp,
    Phone,
    Email,
    #[serde(rename = "social-youtube")]
    Youtube,
    #[serde(rename = "social-facebook")]
    Facebook,
    #[serde(rename = "social-instagram")]
    Instagram,
    #[serde(rename = "social-linkedin")]
    Linkedin,
}

impl ChannelKind {
    /// Every kind, in precedence order.
    pub const ALL: [ChannelKind; 7] = [
        ChannelKind::Whatsapp,
        ChannelKind::Phone,
        ChannelKind::Email,
        ChannelKind::Youtube,
        ChannelKind::Facebook,
        ChannelKind::Instagram,
        ChannelKind::Linkedin,
    ];

    /// Short identifier used for settings field names, CSS modifiers and
    /// icon override file names.
    pub fn slug(self) -> &'static str {
        match self {
            ChannelKind::Whatsapp => "whatsapp",
            ChannelKind::Phone => "phone",
            ChannelKind::Email => "email",
            ChannelKind::Youtube => "youtube",
            ChannelKind::Facebook => "facebook",
            ChannelKind::Instagram => "instagram",
            ChannelKind::Linkedin => "linkedin",
        }
    }

    /// Human readable name, used as the link's screen-reader label.
    pub fn label(self) -> &'static str {
        match self {
            ChannelKind::Whatsapp => "WhatsApp",
            ChannelKind::Phone => "Phone",
            ChannelKind::Email => "E-mail",
            ChannelKind::Youtube => "YouTube",
            ChannelKind::Facebook => "Facebook",
            ChannelKind::Instagram => "Instagram",
            ChannelKind::Linkedin => "LinkedIn",
        }
    }

    /// Brand color used when the configured color is missing or malformed.
    pub fn brand_color(self) -> CssColor {
        let hex = match self {
            ChannelKind::Whatsapp => "#25D366",
            ChannelKind::Phone => "#1e73be",
            ChannelKind::Email => "#ed6a5a",
            ChannelKind::Youtube => "#FF0000",
            ChannelKind::Facebook => "#1877F2",
            ChannelKind::Instagram => "#E4405F",
            ChannelKind::Linkedin => "#0A66C2",
        };
        CssColor::from_static(hex)
    }

    /// Built-in glyph shown when no other icon source applies.
    pub fn default_glyph(self) -> &'static str {
        match self {
            ChannelKind::Whatsapp => "💬",
            ChannelKind::Phone => "📞",
            ChannelKind::Email => "✉️",
            ChannelKind::Youtube => "▶",
            ChannelKind::Facebook => "f",
            ChannelKind::Instagram => "📷",
            ChannelKind::Linkedin => "in",
        }
    }

    pub fn is_social(self) -> bool {
        matches!(
            self,
            ChannelKind::Youtube | ChannelKind::Facebook | ChannelKind::Instagram | ChannelKind::Linkedin
        )
    }

    /// Link target for an already validated channel target.
    pub fn href(self, target: &str) -> String {
        match self {
            ChannelKind::Whatsapp => format!("https://wa.me/{}", target.trim_start_matches('+')),
            ChannelKind::Phone => format!("tel:{}", target),
            ChannelKind::Email => format!("mailto:{}", target),
            _ => target.to_string(),
        }
    }
}

/// Where a channel's icon markup comes from.
///
/// The legacy spellings (`official`, `custom`, `svg`) were written by older
/// revisions of the settings form and are still accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconSource {
    #[default]
    Default,
    OfficialBrand,
    CustomClass,
    CustomSvg,
}

impl IconSource {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "default" => Some(IconSource::Default),
            "official-brand" | "official" => Some(IconSource::OfficialBrand),
            "custom-class" | "custom" => Some(IconSource::CustomClass),
            "custom-svg" | "svg" => Some(IconSource::CustomSvg),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IconSource::Default => "default",
            IconSource::OfficialBrand => "official-brand",
            IconSource::CustomClass => "custom-class",
            IconSource::CustomSvg => "custom-svg",
        }
    }
}

/// An enabled channel of the canonical configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub kind: ChannelKind,
    /// Validated, non-empty target (digits, address or absolute URL).
    pub target: String,
    pub color: CssColor,
    pub icon_source: IconSource,
    /// Sanitized custom SVG markup or icon class, depending on `icon_source`.
    /// Kept even when the current source ignores it so switching modes back
    /// does not lose it.
    #[serde(default)]
    pub icon_data: String,
}

impl Channel {
    pub fn href(&self) -> String {
        self.kind.href(&self.target)
    }

    /// Color to paint the channel with. Official brand icons keep their
    /// brand color regardless of configuration.
    pub fn effective_color(&self) -> CssColor {
        if self.icon_source == IconSource::OfficialBrand {
            self.kind.brand_color()
        } else {
            self.color.clone()
        }
    }
}
