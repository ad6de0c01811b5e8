//! The canonical render configuration.
//!
//! A `CanonicalConfig` is only ever produced by the resolver
//! (`crate::resolver::resolve`), so every field is present and every enum holds
//! a known member. It is what the settings store persists and what the
//! renderer consumes.

use serde::{Deserialize, Serialize};

use crate::model::channel::{Channel, ChannelKind};
use crate::model::color::CssColor;
use crate::model::raw::RawSettingsInput;

/// Default global widget color.
pub const DEFAULT_BAR_COLOR: &str = "#1e73be";
pub const DEFAULT_OFFSET_X: i32 = 16;
pub const DEFAULT_OFFSET_Y: i32 = 16;
pub const DEFAULT_GLYPH_CLOSED: &str = "☰";
pub const DEFAULT_GLYPH_OPEN: &str = "✕";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    Bar,
    Floating,
}

impl Layout {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "bar" => Some(Layout::Bar),
            "floating" => Some(Layout::Floating),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Bar => "bar",
            Layout::Floating => "floating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "top" => Some(Edge::Top),
            "bottom" => Some(Edge::Bottom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }
}

/// Screen corner the widget is anchored to. This is the only authoritative
/// placement field; `side` and `edge` are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Corner {
    /// Accepts the canonical `edge-side` spelling and the underscore spelling
    /// stored by older revisions.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "top-left" | "top_left" => Some(Corner::TopLeft),
            "top-right" | "top_right" => Some(Corner::TopRight),
            "bottom-left" | "bottom_left" => Some(Corner::BottomLeft),
            "bottom-right" | "bottom_right" => Some(Corner::BottomRight),
            _ => None,
        }
    }

    pub fn from_parts(edge: Edge, side: Side) -> Self {
        match (edge, side) {
            (Edge::Top, Side::Left) => Corner::TopLeft,
            (Edge::Top, Side::Right) => Corner::TopRight,
            (Edge::Bottom, Side::Left) => Corner::BottomLeft,
            (Edge::Bottom, Side::Right) => Corner::BottomRight,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Corner::TopLeft | Corner::BottomLeft => Side::Left,
            Corner::TopRight | Corner::BottomRight => Side::Right,
        }
    }

    pub fn edge(self) -> Edge {
        match self {
            Corner::TopLeft | Corner::TopRight => Edge::Top,
            Corner::BottomLeft | Corner::BottomRight => Edge::Bottom,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }
}

/// Pixel offsets from the anchored corner. `extra_y` is reserved space (for
/// example a cookie banner) and is always added to `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "extraY")]
    pub extra_y: i32,
}

impl Offset {
    /// Vertical distance actually applied to the widget.
    pub fn effective_y(&self) -> i32 {
        self.y.saturating_add(self.extra_y)
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self {
            x: DEFAULT_OFFSET_X,
            y: DEFAULT_OFFSET_Y,
            extra_y: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Everywhere,
    MobileOnly,
    DesktopOnly,
}

impl Visibility {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "everywhere" => Some(Visibility::Everywhere),
            "mobile-only" | "mobile" => Some(Visibility::MobileOnly),
            "desktop-only" | "desktop" => Some(Visibility::DesktopOnly),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Everywhere => "everywhere",
            Visibility::MobileOnly => "mobile-only",
            Visibility::DesktopOnly => "desktop-only",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "small" | "sm" => Some(Size::Small),
            "medium" | "md" => Some(Size::Medium),
            "large" | "lg" => Some(Size::Large),
            _ => None,
        }
    }

    /// Diameter of the toggle control in pixels.
    pub fn px(self) -> u32 {
        match self {
            Size::Small => 44,
            Size::Medium => 54,
            Size::Large => 64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleGlyphs {
    pub closed: String,
    pub open: String,
}

impl Default for ToggleGlyphs {
    fn default() -> Self {
        Self {
            closed: DEFAULT_GLYPH_CLOSED.to_string(),
            open: DEFAULT_GLYPH_OPEN.to_string(),
        }
    }
}

/// Fully validated widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalConfig {
    /// Enabled channels in kind precedence order.
    pub channels: Vec<Channel>,
    pub layout: Layout,
    pub corner: Corner,
    pub offset: Offset,
    pub visibility: Visibility,
    pub size: Size,
    pub pulse_animation: bool,
    pub toggle_glyphs: ToggleGlyphs,
    /// Global widget color, used for the toggle and the bar background.
    pub bar_color: CssColor,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            layout: Layout::default(),
            corner: Corner::default(),
            offset: Offset::default(),
            visibility: Visibility::default(),
            size: Size::default(),
            pulse_animation: false,
            toggle_glyphs: ToggleGlyphs::default(),
            bar_color: CssColor::from_static(DEFAULT_BAR_COLOR),
        }
    }
}

impl CanonicalConfig {
    pub fn side(&self) -> Side {
        self.corner.side()
    }

    pub fn edge(&self) -> Edge {
        self.corner.edge()
    }

    /// The widget is rendered only when at least one channel is enabled.
    pub fn is_renderable(&self) -> bool {
        !self.channels.is_empty()
    }

    pub fn channel(&self, kind: ChannelKind) -> Option<&Channel> {
        self.channels.iter().find(|c| c.kind == kind)
    }

    /// Flattens the configuration back into the settings field map it is
    /// resolved from. `corner` is always written together with the derived
    /// `side` / `edge` so that older readers stay consistent.
    pub fn to_raw(&self) -> RawSettingsInput {
        let mut raw = RawSettingsInput {
            bar_color: Some(self.bar_color.to_string()),
            visibility: Some(self.visibility.as_str().to_string()),
            layout: Some(self.layout.as_str().to_string()),
            corner: Some(self.corner.as_str().to_string()),
            side: Some(self.side().as_str().to_string()),
            edge: Some(self.edge().as_str().to_string()),
            offset_x: Some(self.offset.x.to_string()),
            offset_y: Some(self.offset.y.to_string()),
            cookie_offset: Some(self.offset.extra_y.to_string()),
            size: Some(self.size.as_str().to_string()),
            toggle_icon_closed: Some(self.toggle_glyphs.closed.clone()),
            toggle_icon_open: Some(self.toggle_glyphs.open.clone()),
            pulse: Some(if self.pulse_animation { "yes" } else { "no" }.to_string()),
            ..RawSettingsInput::default()
        };
        for channel in &self.channels {
            let fields = raw.channel_fields_mut(channel.kind);
            *fields.target = Some(channel.target.clone());
            *fields.color = Some(channel.color.to_string());
            *fields.icon_mode = Some(channel.icon_source.as_str().to_string());
            *fields.icon_data = Some(channel.icon_data.clone());
        }
        raw
    }
}
