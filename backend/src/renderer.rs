//! # Widget Renderer
//!
//! Turns a canonical configuration into the widget markup the frontend
//! attaches to. The generated tree is:
//!
//! ```text
//! div.contact-dock[data-layout]        modifier classes + CSS custom properties
//! ├── button.contact-dock__toggle      aria-expanded="false", both glyphs
//! └── div.contact-dock__panel
//!     └── a.contact-dock__link--<slug> one per enabled channel
//! ```
//!
//! Presentation values (colors, offsets, size) travel as CSS custom
//! properties on the container so the stylesheet never needs re-rendering.
//! Every interpolated value is HTML-escaped; icon markup comes from
//! [`common::icons::icon_markup`], which only returns sanitized SVG or
//! escaped text.

use std::fmt::Write;

use common::icons::{icon_markup, IconOverrides};
use common::model::channel::{Channel, ChannelKind};
use common::model::config::CanonicalConfig;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

const PANEL_ID: &str = "contact-dock-panel";

/// Widget markup for `config`, or `None` when no channel is enabled.
pub fn render(config: &CanonicalConfig, overrides: &dyn IconOverrides) -> Option<String> {
    render_instance(config, overrides, 0)
}

/// Like [`render`], for the `instance`-th dock of a page. Each instance gets
/// its own panel id so `aria-controls` stays unambiguous.
pub fn render_instance(config: &CanonicalConfig, overrides: &dyn IconOverrides, instance: usize) -> Option<String> {
    if !config.is_renderable() {
        return None;
    }
    let panel = panel_id(instance);

    let mut classes = vec![
        "contact-dock".to_string(),
        format!("contact-dock--{}", config.visibility.as_str()),
        format!("contact-dock--{}", config.side().as_str()),
        format!("contact-dock--{}", config.edge().as_str()),
        format!("contact-dock--{}", config.layout.as_str()),
    ];
    if config.pulse_animation {
        classes.push("contact-dock--pulse".to_string());
    }

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="{}" style="{}" data-layout="{}">"#,
        attr(&classes.join(" ")),
        attr(&style(config)),
        attr(config.layout.as_str()),
    );

    let _ = write!(
        html,
        concat!(
            r#"<button type="button" class="contact-dock__toggle" aria-expanded="false" aria-controls="{panel}">"#,
            r#"<span class="contact-dock__icon contact-dock__icon--closed" aria-hidden="true">{closed}</span>"#,
            r#"<span class="contact-dock__icon contact-dock__icon--open" aria-hidden="true">{open}</span>"#,
            r#"<span class="screen-reader-text">Show contact options</span>"#,
            "</button>",
        ),
        panel = panel,
        closed = text(&config.toggle_glyphs.closed),
        open = text(&config.toggle_glyphs.open),
    );

    let _ = write!(html, r#"<div class="contact-dock__panel" id="{}">"#, panel);
    for channel in &config.channels {
        html.push_str(&link(channel, overrides));
    }
    html.push_str("</div></div>");

    Some(html)
}

fn panel_id(instance: usize) -> String {
    match instance {
        0 => PANEL_ID.to_string(),
        n => format!("{}-{}", PANEL_ID, n),
    }
}

fn style(config: &CanonicalConfig) -> String {
    let mut style = format!("--contact-dock-color: {};", config.bar_color);
    for channel in &config.channels {
        let _ = write!(
            style,
            " --contact-dock-{}-color: {};",
            channel.kind.slug(),
            channel.effective_color()
        );
    }
    let _ = write!(
        style,
        " --contact-dock-offset-x: {}px; --contact-dock-offset-y: {}px; --contact-dock-size: {}px;",
        config.offset.x,
        config.offset.effective_y(),
        config.size.px()
    );
    style
}

fn link(channel: &Channel, overrides: &dyn IconOverrides) -> String {
    let slug = channel.kind.slug();
    let external = channel.kind.is_social() || channel.kind == ChannelKind::Whatsapp;
    format!(
        concat!(
            r#"<a class="contact-dock__link contact-dock__link--{slug}" href="{href}"{target}>"#,
            r#"<span class="contact-dock__icon-slot" aria-hidden="true">{icon}</span>"#,
            r#"<span class="screen-reader-text">{label}</span>"#,
            "</a>",
        ),
        slug = slug,
        href = attr(&channel.href()),
        target = if external {
            r#" target="_blank" rel="noopener noreferrer""#
        } else {
            ""
        },
        icon = icon_markup(channel, overrides),
        label = text(channel.kind.label()),
    )
}

/// Inserts the widget markup right before `</body>`, or appends it when the
/// page has no closing body tag.
pub fn inject_widget(page: &str, widget: &str) -> String {
    match page.rfind("</body>") {
        Some(at) => {
            let mut out = String::with_capacity(page.len() + widget.len());
            out.push_str(&page[..at]);
            out.push_str(widget);
            out.push_str(&page[at..]);
            out
        }
        None => format!("{}{}", page, widget),
    }
}
