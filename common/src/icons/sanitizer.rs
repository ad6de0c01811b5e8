//! Allow-list SVG sanitizer.
//!
//! The markup is walked as XML events and rebuilt from scratch: only the
//! elements listed in [`ALLOWED_ELEMENTS`] are written back, each with only
//! its permitted attributes (plus the shared presentation attributes).
//! Elements in [`DROPPED_ELEMENTS`] disappear together with their content;
//! any other element is unwrapped so its permitted children survive.
//!
//! The result is either empty or a sequence of top-level `<svg>` elements.
//! Malformed XML sanitizes to the empty string.

use std::borrow::Cow;

use log::debug;
use quick_xml::{Reader, Writer};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Presentation attributes accepted on every allowed element.
pub const PRESENTATION_ATTRIBUTES: &[&str] = &[
    "class",
    "fill",
    "fill-opacity",
    "fill-rule",
    "stroke",
    "stroke-width",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-opacity",
    "stroke-dasharray",
    "opacity",
    "transform",
    "clip-path",
    "clip-rule",
];

/// Element name → element-specific permitted attributes.
pub const ALLOWED_ELEMENTS: &[(&str, &[&str])] = &[
    (
        "svg",
        &["xmlns", "viewBox", "width", "height", "aria-hidden", "focusable", "role", "preserveAspectRatio"],
    ),
    ("g", &[]),
    ("path", &["d"]),
    ("circle", &["cx", "cy", "r"]),
    ("ellipse", &["cx", "cy", "rx", "ry"]),
    ("rect", &["x", "y", "width", "height", "rx", "ry"]),
    ("line", &["x1", "y1", "x2", "y2"]),
    ("polyline", &["points"]),
    ("polygon", &["points"]),
    ("defs", &[]),
    ("linearGradient", &["id", "x1", "y1", "x2", "y2", "gradientUnits", "gradientTransform"]),
    ("radialGradient", &["id", "cx", "cy", "r", "fx", "fy", "gradientUnits", "gradientTransform"]),
    ("stop", &["offset", "stop-color", "stop-opacity"]),
    ("clipPath", &["id", "clipPathUnits"]),
    ("title", &[]),
];

/// Elements removed together with everything inside them.
pub const DROPPED_ELEMENTS: &[&str] = &[
    "script",
    "style",
    "foreignObject",
    "iframe",
    "object",
    "embed",
    "a",
    "use",
    "image",
];

fn element_attributes(name: &str) -> Option<&'static [&'static str]> {
    ALLOWED_ELEMENTS
        .iter()
        .find(|(element, _)| *element == name)
        .map(|(_, attributes)| *attributes)
}

fn attribute_allowed(element_attributes: &[&str], name: &str) -> bool {
    element_attributes.contains(&name) || PRESENTATION_ATTRIBUTES.contains(&name)
}

/// Rejects script URLs and any `url(...)` that is not a local fragment.
fn value_is_safe(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if compact.contains("javascript:") || compact.contains("data:") || compact.contains("expression(") {
        return false;
    }
    compact
        .match_indices("url(")
        .all(|(index, _)| compact[index + 4..].starts_with('#'))
}

/// What happened to an opened element, so its end tag can be handled.
enum Opened {
    Written(String),
    Unwrapped,
}

/// Sanitizes `markup`, returning the empty string when nothing usable is left.
pub fn sanitize_svg(markup: &str) -> String {
    match walk(markup) {
        Ok(clean) => clean,
        Err(reason) => {
            debug!("discarding icon markup: {}", reason);
            String::new()
        }
    }
}

fn walk(markup: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(markup);
    let mut writer = Writer::new(Vec::with_capacity(markup.len()));
    let mut stack: Vec<Opened> = Vec::new();
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => return Err("unterminated dropped element".to_string()),
                _ => {}
            }
            continue;
        }

        let written_depth = stack.iter().filter(|o| matches!(o, Opened::Written(_))).count();
        match event {
            Event::Start(start) => {
                let name = element_name(&start)?;
                if DROPPED_ELEMENTS.contains(&name.as_str()) {
                    skip_depth = 1;
                    continue;
                }
                match clean_start(&start, &name, written_depth)? {
                    Some(clean) => {
                        write(&mut writer, Event::Start(clean))?;
                        stack.push(Opened::Written(name));
                    }
                    None => stack.push(Opened::Unwrapped),
                }
            }
            Event::Empty(start) => {
                let name = element_name(&start)?;
                if DROPPED_ELEMENTS.contains(&name.as_str()) {
                    continue;
                }
                if let Some(clean) = clean_start(&start, &name, written_depth)? {
                    write(&mut writer, Event::Empty(clean))?;
                }
            }
            Event::End(_) => match stack.pop() {
                Some(Opened::Written(name)) => write(&mut writer, Event::End(BytesEnd::new(name)))?,
                Some(Opened::Unwrapped) => {}
                None => return Err("unbalanced end tag".to_string()),
            },
            Event::Text(text) => {
                if written_depth > 0 {
                    let text = text.unescape().map_err(|e| e.to_string())?;
                    write(&mut writer, Event::Text(BytesText::new(&text)))?;
                }
            }
            Event::Eof => break,
            // Comments, CDATA, declarations, processing instructions, doctypes.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err("unclosed element".to_string());
    }
    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), String> {
    writer.write_event(event).map_err(|e| e.to_string())
}

fn element_name(start: &BytesStart<'_>) -> Result<String, String> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|e| e.to_string())
}

/// Rebuilds an allowed element with its permitted attributes only, or
/// returns `None` when the element is unwrapped. Outside of any written
/// element only `svg` is kept.
fn clean_start(
    start: &BytesStart<'_>,
    name: &str,
    written_depth: usize,
) -> Result<Option<BytesStart<'static>>, String> {
    let Some(permitted) = element_attributes(name) else {
        return Ok(None);
    };
    if written_depth == 0 && name != "svg" {
        return Ok(None);
    }

    let mut clean = BytesStart::new(name.to_string());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let key = std::str::from_utf8(attribute.key.as_ref()).map_err(|e| e.to_string())?;
        if !attribute_allowed(permitted, key) {
            continue;
        }
        let value: Cow<'_, str> = attribute.unescape_value().map_err(|e| e.to_string())?;
        if !value_is_safe(&value) {
            continue;
        }
        clean.push_attribute((key, value.as_ref()));
    }
    Ok(Some(clean))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_presentational_svg() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M0 0h24v24H0z" fill="#fff"/></svg>"##;
        assert_eq!(sanitize_svg(svg), svg);
    }

    #[test]
    fn strips_scripts_and_event_handlers() {
        let svg = r#"<svg onload="alert(1)" viewBox="0 0 1 1"><script>alert(2)</script><path d="M0 0" onclick="x()"/></svg>"#;
        assert_eq!(sanitize_svg(svg), r#"<svg viewBox="0 0 1 1"><path d="M0 0"/></svg>"#);
    }

    #[test]
    fn drops_external_references_but_keeps_local_gradients() {
        let svg = concat!(
            r##"<svg><defs><linearGradient id="g"><stop offset="0" stop-color="#000"/></linearGradient></defs>"##,
            r#"<rect width="1" height="1" fill="url(#g)"/>"#,
            r#"<rect width="1" height="1" fill="url(https://evil.example/x.svg#g)"/>"#,
            r#"<use href="https://evil.example/sprite.svg#icon"/>"#,
            r#"<image href="data:image/png;base64,AAAA"/></svg>"#,
        );
        assert_eq!(
            sanitize_svg(svg),
            concat!(
                r##"<svg><defs><linearGradient id="g"><stop offset="0" stop-color="#000"/></linearGradient></defs>"##,
                r#"<rect width="1" height="1" fill="url(#g)"/>"#,
                r#"<rect width="1" height="1"/></svg>"#,
            )
        );
    }

    #[test]
    fn unwraps_unknown_wrappers() {
        let markup = r#"<div class="x"><svg viewBox="0 0 1 1"><blink><circle r="1"/></blink></svg></div>"#;
        assert_eq!(sanitize_svg(markup), r#"<svg viewBox="0 0 1 1"><circle r="1"/></svg>"#);
    }

    #[test]
    fn requires_an_svg_root() {
        assert_eq!(sanitize_svg(r#"<path d="M0 0"/>"#), "");
        assert_eq!(sanitize_svg("just text"), "");
        assert_eq!(sanitize_svg(r#"<script><svg></svg></script>"#), "");
    }

    #[test]
    fn malformed_markup_sanitizes_to_nothing() {
        assert_eq!(sanitize_svg("<svg><path></svg>"), "");
        assert_eq!(sanitize_svg("<svg><svg"), "");
        assert_eq!(sanitize_svg("<svg>"), "");
    }

    #[test]
    fn escapes_text_and_attribute_values() {
        let svg = r#"<svg class="a&amp;b"><title>1 &lt; 2</title></svg>"#;
        assert_eq!(sanitize_svg(svg), svg);
    }

    #[test]
    fn rebuilt_attributes_are_reescaped() {
        let svg = r#"<svg aria-hidden="a&quot;&lt;b"><title>x &amp; y</title></svg>"#;
        assert_eq!(sanitize_svg(svg), svg);
    }

    #[test]
    fn sanitizing_twice_changes_nothing() {
        let svg = r#"<svg viewBox="0 0 2 2"><!-- c --><g fill="red"><path d="M0 0" style="x"/></g></svg>"#;
        let once = sanitize_svg(svg);
        assert_eq!(once, r#"<svg viewBox="0 0 2 2"><g fill="red"><path d="M0 0"/></g></svg>"#);
        assert_eq!(sanitize_svg(&once), once);
    }
}
