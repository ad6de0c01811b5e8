use crate::model::channel::ChannelKind;

/// Built-in brand glyph, drawn in `currentColor`.
pub fn brand_glyph(kind: ChannelKind) -> &'static str {
    match kind {
        ChannelKind::Whatsapp => concat!(
            r#"<svg class="contact-dock__brand-icon" viewBox="0 0 24 24" aria-hidden="true" focusable="false">"#,
            r#"<path fill="currentColor" d="M12 2a10 10 0 0 0-8.6 15.1L2 22l5-1.3A10 10 0 1 0 12 2zm5.4 13.9c-.2.6-1.3 1.2-1.8 1.2-.5.1-1 .2-3.3-.7-2.8-1.1-4.5-3.9-4.7-4.1-.1-.2-1.1-1.5-1.1-2.8s.7-2 1-2.3c.2-.3.5-.3.7-.3h.5c.2 0 .4 0 .6.5l.9 2.1c.1.2.1.4 0 .5l-.4.6-.4.4c-.1.2-.3.3-.1.6.2.3.8 1.3 1.7 2.1 1.2 1 2.1 1.3 2.4 1.5.3.1.5.1.6-.1l.9-1.1c.2-.3.4-.2.7-.1l2 1c.3.1.5.2.5.3.1.1.1.7-.1 1.3z"/>"#,
            "</svg>"
        ),
        ChannelKind::Phone => concat!(
            r#"<svg class="contact-dock__brand-icon" viewBox="0 0 24 24" aria-hidden="true" focusable="false">"#,
            r#"<path fill="currentColor" d="M6.6 10.8a15.1 15.1 0 0 0 6.6 6.6l2.2-2.2a1 1 0 0 1 1-.25c1.1.37 2.3.57 3.6.57a1 1 0 0 1 1 1V20a1 1 0 0 1-1 1A17 17 0 0 1 3 4a1 1 0 0 1 1-1h3.5a1 1 0 0 1 1 1c0 1.25.2 2.45.57 3.57a1 1 0 0 1-.25 1z"/>"#,
            "</svg>"
        ),
        ChannelKind::Email => concat!(
            r#"<svg class="contact-dock__brand-icon" viewBox="0 0 24 24" aria-hidden="true" focusable="false">"#,
            r#"<rect x="2" y="5" width="20" height="14" rx="2" fill="none" stroke="currentColor" stroke-width="2"/>"#,
            r#"<polyline points="2,6 12,13 22,6" fill="none" stroke="currentColor" stroke-width="2"/>"#,
            "</svg>"
        ),
        ChannelKind::Youtube => concat!(
            r#"<svg class="contact-dock__brand-icon" viewBox="0 0 24 24" aria-hidden="true" focusable="false">"#,
            r#"<path fill="currentColor" d="M23 7.2a3 3 0 0 0-2.1-2.1C19 4.6 12 4.6 12 4.6s-7 0-8.9.5A3 3 0 0 0 1 7.2 31 31 0 0 0 .5 12 31 31 0 0 0 1 16.8a3 3 0 0 0 2.1 2.1c1.9.5 8.9.5 8.9.5s7 0 8.9-.5a3 3 0 0 0 2.1-2.1 31 31 0 0 0 .5-4.8 31 31 0 0 0-.5-4.8zM9.75 15V9l5.75 3z"/>"#,
            "</svg>"
        ),
        ChannelKind::Facebook => concat!(
            r#"<svg class="contact-dock__brand-icon" viewBox="0 0 24 24" aria-hidden="true" focusable="false">"#,
            r#"<path fill="currentColor" d="M13.5 22v-8h2.7l.4-3.2h-3.1V8.8c0-.9.3-1.5 1.6-1.5h1.7V4.4c-.3 0-1.3-.1-2.5-.1-2.4 0-4.1 1.5-4.1 4.2v2.3H7.5V14h2.7v8z"/>"#,
            "</svg>"
        ),
        ChannelKind::Instagram => concat!(
            r#"<svg class="contact-dock__brand-icon" viewBox="0 0 24 24" aria-hidden="true" focusable="false">"#,
            r#"<rect x="3" y="3" width="18" height="18" rx="5" fill="none" stroke="currentColor" stroke-width="2"/>"#,
            r#"<circle cx="12" cy="12" r="4" fill="none" stroke="currentColor" stroke-width="2"/>"#,
            r#"<circle cx="17.5" cy="6.5" r="1.2" fill="currentColor"/>"#,
            "</svg>"
        ),
        ChannelKind::Linkedin => concat!(
            r#"<svg class="contact-dock__brand-icon" viewBox="0 0 24 24" aria-hidden="true" focusable="false">"#,
            r#"<path fill="currentColor" d="M4.5 3a2 2 0 1 1 0 4 2 2 0 0 1 0-4zM2.75 9h3.5v12h-3.5zM9 9h3.4v1.7c.5-.9 1.7-2 3.6-2 3.8 0 4.5 2.5 4.5 5.8V21H17v-5.8c0-1.4 0-3.2-2-3.2s-2.3 1.5-2.3 3.1V21H9z"/>"#,
            "</svg>"
        ),
    }
}

/// Default glyph as escaped text markup.
pub fn default_glyph(kind: ChannelKind) -> String {
    html_escape::encode_text(kind.default_glyph()).into_owned()
}
