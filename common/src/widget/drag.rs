use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Viewport coordinates of a pointer, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Top-left corner of a floating widget, in CSS pixels. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub left: f64,
    pub top: f64,
}

impl WidgetPosition {
    /// Builds a position, clamping both coordinates to `0` on the low end.
    pub fn clamped(left: f64, top: f64) -> Self {
        Self {
            left: left.max(0.0),
            top: top.max(0.0),
        }
    }

    /// Decodes a stored `{left, top}` payload. Anything that is not an object
    /// with two finite numbers is treated as absent.
    pub fn decode(stored: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(stored).ok()?;
        let left = value.get("left")?.as_f64()?;
        let top = value.get("top")?.as_f64()?;
        (left.is_finite() && top.is_finite()).then(|| Self::clamped(left, top))
    }

    pub fn encode(&self) -> String {
        serde_json::json!({ "left": self.left, "top": self.top }).to_string()
    }
}

#[derive(Debug, Clone, Copy)]
struct Session {
    start_pointer: Point,
    start_origin: WidgetPosition,
    current: WidgetPosition,
}

/// Position arithmetic of a free drag. At most one session is active.
#[derive(Debug, Default)]
pub struct DragTracker {
    session: Option<Session>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a session at `pointer` with the widget's current top-left
    /// corner at `origin`. A session still running is replaced.
    pub fn begin(&mut self, pointer: Point, origin: Point) {
        let start_origin = WidgetPosition {
            left: origin.x,
            top: origin.y,
        };
        self.session = Some(Session {
            start_pointer: pointer,
            start_origin,
            current: WidgetPosition::clamped(origin.x, origin.y),
        });
    }

    /// New widget position for a pointer move, or `None` without a session.
    pub fn update(&mut self, pointer: Point) -> Option<WidgetPosition> {
        let session = self.session.as_mut()?;
        let delta_x = pointer.x - session.start_pointer.x;
        let delta_y = pointer.y - session.start_pointer.y;
        session.current = WidgetPosition::clamped(
            session.start_origin.left + delta_x,
            session.start_origin.top + delta_y,
        );
        Some(session.current)
    }

    /// Ends the session and returns the final position. Ending without a
    /// session is harmless and returns `None`.
    pub fn finish(&mut self) -> Option<WidgetPosition> {
        self.session.take().map(|session| session.current)
    }
}
