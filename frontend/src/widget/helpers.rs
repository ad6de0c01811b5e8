//! DOM glue shared by the widget binding: pointer extraction from mouse and
//! touch events, and applying positions and transitions to the markup.

use common::widget::{Point, Transition, WidgetPosition};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, MouseEvent, Node, TouchEvent};

pub const OPEN_CLASS: &str = "is-open";

/// Client coordinates of the first touch, or of the mouse.
///
/// The event type is checked by name rather than with `instanceof`, which
/// fails on desktop browsers that do not define `TouchEvent`.
pub fn pointer_of(event: &Event) -> Option<Point> {
    if event.type_().starts_with("touch") {
        let touch = event.unchecked_ref::<TouchEvent>().touches().get(0)?;
        return Some(Point::new(touch.client_x().into(), touch.client_y().into()));
    }
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| Point::new(mouse.client_x().into(), mouse.client_y().into()))
}

/// Whether a pointer-down may start a drag: the primary mouse button, or
/// exactly one finger.
pub fn starts_drag(event: &Event) -> bool {
    if event.type_().starts_with("touch") {
        return event.unchecked_ref::<TouchEvent>().touches().length() == 1;
    }
    event.dyn_ref::<MouseEvent>().is_some_and(|mouse| mouse.button() == 0)
}

/// Top-left corner of `element` in viewport coordinates.
pub fn origin_of(element: &Element) -> Point {
    let rect = element.get_bounding_client_rect();
    Point::new(rect.left(), rect.top())
}

/// Pins the widget at `position`, releasing the corner anchoring from CSS.
pub fn apply_position(root: &HtmlElement, position: WidgetPosition) -> Result<(), JsValue> {
    let style = root.style();
    style.set_property("left", &format!("{}px", position.left))?;
    style.set_property("top", &format!("{}px", position.top))?;
    style.set_property("right", "auto")?;
    style.set_property("bottom", "auto")?;
    Ok(())
}

pub fn apply_transition(root: &Element, toggle: &Element, transition: Transition) -> Result<(), JsValue> {
    root.class_list()
        .toggle_with_force(OPEN_CLASS, transition.state.is_open())?;
    toggle.set_attribute("aria-expanded", transition.aria_expanded())
}

/// Whether the event target lies within `root`.
pub fn event_inside(root: &Element, event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Node>().ok())
        .is_some_and(|node| root.contains(Some(&node)))
}
