//! Browser binding of the contact dock.
//!
//! Every `.contact-dock` element in the page gets its own [`Widget`]: the
//! markup handles plus a `WidgetController` from `common`, shared between
//! the event listeners through an `Rc`. Listeners installed at mount live as
//! long as the page; drag listeners live as long as one [`DragSession`].

mod drag;
mod helpers;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use common::model::config::Layout;
use common::widget::{Point, PositionStore, Transition, WidgetController};
use gloo_console::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent};

use drag::DragSession;
use helpers::{apply_position, apply_transition, event_inside, origin_of, pointer_of, starts_drag};
use storage::LocalStorage;

const ROOT_SELECTOR: &str = ".contact-dock";
const TOGGLE_SELECTOR: &str = ".contact-dock__toggle";

pub struct Widget {
    root: HtmlElement,
    toggle: HtmlElement,
    controller: RefCell<WidgetController<LocalStorage>>,
    session: RefCell<Option<DragSession>>,
}

/// Mounts a widget on every rendered dock in the document. Docks are
/// numbered in document order; the number selects the dock's remembered
/// position so several docks on one page do not overwrite each other.
pub fn mount_all() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let roots = match document.query_selector_all(ROOT_SELECTOR) {
        Ok(roots) => roots,
        Err(e) => {
            error!("contact dock: query failed", e);
            return;
        }
    };

    for index in 0..roots.length() {
        let Some(root) = roots.get(index).and_then(|node| node.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        if let Err(e) = Widget::mount(&document, root, index as usize) {
            error!("contact dock: mount failed", e);
        }
    }
}

impl Widget {
    fn mount(document: &Document, root: HtmlElement, instance: usize) -> Result<(), JsValue> {
        let Some(toggle) = root
            .query_selector(TOGGLE_SELECTOR)?
            .and_then(|toggle| toggle.dyn_into::<HtmlElement>().ok())
        else {
            warn!("contact dock: markup has no toggle control");
            return Ok(());
        };

        let layout = root
            .get_attribute("data-layout")
            .and_then(|raw| Layout::parse(&raw))
            .unwrap_or_default();
        let positions = PositionStore::for_instance(LocalStorage::open(), instance);
        let controller = WidgetController::with_positions(layout, positions);

        if let Some(position) = controller.restored_position() {
            apply_position(&root, position)?;
        }

        let widget = Rc::new(Widget {
            root,
            toggle,
            controller: RefCell::new(controller),
            session: RefCell::new(None),
        });

        widget.listen_toggle()?;
        widget.listen_document(document)?;
        if layout == Layout::Floating {
            widget.listen_drag_start(document)?;
        }
        Ok(())
    }

    fn listen_toggle(self: &Rc<Self>) -> Result<(), JsValue> {
        let widget = Rc::clone(self);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let transition = widget.controller.borrow_mut().toggle();
            widget.apply(transition);
        });
        self.toggle
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        Ok(())
    }

    fn listen_document(self: &Rc<Self>, document: &Document) -> Result<(), JsValue> {
        let widget = Rc::clone(self);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let inside = event_inside(&widget.root, &event);
            let transition = widget.controller.borrow_mut().document_click(inside);
            if let Some(transition) = transition {
                widget.apply(transition);
            }
        });
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        let widget = Rc::clone(self);
        let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let transition = widget.controller.borrow_mut().key_down(&event.key());
            if let Some(transition) = transition {
                widget.apply(transition);
            }
        });
        document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
        on_key.forget();
        Ok(())
    }

    fn listen_drag_start(self: &Rc<Self>, document: &Document) -> Result<(), JsValue> {
        let widget = Rc::clone(self);
        let document = document.clone();
        let on_start = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if !starts_drag(&event) {
                return;
            }
            let Some(pointer) = pointer_of(&event) else {
                return;
            };
            if let Err(e) = Widget::begin_drag(&widget, &document, pointer) {
                warn!("contact dock: drag not started", e);
            }
        });
        for name in ["mousedown", "touchstart"] {
            self.toggle
                .add_event_listener_with_callback(name, on_start.as_ref().unchecked_ref())?;
        }
        on_start.forget();
        Ok(())
    }

    fn begin_drag(widget: &Rc<Widget>, document: &Document, pointer: Point) -> Result<(), JsValue> {
        // A session whose end event never arrived (released outside the
        // window) is torn down before the next one starts.
        if let Some(stale) = widget.session.borrow_mut().take() {
            stale.detach();
        }

        let origin = origin_of(&widget.root);
        if !widget.controller.borrow_mut().drag_start(pointer, origin) {
            return Ok(());
        }
        let session = DragSession::attach(widget, document.clone())?;
        *widget.session.borrow_mut() = Some(session);
        Ok(())
    }

    /// Finishes the current drag: listeners go away immediately, the
    /// controller persists the final position.
    fn end_drag(widget: &Rc<Widget>) {
        let session = widget.session.borrow_mut().take();
        if let Some(session) = &session {
            session.detach();
        }
        widget.controller.borrow_mut().drag_end();

        // The session owns the closure currently running; release it once
        // this handler has returned.
        if let Some(session) = session {
            wasm_bindgen_futures::spawn_local(async move {
                drop(session);
            });
        }
    }

    fn apply(&self, transition: Transition) {
        if let Err(e) = apply_transition(&self.root, &self.toggle, transition) {
            warn!("contact dock: could not update state", e);
        }
    }
}
