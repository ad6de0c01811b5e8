//! One drag cycle of a floating widget.
//!
//! A `DragSession` is created on pointer-down over the toggle and installs
//! the document-level move and end listeners. Ending the session removes all
//! four of them, so no listener outlives its drag.

use std::rc::Rc;

use gloo_console::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Event};

use super::helpers::{apply_position, pointer_of};
use super::Widget;

const MOVE_EVENTS: [&str; 2] = ["mousemove", "touchmove"];
const END_EVENTS: [&str; 2] = ["mouseup", "touchend"];

pub struct DragSession {
    document: Document,
    on_move: Closure<dyn FnMut(Event)>,
    on_end: Closure<dyn FnMut(Event)>,
}

impl DragSession {
    /// Installs the listeners for a drag that `widget`'s controller has
    /// already begun.
    pub fn attach(widget: &Rc<Widget>, document: Document) -> Result<Self, JsValue> {
        let moving = Rc::clone(widget);
        let on_move = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(pointer) = pointer_of(&event) else {
                return;
            };
            let position = moving.controller.borrow_mut().drag_move(pointer);
            if let Some(position) = position {
                event.prevent_default();
                if let Err(e) = apply_position(&moving.root, position) {
                    warn!("contact dock: could not move widget", e);
                }
            }
        });

        let ending = Rc::clone(widget);
        let on_end = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            Widget::end_drag(&ending);
        });

        // touchmove must be able to cancel native scrolling.
        let active = AddEventListenerOptions::new();
        active.set_passive(false);

        document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            on_move.as_ref().unchecked_ref(),
            &active,
        )?;
        for name in END_EVENTS {
            document.add_event_listener_with_callback(name, on_end.as_ref().unchecked_ref())?;
        }

        Ok(Self {
            document,
            on_move,
            on_end,
        })
    }

    /// Removes every listener of this session. Safe to call more than once.
    pub fn detach(&self) {
        for name in MOVE_EVENTS {
            let _ = self
                .document
                .remove_event_listener_with_callback(name, self.on_move.as_ref().unchecked_ref());
        }
        for name in END_EVENTS {
            let _ = self
                .document
                .remove_event_listener_with_callback(name, self.on_end.as_ref().unchecked_ref());
        }
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        self.detach();
    }
}
