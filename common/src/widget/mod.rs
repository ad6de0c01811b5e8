//! Interaction core of the rendered widget.
//!
//! `WidgetController` owns everything one widget instance needs: the
//! open/closed machine, the drag tracker used in floating layout and the
//! remembered-position store. It has no DOM dependency; the browser binding
//! feeds it events and applies what it returns.

mod drag;
mod machine;
mod storage;

pub use drag::{DragTracker, Point, WidgetPosition};
pub use machine::{CANCEL_KEYS, Transition, WidgetMachine, WidgetState};
pub use storage::{KeyValueStore, MemoryStore, POSITION_STORAGE_KEY, PositionStore, StoreError, position_key};

use crate::model::config::Layout;

pub struct WidgetController<S> {
    layout: Layout,
    machine: WidgetMachine,
    drag: DragTracker,
    positions: PositionStore<S>,
}

impl<S: KeyValueStore> WidgetController<S> {
    pub fn new(layout: Layout, store: S) -> Self {
        Self::with_positions(layout, PositionStore::new(store))
    }

    pub fn with_positions(layout: Layout, positions: PositionStore<S>) -> Self {
        Self {
            layout,
            machine: WidgetMachine::new(),
            drag: DragTracker::new(),
            positions,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn state(&self) -> WidgetState {
        self.machine.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Position to apply at mount, overriding the CSS placement. Only the
    /// floating layout remembers positions.
    pub fn restored_position(&self) -> Option<WidgetPosition> {
        match self.layout {
            Layout::Floating => self.positions.load(),
            Layout::Bar => None,
        }
    }

    pub fn toggle(&mut self) -> Transition {
        self.machine.toggle()
    }

    pub fn document_click(&mut self, inside_widget: bool) -> Option<Transition> {
        self.machine.document_click(inside_widget)
    }

    pub fn key_down(&mut self, key: &str) -> Option<Transition> {
        self.machine.key_down(key)
    }

    /// Begins a drag; returns `false` when the layout is not draggable.
    pub fn drag_start(&mut self, pointer: Point, origin: Point) -> bool {
        if self.layout != Layout::Floating {
            return false;
        }
        self.drag.begin(pointer, origin);
        true
    }

    pub fn drag_move(&mut self, pointer: Point) -> Option<WidgetPosition> {
        self.drag.update(pointer)
    }

    /// Ends the drag and persists the final position. The position is
    /// returned even when persisting it failed.
    pub fn drag_end(&mut self) -> Option<WidgetPosition> {
        let position = self.drag.finish()?;
        self.positions.save(position);
        Some(position)
    }
}
