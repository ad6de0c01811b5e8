/// Open/closed state of one rendered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Closed,
    Open,
}

impl WidgetState {
    pub fn is_open(self) -> bool {
        self == WidgetState::Open
    }
}

/// A state change the view has to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: WidgetState,
}

impl Transition {
    /// Value of the toggle's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.state.is_open() { "true" } else { "false" }
    }
}

/// Keys that close an open panel.
pub const CANCEL_KEYS: [&str; 2] = ["Escape", "Esc"];

/// Toggle state machine. One instance per rendered widget; a reload starts
/// over from `Closed`.
///
/// The toggle control is the only input allowed to open the panel. Document
/// clicks and key presses are considered only while `Open`, and a click that
/// lands inside the widget never closes it, so a click on the toggle is
/// handled exactly once.
#[derive(Debug, Default)]
pub struct WidgetMachine {
    state: WidgetState,
}

impl WidgetMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn toggle(&mut self) -> Transition {
        let next = match self.state {
            WidgetState::Closed => WidgetState::Open,
            WidgetState::Open => WidgetState::Closed,
        };
        self.enter(next)
    }

    /// A pointer interaction anywhere in the document. `inside_widget` is
    /// true when the event target lies within the widget's bounds.
    pub fn document_click(&mut self, inside_widget: bool) -> Option<Transition> {
        if self.state.is_open() && !inside_widget {
            Some(self.enter(WidgetState::Closed))
        } else {
            None
        }
    }

    pub fn key_down(&mut self, key: &str) -> Option<Transition> {
        if self.state.is_open() && CANCEL_KEYS.contains(&key) {
            Some(self.enter(WidgetState::Closed))
        } else {
            None
        }
    }

    fn enter(&mut self, state: WidgetState) -> Transition {
        self.state = state;
        Transition { state }
    }
}
