//! Toolkit-neutral input events.
//!
//! The embedding toolkit translates its own messages into these before
//! handing them to [`Editor::handle_input`](crate::editor::Editor::handle_input).
//! Positions are always in viewport (screen) space.

use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys and modifiers held while an event was generated.
///
/// `space` is tracked like a modifier because it drives the hand quicktool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub space: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        space: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    pub fn shift() -> Self {
        Self { shift: true, ..Self::NONE }
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::NONE }
    }

    pub fn alt() -> Self {
        Self { alt: true, ..Self::NONE }
    }

    pub fn space() -> Self {
        Self { space: true, ..Self::NONE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub position: Point,
    /// Button that changed state (down/up) or is held (move). `None` for a
    /// plain hover.
    pub button: Option<MouseButton>,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(position: Point, button: Option<MouseButton>, modifiers: Modifiers) -> Self {
        Self {
            position,
            button,
            modifiers,
        }
    }

    pub fn left(position: Point) -> Self {
        Self::new(position, Some(MouseButton::Left), Modifiers::NONE)
    }

    pub fn hover(position: Point) -> Self {
        Self::new(position, None, Modifiers::NONE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    pub position: Point,
    /// Wheel notches; positive `y` scrolls down, positive `x` right.
    pub delta: Point,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Space,
    Left,
    Right,
    Up,
    Down,
    Delete,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Modifiers after the key changed state.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MouseDown(MouseEvent),
    MouseUp(MouseEvent),
    MouseMove(MouseEvent),
    Wheel(WheelEvent),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    /// Keyboard/pointer focus left the editor; cancels in-progress gestures.
    FocusLost,
}

impl InputEvent {
    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            InputEvent::MouseDown(ev) | InputEvent::MouseUp(ev) | InputEvent::MouseMove(ev) => {
                Some(ev.modifiers)
            }
            InputEvent::Wheel(ev) => Some(ev.modifiers),
            InputEvent::KeyDown(ev) | InputEvent::KeyUp(ev) => Some(ev.modifiers),
            InputEvent::FocusLost => None,
        }
    }
}

/// Whether a state handled an event or leaves it to default handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputOutcome {
    Consumed,
    #[default]
    Propagate,
}

impl InputOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, InputOutcome::Consumed)
    }
}
