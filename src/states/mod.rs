//! Interaction states - the interchangeable modes that interpret input.
//!
//! The editor keeps a [`StateHistory`] of reference-counted states; the top
//! entry receives every input, paint and timer notification. States never
//! mutate the stack directly: they ask the editor to push, pop or replace,
//! and the editor applies the request once the current callback returns.
//!
//! ## State Transitions
//!
//! ```text
//! Standby -> Drawing        (press with a pixel tool on a drawable layer)
//! Standby -> Selecting      (press with a selection tool)
//! Selecting -> MovingPixels (press on the selection body or a handle)
//! Standby -> MovingPixels   (press with the move tool inside the selection)
//! Standby -> Scrolling      (pan gesture, hand tool, space quicktool)
//! Standby -> Zooming        (zoom tool or ctrl+space quicktool)
//! Standby -> Playing        (Editor::play)
//!
//! Any -> previous           (release, Escape, Enter, Editor::stop)
//! Any -> Standby            (focus lost, document change invalidating the state)
//! ```
//!
//! A state object may be shared by several editors viewing the same
//! document. Changing its fields from one editor is a deliberate cross-view
//! effect.

mod drawing;
mod history;
mod moving_pixels;
mod playing;
mod scrolling;
mod selecting;
mod standby;
mod zooming;

pub use drawing::DrawingState;
pub use history::StateHistory;
pub use moving_pixels::MovingPixelsState;
pub use playing::PlayingState;
pub use scrolling::ScrollingState;
pub use selecting::SelectingState;
pub use standby::StandbyState;
pub use zooming::ZoomingState;

use crate::document::{DocumentEvent, Handle};
use crate::editor::Editor;
use crate::input::events::{InputOutcome, KeyEvent, MouseEvent, WheelEvent};
use crate::render::Graphics;
use crate::types::Point;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// Shared handle to an interaction state.
pub type EditorStatePtr = Rc<RefCell<dyn EditorState>>;

/// Wrap a state into a shareable handle.
pub fn state_ptr<S: EditorState + 'static>(state: S) -> EditorStatePtr {
    Rc::new(RefCell::new(state))
}

/// Identity of a state variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Standby,
    Drawing,
    Selecting,
    MovingPixels,
    Scrolling,
    Zooming,
    Playing,
    /// States defined outside this crate.
    Custom(&'static str),
}

impl StateKind {
    pub fn name(&self) -> &'static str {
        match self {
            StateKind::Standby => "standby",
            StateKind::Drawing => "drawing",
            StateKind::Selecting => "selecting",
            StateKind::MovingPixels => "moving_pixels",
            StateKind::Scrolling => "scrolling",
            StateKind::Zooming => "zooming",
            StateKind::Playing => "playing",
            StateKind::Custom(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterReason {
    /// Newly pushed or swapped in by a replace.
    Fresh,
    /// The state above was popped and this one is active again.
    Resumed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveReason {
    /// Another state was pushed on top; this one stays below.
    Suspended,
    /// Removed, returning control to the state below.
    Popped,
    /// Swapped out laterally; there is no state to return to.
    Replaced,
    /// Removed because the gesture was aborted (focus loss, document
    /// change, editor teardown).
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateValidity {
    Valid,
    /// The state depended on something the document removed; the editor
    /// cancels back to the default state.
    Invalidated,
}

/// Mouse cursor a state wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorSpec {
    #[default]
    Arrow,
    Crosshair,
    Move,
    Hand,
    Zoom,
    Forbidden,
    SizeHandle(Handle),
    /// Hide the system cursor and show the brush preview instead.
    BrushPreview,
}

/// One interaction mode. Every notification has a default so a state only
/// implements what it cares about.
pub trait EditorState {
    fn kind(&self) -> StateKind;

    fn on_enter(&mut self, editor: &mut Editor, reason: EnterReason) {
        let _ = (editor, reason);
    }

    fn on_leave(&mut self, editor: &mut Editor, reason: LeaveReason) {
        let _ = (editor, reason);
    }

    fn on_mouse_down(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        let _ = (editor, ev);
        InputOutcome::Propagate
    }

    fn on_mouse_up(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        let _ = (editor, ev);
        InputOutcome::Propagate
    }

    fn on_mouse_move(&mut self, editor: &mut Editor, ev: &MouseEvent) -> InputOutcome {
        let _ = (editor, ev);
        InputOutcome::Propagate
    }

    fn on_wheel(&mut self, editor: &mut Editor, ev: &WheelEvent) -> InputOutcome {
        let _ = (editor, ev);
        InputOutcome::Propagate
    }

    fn on_key_down(&mut self, editor: &mut Editor, ev: &KeyEvent) -> InputOutcome {
        let _ = (editor, ev);
        InputOutcome::Propagate
    }

    fn on_key_up(&mut self, editor: &mut Editor, ev: &KeyEvent) -> InputOutcome {
        let _ = (editor, ev);
        InputOutcome::Propagate
    }

    /// Zoom or scroll changed; states showing screen-space handles refresh.
    fn on_view_changed(&mut self, editor: &mut Editor) {
        let _ = editor;
    }

    fn on_timer_tick(&mut self, editor: &mut Editor, now: Instant) {
        let _ = (editor, now);
    }

    /// When the state next needs [`EditorState::on_timer_tick`].
    fn next_deadline(&self, editor: &Editor) -> Option<Instant> {
        let _ = editor;
        None
    }

    fn on_speed_changed(&mut self, editor: &mut Editor, speed: f64, now: Instant) {
        let _ = (editor, speed, now);
    }

    fn on_document_event(&mut self, editor: &mut Editor, ev: &DocumentEvent) -> StateValidity {
        let _ = (editor, ev);
        StateValidity::Valid
    }

    fn paint_decorations(&self, editor: &Editor, g: &mut dyn Graphics) {
        let _ = (editor, g);
    }

    /// Cursor for a pointer at `pos` (viewport space). `None` leaves the
    /// editor's default.
    fn cursor(&self, editor: &Editor, pos: Point) -> Option<CursorSpec> {
        let _ = (editor, pos);
        None
    }
}
