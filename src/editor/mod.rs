//! The editor controller.
//!
//! One [`Editor`] shows one document in one viewport. It owns the view
//! (zoom, scroll, flags), the active layer and frame, and the stack of
//! interaction states that interpret input. Everything else (document,
//! tools, rendering, paint surface) is injected.
//!
//! ## Modules
//!
//! - `lifecycle` - construction and teardown
//! - `site` - active layer/frame and the drawability check
//! - `tools` - quicktools, selection mode, cursor, status text
//! - `playback` - animation play/stop and the editor timers
//! - `paint` - invalidation and the paint pass
//! - `document_events` - reacting to document changes
//! - `observers` - change notifications to interested parties
//!
//! Zoom/scroll control and default input handling live in [`crate::input`].
//!
//! ## State transitions
//!
//! States receive `&mut Editor` in their callbacks while the editor holds a
//! mutable borrow of them. Push, pop and replace requests made during a
//! callback are queued and applied when the outermost callback returns, so a
//! state is never re-entered while it is running.

mod document_events;
mod lifecycle;
mod observers;
mod paint;
mod playback;
mod site;
mod tools;

pub use observers::{EditorEvent, EditorObserver, ObserverId};
pub use paint::ScrollBlit;
pub use site::Site;

use crate::document::{Document, DocumentRef};
use crate::input::coords::ViewTransform;
use crate::input::events::Modifiers;
use crate::playback::Clock;
use crate::preferences::Preferences;
use crate::render::{EditorDecorator, RenderContext};
use crate::states::{CursorSpec, EditorState, EditorStatePtr, EnterReason, LeaveReason, StateHistory, StateKind};
use crate::tools::{CustomizationDelegate, ToolInfo, ToolRegistry};
use crate::types::{EditorFlags, EditorId, Frame, LayerId, Point, Rect, SelectionMode};
use observers::EditorObservers;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Instant;
use tracing::{debug, warn};

/// Collaborators shared by every editor of an application.
#[derive(Clone)]
pub struct EditorServices {
    pub tools: Rc<dyn ToolRegistry>,
    pub customization: Rc<dyn CustomizationDelegate>,
    pub render: Rc<RenderContext>,
    pub clock: Rc<dyn Clock>,
}

enum Transition {
    Push(EditorStatePtr),
    Pop,
    Replace(EditorStatePtr),
    /// Pop everything above the bottom state.
    Cancel,
    /// Cancel, then leave the bottom state too.
    Teardown,
}

pub struct Editor {
    pub(crate) id: EditorId,
    pub(crate) services: EditorServices,
    pub(crate) preferences: Preferences,
    pub(crate) document: Option<Weak<RefCell<dyn Document>>>,
    pub(crate) destroyed: bool,

    // State stack
    pub(crate) history: StateHistory,
    pub(crate) active_kind: StateKind,
    pending: VecDeque<Transition>,
    dispatch_depth: u32,

    // Site
    pub(crate) layer: Option<LayerId>,
    pub(crate) layer_index: usize,
    pub(crate) frame: Frame,

    // View
    pub(crate) view: ViewTransform,
    pub(crate) flags: EditorFlags,
    pub(crate) decorator: Option<Rc<dyn EditorDecorator>>,
    pub(crate) last_pointer: Point,

    // Tools and cursor
    pub(crate) modifiers: Modifiers,
    pub(crate) quicktool: Option<ToolInfo>,
    pub(crate) secondary_button: bool,
    pub(crate) selection_mode: SelectionMode,
    pub(crate) auto_select_layer: bool,
    pub(crate) cursor: CursorSpec,
    pub(crate) brush_preview: Option<Point>,

    // Paint
    pub(crate) invalidated: Vec<Rect>,
    pub(crate) pending_blit: Option<ScrollBlit>,
    pub(crate) flash_layer: bool,

    // Timers
    pub(crate) animation_speed: f64,
    pub(crate) mask_phase: u32,
    pub(crate) last_mask_step: Instant,

    pub(crate) observers: EditorObservers,
}

impl Editor {
    pub fn id(&self) -> EditorId {
        self.id
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn services(&self) -> &EditorServices {
        &self.services
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The document, while it is alive.
    pub fn document(&self) -> Option<DocumentRef> {
        self.document.as_ref()?.upgrade()
    }

    /// Run `f` against the document. `None` when it is gone or currently
    /// mutably borrowed.
    pub fn with_document<R>(&self, f: impl FnOnce(&dyn Document) -> R) -> Option<R> {
        let doc = self.document()?;
        let guard = match doc.try_borrow() {
            Ok(guard) => guard,
            Err(_) => {
                warn!(editor = self.id.0, "document busy; skipping query");
                return None;
            }
        };
        Some(f(&*guard))
    }

    pub fn flags(&self) -> EditorFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: EditorFlags) {
        if self.flags == flags {
            return;
        }
        self.flags = flags;
        self.invalidate_all();
        self.notify(EditorEvent::FlagsChanged(flags));
    }

    pub fn toggle_flag(&mut self, flag: EditorFlags) {
        let mut flags = self.flags;
        flags.toggle(flag);
        self.set_flags(flags);
    }

    pub fn set_decorator(&mut self, decorator: Option<Rc<dyn EditorDecorator>>) {
        self.decorator = decorator;
        self.invalidate_all();
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Last pointer position seen, in viewport space.
    pub fn last_pointer(&self) -> Point {
        self.last_pointer
    }

    pub(crate) fn set_last_pointer(&mut self, pos: Point) {
        self.last_pointer = pos;
    }

    pub(crate) fn now(&self) -> Instant {
        self.services.clock.now()
    }

    // ========================================================================
    // State stack
    // ========================================================================

    /// Kind of the active state.
    pub fn state_kind(&self) -> StateKind {
        self.active_kind
    }

    /// The active state.
    pub fn state(&self) -> EditorStatePtr {
        Rc::clone(self.history.top())
    }

    pub fn state_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn has_state(&self, state: &EditorStatePtr) -> bool {
        self.history.contains(state)
    }

    /// Activate `state` on top of the current one, which is suspended.
    pub fn push_state(&mut self, state: EditorStatePtr) {
        self.request(Transition::Push(state));
    }

    /// Pop the active state and resume the one below. Refused at the bottom.
    pub fn back_to_previous_state(&mut self) {
        self.request(Transition::Pop);
    }

    /// Swap the active state for `state` without returning to it later.
    pub fn replace_state(&mut self, state: EditorStatePtr) {
        self.request(Transition::Replace(state));
    }

    /// Abort whatever gesture is running and return to the bottom state.
    pub fn cancel_interaction(&mut self) {
        self.request(Transition::Cancel);
    }

    fn request(&mut self, transition: Transition) {
        if self.destroyed {
            debug!(editor = self.id.0, "ignoring state change on destroyed editor");
            return;
        }
        self.pending.push_back(transition);
        if self.dispatch_depth == 0 {
            self.flush_transitions();
        }
    }

    fn flush_transitions(&mut self) {
        self.dispatch_depth += 1;
        while let Some(transition) = self.pending.pop_front() {
            self.apply_transition(transition);
        }
        self.dispatch_depth -= 1;
    }

    fn apply_transition(&mut self, transition: Transition) {
        let from = Rc::clone(self.history.top());
        match transition {
            Transition::Push(state) => {
                if Rc::ptr_eq(&from, &state) {
                    warn!(editor = self.id.0, "state is already active; push ignored");
                    return;
                }
                self.call_on(&from, (), |s, ed| s.on_leave(ed, LeaveReason::Suspended));
                self.history.push(Rc::clone(&state));
                self.call_on(&state, (), |s, ed| s.on_enter(ed, EnterReason::Fresh));
            }
            Transition::Pop => {
                if self.history.is_at_bottom() {
                    debug!(editor = self.id.0, "already at the bottom state; pop refused");
                    return;
                }
                self.call_on(&from, (), |s, ed| s.on_leave(ed, LeaveReason::Popped));
                self.history.pop();
                let resumed = Rc::clone(self.history.top());
                self.call_on(&resumed, (), |s, ed| s.on_enter(ed, EnterReason::Resumed));
            }
            Transition::Replace(state) => {
                self.call_on(&from, (), |s, ed| s.on_leave(ed, LeaveReason::Replaced));
                self.history.replace_top(Rc::clone(&state));
                self.call_on(&state, (), |s, ed| s.on_enter(ed, EnterReason::Fresh));
            }
            Transition::Cancel | Transition::Teardown => {
                let teardown = matches!(transition, Transition::Teardown);
                while !self.history.is_at_bottom() {
                    let top = Rc::clone(self.history.top());
                    self.call_on(&top, (), |s, ed| s.on_leave(ed, LeaveReason::Cancelled));
                    self.history.pop();
                }
                let bottom = Rc::clone(self.history.bottom());
                if teardown {
                    self.call_on(&bottom, (), |s, ed| s.on_leave(ed, LeaveReason::Cancelled));
                } else if !Rc::ptr_eq(&from, &bottom) {
                    self.call_on(&bottom, (), |s, ed| s.on_enter(ed, EnterReason::Resumed));
                }
            }
        }
        self.after_state_change(&from);
    }

    fn after_state_change(&mut self, from: &EditorStatePtr) {
        let from_kind = self.active_kind;
        let to_kind = self
            .history
            .top()
            .try_borrow()
            .map(|s| s.kind())
            .unwrap_or(from_kind);
        self.active_kind = to_kind;
        if Rc::ptr_eq(from, self.history.top()) && from_kind == to_kind {
            return;
        }
        debug!(
            editor = self.id.0,
            from = from_kind.name(),
            to = to_kind.name(),
            depth = self.history.depth(),
            "editor state changed"
        );
        self.invalidate_all();
        if !self.destroyed {
            self.update_cursor(self.last_pointer);
        }
        self.notify(EditorEvent::StateChanged {
            from: from_kind,
            to: to_kind,
        });
        // Modifiers released during a gesture take effect once it ends.
        if !self.destroyed && self.history.is_at_bottom() {
            let modifiers = self.modifiers;
            self.update_tool_modifiers(modifiers);
        }
    }

    /// Whether a state callback is running right now.
    pub(crate) fn in_dispatch(&self) -> bool {
        self.dispatch_depth > 0
    }

    /// Run `f` on the active state.
    pub(crate) fn dispatch<R>(&mut self, default: R, f: impl FnOnce(&mut dyn EditorState, &mut Editor) -> R) -> R {
        let state = Rc::clone(self.history.top());
        self.call_on(&state, default, f)
    }

    fn call_on<R>(
        &mut self,
        state: &EditorStatePtr,
        default: R,
        f: impl FnOnce(&mut dyn EditorState, &mut Editor) -> R,
    ) -> R {
        self.dispatch_depth += 1;
        let result = match state.try_borrow_mut() {
            Ok(mut guard) => f(&mut *guard, self),
            Err(_) => {
                warn!(editor = self.id.0, "state is busy; notification dropped");
                default
            }
        };
        self.dispatch_depth -= 1;
        if self.dispatch_depth == 0 && !self.pending.is_empty() {
            self.flush_transitions();
        }
        result
    }

    /// Read-only access to the active state (paint, cursor, deadlines).
    pub(crate) fn peek_state<R>(&self, f: impl FnOnce(&dyn EditorState, &Editor) -> R) -> Option<R> {
        let state = self.history.top();
        match state.try_borrow() {
            Ok(guard) => Some(f(&*guard, self)),
            Err(_) => None,
        }
    }
}
