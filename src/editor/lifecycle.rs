//! Editor lifecycle - construction and teardown.

use super::observers::EditorObservers;
use super::{Editor, EditorEvent, EditorServices, Transition};
use crate::document::DocumentRef;
use crate::input::coords::ViewTransform;
use crate::input::events::Modifiers;
use crate::preferences::Preferences;
use crate::states::{state_ptr, CursorSpec, EnterReason, StandbyState, StateHistory, StateKind};
use crate::types::{EditorFlags, EditorId, SelectionMode};
use crate::zoom::Zoom;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

static NEXT_EDITOR_ID: AtomicU64 = AtomicU64::new(1);

impl Editor {
    /// Create an editor on `document`. The viewport starts empty; call
    /// [`Editor::resize`] once the toolkit knows the widget bounds.
    pub fn new(document: &DocumentRef, services: EditorServices, preferences: Preferences) -> Self {
        let id = EditorId(NEXT_EDITOR_ID.fetch_add(1, Ordering::Relaxed));
        let (layer, layer_index) = match document.try_borrow() {
            Ok(doc) => {
                let layers = doc.layers();
                match layers.last() {
                    Some(top) => (Some(*top), layers.len() - 1),
                    None => (None, 0),
                }
            }
            Err(_) => (None, 0),
        };
        let flags: EditorFlags = preferences.default_flags.iter().copied().collect();
        let now = services.clock.now();

        let mut editor = Self {
            id,
            preferences,
            document: Some(Rc::downgrade(document)),
            destroyed: false,
            history: StateHistory::new(state_ptr(StandbyState::new())),
            active_kind: StateKind::Standby,
            pending: VecDeque::new(),
            dispatch_depth: 0,
            layer,
            layer_index,
            frame: 0,
            view: ViewTransform::new(Zoom::default(), Default::default(), Default::default(), Default::default()),
            flags,
            decorator: None,
            last_pointer: Default::default(),
            modifiers: Modifiers::NONE,
            quicktool: None,
            secondary_button: false,
            selection_mode: SelectionMode::Replace,
            auto_select_layer: false,
            cursor: CursorSpec::Arrow,
            brush_preview: None,
            invalidated: Vec::new(),
            pending_blit: None,
            flash_layer: false,
            animation_speed: 1.0,
            mask_phase: 0,
            last_mask_step: now,
            observers: EditorObservers::default(),
            services,
        };

        let bottom = Rc::clone(editor.history.bottom());
        editor.call_on(&bottom, (), |s, ed| s.on_enter(ed, EnterReason::Fresh));
        info!(editor = id.0, layer = ?layer, flags = ?flags, "editor created");
        editor
    }

    /// Tear the editor down: cancel every state, leave the bottom state,
    /// notify observers and drop the document handle. Idempotent; also run
    /// on drop.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        info!(editor = self.id.0, "destroying editor");
        self.pending.clear();
        self.pending.push_back(Transition::Teardown);
        if self.dispatch_depth == 0 {
            self.flush_transitions();
        } else {
            debug!(editor = self.id.0, "teardown deferred until the running callback returns");
        }
        self.notify(EditorEvent::Destroyed);
        self.observers.clear();
        self.destroyed = true;
        self.document = None;
        self.invalidated.clear();
        self.pending_blit = None;
        self.brush_preview = None;
        self.decorator = None;
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        self.destroy();
    }
}
