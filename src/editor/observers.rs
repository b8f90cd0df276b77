//! Change notifications.
//!
//! Observers get the editor id and a copy of what changed, never the editor
//! itself, so a notification can't re-enter the controller while it is
//! mid-update.

use super::Editor;
use crate::states::StateKind;
use crate::tools::ToolInfo;
use crate::types::{EditorFlags, EditorId, Frame, LayerId, Point};
use crate::zoom::Zoom;
use std::rc::Rc;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    StateChanged { from: StateKind, to: StateKind },
    ScrollChanged(Point),
    ZoomChanged(Zoom),
    FlagsChanged(EditorFlags),
    LayerChanged(Option<LayerId>),
    FrameChanged(Frame),
    QuickToolChanged(Option<ToolInfo>),
    PlaybackStarted,
    PlaybackStopped,
    Destroyed,
}

pub trait EditorObserver {
    fn on_editor_event(&self, editor: EditorId, event: &EditorEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub struct EditorObservers {
    next_id: u64,
    entries: Vec<(ObserverId, Rc<dyn EditorObserver>)>,
}

impl EditorObservers {
    fn add(&mut self, observer: Rc<dyn EditorObserver>) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Editor {
    pub fn add_observer(&mut self, observer: Rc<dyn EditorObserver>) -> ObserverId {
        self.observers.add(observer)
    }

    /// Returns `false` when `id` was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn notify(&self, event: EditorEvent) {
        trace!(editor = self.id.0, event = ?event, "notify observers");
        for (_, observer) in &self.observers.entries {
            observer.on_editor_event(self.id, &event);
        }
    }
}
