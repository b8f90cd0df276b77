//! Stack of interaction states.
//!
//! The bottom entry is the permanent default state and is never removed, so
//! the stack always has an active (top) state.

use super::EditorStatePtr;
use std::rc::Rc;

pub struct StateHistory {
    states: Vec<EditorStatePtr>,
}

impl StateHistory {
    pub fn new(bottom: EditorStatePtr) -> Self {
        Self { states: vec![bottom] }
    }

    /// The active state.
    pub fn top(&self) -> &EditorStatePtr {
        // Never empty: `pop` refuses to remove the bottom entry.
        &self.states[self.states.len() - 1]
    }

    pub fn bottom(&self) -> &EditorStatePtr {
        &self.states[0]
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn is_at_bottom(&self) -> bool {
        self.states.len() == 1
    }

    pub fn push(&mut self, state: EditorStatePtr) {
        self.states.push(state);
    }

    /// Remove the top state. Returns `None` (and changes nothing) when only
    /// the bottom state is left.
    pub fn pop(&mut self) -> Option<EditorStatePtr> {
        if self.is_at_bottom() {
            return None;
        }
        self.states.pop()
    }

    /// Swap the top state for `state` without growing the stack. Replacing
    /// the bottom state installs a new permanent default.
    pub fn replace_top(&mut self, state: EditorStatePtr) -> EditorStatePtr {
        let last = self.states.len() - 1;
        std::mem::replace(&mut self.states[last], state)
    }

    pub fn contains(&self, state: &EditorStatePtr) -> bool {
        self.states.iter().any(|s| Rc::ptr_eq(s, state))
    }

    /// States from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &EditorStatePtr> {
        self.states.iter()
    }
}
