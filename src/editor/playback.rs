//! Animation playback and the editor's timers.
//!
//! The editor has no timer of its own. The toolkit asks for
//! [`Editor::next_timer_deadline`] and calls [`Editor::on_timer_tick`] when
//! it passes; both the playing state and the marching-ants outline are
//! driven from there.

use super::Editor;
use crate::constants::MARCHING_ANTS_DASH;
use crate::error::{EditorError, EditorResult};
use crate::playback::{clamp_speed, PlaybackOptions};
use crate::states::{state_ptr, PlayingState, StateKind};
use crate::types::EditorFlags;
use std::time::Instant;
use tracing::{debug, info};

impl Editor {
    /// Start playing the animation from the current frame.
    pub fn play(&mut self) -> EditorResult<()> {
        let options = self.preferences.playback;
        self.play_with(options)
    }

    pub fn play_with(&mut self, options: PlaybackOptions) -> EditorResult<()> {
        if self.is_playing() {
            return Ok(());
        }
        let frames = self.with_document(|doc| doc.frame_count()).ok_or(EditorError::NoDocument)?;
        info!(editor = self.id.0, frames, options = ?options, "playback started");
        let state = PlayingState::new(self.frame, options, self.animation_speed, self.now());
        self.push_state(state_ptr(state));
        Ok(())
    }

    /// Stop playback. The frame shown afterwards follows the stop behavior.
    pub fn stop(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.back_to_previous_state();
    }

    pub fn is_playing(&self) -> bool {
        self.active_kind == StateKind::Playing
    }

    pub fn animation_speed_multiplier(&self) -> f64 {
        self.animation_speed
    }

    /// Change the playback speed. Applies immediately to a running
    /// animation without skipping frames.
    pub fn set_animation_speed_multiplier(&mut self, speed: f64) {
        let speed = clamp_speed(speed);
        if speed == self.animation_speed {
            return;
        }
        debug!(editor = self.id.0, speed, "animation speed changed");
        self.animation_speed = speed;
        let now = self.now();
        self.dispatch((), |state, editor| state.on_speed_changed(editor, speed, now));
    }

    /// Earliest instant at which [`Editor::on_timer_tick`] has work to do.
    pub fn next_timer_deadline(&self) -> Option<Instant> {
        let state = self.peek_state(|state, editor| state.next_deadline(editor)).flatten();
        let mask = self
            .marching_ants_visible()
            .then(|| self.last_mask_step + self.preferences.marching_ants_interval());
        match (state, mask) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Advance time-driven behavior to the clock's current instant.
    pub fn on_timer_tick(&mut self) {
        if self.destroyed {
            return;
        }
        if self.document().is_none() {
            self.destroy();
            return;
        }
        let now = self.now();
        self.dispatch((), |state, editor| state.on_timer_tick(editor, now));
        self.on_mask_timer(now);
    }

    fn marching_ants_visible(&self) -> bool {
        self.flags.contains(EditorFlags::SHOW_MASK)
            && self
                .with_document(|doc| doc.selection_bounds().is_some())
                .unwrap_or(false)
    }

    /// Step the marching ants when their interval has passed.
    pub(crate) fn on_mask_timer(&mut self, now: Instant) {
        if !self.marching_ants_visible() {
            self.last_mask_step = now;
            return;
        }
        if now.saturating_duration_since(self.last_mask_step) < self.preferences.marching_ants_interval() {
            return;
        }
        self.last_mask_step = now;
        self.mask_phase = (self.mask_phase + 1) % (MARCHING_ANTS_DASH * 2);
        if let Some(Some(bounds)) = self.with_document(|doc| doc.selection_bounds()) {
            let outline = self.view.rect_to_viewport(bounds).enlarge(1);
            self.invalidate(outline);
        }
    }

    pub fn mask_phase(&self) -> u32 {
        self.mask_phase
    }
}
