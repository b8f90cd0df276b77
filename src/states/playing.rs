//! Animation playback as an interaction state.
//!
//! While active it owns the [`AnimationPlayer`] and moves the editor's frame
//! on every timer tick. Any click or Escape stops it; leaving shows the frame
//! chosen by the stop behavior.

use super::{EditorState, EnterReason, LeaveReason, StateKind};
use crate::editor::{Editor, EditorEvent};
use crate::input::events::{InputOutcome, Key, KeyEvent, MouseEvent};
use crate::playback::{AnimationPlayer, PlaybackOptions};
use crate::types::Frame;
use std::time::Instant;
use tracing::{debug, info};

pub struct PlayingState {
    player: AnimationPlayer,
}

impl PlayingState {
    pub fn new(start_frame: Frame, options: PlaybackOptions, speed: f64, now: Instant) -> Self {
        Self {
            player: AnimationPlayer::new(start_frame, options, speed, now),
        }
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }
}

impl EditorState for PlayingState {
    fn kind(&self) -> StateKind {
        StateKind::Playing
    }

    fn on_enter(&mut self, editor: &mut Editor, reason: EnterReason) {
        self.player.reset_time_base(editor.now());
        if reason == EnterReason::Fresh {
            editor.notify(EditorEvent::PlaybackStarted);
        }
    }

    fn on_leave(&mut self, editor: &mut Editor, reason: LeaveReason) {
        if reason == LeaveReason::Suspended {
            return;
        }
        if let Some(count) = editor.with_document(|doc| doc.frame_count()) {
            let frame = self.player.stop_frame().min(count.saturating_sub(1));
            info!(editor = editor.id().0, frame, reason = ?reason, "playback stopped");
            editor.show_frame(frame);
        }
        editor.notify(EditorEvent::PlaybackStopped);
    }

    fn on_timer_tick(&mut self, editor: &mut Editor, now: Instant) {
        let player = &mut self.player;
        let Some(advanced) = editor.with_document(|doc| player.tick(doc, now)) else {
            return;
        };
        if let Some(frame) = advanced {
            editor.show_frame(frame);
        }
        if self.player.is_finished() {
            debug!(editor = editor.id().0, "play-once run finished");
            editor.back_to_previous_state();
        }
    }

    fn next_deadline(&self, editor: &Editor) -> Option<Instant> {
        editor.with_document(|doc| self.player.next_deadline(doc)).flatten()
    }

    fn on_speed_changed(&mut self, _editor: &mut Editor, speed: f64, now: Instant) {
        self.player.set_speed(speed, now);
    }

    fn on_mouse_down(&mut self, editor: &mut Editor, _ev: &MouseEvent) -> InputOutcome {
        editor.back_to_previous_state();
        InputOutcome::Consumed
    }

    fn on_key_down(&mut self, editor: &mut Editor, ev: &KeyEvent) -> InputOutcome {
        if matches!(ev.key, Key::Escape | Key::Enter) {
            editor.back_to_previous_state();
            return InputOutcome::Consumed;
        }
        InputOutcome::Propagate
    }
}
