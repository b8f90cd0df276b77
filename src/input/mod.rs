//! Input handling for the editor canvas.
//!
//! Toolkit events are translated into [`events::InputEvent`]s and fed to
//! [`Editor::handle_input`](crate::editor::Editor::handle_input), which
//! routes them through the active interaction state before falling back to
//! default wheel and keyboard handling.
//!
//! ## Modules
//!
//! - `events` - toolkit-neutral input events
//! - `coords` - viewport/document coordinate conversion
//! - `autoscroll` - scroll delta while a drag leaves the viewport
//! - `transform` - zoom and scroll control on the editor
//! - `dispatch` - routing events to states and default handling

pub mod autoscroll;
pub mod coords;
mod dispatch;
pub mod events;
mod transform;
