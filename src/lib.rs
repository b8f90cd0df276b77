//! Canvas controller for a raster sprite editor.
//!
//! An [`Editor`] shows one document through a zoomable, scrollable viewport
//! and routes input to a stack of interaction states (standby, drawing,
//! selecting, moving pixels, scrolling, zooming, playing). The host owns the
//! window: it forwards [`InputEvent`]s, document change events and timer
//! ticks, and calls [`Editor::paint`] with its own [`render::Graphics`].
//!
//! ## Modules
//!
//! - `editor`: the façade, site, invalidation and painting
//! - `states`: the interaction states and their history stack
//! - `input`: events, coordinate transform, dispatch and autoscroll
//! - `playback`: animation timing independent of any state
//! - `document`, `tools`, `render`: collaborator traits the host implements

pub mod constants;
pub mod document;
pub mod editor;
pub mod error;
pub mod input;
pub mod logging;
pub mod perf;
pub mod playback;
pub mod preferences;
pub mod render;
pub mod states;
pub mod tools;
pub mod types;
pub mod zoom;

pub use editor::{Editor, EditorEvent, EditorObserver, EditorServices, Site};
pub use error::{EditorError, EditorResult};
pub use input::events::{InputEvent, InputOutcome};
pub use preferences::Preferences;
pub use states::{EditorState, EditorStatePtr, StateKind};
pub use types::{EditorFlags, Point, Rect, Size};
pub use zoom::Zoom;
