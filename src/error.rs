//! Error types for editor operations.
//!
//! Most failures inside the controller are recovered locally (refused
//! transitions, clamped geometry). The few operations a caller can get wrong
//! return these instead of panicking.

use crate::types::{Frame, LayerId};
use std::path::PathBuf;
use thiserror::Error;

/// Why drawing is not possible right now.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawRefusal {
    #[error("no document")]
    NoDocument,
    #[error("no active layer")]
    NoLayer,
    #[error("layer is hidden")]
    LayerHidden,
    #[error("layer is locked")]
    LayerLocked,
    #[error("layer has no pixels")]
    NotImageLayer,
    #[error("frame is out of range")]
    FrameOutOfRange,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("layer {0:?} is not in the document")]
    UnknownLayer(LayerId),

    #[error("frame {frame} is out of range (document has {count} frames)")]
    FrameOutOfRange { frame: Frame, count: Frame },

    #[error("cannot draw: {0}")]
    NotDrawable(DrawRefusal),

    #[error("the document is no longer available")]
    NoDocument,
}

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("failed to access preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid preferences in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type PreferencesResult<T> = Result<T, PreferencesError>;
