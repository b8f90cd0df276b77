//! Tool, ink and customization collaborators.
//!
//! Tool definitions and their pixel algorithms live outside the editor. The
//! editor only asks which tool is active, which quicktool the held modifiers
//! select, and gets a [`ToolLoop`] to feed pointer positions into.

use crate::input::events::{Modifiers, MouseButton};
use crate::types::{Frame, LayerId, Point, Rect, SelectionMode};
use serde::{Deserialize, Serialize};

/// Broad category of a tool, which decides the interaction state it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Freehand,
    Shape,
    Fill,
    Eyedropper,
    Selection,
    Move,
    Hand,
    Zoom,
}

impl ToolKind {
    /// Tools that modify pixels and therefore need a drawable layer.
    pub fn modifies_pixels(&self) -> bool {
        matches!(self, ToolKind::Freehand | ToolKind::Shape | ToolKind::Fill)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolInfo {
    pub id: String,
    pub kind: ToolKind,
}

impl ToolInfo {
    pub fn new(id: impl Into<String>, kind: ToolKind) -> Self {
        Self { id: id.into(), kind }
    }

    pub fn hand() -> Self {
        Self::new("hand", ToolKind::Hand)
    }

    pub fn zoom() -> Self {
        Self::new("zoom", ToolKind::Zoom)
    }

    pub fn eyedropper() -> Self {
        Self::new("eyedropper", ToolKind::Eyedropper)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InkKind {
    Paint,
    Eraser,
    Selection,
    PickColor,
}

/// Drawing context handed to a tool loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSite {
    pub layer: LayerId,
    pub frame: Frame,
    pub button: MouseButton,
}

/// One press-drag-release cycle of a drawing tool. Positions are in document
/// space; each call returns the document area it modified, if any.
pub trait ToolLoop {
    fn press(&mut self, pos: Point) -> Option<Rect>;
    fn drag(&mut self, pos: Point) -> Option<Rect>;
    fn release(&mut self, pos: Point) -> Option<Rect>;
    /// Abort, undoing whatever the loop did so far.
    fn cancel(&mut self);
}

/// Registry of tools and inks owned by the application.
pub trait ToolRegistry {
    /// The tool selected in the tool box.
    fn active_tool(&self) -> ToolInfo;

    fn ink_for(&self, tool: &ToolInfo, secondary: bool) -> InkKind;

    fn create_tool_loop(&self, tool: &ToolInfo, ink: InkKind, site: ToolSite) -> Option<Box<dyn ToolLoop>>;
}

/// What the right mouse button does on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RightClickMode {
    #[default]
    PaintBackground,
    PickForeground,
    Erase,
    Scroll,
}

/// A view or editing gesture recognised from a button/modifier combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Pan,
    Zoom,
    Erase,
}

/// Policy mapping input combinations to actions. The editor never hardcodes
/// modifier meanings; it always asks the delegate.
pub trait CustomizationDelegate {
    /// Tool temporarily overriding the active one while `modifiers` are held.
    fn quick_tool(&self, modifiers: Modifiers, active: &ToolInfo) -> Option<ToolInfo>;

    /// Gesture for a press of `button` (or a wheel event when `None`).
    fn gesture(&self, button: Option<MouseButton>, modifiers: Modifiers) -> Option<Gesture>;

    fn selection_mode(&self, modifiers: Modifiers) -> SelectionMode {
        if modifiers.shift {
            SelectionMode::Add
        } else if modifiers.alt {
            SelectionMode::Subtract
        } else {
            SelectionMode::Replace
        }
    }

    /// Whether a click should pick the layer under the pointer first.
    fn is_auto_select_layer(&self, modifiers: Modifiers) -> bool {
        let _ = modifiers;
        false
    }
}

/// Stock key bindings: space pans, ctrl+space zooms, alt picks colors with
/// drawing tools, ctrl+wheel zooms and the right button follows
/// [`RightClickMode`].
#[derive(Debug, Clone, Default)]
pub struct DefaultCustomization {
    pub right_click_mode: RightClickMode,
}

impl DefaultCustomization {
    pub fn new(right_click_mode: RightClickMode) -> Self {
        Self { right_click_mode }
    }
}

impl CustomizationDelegate for DefaultCustomization {
    fn quick_tool(&self, modifiers: Modifiers, active: &ToolInfo) -> Option<ToolInfo> {
        if modifiers.space && modifiers.ctrl {
            Some(ToolInfo::zoom())
        } else if modifiers.space {
            Some(ToolInfo::hand())
        } else if modifiers.alt && active.kind.modifies_pixels() {
            Some(ToolInfo::eyedropper())
        } else {
            None
        }
    }

    fn gesture(&self, button: Option<MouseButton>, modifiers: Modifiers) -> Option<Gesture> {
        match button {
            Some(MouseButton::Middle) => Some(Gesture::Pan),
            Some(MouseButton::Right) => match self.right_click_mode {
                RightClickMode::Erase => Some(Gesture::Erase),
                RightClickMode::Scroll => Some(Gesture::Pan),
                _ => None,
            },
            Some(MouseButton::Left) => None,
            None if modifiers.ctrl => Some(Gesture::Zoom),
            None => None,
        }
    }
}
