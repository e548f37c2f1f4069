use crate::foundation::core::{Point, Vec2};

/// Per-gesture state of the active fragment.
///
/// Exactly one variant is live at a time, so illegal combinations (dragging while resizing,
/// editing a vertex while rotating) cannot be represented.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TransformState {
    #[default]
    Idle,
    /// Whole-fragment move. `offset = pointer - position` at press time.
    Dragging { offset: Vec2 },
    /// Size-mode resize. `origin` is the fragment position at press time, `anchor` the far-corner
    /// handle that was grabbed.
    Resizing { origin: Point, anchor: Point },
    /// Free-mode edit of `vertices[index]`.
    EditingVertex { index: usize },
    /// Rotation via the rotate handle, angles in degrees.
    Rotating {
        start_angle: f64,
        start_pointer_angle: f64,
    },
}

impl TransformState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TransformState::Idle)
    }
}

/// Which handle a pointer press landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    /// The fragment body (drag).
    Body,
    /// The far-corner resize handle.
    Resize,
    /// A vertex handle (free mode).
    Vertex(usize),
    /// The rotate handle (rotate mode only).
    Rotate,
}
