use crate::foundation::core::{Bounds, Point, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum FrameGesture {
    #[default]
    Idle,
    Dragging {
        start_pointer: Point,
        start: Bounds,
    },
    Resizing {
        start_pointer: Point,
        start: Bounds,
    },
}

/// A lockable, draggable, bottom-right-resizable rectangle.
///
/// Backs both the polygon viewport and the grid rect. Resizes clamp each axis to `min_size`.
#[derive(Clone, Debug, PartialEq)]
pub struct RectFrame {
    bounds: Bounds,
    locked: bool,
    min_size: f64,
    gesture: FrameGesture,
}

impl RectFrame {
    pub fn new(bounds: Bounds, min_size: f64) -> Self {
        Self {
            bounds,
            locked: false,
            min_size,
            gesture: FrameGesture::Idle,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == FrameGesture::Idle
    }

    /// Set the lock. Locking ends any gesture in flight.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            self.gesture = FrameGesture::Idle;
        }
    }

    pub fn toggle_lock(&mut self) -> bool {
        self.set_locked(!self.locked);
        self.locked
    }

    /// Replace the rect outright (scene loading, tests). Ignores the lock.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn press_body(&mut self, pointer: Point) -> bool {
        if self.locked || !self.is_idle() {
            return false;
        }
        self.gesture = FrameGesture::Dragging {
            start_pointer: pointer,
            start: self.bounds,
        };
        true
    }

    pub fn press_resize(&mut self, pointer: Point) -> bool {
        if self.locked || !self.is_idle() {
            return false;
        }
        self.gesture = FrameGesture::Resizing {
            start_pointer: pointer,
            start: self.bounds,
        };
        true
    }

    /// Apply the live gesture. Returns whether the rect changed.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let next = match self.gesture {
            FrameGesture::Idle => return false,
            FrameGesture::Dragging {
                start_pointer,
                start,
            } => {
                let d: Vec2 = pointer - start_pointer;
                Bounds::new(start.x + d.x, start.y + d.y, start.width, start.height)
            }
            FrameGesture::Resizing {
                start_pointer,
                start,
            } => {
                let d: Vec2 = pointer - start_pointer;
                Bounds::new(
                    start.x,
                    start.y,
                    (start.width + d.x).max(self.min_size),
                    (start.height + d.y).max(self.min_size),
                )
            }
        };
        let changed = next != self.bounds;
        self.bounds = next;
        changed
    }

    pub fn release(&mut self) -> bool {
        let was_live = !self.is_idle();
        self.gesture = FrameGesture::Idle;
        was_live
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/frame.rs"]
mod tests;
