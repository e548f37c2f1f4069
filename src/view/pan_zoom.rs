use crate::foundation::core::{Affine, Line, Point, Size, Vec2};

/// Spacing of the background alignment grid.
pub const ALIGNMENT_GRID_STEP: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    /// Zoom change per unit of wheel delta.
    pub wheel_factor: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 0.2,
            max: 3.0,
            wheel_factor: 0.001,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Presentation transform of the editing surface: `translate(pan) * scale(zoom)`.
///
/// Never used by the compositor; exported geometry stays in scene space.
#[derive(Clone, Debug, PartialEq)]
pub struct PanZoom {
    zoom: f64,
    pan: Vec2,
    limits: ZoomLimits,
    space_held: bool,
    /// Pan and pointer at press time while a pan is live.
    anchor: Option<(Vec2, Point)>,
}

impl Default for PanZoom {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl PanZoom {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            limits,
            space_held: false,
            anchor: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn is_panning(&self) -> bool {
        self.anchor.is_some()
    }

    /// Wheel tick. Only zooms while a zoom modifier (ctrl, meta or alt) is held.
    pub fn wheel(&mut self, delta_y: f64, modifier_held: bool) -> bool {
        if !modifier_held || !delta_y.is_finite() {
            return false;
        }
        let next = (self.zoom - delta_y * self.limits.wheel_factor)
            .clamp(self.limits.min, self.limits.max);
        let changed = next != self.zoom;
        self.zoom = next;
        changed
    }

    pub fn set_space_held(&mut self, held: bool) {
        self.space_held = held;
    }

    /// Start a pan on middle button, or on any button while space is held.
    pub fn press(&mut self, button: PointerButton, pointer: Point) -> bool {
        if !(self.space_held || button == PointerButton::Middle) {
            return false;
        }
        self.anchor = Some((self.pan, pointer));
        true
    }

    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let Some((start_pan, start_pointer)) = self.anchor else {
            return false;
        };
        self.pan = start_pan + (pointer - start_pointer);
        true
    }

    pub fn release(&mut self) {
        self.anchor = None;
    }

    pub fn affine(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    pub fn scene_to_screen(&self, p: Point) -> Point {
        self.affine() * p
    }

    pub fn screen_to_scene(&self, p: Point) -> Point {
        self.affine().inverse() * p
    }
}

/// Vertical then horizontal guide lines every `step` units strictly inside `container`.
pub fn alignment_grid_lines(container: Size, step: f64) -> Vec<Line> {
    if step.is_nan() || step <= 0.0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut x = step;
    while x < container.width {
        lines.push(Line::new((x, 0.0), (x, container.height)));
        x += step;
    }
    let mut y = step;
    while y < container.height {
        lines.push(Line::new((0.0, y), (container.width, y)));
        y += step;
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/view/pan_zoom.rs"]
mod tests;
