use std::fmt;

use crate::{
    foundation::core::{Affine, Point, Rect, Vec2},
    shape::outline::{OutlineType, TransformMode, canonical_vertices, ellipse_handle_point},
};

/// Stable identifier of a placed fragment.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FragmentId(pub u64);

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment-{}", self.0)
    }
}

/// One placed, clip-shaped image instance.
///
/// `vertices` are relative to `position` and form a closed polygon. In [`TransformMode::Size`]
/// they are always derived from `(width, height, outline)`; only [`TransformMode::Free`]
/// edits them individually.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fragment {
    pub id: FragmentId,
    /// Opaque image reference. Empty means no image is assigned yet (fresh grid cell).
    #[serde(default)]
    pub source: String,
    /// Top-left of the bounding box in scene coordinates.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub vertices: Vec<Point>,
    #[serde(default)]
    pub outline: OutlineType,
    #[serde(default)]
    pub mode: TransformMode,
    /// Degrees about the bounding-box centre. Never baked into `vertices`.
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub locked: bool,
}

impl Fragment {
    /// Rectangular fragment in size mode.
    pub fn new(
        id: FragmentId,
        source: impl Into<String>,
        position: Point,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id,
            source: source.into(),
            position,
            width,
            height,
            vertices: canonical_vertices(OutlineType::Quadrilateral, width, height),
            outline: OutlineType::Quadrilateral,
            mode: TransformMode::Size,
            rotation_deg: 0.0,
            locked: false,
        }
    }

    pub fn has_source(&self) -> bool {
        !self.source.trim().is_empty()
    }

    /// Local bounding box of `vertices`.
    pub fn bounding_box(&self) -> Rect {
        bounding_box(&self.vertices)
    }

    /// Bounding box of `vertices` in scene coordinates.
    pub fn scene_bounds(&self) -> Rect {
        self.bounding_box() + self.position.to_vec2()
    }

    /// Bounding-box centre in scene coordinates; the rotation pivot.
    pub fn center(&self) -> Point {
        self.scene_bounds().center()
    }

    pub fn scene_vertices(&self) -> Vec<Point> {
        let offset = self.position.to_vec2();
        self.vertices.iter().map(|v| *v + offset).collect()
    }

    /// Scene-space vertices as other engines should see them: canonical in size mode, the
    /// edited set in free mode.
    pub fn resolved_scene_vertices(&self) -> Vec<Point> {
        let offset = self.position.to_vec2();
        match self.mode {
            TransformMode::Free => self.scene_vertices(),
            TransformMode::Size => canonical_vertices(self.outline, self.width, self.height)
                .into_iter()
                .map(|v| v + offset)
                .collect(),
        }
    }

    /// Replace the outline, regenerating canonical vertices.
    ///
    /// Any free-form vertex edits are discarded. Circles force size mode.
    pub fn set_outline(&mut self, outline: OutlineType) {
        self.outline = outline;
        if outline.is_circle() {
            self.mode = TransformMode::Size;
        }
        self.regenerate_vertices();
    }

    /// Switch transform mode. Returns `false` (and changes nothing) for free mode on a circle.
    ///
    /// Returning to size mode snaps vertices back to the canonical set.
    pub fn set_mode(&mut self, mode: TransformMode) -> bool {
        if mode == TransformMode::Free && self.outline.is_circle() {
            return false;
        }
        self.mode = mode;
        if mode == TransformMode::Size {
            self.regenerate_vertices();
        }
        true
    }

    /// Set nominal size and regenerate canonical vertices.
    pub fn resize_to(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.regenerate_vertices();
    }

    pub fn regenerate_vertices(&mut self) {
        self.vertices = canonical_vertices(self.outline, self.width, self.height);
    }

    /// Scene position of the resize handle: the canonical vertex with maximal `x + y`, or the
    /// 45 degree point on the ellipse for circles.
    pub fn resize_handle(&self) -> Point {
        let local = if self.outline.is_circle() {
            ellipse_handle_point(self.width, self.height)
        } else {
            canonical_vertices(self.outline, self.width, self.height)
                .into_iter()
                .fold(None::<Point>, |best, p| match best {
                    Some(b) if b.x + b.y >= p.x + p.y => Some(b),
                    _ => Some(p),
                })
                .unwrap_or(Point::new(self.width, self.height))
        };
        local + self.position.to_vec2()
    }

    /// Scene position of the rotate handle: above the top edge midpoint, before rotation.
    pub fn rotate_handle(&self, offset: f64) -> Point {
        let b = self.scene_bounds();
        Point::new(b.center().x, b.y0 - offset)
    }

    /// Presentation transform for this fragment (rotation about the bounding-box centre).
    pub fn rotation_affine(&self) -> Affine {
        rotation_about(self.center(), self.rotation_deg)
    }
}

/// Axis-aligned bounds over a vertex set. An empty set yields a zero rect at the origin.
pub fn bounding_box(points: &[Point]) -> Rect {
    let mut it = points.iter();
    let Some(first) = it.next() else {
        return Rect::ZERO;
    };
    it.fold(Rect::from_points(*first, *first), |r, p| {
        r.union_pt(*p)
    })
}

/// Rotation of `degrees` about `pivot`.
pub fn rotation_about(pivot: Point, degrees: f64) -> Affine {
    if degrees == 0.0 {
        return Affine::IDENTITY;
    }
    let v = pivot.to_vec2();
    Affine::translate(v) * Affine::rotate(degrees.to_radians()) * Affine::translate(-v)
}

/// Translate every point by `delta`.
pub fn offset_points(points: &[Point], delta: Vec2) -> Vec<Point> {
    points.iter().map(|p| *p + delta).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/shape/fragment.rs"]
mod tests;
