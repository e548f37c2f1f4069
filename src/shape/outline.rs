use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Point};

/// Flattening tolerance used when an ellipse is turned into a path.
const ELLIPSE_TOLERANCE: f64 = 0.1;

/// Polygon/ellipse family shared by fragment clip shapes and the viewport output mask.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutlineType {
    /// Axis-aligned rectangle filling the bounding box.
    #[default]
    Quadrilateral,
    /// Ellipse inscribed in the bounding box. Geometry anchors on the bounding rectangle.
    Circle,
    /// Regular 3-gon.
    Triangle,
    /// Regular 5-gon.
    Pentagon,
    /// Regular 6-gon.
    Hexagon,
}

impl OutlineType {
    /// Every outline, in the order the shape chooser lists them.
    pub const ALL: [OutlineType; 5] = [
        OutlineType::Quadrilateral,
        OutlineType::Triangle,
        OutlineType::Pentagon,
        OutlineType::Hexagon,
        OutlineType::Circle,
    ];

    /// Side count for the regular-polygon outlines.
    pub fn regular_sides(self) -> Option<usize> {
        match self {
            OutlineType::Triangle => Some(3),
            OutlineType::Pentagon => Some(5),
            OutlineType::Hexagon => Some(6),
            OutlineType::Quadrilateral | OutlineType::Circle => None,
        }
    }

    pub fn is_circle(self) -> bool {
        self == OutlineType::Circle
    }
}

/// How a fragment's vertices are maintained.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransformMode {
    /// Vertices are regenerated from width, height and outline.
    #[default]
    Size,
    /// Vertices are edited one by one. Never valid for circles.
    Free,
}

/// Deterministic vertex set for an outline inscribed in a `width` x `height` box.
///
/// Rectangles (and circles, which anchor on their bounding rect) list corners clockwise from the
/// origin. Regular polygons start at the top and are inscribed with radius `min(w, h) / 2`.
pub fn canonical_vertices(outline: OutlineType, width: f64, height: f64) -> Vec<Point> {
    match outline.regular_sides() {
        Some(sides) => regular_polygon(sides, width, height, 0.0),
        None => vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ],
    }
}

/// Regular `sides`-gon centred in the box, first vertex at `-pi/2`.
pub fn regular_polygon(sides: usize, width: f64, height: f64, padding: f64) -> Vec<Point> {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let r = width.min(height) / 2.0 - padding;
    (0..sides)
        .map(|i| {
            let angle = -FRAC_PI_2 + TAU * (i as f64) / (sides as f64);
            Point::new(cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

/// Closed polyline through `points`.
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Ellipse inscribed in the box, inset by `padding` on every side.
///
/// Radii never go negative; a padding larger than the box collapses to an empty path.
pub fn ellipse_path(width: f64, height: f64, padding: f64) -> BezPath {
    let rx = (width / 2.0 - padding).max(0.0);
    let ry = (height / 2.0 - padding).max(0.0);
    if rx == 0.0 || ry == 0.0 {
        return BezPath::new();
    }
    kurbo::Ellipse::new((width / 2.0, height / 2.0), (rx, ry), 0.0).to_path(ELLIPSE_TOLERANCE)
}

/// Clip path of an outline spanning `width` x `height` at the origin.
///
/// Polygons use [`canonical_vertices`] unpadded; the circle becomes an ellipse inset by
/// `ellipse_padding`.
pub fn outline_path(outline: OutlineType, width: f64, height: f64, ellipse_padding: f64) -> BezPath {
    if outline.is_circle() {
        return ellipse_path(width, height, ellipse_padding);
    }
    polygon_path(&canonical_vertices(outline, width, height))
}

/// On-screen guide outline: every shape inset by the same `padding`.
///
/// Only used for editor visuals; exported masks go through [`outline_path`].
pub fn guide_outline(outline: OutlineType, width: f64, height: f64, padding: f64) -> BezPath {
    match outline {
        OutlineType::Quadrilateral => {
            polygon_path(&canonical_vertices(OutlineType::Quadrilateral, width, height))
        }
        OutlineType::Circle => ellipse_path(width, height, padding),
        OutlineType::Triangle | OutlineType::Pentagon | OutlineType::Hexagon => {
            let sides = outline.regular_sides().unwrap_or(4);
            polygon_path(&regular_polygon(sides, width, height, padding))
        }
    }
}

/// The 45 degree point on the ellipse inscribed in the box (circle resize handle).
pub fn ellipse_handle_point(width: f64, height: f64) -> Point {
    Point::new(
        width / 2.0 + (width / 2.0) * FRAC_PI_4.cos(),
        height / 2.0 + (height / 2.0) * FRAC_PI_4.sin(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/shape/outline.rs"]
mod tests;
