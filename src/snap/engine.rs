//! Vertex- and edge-proximity snapping for whole-fragment drags.
//!
//! The scan is first-match, not nearest-match: shapes, then vertices (or edges), are visited in
//! collection order and the first pair under the threshold decides the correction.

use crate::foundation::core::{Point, Vec2};

/// Which proximity test produced a snap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapKind {
    Vertex,
    Edge,
}

/// Positional correction to add to the candidate position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapHit {
    pub delta: Vec2,
    pub kind: SnapKind,
}

/// Find the snap correction for `moved` (candidate scene vertices of the dragged fragment)
/// against `others` (scene vertices of every other fragment, in collection order).
///
/// Vertex snapping is tried first; edge snapping only when no vertex pair qualifies.
pub fn find_snap<'a, I>(moved: &[Point], others: I, threshold: f64) -> Option<SnapHit>
where
    I: IntoIterator<Item = &'a [Point]>,
    I::IntoIter: Clone,
{
    let others = others.into_iter();
    if let Some(delta) = vertex_snap(moved, others.clone(), threshold) {
        return Some(SnapHit {
            delta,
            kind: SnapKind::Vertex,
        });
    }
    edge_snap(moved, others, threshold).map(|delta| SnapHit {
        delta,
        kind: SnapKind::Edge,
    })
}

fn vertex_snap<'a>(
    moved: &[Point],
    others: impl Iterator<Item = &'a [Point]>,
    threshold: f64,
) -> Option<Vec2> {
    for other in others {
        for m in moved {
            for o in other {
                if m.distance(*o) < threshold {
                    return Some(*o - *m);
                }
            }
        }
    }
    None
}

fn edge_snap<'a>(
    moved: &[Point],
    others: impl Iterator<Item = &'a [Point]>,
    threshold: f64,
) -> Option<Vec2> {
    let moved_edges = edges(moved).collect::<Vec<_>>();
    for other in others {
        for &(a0, a1) in &moved_edges {
            for (b0, b1) in edges(other) {
                let (dist, delta) = segment_gap(a0, a1, b0, b1);
                if dist < threshold {
                    return Some(delta);
                }
            }
        }
    }
    None
}

/// Closed-polygon edges `(v[i], v[i + 1])`, wrapping to the first vertex.
fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = if points.len() < 2 { 0 } else { points.len() };
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Closest point to `p` on segment `a..b`, with the projection parameter clamped to `[0, 1]`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 <= f64::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Minimum gap between moved segment `a` and fixed segment `b`, with the translation that
/// closes it.
///
/// Tests the four endpoint-to-segment projections and keeps the smallest; ties keep the earliest
/// candidate (moved endpoints first).
pub fn segment_gap(a0: Point, a1: Point, b0: Point, b1: Point) -> (f64, Vec2) {
    let candidates = [
        // Moved endpoint onto the fixed segment: move by (projection - endpoint).
        {
            let q = closest_point_on_segment(a0, b0, b1);
            (a0.distance(q), q - a0)
        },
        {
            let q = closest_point_on_segment(a1, b0, b1);
            (a1.distance(q), q - a1)
        },
        // Fixed endpoint onto the moved segment: move by (endpoint - projection).
        {
            let q = closest_point_on_segment(b0, a0, a1);
            (b0.distance(q), b0 - q)
        },
        {
            let q = closest_point_on_segment(b1, a0, a1);
            (b1.distance(q), b1 - q)
        },
    ];
    candidates
        .into_iter()
        .fold((f64::INFINITY, Vec2::ZERO), |best, c| {
            if c.0 < best.0 { c } else { best }
        })
}

#[cfg(test)]
#[path = "../../tests/unit/snap/engine.rs"]
mod tests;
