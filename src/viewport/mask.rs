use crate::{
    foundation::core::{Affine, BezPath, Size, Vec2},
    shape::fragment::Fragment,
    shape::outline::{OutlineType, ellipse_path, outline_path, polygon_path},
};

/// Global output clip of the polygon viewport, generated against the canvas extent.
pub fn viewport_clip_path(outline: OutlineType, canvas: Size, ellipse_padding: f64) -> BezPath {
    outline_path(outline, canvas.width, canvas.height, ellipse_padding)
}

/// Local clip of one fragment in canvas space, before its presentation rotation.
///
/// Each point is `position + vertex - offset`. Circles clip to the unpadded ellipse inscribed in
/// their bounding box.
pub fn fragment_clip_path(fragment: &Fragment, offset: Vec2) -> BezPath {
    let shift = fragment.position.to_vec2() - offset;
    if fragment.outline.is_circle() {
        let b = fragment.bounding_box();
        let mut path = ellipse_path(b.width(), b.height(), 0.0);
        path.apply_affine(Affine::translate(shift + b.origin().to_vec2()));
        return path;
    }
    let pts = fragment
        .vertices
        .iter()
        .map(|v| *v + shift)
        .collect::<Vec<_>>();
    polygon_path(&pts)
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/mask.rs"]
mod tests;
