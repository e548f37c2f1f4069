use super::*;

fn frag() -> Fragment {
    Fragment::new(FragmentId(1), "a.png", Point::new(100.0, 50.0), 200.0, 150.0)
}

#[test]
fn new_fragment_is_canonical_rectangle() {
    let f = frag();
    assert_eq!(f.mode, TransformMode::Size);
    assert_eq!(f.outline, OutlineType::Quadrilateral);
    assert_eq!(f.bounding_box(), Rect::new(0.0, 0.0, 200.0, 150.0));
    assert_eq!(f.scene_bounds(), Rect::new(100.0, 50.0, 300.0, 200.0));
    assert_eq!(f.center(), Point::new(200.0, 125.0));
}

#[test]
fn bounding_box_over_free_vertices() {
    let pts = [
        Point::new(10.0, 5.0),
        Point::new(-4.0, 30.0),
        Point::new(22.0, 12.0),
    ];
    assert_eq!(bounding_box(&pts), Rect::new(-4.0, 5.0, 22.0, 30.0));
    assert_eq!(bounding_box(&[]), Rect::ZERO);
}

#[test]
fn set_outline_twice_is_idempotent() {
    let mut f = frag();
    f.set_outline(OutlineType::Pentagon);
    let first = f.vertices.clone();
    f.set_outline(OutlineType::Pentagon);
    assert_eq!(f.vertices, first);
    assert_eq!(f.vertices.len(), 5);
}

#[test]
fn set_outline_discards_free_edits() {
    let mut f = frag();
    assert!(f.set_mode(TransformMode::Free));
    f.vertices[2] = Point::new(500.0, 500.0);
    f.set_outline(OutlineType::Quadrilateral);
    assert_eq!(f.vertices, canonical_vertices(OutlineType::Quadrilateral, 200.0, 150.0));
    assert_eq!(f.mode, TransformMode::Free);
}

#[test]
fn circle_forces_size_mode_and_rejects_free() {
    let mut f = frag();
    assert!(f.set_mode(TransformMode::Free));
    f.set_outline(OutlineType::Circle);
    assert_eq!(f.mode, TransformMode::Size);
    assert!(!f.set_mode(TransformMode::Free));
    assert_eq!(f.mode, TransformMode::Size);
}

#[test]
fn resolved_vertices_ignore_stale_vertices_in_size_mode() {
    let mut f = frag();
    f.vertices[1] = Point::new(999.0, 0.0);
    let resolved = f.resolved_scene_vertices();
    assert_eq!(resolved[1], Point::new(300.0, 50.0));

    f.mode = TransformMode::Free;
    assert_eq!(f.resolved_scene_vertices()[1], Point::new(1099.0, 50.0));
}

#[test]
fn resize_handle_is_far_corner_or_ellipse_point() {
    let mut f = frag();
    assert_eq!(f.resize_handle(), Point::new(300.0, 200.0));
    f.set_outline(OutlineType::Circle);
    let h = f.resize_handle();
    assert!(h.x < 300.0 && h.x > 200.0);
    assert!(h.y < 200.0 && h.y > 125.0);
}

#[test]
fn rotate_handle_sits_above_top_midpoint() {
    let f = frag();
    assert_eq!(f.rotate_handle(24.0), Point::new(200.0, 26.0));
}

#[test]
fn rotation_affine_pivots_on_center() {
    let mut f = frag();
    assert_eq!(f.rotation_affine(), Affine::IDENTITY);
    f.rotation_deg = 180.0;
    let p = f.rotation_affine() * Point::new(100.0, 50.0);
    assert!((p.x - 300.0).abs() < 1e-9);
    assert!((p.y - 200.0).abs() < 1e-9);
}

#[test]
fn zero_size_fragment_is_permitted() {
    let f = Fragment::new(FragmentId(9), "", Point::ORIGIN, 0.0, 0.0);
    assert_eq!(f.bounding_box().area(), 0.0);
    assert!(!f.has_source());
}
