use super::*;
use crate::foundation::core::Rect;

fn editor_with(frags: &[(Point, Size)]) -> (Editor, Vec<FragmentId>) {
    let mut ed = Editor::default();
    let ids = frags
        .iter()
        .map(|(p, s)| ed.add_fragment("img.png", *p, *s))
        .collect();
    (ed, ids)
}

#[test]
fn confirm_crop_uses_default_placement() {
    let mut ed = Editor::default();
    let id = ed.confirm_crop("crop.png");
    let f = ed.fragment(id).unwrap();
    assert_eq!(f.position, Point::new(100.0, 100.0));
    assert_eq!((f.width, f.height), (200.0, 150.0));
    assert_eq!(f.outline, OutlineType::Quadrilateral);
}

#[test]
fn drag_moves_by_pointer_delta() {
    let (mut ed, ids) = editor_with(&[(Point::new(10.0, 10.0), Size::new(50.0, 50.0))]);
    assert!(ed.select(ids[0]));
    assert!(ed.press(ids[0], Handle::Body, Point::new(20.0, 20.0)));
    assert!(ed.pointer_move(Point::new(120.0, 70.0)));
    assert_eq!(ed.fragment(ids[0]).unwrap().position, Point::new(110.0, 60.0));
    assert!(ed.release());
    assert!(ed.state().is_idle());
    assert!(!ed.pointer_move(Point::new(0.0, 0.0)));
}

#[test]
fn drag_snaps_vertex_onto_neighbour() {
    let (mut ed, ids) = editor_with(&[
        (Point::new(-50.0, 0.0), Size::new(100.0, 100.0)),
        (Point::new(104.0, 100.0), Size::new(50.0, 50.0)),
    ]);
    let a = ids[0];
    ed.select(a);
    ed.press(a, Handle::Body, Point::new(0.0, 50.0));
    // Candidate puts A's far corner at (98, 100), six units from B's corner at (104, 100).
    ed.pointer_move(Point::new(48.0, 50.0));
    let f = ed.fragment(a).unwrap();
    assert_eq!(f.position, Point::new(4.0, 0.0));
    assert!(f.scene_vertices().contains(&Point::new(104.0, 100.0)));
}

#[test]
fn circles_are_never_snapped() {
    let (mut ed, ids) = editor_with(&[
        (Point::new(-50.0, 0.0), Size::new(100.0, 100.0)),
        (Point::new(104.0, 100.0), Size::new(50.0, 50.0)),
    ]);
    let a = ids[0];
    ed.select(a);
    assert!(ed.set_outline(a, OutlineType::Circle));
    ed.press(a, Handle::Body, Point::new(0.0, 50.0));
    ed.pointer_move(Point::new(48.0, 50.0));
    assert_eq!(ed.fragment(a).unwrap().position, Point::new(-2.0, 0.0));
}

#[test]
fn resize_never_goes_below_minimum() {
    let (mut ed, ids) = editor_with(&[(Point::new(100.0, 100.0), Size::new(200.0, 150.0))]);
    let id = ids[0];
    ed.select(id);
    assert!(ed.press(id, Handle::Resize, Point::new(300.0, 250.0)));
    ed.pointer_move(Point::new(110.0, 20.0));
    let f = ed.fragment(id).unwrap();
    assert_eq!((f.width, f.height), (40.0, 40.0));
    assert_eq!(f.bounding_box(), Rect::new(0.0, 0.0, 40.0, 40.0));

    ed.pointer_move(Point::new(400.0, 180.0));
    let f = ed.fragment(id).unwrap();
    assert_eq!((f.width, f.height), (300.0, 80.0));
    assert_eq!(f.position, Point::new(100.0, 100.0));
}

#[test]
fn resize_is_unavailable_in_free_mode() {
    let (mut ed, ids) = editor_with(&[(Point::new(0.0, 0.0), Size::new(100.0, 100.0))]);
    let id = ids[0];
    ed.select(id);
    assert!(ed.set_transform_mode(id, TransformMode::Free));
    assert!(!ed.press(id, Handle::Resize, Point::new(100.0, 100.0)));
    assert!(ed.state().is_idle());
}

#[test]
fn free_vertex_edit_is_local_and_unsnapped() {
    let (mut ed, ids) = editor_with(&[
        (Point::new(10.0, 10.0), Size::new(100.0, 100.0)),
        (Point::new(200.0, 200.0), Size::new(50.0, 50.0)),
    ]);
    let id = ids[0];
    ed.select(id);
    assert!(!ed.press(id, Handle::Vertex(0), Point::new(10.0, 10.0)));
    ed.set_transform_mode(id, TransformMode::Free);
    assert!(ed.press(id, Handle::Vertex(2), Point::new(110.0, 110.0)));
    ed.pointer_move(Point::new(197.0, 198.0));
    let f = ed.fragment(id).unwrap();
    assert_eq!(f.vertices[2], Point::new(187.0, 188.0));
    assert_eq!(f.position, Point::new(10.0, 10.0));
}

#[test]
fn vertex_press_out_of_range_is_rejected() {
    let (mut ed, ids) = editor_with(&[(Point::ZERO, Size::new(100.0, 100.0))]);
    let id = ids[0];
    ed.select(id);
    ed.set_transform_mode(id, TransformMode::Free);
    assert!(!ed.press(id, Handle::Vertex(4), Point::ZERO));
}

#[test]
fn circle_rejects_free_mode() {
    let (mut ed, ids) = editor_with(&[(Point::ZERO, Size::new(100.0, 100.0))]);
    let id = ids[0];
    ed.select(id);
    ed.set_outline(id, OutlineType::Circle);
    assert!(!ed.set_transform_mode(id, TransformMode::Free));
    assert_eq!(ed.fragment(id).unwrap().mode, TransformMode::Size);
}

#[test]
fn rotate_mode_owns_the_pointer() {
    let (mut ed, ids) = editor_with(&[(Point::ZERO, Size::new(100.0, 100.0))]);
    let id = ids[0];
    ed.select(id);
    assert!(!ed.press(id, Handle::Rotate, Point::new(100.0, 50.0)));
    assert!(ed.toggle_rotate_mode(id));
    assert!(!ed.press(id, Handle::Body, Point::new(50.0, 50.0)));
    assert!(!ed.press(id, Handle::Resize, Point::new(100.0, 100.0)));

    assert!(ed.press(id, Handle::Rotate, Point::new(100.0, 50.0)));
    ed.pointer_move(Point::new(50.0, 100.0));
    let f = ed.fragment(id).unwrap();
    assert!((f.rotation_deg - 90.0).abs() < 1e-9);
    // Rotation is presentation only.
    assert_eq!(f.bounding_box(), Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn locked_or_unselected_fragments_reject_everything() {
    let (mut ed, ids) = editor_with(&[
        (Point::ZERO, Size::new(100.0, 100.0)),
        (Point::new(300.0, 0.0), Size::new(100.0, 100.0)),
    ]);
    let (a, b) = (ids[0], ids[1]);
    ed.select(a);
    assert!(!ed.press(b, Handle::Body, Point::new(310.0, 10.0)));
    assert!(!ed.set_outline(b, OutlineType::Triangle));

    assert!(ed.set_locked(a, true));
    let before = ed.fragment(a).unwrap().clone();
    assert!(!ed.press(a, Handle::Body, Point::new(10.0, 10.0)));
    assert!(!ed.set_outline(a, OutlineType::Hexagon));
    assert!(!ed.set_transform_mode(a, TransformMode::Free));
    assert!(!ed.toggle_rotate_mode(a));
    assert!(!ed.assign_source(a, "other.png"));
    assert_eq!(ed.fragment(a).unwrap(), &before);

    ed.set_locked(a, false);
    assert!(ed.press(a, Handle::Body, Point::new(10.0, 10.0)));
}

#[test]
fn locking_mid_gesture_ends_it() {
    let (mut ed, ids) = editor_with(&[(Point::ZERO, Size::new(100.0, 100.0))]);
    let id = ids[0];
    ed.select(id);
    ed.press(id, Handle::Body, Point::new(10.0, 10.0));
    ed.set_locked(id, true);
    assert!(ed.state().is_idle());
    assert!(!ed.pointer_move(Point::new(50.0, 50.0)));
    assert_eq!(ed.fragment(id).unwrap().position, Point::ZERO);
}

#[test]
fn outline_change_discards_free_edits() {
    let (mut ed, ids) = editor_with(&[(Point::ZERO, Size::new(100.0, 100.0))]);
    let id = ids[0];
    ed.select(id);
    ed.set_transform_mode(id, TransformMode::Free);
    ed.press(id, Handle::Vertex(0), Point::ZERO);
    ed.pointer_move(Point::new(30.0, 5.0));
    ed.release();
    ed.set_outline(id, OutlineType::Quadrilateral);
    let f = ed.fragment(id).unwrap();
    assert_eq!(f.vertices[0], Point::ZERO);
}

#[test]
fn replace_keeps_selection_only_when_id_survives() {
    let (mut ed, ids) = editor_with(&[(Point::ZERO, Size::new(10.0, 10.0))]);
    ed.select(ids[0]);
    let kept = ed.fragment(ids[0]).unwrap().clone();
    ed.replace_fragments(vec![kept]);
    assert_eq!(ed.active(), Some(ids[0]));

    ed.replace_fragments(vec![Fragment::new(
        FragmentId(40),
        "",
        Point::ZERO,
        5.0,
        5.0,
    )]);
    assert_eq!(ed.active(), None);
    assert_eq!(ed.allocate_id(), FragmentId(41));
}

#[test]
fn remove_clears_selection() {
    let (mut ed, ids) = editor_with(&[(Point::ZERO, Size::new(10.0, 10.0))]);
    ed.select(ids[0]);
    assert!(ed.remove(ids[0]).is_some());
    assert_eq!(ed.active(), None);
    assert!(ed.is_empty());
    assert!(ed.remove(ids[0]).is_none());
}

#[test]
fn rotate_handle_sits_above_top_edge() {
    let (ed, ids) = editor_with(&[(Point::new(100.0, 100.0), Size::new(200.0, 150.0))]);
    assert_eq!(
        ed.rotate_handle_position(ids[0]),
        Some(Point::new(200.0, 76.0))
    );
    assert_eq!(ed.rotate_handle_position(FragmentId(99)), None);
}
