use super::*;

fn frame() -> RectFrame {
    RectFrame::new(Bounds::new(100.0, 100.0, 300.0, 300.0), 40.0)
}

#[test]
fn drag_follows_pointer_delta() {
    let mut f = frame();
    assert!(f.press_body(Point::new(150.0, 150.0)));
    assert!(f.pointer_move(Point::new(170.0, 140.0)));
    assert_eq!(f.bounds(), Bounds::new(120.0, 90.0, 300.0, 300.0));
    assert!(f.release());
    assert!(!f.pointer_move(Point::new(0.0, 0.0)));
}

#[test]
fn resize_clamps_to_minimum() {
    let mut f = frame();
    assert!(f.press_resize(Point::new(400.0, 400.0)));
    f.pointer_move(Point::new(50.0, 420.0));
    assert_eq!(f.bounds(), Bounds::new(100.0, 100.0, 40.0, 320.0));
}

#[test]
fn lock_rejects_gestures_and_cancels_live_one() {
    let mut f = frame();
    f.press_body(Point::ZERO);
    assert!(f.toggle_lock());
    assert!(f.is_idle());
    assert!(!f.press_body(Point::ZERO));
    assert!(!f.press_resize(Point::ZERO));
    assert!(!f.toggle_lock());
    assert!(f.press_resize(Point::ZERO));
}
