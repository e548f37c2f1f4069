use std::io::Cursor;

use super::*;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(w, h, |x, y| image::Rgba([x as u8, y as u8, 7, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn drag_is_clamped_to_display() {
    let mut c = CropArea::new(Size::new(400.0, 300.0));
    assert!(!c.press(Point::new(10.0, 10.0), false));
    assert!(c.press(Point::new(60.0, 60.0), false));
    c.pointer_move(Point::new(1000.0, -50.0));
    assert_eq!(c.area(), Bounds::new(200.0, 0.0, 200.0, 150.0));
    c.release();
    assert!(!c.pointer_move(Point::ZERO));
}

#[test]
fn resize_respects_minimum_and_display() {
    let mut c = CropArea::new(Size::new(400.0, 300.0));
    assert!(c.press(Point::new(250.0, 200.0), true));
    c.pointer_move(Point::new(60.0, 900.0));
    assert_eq!(c.area(), Bounds::new(50.0, 50.0, 50.0, 250.0));
}

#[test]
fn crop_maps_display_area_to_natural_pixels() {
    let bytes = png(200, 100);
    // Displayed at half size: area (10,5,40,20) covers natural (20,10,80,40).
    let out = crop_image(&bytes, Bounds::new(10.0, 5.0, 40.0, 20.0), Size::new(100.0, 50.0)).unwrap();
    let img = image::load_from_memory(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (80, 40));
    assert_eq!(img.get_pixel(0, 0).0, [20, 10, 7, 255]);
    assert_eq!(img.get_pixel(79, 39).0, [99, 49, 7, 255]);
}

#[test]
fn crop_rejects_empty_or_degenerate_input() {
    let bytes = png(10, 10);
    assert!(crop_image(&bytes, Bounds::new(0.0, 0.0, 5.0, 5.0), Size::new(0.0, 10.0)).is_err());
    assert!(crop_image(&bytes, Bounds::new(20.0, 0.0, 5.0, 5.0), Size::new(10.0, 10.0)).is_err());
    assert!(crop_image(b"nope", Bounds::new(0.0, 0.0, 5.0, 5.0), Size::new(10.0, 10.0)).is_err());
}
