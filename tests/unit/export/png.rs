use super::*;

#[test]
fn encode_unpremultiplies_before_writing() {
    let raster = RasterRGBA {
        width: 1,
        height: 1,
        data: vec![64, 32, 0, 128],
        premultiplied: true,
    };
    let bytes = encode_png(&raster).unwrap();
    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back.get_pixel(0, 0).0, [128, 64, 0, 128]);
}

#[test]
fn mismatched_buffer_is_an_export_error() {
    let err = encode_png_rgba8(2, 2, vec![0; 4]).unwrap_err();
    assert!(err.to_string().starts_with("export error:"));
}

#[test]
fn timestamped_names() {
    assert_eq!(
        timestamped_name(COMPOSITE_PREFIX, 1700000000000, "png"),
        "composicao-1700000000000.png"
    );
    assert_eq!(timestamped_name(MOSAIC_PREFIX, 5, "pdf"), "mosaico-5.pdf");
    assert!(now_millis() > 0);
}
