use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::{
    foundation::config::EditorConfig,
    foundation::core::{Point, Size},
    scene::workspace::Workspace,
};

struct CountingSource {
    png: Vec<u8>,
    loads: AtomicUsize,
}

impl ImageSource for CountingSource {
    fn load_bytes(&self, source: &str) -> MosaicoResult<Vec<u8>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if source == "broken.png" {
            return Ok(b"not a png".to_vec());
        }
        Ok(self.png.clone())
    }
}

fn green_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn workspace(sources: &[&str]) -> Workspace {
    let mut ws = Workspace::new(Size::new(40.0, 20.0), EditorConfig::default());
    for (i, s) in sources.iter().enumerate() {
        ws.editor_mut().add_fragment(
            *s,
            Point::new(10.0 * i as f64, 0.0),
            Size::new(10.0, 10.0),
        );
    }
    ws
}

#[test]
fn shared_sources_decode_once_and_failures_are_counted() {
    let src = Arc::new(CountingSource {
        png: green_png(),
        loads: AtomicUsize::new(0),
    });
    let comp = Compositor::new(src.clone(), CompositeSettings::default());
    let ws = workspace(&["a.png", "broken.png", "a.png", ""]);
    let out = comp.composite(&ws).unwrap().unwrap();
    assert_eq!(src.loads.load(Ordering::SeqCst), 2);
    assert_eq!(
        out.stats,
        CompositeStats {
            drawn: 2,
            skipped: 1,
            unassigned: 1
        }
    );
    assert_eq!(out.raster.pixel(5, 5), Some([0, 255, 0, 255]));
    assert_eq!(out.raster.pixel(15, 5), Some([0, 0, 0, 0]));
    assert_eq!(out.raster.pixel(25, 5), Some([0, 255, 0, 255]));
}

#[test]
fn parallel_decode_matches_sequential() {
    let src = Arc::new(CountingSource {
        png: green_png(),
        loads: AtomicUsize::new(0),
    });
    let ws = workspace(&["a.png", "b.png", "c.png"]);
    let seq = Compositor::new(src.clone(), CompositeSettings::default())
        .composite(&ws)
        .unwrap()
        .unwrap();
    let par = Compositor::new(
        src,
        CompositeSettings {
            threading: DecodeThreading {
                parallel: true,
                threads: Some(2),
            },
        },
    )
    .composite(&ws)
    .unwrap()
    .unwrap();
    assert_eq!(seq.raster, par.raster);
    assert_eq!(seq.stats, par.stats);
}

#[test]
fn nothing_to_render_is_none() {
    let src = Arc::new(CountingSource {
        png: green_png(),
        loads: AtomicUsize::new(0),
    });
    let comp = Compositor::new(src, CompositeSettings::default());
    let ws = workspace(&[]);
    assert!(comp.composite(&ws).unwrap().is_none());
    assert!(comp.composite_for_crop(&ws).unwrap().is_none());
}

#[test]
fn crop_mosaic_fills_gaps_with_background() {
    let src = Arc::new(CountingSource {
        png: green_png(),
        loads: AtomicUsize::new(0),
    });
    let comp = Compositor::new(src, CompositeSettings::default());
    let ws = workspace(&["a.png"]);
    let out = comp.composite_for_crop(&ws).unwrap().unwrap();
    assert_eq!(out.raster.pixel(30, 15), Some([0xf8, 0xfa, 0xfc, 0xff]));
    assert_eq!(out.raster.pixel(5, 5), Some([0, 255, 0, 255]));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert!(build_thread_pool(Some(1)).is_ok());
}

#[test]
fn preview_is_a_decodable_png() {
    let src = Arc::new(CountingSource {
        png: green_png(),
        loads: AtomicUsize::new(0),
    });
    let comp = Compositor::new(src, CompositeSettings::default());
    let bytes = comp.preview_png(&workspace(&["a.png"])).unwrap().unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (40, 20));
    assert!(comp.preview_png(&workspace(&[])).unwrap().is_none());
}
