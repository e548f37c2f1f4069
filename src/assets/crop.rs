use anyhow::Context;

use crate::{
    export::png::encode_png_rgba8,
    foundation::core::{Bounds, Point, Size, Vec2},
    foundation::error::{MosaicoError, MosaicoResult},
};

pub const MIN_CROP_SIZE: f64 = 50.0;
pub const DEFAULT_CROP_AREA: Bounds = Bounds::new(50.0, 50.0, 200.0, 150.0);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum CropGesture {
    #[default]
    Idle,
    Dragging {
        grab: Vec2,
    },
    Resizing,
}

/// Selection rectangle over a displayed image, in display coordinates.
///
/// Drags keep the whole area inside the display; resizes grow from the top-left corner and
/// never shrink below [`MIN_CROP_SIZE`].
#[derive(Clone, Debug, PartialEq)]
pub struct CropArea {
    area: Bounds,
    display: Size,
    gesture: CropGesture,
}

impl CropArea {
    pub fn new(display: Size) -> Self {
        Self {
            area: DEFAULT_CROP_AREA,
            display,
            gesture: CropGesture::Idle,
        }
    }

    pub fn area(&self) -> Bounds {
        self.area
    }

    pub fn display(&self) -> Size {
        self.display
    }

    /// Press either on the resize handle or inside the area. Presses elsewhere are ignored.
    pub fn press(&mut self, pointer: Point, on_resize_handle: bool) -> bool {
        if on_resize_handle {
            self.gesture = CropGesture::Resizing;
            return true;
        }
        let a = self.area;
        let inside = pointer.x >= a.x
            && pointer.x <= a.x + a.width
            && pointer.y >= a.y
            && pointer.y <= a.y + a.height;
        if inside {
            self.gesture = CropGesture::Dragging {
                grab: pointer - a.origin(),
            };
            return true;
        }
        false
    }

    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let a = self.area;
        let d = self.display;
        self.area = match self.gesture {
            CropGesture::Idle => return false,
            CropGesture::Dragging { grab } => Bounds::new(
                (pointer.x - grab.x).min(d.width - a.width).max(0.0),
                (pointer.y - grab.y).min(d.height - a.height).max(0.0),
                a.width,
                a.height,
            ),
            CropGesture::Resizing => Bounds::new(
                a.x,
                a.y,
                (pointer.x - a.x).min(d.width - a.x).max(MIN_CROP_SIZE),
                (pointer.y - a.y).min(d.height - a.y).max(MIN_CROP_SIZE),
            ),
        };
        true
    }

    pub fn release(&mut self) {
        self.gesture = CropGesture::Idle;
    }

    /// Crop `bytes` (any decodable image shown at this display size) to the current area.
    pub fn crop(&self, bytes: &[u8]) -> MosaicoResult<Vec<u8>> {
        crop_image(bytes, self.area, self.display)
    }
}

/// Cut the display-space `area` out of the image in `bytes` and return it PNG-encoded.
///
/// The area maps to natural pixels with `scale = natural / displayed` per axis.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn crop_image(bytes: &[u8], area: Bounds, displayed: Size) -> MosaicoResult<Vec<u8>> {
    if !(displayed.width > 0.0 && displayed.height > 0.0) {
        return Err(MosaicoError::validation(
            "crop display size must be positive",
        ));
    }
    let rgba = image::load_from_memory(bytes)
        .context("decode image for crop")?
        .to_rgba8();
    let (nw, nh) = rgba.dimensions();
    let sx = f64::from(nw) / displayed.width;
    let sy = f64::from(nh) / displayed.height;

    let x = to_px(area.x * sx, nw);
    let y = to_px(area.y * sy, nh);
    let w = to_px(area.width * sx, nw - x);
    let h = to_px(area.height * sy, nh - y);
    if w == 0 || h == 0 {
        return Err(MosaicoError::validation(format!(
            "crop area {area:?} is empty at natural size {nw}x{nh}"
        )));
    }

    let cropped = image::imageops::crop_imm(&rgba, x, y, w, h).to_image();
    encode_png_rgba8(w, h, cropped.into_raw())
}

fn to_px(v: f64, max: u32) -> u32 {
    if v.is_finite() && v > 0.0 {
        (v.round() as u32).min(max)
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/crop.rs"]
mod tests;
