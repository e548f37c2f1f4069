use std::{
    io::Cursor,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::foundation::{
    core::RasterRGBA,
    error::{MosaicoError, MosaicoResult},
};

/// Filename prefix of a finished composite.
pub const COMPOSITE_PREFIX: &str = "composicao";
/// Filename prefix of the crop-feeding mosaic raster and of document output.
pub const MOSAIC_PREFIX: &str = "mosaico";

/// Encode straight-alpha RGBA8 pixels as PNG.
pub fn encode_png_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> MosaicoResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        MosaicoError::export(format!("pixel buffer does not match {width}x{height}"))
    })?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Encode a composite raster as PNG, un-premultiplying first when needed.
pub fn encode_png(raster: &RasterRGBA) -> MosaicoResult<Vec<u8>> {
    encode_png_rgba8(raster.width, raster.height, raster.to_straight())
}

/// Write PNG bytes to `path`, creating parent directories.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> MosaicoResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

/// `<prefix>-<millis>.<ext>`.
pub fn timestamped_name(prefix: &str, millis: u128, ext: &str) -> String {
    format!("{prefix}-{millis}.{ext}")
}

/// Milliseconds since the Unix epoch, or zero on a clock set before it.
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
