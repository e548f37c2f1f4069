use std::io::Write as _;

use crate::foundation::{
    core::{RasterRGBA, Size},
    error::{MosaicoError, MosaicoResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// A single document page sized in pixel units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentPage {
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
}

impl DocumentPage {
    /// Landscape when wider than tall, portrait otherwise (squares included).
    pub fn for_size(size: Size) -> Self {
        let orientation = if size.width > size.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        Self {
            width: size.width,
            height: size.height,
            orientation,
        }
    }

    /// Unit of the page dimensions.
    pub fn unit(&self) -> &'static str {
        "px"
    }
}

/// Write a one-page PDF with `raster` stretched over the full page.
///
/// Pixels go in as an uncompressed RGB image with an 8-bit soft mask for alpha.
pub fn write_pdf(raster: &RasterRGBA, page: &DocumentPage) -> MosaicoResult<Vec<u8>> {
    if raster.width == 0 || raster.height == 0 {
        return Err(MosaicoError::export("cannot embed an empty raster"));
    }
    if !(page.width > 0.0 && page.height > 0.0 && page.width.is_finite() && page.height.is_finite())
    {
        return Err(MosaicoError::export(format!(
            "invalid page size {}x{}",
            page.width, page.height
        )));
    }

    let straight = raster.to_straight();
    let px = straight.len() / 4;
    let mut rgb = Vec::with_capacity(px * 3);
    let mut alpha = Vec::with_capacity(px);
    for p in straight.chunks_exact(4) {
        rgb.extend_from_slice(&p[..3]);
        alpha.push(p[3]);
    }

    let content = format!(
        "q\n{} 0 0 {} 0 0 cm\n/Im0 Do\nQ\n",
        page.width, page.height
    );

    let mut w = PdfWriter::default();
    w.raw(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
    w.object(1, "<< /Type /Catalog /Pages 2 0 R >>", None);
    w.object(2, "<< /Type /Pages /Kids [3 0 R] /Count 1 >>", None);
    w.object(
        3,
        &format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /XObject << /Im0 5 0 R >> >> /Contents 4 0 R >>",
            page.width, page.height
        ),
        None,
    );
    w.object(
        4,
        &format!("<< /Length {} >>", content.len()),
        Some(content.as_bytes()),
    );
    w.object(
        5,
        &format!(
            "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB \
             /BitsPerComponent 8 /SMask 6 0 R /Length {} >>",
            raster.width,
            raster.height,
            rgb.len()
        ),
        Some(&rgb),
    );
    w.object(
        6,
        &format!(
            "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceGray \
             /BitsPerComponent 8 /Length {} >>",
            raster.width,
            raster.height,
            alpha.len()
        ),
        Some(&alpha),
    );
    Ok(w.finish(1))
}

#[derive(Default)]
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    // Objects must be written in id order starting at 1.
    fn object(&mut self, id: usize, dict: &str, stream: Option<&[u8]>) {
        self.offsets.push(self.buf.len());
        let _ = write!(self.buf, "{id} 0 obj\n{dict}\n");
        if let Some(data) = stream {
            self.raw(b"stream\n");
            self.raw(data);
            self.raw(b"\nendstream\n");
        }
        self.raw(b"endobj\n");
    }

    fn finish(mut self, root: usize) -> Vec<u8> {
        let xref = self.buf.len();
        let count = self.offsets.len() + 1;
        let _ = write!(self.buf, "xref\n0 {count}\n0000000000 65535 f \n");
        for off in std::mem::take(&mut self.offsets) {
            let _ = write!(self.buf, "{off:010} 00000 n \n");
        }
        let _ = write!(
            self.buf,
            "trailer\n<< /Size {count} /Root {root} 0 R >>\nstartxref\n{xref}\n%%EOF\n"
        );
        self.buf
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/document.rs"]
mod tests;
