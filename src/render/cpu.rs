use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    foundation::core::{Affine, BezPath, Canvas, Point},
    foundation::error::{MosaicoError, MosaicoResult},
    render::composite::{fill_in_place, mask_in_place, over_in_place},
    render::plan::{CompositePlan, FragmentDraw},
};

/// CPU rasterizer for a [`CompositePlan`], backed by `vello_cpu`.
///
/// Images must already be decoded; this type does no IO.
#[derive(Debug)]
pub struct CpuCompositor {
    width: u16,
    height: u16,
}

impl CpuCompositor {
    pub fn new(canvas: Canvas) -> MosaicoResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| MosaicoError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| MosaicoError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(MosaicoError::render("canvas must be non-empty"));
        }
        Ok(Self { width, height })
    }

    /// Rasterize `plan`, drawing `images[i]` for `plan.draws[i]`; `None` entries are skipped.
    ///
    /// Returns premultiplied RGBA8 bytes and the number of fragments drawn.
    pub fn render(
        &self,
        plan: &CompositePlan,
        images: &[Option<Arc<PreparedImage>>],
    ) -> MosaicoResult<(Vec<u8>, usize)> {
        if images.len() != plan.draws.len() {
            return Err(MosaicoError::render(
                "one image slot is required per fragment draw",
            ));
        }

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        let mut drawn = 0usize;
        for (draw, image) in plan.draws.iter().zip(images) {
            let Some(image) = image else {
                continue;
            };
            if draw_fragment(&mut ctx, draw, image)? {
                drawn += 1;
            }
        }
        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut layer);

        if let Some(clip) = &plan.global_clip {
            let mask = self.coverage_mask(clip);
            mask_in_place(layer.data_as_u8_slice_mut(), &mask)?;
        }

        let mut out = vec![0u8; usize::from(self.width) * usize::from(self.height) * 4];
        fill_in_place(&mut out, plan.background.premul());
        over_in_place(&mut out, layer.data_as_u8_slice())?;
        Ok((out, drawn))
    }

    /// Anti-aliased coverage of `path`, one byte per pixel.
    fn coverage_mask(&self, path: &BezPath) -> Vec<u8> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);
        pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect()
    }
}

/// Queue one fragment: the image stretched over `draw.bounds`, visible only inside `draw.clip`.
///
/// Returns `false` for degenerate bounds or images, which draw nothing.
fn draw_fragment(
    ctx: &mut vello_cpu::RenderContext,
    draw: &FragmentDraw,
    image: &PreparedImage,
) -> MosaicoResult<bool> {
    let b = draw.bounds;
    if image.is_empty() || !(b.width() > 0.0 && b.height() > 0.0) {
        tracing::debug!(fragment = %draw.id, "degenerate fragment bounds, nothing to draw");
        return Ok(false);
    }

    let paint = image_paint(image)?;
    let stretch = Affine::translate(b.origin().to_vec2())
        * Affine::scale_non_uniform(
            b.width() / f64::from(image.width),
            b.height() / f64::from(image.height),
        );

    // Clip is pulled back into image pixel space so a single fill paints the clipped image.
    let mut clip = draw.clip.clone();
    clip.apply_affine(stretch.inverse());

    ctx.set_transform(affine_to_cpu(draw.rotation * stretch));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint);
    ctx.fill_path(&bezpath_to_cpu(&clip));
    Ok(true)
}

fn image_paint(image: &PreparedImage) -> MosaicoResult<vello_cpu::Image> {
    let pixmap =
        image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> MosaicoResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MosaicoError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MosaicoError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(MosaicoError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
