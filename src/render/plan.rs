use crate::{
    foundation::config::EditorConfig,
    foundation::core::{Affine, BezPath, Canvas, Rect, Rgba8Premul, Size, Vec2},
    shape::fragment::{Fragment, FragmentId, rotation_about},
    viewport::mask::{fragment_clip_path, viewport_clip_path},
    viewport::template::Template,
};

/// Opaque background of the crop-feeding mosaic (`#f8fafc`).
pub const MOSAIC_BACKGROUND: Rgba8Premul = Rgba8Premul {
    r: 0xf8,
    g: 0xfa,
    b: 0xfc,
    a: 0xff,
};

/// Pixel size of the output and the scene point that maps to its origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasExtent {
    pub canvas: Canvas,
    pub offset: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Background {
    Transparent,
    Opaque(Rgba8Premul),
}

impl Background {
    pub fn premul(self) -> [u8; 4] {
        match self {
            Background::Transparent => [0, 0, 0, 0],
            Background::Opaque(c) => c.to_array(),
        }
    }
}

/// One fragment as the rasterizer sees it. All geometry is in canvas space.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDraw {
    pub id: FragmentId,
    pub source: String,
    /// Local clip before rotation.
    pub clip: BezPath,
    /// Box the image is stretched over, before rotation.
    pub bounds: Rect,
    /// Presentation rotation about the bounding-box centre; applies to clip and image alike.
    pub rotation: Affine,
}

/// Backend-agnostic description of one composite.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositePlan {
    pub extent: CanvasExtent,
    pub background: Background,
    pub global_clip: Option<BezPath>,
    /// In fragment order: first is bottom-most.
    pub draws: Vec<FragmentDraw>,
}

/// Plan the main export.
///
/// Returns `None` (nothing to render) for an empty collection or a zero-sized canvas.
pub fn plan_composite(
    fragments: &[Fragment],
    template: &Template,
    container: Size,
    config: &EditorConfig,
) -> Option<CompositePlan> {
    let size = template.canvas_size(container);
    let extent = CanvasExtent {
        canvas: Canvas::from_size(size),
        offset: template.canvas_origin(),
    };
    let global_clip = template
        .viewport()
        .map(|vp| viewport_clip_path(vp.outline, size, config.viewport_ellipse_padding));
    build(fragments, extent, Background::Transparent, global_clip)
}

/// Plan the opaque, unclipped mosaic used to feed a new crop.
pub fn plan_mosaic(fragments: &[Fragment], container: Size) -> Option<CompositePlan> {
    let extent = CanvasExtent {
        canvas: Canvas::from_size(container),
        offset: Vec2::ZERO,
    };
    build(
        fragments,
        extent,
        Background::Opaque(MOSAIC_BACKGROUND),
        None,
    )
}

fn build(
    fragments: &[Fragment],
    extent: CanvasExtent,
    background: Background,
    global_clip: Option<BezPath>,
) -> Option<CompositePlan> {
    if fragments.is_empty() || extent.canvas.is_empty() {
        return None;
    }
    let draws = fragments
        .iter()
        .map(|f| fragment_draw(f, extent.offset))
        .collect();
    Some(CompositePlan {
        extent,
        background,
        global_clip,
        draws,
    })
}

fn fragment_draw(f: &Fragment, offset: Vec2) -> FragmentDraw {
    let bounds = f.scene_bounds() - offset;
    FragmentDraw {
        id: f.id,
        source: f.source.clone(),
        clip: fragment_clip_path(f, offset),
        bounds,
        rotation: rotation_about(bounds.center(), f.rotation_deg),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
