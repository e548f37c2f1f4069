use crate::{
    foundation::core::{Bounds, Size, Vec2},
    shape::outline::OutlineType,
    viewport::frame::RectFrame,
    viewport::grid::GridSpec,
};

pub const DEFAULT_VIEWPORT_BOUNDS: Bounds = Bounds::new(100.0, 100.0, 300.0, 300.0);
pub const DEFAULT_GRID_BOUNDS: Bounds = Bounds::new(100.0, 100.0, 400.0, 400.0);

/// The polygon viewport: a lockable rect plus the outline that clips the exported canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub frame: RectFrame,
    pub outline: OutlineType,
}

impl Viewport {
    pub fn new(bounds: Bounds, outline: OutlineType, min_size: f64) -> Self {
        Self {
            frame: RectFrame::new(bounds, min_size),
            outline,
        }
    }
}

/// A grid template: spec plus the rect the cells tile.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    pub spec: GridSpec,
    pub frame: RectFrame,
}

impl GridLayout {
    pub fn new(spec: GridSpec, bounds: Bounds, min_size: f64) -> Self {
        Self {
            spec,
            frame: RectFrame::new(bounds, min_size),
        }
    }
}

/// Which output frame the workspace composes into.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Template {
    #[default]
    Fullscreen,
    PolygonViewport(Viewport),
    Grid(GridLayout),
}

/// Lightweight selector used when switching templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Fullscreen,
    PolygonViewport,
    Grid,
}

impl Template {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Template::Fullscreen => TemplateKind::Fullscreen,
            Template::PolygonViewport(_) => TemplateKind::PolygonViewport,
            Template::Grid(_) => TemplateKind::Grid,
        }
    }

    /// Canvas size of an export under this template.
    ///
    /// Fullscreen and grid use the container; the polygon viewport uses its rect.
    pub fn canvas_size(&self, container: Size) -> Size {
        match self {
            Template::PolygonViewport(vp) => vp.frame.bounds().size(),
            Template::Fullscreen | Template::Grid(_) => container,
        }
    }

    /// Scene origin of the exported canvas.
    pub fn canvas_origin(&self) -> Vec2 {
        match self {
            Template::PolygonViewport(vp) => vp.frame.bounds().origin().to_vec2(),
            Template::Fullscreen | Template::Grid(_) => Vec2::ZERO,
        }
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        match self {
            Template::PolygonViewport(vp) => Some(vp),
            _ => None,
        }
    }

    pub fn grid(&self) -> Option<&GridLayout> {
        match self {
            Template::Grid(g) => Some(g),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/template.rs"]
mod tests;
