//! Mosaico is a geometry and compositing engine for clip-shaped image mosaics.
//!
//! Images are placed as *fragments*: a source reference stretched over a bounding box and
//! clipped to a quadrilateral, regular polygon, or ellipse. Fragments are edited through a
//! single-selection transform engine with snapping, arranged inside a fullscreen, polygon
//! viewport, or grid template, and finally rasterized on the CPU.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: [`Workspace`] owns the template, the fragment collection ([`Editor`]) and the
//!    presentation-only [`PanZoom`] view.
//! 2. **Plan**: [`plan_composite`] turns fragments plus template into a backend-agnostic
//!    [`CompositePlan`] in canvas space.
//! 3. **Render**: [`Compositor`] resolves and decodes every image (optionally on a rayon pool),
//!    then draws strictly in fragment order into premultiplied RGBA8.
//! 4. **Export**: [`encode_png`] or [`write_pdf`] wrap the raster for output.
//!
//! Geometry and transform operations are total: invalid requests are rejected by returning
//! `false` and leaving state untouched. Only IO, decoding and encoding return errors, and a
//! fragment whose image fails to decode is skipped rather than failing the composite.
#![forbid(unsafe_code)]

pub mod assets;
pub mod export;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod shape;
pub mod snap;
pub mod transform;
pub mod view;
pub mod viewport;

pub use assets::crop::{CropArea, crop_image};
pub use assets::decode::{PreparedImage, decode_image};
pub use assets::source::{DirImageSource, ImageSource, MemoryImageSource, normalize_rel_path};
pub use export::document::{DocumentPage, Orientation, write_pdf};
pub use export::png::{encode_png, encode_png_rgba8, now_millis, timestamped_name};
pub use foundation::config::EditorConfig;
pub use foundation::core::{Bounds, Canvas, RasterRGBA, Rgba8Premul};
pub use foundation::error::{MosaicoError, MosaicoResult};
pub use render::pipeline::{
    CompositeOutput, CompositeSettings, CompositeStats, Compositor, DecodeThreading,
};
pub use render::plan::{CanvasExtent, CompositePlan, FragmentDraw, plan_composite, plan_mosaic};
pub use scene::model::SceneDoc;
pub use scene::workspace::Workspace;
pub use shape::fragment::{Fragment, FragmentId};
pub use shape::outline::{OutlineType, TransformMode};
pub use snap::engine::{SnapHit, SnapKind, find_snap};
pub use transform::editor::Editor;
pub use transform::gesture::{Handle, TransformState};
pub use view::pan_zoom::{PanZoom, PointerButton, alignment_grid_lines};
pub use viewport::grid::GridSpec;
pub use viewport::template::{Template, TemplateKind};
