use crate::{
    foundation::config::EditorConfig,
    foundation::core::{Bounds, Canvas, Point, Size},
    render::plan::{CanvasExtent, CompositePlan, plan_composite, plan_mosaic},
    shape::outline::OutlineType,
    transform::editor::Editor,
    view::pan_zoom::PanZoom,
    viewport::frame::RectFrame,
    viewport::grid::{GridSpec, build_cells},
    viewport::template::{
        DEFAULT_GRID_BOUNDS, DEFAULT_VIEWPORT_BOUNDS, GridLayout, Template, TemplateKind, Viewport,
    },
};

/// One editing session: container, template, fragments and view.
///
/// The workspace owns every mutable piece of state. Template switches and grid regeneration
/// replace the fragment collection in one step.
#[derive(Clone, Debug)]
pub struct Workspace {
    container: Size,
    template: Template,
    editor: Editor,
    view: PanZoom,
}

impl Workspace {
    pub fn new(container: Size, config: EditorConfig) -> Self {
        Self {
            container,
            template: Template::Fullscreen,
            editor: Editor::new(config),
            view: PanZoom::default(),
        }
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn set_container(&mut self, container: Size) {
        self.container = container;
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn view(&self) -> &PanZoom {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut PanZoom {
        &mut self.view
    }

    /// Switch template with default geometry. Always clears fragments and selection.
    ///
    /// A grid starts as the default 2x2 layout.
    pub fn select_template(&mut self, kind: TemplateKind) {
        match kind {
            TemplateKind::Grid => self.select_grid(GridSpec::default()),
            TemplateKind::Fullscreen => self.switch_to(Template::Fullscreen),
            TemplateKind::PolygonViewport => {
                let min = self.editor.config().min_fragment_size;
                self.switch_to(Template::PolygonViewport(Viewport::new(
                    DEFAULT_VIEWPORT_BOUNDS,
                    OutlineType::Quadrilateral,
                    min,
                )));
            }
        }
    }

    /// Switch to a grid template with `spec` over the default grid rect.
    pub fn select_grid(&mut self, spec: GridSpec) {
        let min = self.editor.config().min_fragment_size;
        self.switch_to(Template::Grid(GridLayout::new(spec, DEFAULT_GRID_BOUNDS, min)));
        self.regenerate_grid();
    }

    fn switch_to(&mut self, template: Template) {
        tracing::debug!(from = ?self.template.kind(), to = ?template.kind(), "template switch");
        self.editor.clear();
        self.template = template;
    }

    /// Change rows/cols of the active grid, keeping assignments by index.
    pub fn set_grid_spec(&mut self, spec: GridSpec) -> bool {
        let Template::Grid(grid) = &mut self.template else {
            return false;
        };
        grid.spec = spec;
        self.regenerate_grid();
        true
    }

    /// Set the polygon viewport's output outline. Not gated by the viewport lock.
    pub fn set_viewport_outline(&mut self, outline: OutlineType) -> bool {
        match &mut self.template {
            Template::PolygonViewport(vp) => {
                vp.outline = outline;
                true
            }
            _ => false,
        }
    }

    fn frame_mut(&mut self) -> Option<&mut RectFrame> {
        match &mut self.template {
            Template::PolygonViewport(vp) => Some(&mut vp.frame),
            Template::Grid(g) => Some(&mut g.frame),
            Template::Fullscreen => None,
        }
    }

    /// Toggle the viewport or grid lock. `None` under the fullscreen template.
    pub fn toggle_frame_lock(&mut self) -> Option<bool> {
        self.frame_mut().map(RectFrame::toggle_lock)
    }

    pub fn press_frame_body(&mut self, pointer: Point) -> bool {
        self.frame_mut().is_some_and(|f| f.press_body(pointer))
    }

    pub fn press_frame_resize(&mut self, pointer: Point) -> bool {
        self.frame_mut().is_some_and(|f| f.press_resize(pointer))
    }

    /// Apply a live viewport/grid gesture. Grid changes regenerate every cell.
    pub fn frame_pointer_move(&mut self, pointer: Point) -> bool {
        let changed = self.frame_mut().is_some_and(|f| f.pointer_move(pointer));
        if changed && matches!(self.template, Template::Grid(_)) {
            self.regenerate_grid();
        }
        changed
    }

    pub fn release_frame(&mut self) -> bool {
        self.frame_mut().is_some_and(RectFrame::release)
    }

    /// Place the viewport or grid rect directly (scene loading). Ignores the lock.
    pub fn set_frame_bounds(&mut self, bounds: Bounds) -> bool {
        let Some(frame) = self.frame_mut() else {
            return false;
        };
        frame.set_bounds(bounds);
        if matches!(self.template, Template::Grid(_)) {
            self.regenerate_grid();
        }
        true
    }

    fn regenerate_grid(&mut self) {
        let Template::Grid(grid) = &self.template else {
            return;
        };
        let (spec, bounds) = (grid.spec, grid.frame.bounds());
        let previous = self.editor.fragments().to_vec();
        let editor = &mut self.editor;
        let cells = build_cells(spec, bounds, &previous, || editor.allocate_id());
        tracing::debug!(
            rows = spec.rows(),
            cols = spec.cols(),
            cells = cells.len(),
            "grid regenerated"
        );
        self.editor.replace_fragments(cells);
    }

    /// Canvas size and scene offset of an export under the current template.
    pub fn canvas_extent(&self) -> CanvasExtent {
        CanvasExtent {
            canvas: Canvas::from_size(self.template.canvas_size(self.container)),
            offset: self.template.canvas_origin(),
        }
    }

    pub fn plan(&self) -> Option<CompositePlan> {
        plan_composite(
            self.editor.fragments(),
            &self.template,
            self.container,
            self.editor.config(),
        )
    }

    pub fn plan_mosaic(&self) -> Option<CompositePlan> {
        plan_mosaic(self.editor.fragments(), self.container)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/workspace.rs"]
mod tests;
