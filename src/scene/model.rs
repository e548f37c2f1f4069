use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::config::EditorConfig,
    foundation::core::{Bounds, Point, Size},
    foundation::error::{MosaicoError, MosaicoResult},
    scene::workspace::Workspace,
    shape::fragment::{Fragment, FragmentId},
    shape::outline::{OutlineType, TransformMode},
    viewport::grid::GridSpec,
    viewport::template::{DEFAULT_GRID_BOUNDS, DEFAULT_VIEWPORT_BOUNDS, TemplateKind},
};

/// JSON scene description consumed by the command-line tool.
///
/// This is a batch input format, not a saved editing session: loading it builds a fresh
/// [`Workspace`] with every fragment unselected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDoc {
    /// Size of the editing container (fullscreen and grid canvas size).
    pub container: Size,
    #[serde(default)]
    pub config: EditorConfig,
    #[serde(default)]
    pub template: TemplateDoc,
    /// Free fragments, drawn after (on top of) any grid cells.
    #[serde(default)]
    pub fragments: Vec<FragmentDoc>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateDoc {
    #[default]
    Fullscreen,
    PolygonViewport {
        #[serde(default = "default_viewport_rect")]
        rect: Bounds,
        #[serde(default)]
        outline: OutlineType,
        #[serde(default)]
        locked: bool,
    },
    Grid {
        /// `"<cols>x<rows>"`.
        #[serde(default = "default_grid_preset")]
        preset: String,
        #[serde(default = "default_grid_rect")]
        rect: Bounds,
        /// Image per cell in row-major order; missing or empty entries stay unassigned.
        #[serde(default)]
        cells: Vec<String>,
        #[serde(default)]
        locked: bool,
    },
}

/// One free fragment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FragmentDoc {
    pub source: String,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub outline: OutlineType,
    #[serde(default)]
    pub mode: TransformMode,
    /// Fragment-local vertices; only honored in free mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<Point>>,
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub locked: bool,
}

fn default_viewport_rect() -> Bounds {
    DEFAULT_VIEWPORT_BOUNDS
}

fn default_grid_rect() -> Bounds {
    DEFAULT_GRID_BOUNDS
}

fn default_grid_preset() -> String {
    "2x2".to_string()
}

impl SceneDoc {
    pub fn from_reader<R: std::io::Read>(r: R) -> MosaicoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| MosaicoError::serde(format!("parse scene JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> MosaicoResult<Self> {
        serde_json::from_str(s).map_err(|e| MosaicoError::serde(format!("parse scene JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> MosaicoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MosaicoError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> MosaicoResult<()> {
        if !positive(self.container.width) || !positive(self.container.height) {
            return Err(MosaicoError::validation(
                "container width/height must be finite and > 0",
            ));
        }
        match &self.template {
            TemplateDoc::Fullscreen => {}
            TemplateDoc::PolygonViewport { rect, .. } => validate_rect(rect, "viewport rect")?,
            TemplateDoc::Grid { preset, rect, .. } => {
                GridSpec::parse_preset(preset)?;
                validate_rect(rect, "grid rect")?;
            }
        }
        for (i, f) in self.fragments.iter().enumerate() {
            f.validate()
                .map_err(|e| MosaicoError::validation(format!("fragments[{i}]: {e}")))?;
        }
        Ok(())
    }

    /// Validate and build a workspace.
    pub fn into_workspace(self) -> MosaicoResult<Workspace> {
        self.validate()?;
        let mut ws = Workspace::new(self.container, self.config);

        match self.template {
            TemplateDoc::Fullscreen => ws.select_template(TemplateKind::Fullscreen),
            TemplateDoc::PolygonViewport {
                rect,
                outline,
                locked,
            } => {
                ws.select_template(TemplateKind::PolygonViewport);
                ws.set_frame_bounds(rect);
                ws.set_viewport_outline(outline);
                if locked {
                    ws.toggle_frame_lock();
                }
            }
            TemplateDoc::Grid {
                preset,
                rect,
                cells,
                locked,
            } => {
                ws.select_grid(GridSpec::parse_preset(&preset)?);
                ws.set_frame_bounds(rect);
                let ids = ws
                    .editor()
                    .fragments()
                    .iter()
                    .map(|f| f.id)
                    .collect::<Vec<_>>();
                for (id, source) in ids.into_iter().zip(cells) {
                    ws.editor_mut().assign_source(id, source);
                }
                if locked {
                    ws.toggle_frame_lock();
                }
            }
        }

        let mut all = ws.editor().fragments().to_vec();
        for doc in self.fragments {
            let id = ws.editor_mut().allocate_id();
            all.push(doc.into_fragment(id));
        }
        ws.editor_mut().replace_fragments(all);
        Ok(ws)
    }
}

impl FragmentDoc {
    fn validate(&self) -> MosaicoResult<()> {
        if !positive(self.width) || !positive(self.height) {
            return Err(MosaicoError::validation(
                "width/height must be finite and > 0",
            ));
        }
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return Err(MosaicoError::validation("position must be finite"));
        }
        if !self.rotation_deg.is_finite() {
            return Err(MosaicoError::validation("rotation_deg must be finite"));
        }
        if self.mode == TransformMode::Free {
            if self.outline.is_circle() {
                return Err(MosaicoError::validation(
                    "circle fragments cannot use free mode",
                ));
            }
            if let Some(v) = &self.vertices
                && (v.len() < 3 || v.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())))
            {
                return Err(MosaicoError::validation(
                    "free vertices need at least 3 finite points",
                ));
            }
        }
        Ok(())
    }

    fn into_fragment(self, id: FragmentId) -> Fragment {
        let mut f = Fragment::new(id, self.source, self.position, self.width, self.height);
        f.set_outline(self.outline);
        f.set_mode(self.mode);
        if self.mode == TransformMode::Free
            && let Some(v) = self.vertices
        {
            f.vertices = v;
        }
        f.rotation_deg = self.rotation_deg;
        f.locked = self.locked;
        f
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn validate_rect(r: &Bounds, what: &str) -> MosaicoResult<()> {
    if !(r.x.is_finite() && r.y.is_finite()) || !positive(r.width) || !positive(r.height) {
        return Err(MosaicoError::validation(format!(
            "{what} must be finite with width/height > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
