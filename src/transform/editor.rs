use crate::{
    foundation::config::EditorConfig,
    foundation::core::{Point, Size},
    foundation::math::pointer_angle_deg,
    shape::fragment::{Fragment, FragmentId, offset_points},
    shape::outline::{OutlineType, TransformMode},
    snap::engine::find_snap,
    transform::gesture::{Handle, TransformState},
};

/// The fragment collection plus the single-selection transform state machine.
///
/// The collection is the only owner of fragment geometry. Every mutating call is a silent no-op
/// (returns `false`) when the target is locked, is not the active selection, or the gesture does
/// not fit the fragment's transform mode.
#[derive(Clone, Debug)]
pub struct Editor {
    config: EditorConfig,
    fragments: Vec<Fragment>,
    active: Option<FragmentId>,
    rotate_mode: bool,
    state: TransformState,
    next_id: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            fragments: Vec::new(),
            active: None,
            rotate_mode: false,
            state: TransformState::Idle,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Fragments in z-order (first is bottom-most).
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn fragment(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn active(&self) -> Option<FragmentId> {
        self.active
    }

    pub fn state(&self) -> TransformState {
        self.state
    }

    pub fn rotate_mode(&self) -> bool {
        self.rotate_mode
    }

    /// Scene position of the rotate handle for `id`, before the fragment's own rotation.
    pub fn rotate_handle_position(&self, id: FragmentId) -> Option<Point> {
        self.fragment(id)
            .map(|f| f.rotate_handle(self.config.rotate_handle_offset))
    }

    pub fn allocate_id(&mut self) -> FragmentId {
        let id = FragmentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a rectangular fragment on top of the stack.
    pub fn add_fragment(
        &mut self,
        source: impl Into<String>,
        position: Point,
        size: Size,
    ) -> FragmentId {
        let id = self.allocate_id();
        self.fragments
            .push(Fragment::new(id, source, position, size.width, size.height));
        id
    }

    /// Place a freshly cropped image at the default position and size.
    pub fn confirm_crop(&mut self, source: impl Into<String>) -> FragmentId {
        let position = self.config.default_fragment_position;
        let size = self.config.default_fragment_size;
        self.add_fragment(source, position, size)
    }

    pub fn remove(&mut self, id: FragmentId) -> Option<Fragment> {
        let idx = self.fragments.iter().position(|f| f.id == id)?;
        if self.active == Some(id) {
            self.deselect();
        }
        Some(self.fragments.remove(idx))
    }

    /// Drop every fragment and the selection.
    pub fn clear(&mut self) {
        self.fragments.clear();
        self.deselect();
    }

    /// Swap in a whole new collection at once (template or grid regeneration).
    ///
    /// The selection survives only if its id is still present; any in-flight gesture ends.
    pub fn replace_fragments(&mut self, fragments: Vec<Fragment>) {
        if let Some(max) = fragments.iter().map(|f| f.id.0).max() {
            self.next_id = self.next_id.max(max + 1);
        }
        self.fragments = fragments;
        self.state = TransformState::Idle;
        if let Some(id) = self.active
            && self.fragment(id).is_none()
        {
            self.deselect();
        }
    }

    pub fn select(&mut self, id: FragmentId) -> bool {
        if self.fragment(id).is_none() {
            return false;
        }
        if self.active != Some(id) {
            self.rotate_mode = false;
            self.state = TransformState::Idle;
        }
        self.active = Some(id);
        true
    }

    pub fn deselect(&mut self) {
        self.active = None;
        self.rotate_mode = false;
        self.state = TransformState::Idle;
    }

    /// Set the user-facing lock. Locking the active fragment ends its gesture.
    pub fn set_locked(&mut self, id: FragmentId, locked: bool) -> bool {
        let Some(f) = self.fragments.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        f.locked = locked;
        if locked && self.active == Some(id) {
            self.state = TransformState::Idle;
        }
        true
    }

    /// Assign an image reference (e.g. populating a grid cell). Rejected when locked.
    pub fn assign_source(&mut self, id: FragmentId, source: impl Into<String>) -> bool {
        match self.fragments.iter_mut().find(|f| f.id == id) {
            Some(f) if !f.locked => {
                f.source = source.into();
                true
            }
            _ => false,
        }
    }

    pub fn set_outline(&mut self, id: FragmentId, outline: OutlineType) -> bool {
        let Some(idx) = self.editable_index(id) else {
            return false;
        };
        self.fragments[idx].set_outline(outline);
        self.state = TransformState::Idle;
        true
    }

    pub fn set_transform_mode(&mut self, id: FragmentId, mode: TransformMode) -> bool {
        let Some(idx) = self.editable_index(id) else {
            return false;
        };
        if !self.fragments[idx].set_mode(mode) {
            return false;
        }
        self.state = TransformState::Idle;
        true
    }

    /// Enter or leave rotate mode for the active fragment.
    pub fn toggle_rotate_mode(&mut self, id: FragmentId) -> bool {
        if self.editable_index(id).is_none() {
            return false;
        }
        self.rotate_mode = !self.rotate_mode;
        self.state = TransformState::Idle;
        true
    }

    /// Pointer press on one of the active fragment's handles. `pointer` is in scene space.
    pub fn press(&mut self, id: FragmentId, handle: Handle, pointer: Point) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        let Some(idx) = self.editable_index(id) else {
            return false;
        };
        let f = &self.fragments[idx];

        let next = match (handle, self.rotate_mode) {
            (Handle::Body, false) => TransformState::Dragging {
                offset: pointer - f.position,
            },
            (Handle::Resize, false) if f.mode == TransformMode::Size => TransformState::Resizing {
                origin: f.position,
                anchor: f.resize_handle(),
            },
            (Handle::Vertex(index), false)
                if f.mode == TransformMode::Free
                    && !f.outline.is_circle()
                    && index < f.vertices.len() =>
            {
                TransformState::EditingVertex { index }
            }
            (Handle::Rotate, true) => TransformState::Rotating {
                start_angle: f.rotation_deg,
                start_pointer_angle: pointer_angle_deg(f.center(), pointer),
            },
            _ => return false,
        };
        self.state = next;
        true
    }

    /// Pointer move while a gesture is live. Returns whether geometry changed.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        if self.state.is_idle() {
            return false;
        }
        let Some(idx) = self.active.and_then(|id| self.editable_index(id)) else {
            self.state = TransformState::Idle;
            return false;
        };

        match self.state {
            TransformState::Idle => false,
            TransformState::Dragging { offset } => {
                let candidate = pointer - offset;
                let committed = self.snapped_position(idx, candidate);
                self.fragments[idx].position = committed;
                true
            }
            TransformState::Resizing { origin, .. } => {
                let min = self.config.min_fragment_size;
                let width = (pointer.x - origin.x).max(min);
                let height = (pointer.y - origin.y).max(min);
                self.fragments[idx].resize_to(width, height);
                true
            }
            TransformState::EditingVertex { index } => {
                let f = &mut self.fragments[idx];
                let local = pointer - f.position;
                match f.vertices.get_mut(index) {
                    Some(v) => {
                        *v = local.to_point();
                        true
                    }
                    None => false,
                }
            }
            TransformState::Rotating {
                start_angle,
                start_pointer_angle,
            } => {
                let f = &mut self.fragments[idx];
                let current = pointer_angle_deg(f.center(), pointer);
                f.rotation_deg = start_angle + (current - start_pointer_angle);
                true
            }
        }
    }

    /// Pointer release: the only way a gesture ends.
    pub fn release(&mut self) -> bool {
        let was_live = !self.state.is_idle();
        self.state = TransformState::Idle;
        was_live
    }

    fn editable_index(&self, id: FragmentId) -> Option<usize> {
        if self.active != Some(id) {
            return None;
        }
        self.fragments
            .iter()
            .position(|f| f.id == id)
            .filter(|&i| !self.fragments[i].locked)
    }

    fn snapped_position(&self, idx: usize, candidate: Point) -> Point {
        let f = &self.fragments[idx];
        if f.outline.is_circle() {
            return candidate;
        }
        let moved = offset_points(&f.resolved_scene_vertices(), candidate - f.position);
        let others = self
            .fragments
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, o)| o.resolved_scene_vertices())
            .collect::<Vec<_>>();

        match find_snap(
            &moved,
            others.iter().map(Vec::as_slice),
            self.config.snap_threshold,
        ) {
            Some(hit) => {
                tracing::debug!(fragment = %f.id, kind = ?hit.kind, dx = hit.delta.x, dy = hit.delta.y, "snap");
                candidate + hit.delta
            }
            None => candidate,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/editor.rs"]
mod tests;
