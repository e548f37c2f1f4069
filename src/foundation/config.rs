use crate::foundation::core::{Point, Size};

/// Tunables shared by the editing engines.
///
/// Defaults reproduce the interactive behavior of the editor; every field is plain data so a
/// host can load overrides from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Distance under which a dragged fragment snaps to another fragment's vertex or edge.
    pub snap_threshold: f64,
    /// Lower bound for fragment, viewport and grid width/height after a resize.
    pub min_fragment_size: f64,
    /// Inset of the viewport ellipse from the canvas edge when the outline is a circle.
    pub viewport_ellipse_padding: f64,
    /// Inset of on-screen guide outlines.
    pub guide_padding: f64,
    /// Distance of the rotate handle above the top edge midpoint.
    pub rotate_handle_offset: f64,
    /// Size of a freshly confirmed crop fragment.
    pub default_fragment_size: Size,
    /// Scene position of a freshly confirmed crop fragment.
    pub default_fragment_position: Point,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 10.0,
            min_fragment_size: 40.0,
            viewport_ellipse_padding: 8.0,
            guide_padding: 8.0,
            rotate_handle_offset: 24.0,
            default_fragment_size: Size::new(200.0, 150.0),
            default_fragment_position: Point::new(100.0, 100.0),
        }
    }
}
