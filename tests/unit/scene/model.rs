use super::*;
use crate::viewport::template::Template;

#[test]
fn minimal_scene_is_fullscreen() {
    let doc = SceneDoc::from_json_str(r#"{"container": {"width": 640, "height": 480}}"#).unwrap();
    let ws = doc.into_workspace().unwrap();
    assert_eq!(ws.template(), &Template::Fullscreen);
    assert!(ws.editor().is_empty());
}

#[test]
fn viewport_scene_with_fragments() {
    let doc = SceneDoc::from_json_str(
        r#"{
            "container": {"width": 800, "height": 600},
            "template": {"kind": "polygon_viewport", "rect": {"x": 10, "y": 20, "width": 300, "height": 200}, "outline": "hexagon", "locked": true},
            "fragments": [
                {"source": "a.png", "position": {"x": 10, "y": 20}, "width": 100, "height": 80},
                {"source": "b.png", "position": {"x": 50, "y": 50}, "width": 60, "height": 60,
                 "mode": "free", "vertices": [{"x": 0, "y": 0}, {"x": 60, "y": 10}, {"x": 30, "y": 60}],
                 "rotation_deg": 15}
            ]
        }"#,
    )
    .unwrap();
    let ws = doc.into_workspace().unwrap();
    let vp = ws.template().viewport().unwrap();
    assert_eq!(vp.outline, OutlineType::Hexagon);
    assert!(vp.frame.is_locked());
    assert_eq!(vp.frame.bounds(), Bounds::new(10.0, 20.0, 300.0, 200.0));

    let frags = ws.editor().fragments();
    assert_eq!(frags.len(), 2);
    assert_eq!(frags[1].mode, TransformMode::Free);
    assert_eq!(frags[1].vertices.len(), 3);
    assert_eq!(frags[1].rotation_deg, 15.0);
    assert_ne!(frags[0].id, frags[1].id);
}

#[test]
fn grid_scene_assigns_cells_in_order() {
    let doc = SceneDoc::from_json_str(
        r#"{
            "container": {"width": 800, "height": 600},
            "template": {"kind": "grid", "preset": "3x1", "rect": {"x": 0, "y": 0, "width": 300, "height": 100}, "cells": ["a.png", "", "c.png"]},
            "fragments": [{"source": "top.png", "position": {"x": 0, "y": 0}, "width": 10, "height": 10}]
        }"#,
    )
    .unwrap();
    let ws = doc.into_workspace().unwrap();
    let frags = ws.editor().fragments();
    assert_eq!(frags.len(), 4);
    assert_eq!(frags[0].source, "a.png");
    assert!(!frags[1].has_source());
    assert_eq!(frags[2].position, Point::new(200.0, 0.0));
    assert_eq!(frags[3].source, "top.png");
}

#[test]
fn invalid_scenes_are_rejected() {
    let bad_json = SceneDoc::from_json_str("{").unwrap_err();
    assert!(bad_json.to_string().starts_with("serialization error:"));

    for s in [
        r#"{"container": {"width": 0, "height": 10}}"#,
        r#"{"container": {"width": 10, "height": 10}, "template": {"kind": "grid", "preset": "0x2"}}"#,
        r#"{"container": {"width": 10, "height": 10}, "fragments": [{"source": "a", "position": {"x": 0, "y": 0}, "width": -1, "height": 5}]}"#,
        r#"{"container": {"width": 10, "height": 10}, "fragments": [{"source": "a", "position": {"x": 0, "y": 0}, "width": 5, "height": 5, "outline": "circle", "mode": "free"}]}"#,
    ] {
        let err = SceneDoc::from_json_str(s).unwrap().into_workspace().unwrap_err();
        assert!(err.to_string().starts_with("validation error:"), "{s}: {err}");
    }
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = SceneDoc::from_path("target/does/not/exist.json").unwrap_err();
    assert!(matches!(err, MosaicoError::Validation(_)));
}
