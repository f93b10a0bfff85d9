//! End-to-end model lifecycle scenarios driven through the headless harness.

use glview_gui_lib::error::ViewerError;
use glview_gui_lib::harness::TestHarness;
use glview_gui_lib::state::TransformField;
use shared::{Axis, GizmoMode};

#[test]
fn test_fields_round_trip_at_display_precision() {
    let mut h = TestHarness::new();
    h.load("a.glb").unwrap();

    let inputs = [
        (TransformField::Position(Axis::X), "1.25"),
        (TransformField::Position(Axis::Y), "-0.50"),
        (TransformField::Position(Axis::Z), "7.00"),
        (TransformField::Rotation(Axis::X), "45"),
        (TransformField::Rotation(Axis::Y), "-30"),
        (TransformField::Rotation(Axis::Z), "120"),
        (TransformField::Scale(Axis::X), "2.00"),
        (TransformField::Scale(Axis::Y), "0.75"),
        (TransformField::Scale(Axis::Z), "1.10"),
    ];
    for (field, text) in inputs {
        h.set_field(field, text);
    }
    for (field, text) in inputs {
        assert_eq!(h.field(field), text, "{field:?}");
    }
}

#[test]
fn test_reset_after_many_edits() {
    let mut h = TestHarness::new();
    let id = h.load("a.glb").unwrap();
    let default = h.default_transform_of(&id).unwrap();

    for i in 0..20 {
        let text = format!("{}", i as f32 * 0.7 - 3.0);
        h.set_field(TransformField::Position(Axis::X), &text);
        h.set_field(TransformField::Rotation(Axis::Y), &text);
        h.set_field(TransformField::Scale(Axis::Z), &text);
        h.drag(Axis::Y, 0.3);
    }
    h.reset().unwrap();

    assert_eq!(h.transform_of(&id).unwrap(), default);
    assert_eq!(h.default_transform_of(&id).unwrap(), default);
}

#[test]
fn test_delete_selected_detaches_gizmo() {
    let mut h = TestHarness::new();
    let a = h.load("a.glb").unwrap();
    let b = h.load("b.glb").unwrap();
    let c = h.load("c.glb").unwrap();

    h.select(&b).unwrap();
    h.delete_selected().unwrap();
    assert!(!h.gizmo_attached_to(&b));
    assert_eq!(h.selected(), Some(c.clone()));
    assert!(h.gizmo_attached_to(&c));

    h.delete_selected().unwrap();
    assert_eq!(h.selected(), Some(a.clone()));

    h.delete_selected().unwrap();
    assert_eq!(h.selected(), None);
    assert!(!h.gizmo_attached());
    assert_eq!(h.model_count(), 0);
}

#[test]
fn test_delete_releases_every_resource() {
    let mut h = TestHarness::new();
    let before = h.resource_counts();
    let a = h.load_bytes("a.glb", b"textured".to_vec()).unwrap();
    let b = h.load("b.glb").unwrap();
    h.delete(&a).unwrap();
    h.delete(&b).unwrap();
    assert_eq!(h.resource_counts(), before);
}

#[test]
fn test_txt_never_reaches_loader() {
    let mut h = TestHarness::new();
    let err = h.load("notes.txt").unwrap_err();
    assert!(matches!(err, ViewerError::InvalidFileType { .. }));
    assert_eq!(h.loader_calls(), 0);
    assert_eq!(h.model_count(), 0);
}

#[test]
fn test_fbx_reports_invalid_type() {
    let mut h = TestHarness::new();
    let err = h.load("model.fbx").unwrap_err();
    assert_eq!(
        err,
        ViewerError::InvalidFileType {
            file_name: "model.fbx".into()
        }
    );
    assert!(h.status_text().unwrap().contains("model.fbx"));
    assert_eq!(h.model_count(), 0);
}

#[test]
fn test_extension_is_case_insensitive() {
    let mut h = TestHarness::new();
    h.load("Model.GLB").unwrap();
    h.load("scene.GlTf").unwrap();
    assert_eq!(h.model_count(), 2);
}

#[test]
fn test_failed_load_leaves_no_record() {
    let mut h = TestHarness::new();
    let before = h.resource_counts();
    let err = h.load_bytes("broken.glb", b"not a model".to_vec()).unwrap_err();
    assert!(matches!(err, ViewerError::LoadFailure { .. }));
    assert_eq!(h.model_count(), 0);
    assert_eq!(h.resource_counts(), before);
    assert_eq!(h.state.loads.staged(), 0);
}

#[test]
fn test_panicking_loader_is_a_load_failure() {
    let mut h = TestHarness::new();
    let err = h.load_bytes("boom.glb", b"panic".to_vec()).unwrap_err();
    assert!(matches!(err, ViewerError::LoadFailure { .. }));
    assert_eq!(h.state.loads.staged(), 0);
}

#[test]
fn test_normalization_grounds_model() {
    let mut h = TestHarness::new();
    let id = h.load_box_at("a.glb", [2.0, 3.0, 1.0], [4.0, -7.0, 2.0]).unwrap();
    let bounds = h.state.model_bounds(&id).unwrap();
    assert!(bounds.min.y.abs() < 1e-4);
    assert!(bounds.center().x.abs() < 1e-4);
    assert!((bounds.min.z - 3.0).abs() < 1e-4);
}

#[test]
fn test_normalization_scales_oversized_model() {
    let mut h = TestHarness::new();
    let id = h.load_box("big.glb", 40.0, 5.0, 20.0).unwrap();
    let bounds = h.state.model_bounds(&id).unwrap();
    assert!((bounds.max_dimension() - 10.0).abs() < 1e-3);
    assert!(bounds.min.y.abs() < 1e-4);

    let small = h.load_box("small.glb", 2.0, 2.0, 2.0).unwrap();
    let bounds = h.state.model_bounds(&small).unwrap();
    assert!((bounds.max_dimension() - 2.0).abs() < 1e-4);
}

#[test]
fn test_position_edit_formats_and_keeps_rotation() {
    let mut h = TestHarness::new();
    h.load("a.glb").unwrap();
    h.set_field(TransformField::Rotation(Axis::Y), "30");
    let rotation: Vec<String> = Axis::all().iter().map(|a| h.rotation_field(*a)).collect();

    h.set_field(TransformField::Position(Axis::X), "5");
    assert_eq!(h.position_field(Axis::X), "5.00");
    let after: Vec<String> = Axis::all().iter().map(|a| h.rotation_field(*a)).collect();
    assert_eq!(rotation, after);
}

#[test]
fn test_position_edit_keeps_tiny_scale_of_huge_model() {
    let mut h = TestHarness::new();
    let id = h.load_box("big.glb", 5000.0, 1.0, 1.0).unwrap();
    let before = h.transform_of(&id).unwrap();
    assert_eq!(h.scale_field(Axis::X), "0.00");

    h.set_field(TransformField::Position(Axis::X), "1");
    let after = h.transform_of(&id).unwrap();
    assert_eq!(after.position[0], 1.0);
    assert_eq!(after.scale, before.scale);
    assert_eq!(after.rotation, before.rotation);
}

#[test]
fn test_position_edit_keeps_small_gizmo_rotation() {
    let mut h = TestHarness::new();
    let id = h.load("a.glb").unwrap();
    assert!(h.set_mode(GizmoMode::Rotate));
    assert!(h.drag(Axis::X, 0.008));
    let rotated = h.transform_of(&id).unwrap();
    assert_eq!(h.rotation_field(Axis::X), "0");

    h.set_field(TransformField::Position(Axis::Y), "2");
    let after = h.transform_of(&id).unwrap();
    assert_eq!(after.position[1], 2.0);
    assert_eq!(after.rotation, rotated.rotation);
}

#[test]
fn test_non_numeric_field_keeps_previous_value() {
    let mut h = TestHarness::new();
    let id = h.load("a.glb").unwrap();
    let before = h.transform_of(&id).unwrap();
    h.set_field(TransformField::Position(Axis::Z), "abc");
    assert_eq!(h.transform_of(&id).unwrap(), before);
    assert_eq!(h.position_field(Axis::Z), format!("{:.2}", before.position[2]));
}

#[test]
fn test_delete_unselected_keeps_selection() {
    let mut h = TestHarness::new();
    let a = h.load("a.glb").unwrap();
    let b = h.load("b.glb").unwrap();
    assert_ne!(a, b);
    assert_eq!(h.selected(), Some(b.clone()));

    h.delete(&a).unwrap();
    assert_eq!(h.selected(), Some(b.clone()));
    assert!(h.gizmo_attached_to(&b));
    assert_eq!(h.model_count(), 1);
}

#[test]
fn test_toggle_gizmo_keeps_selection_and_transform() {
    let mut h = TestHarness::new();
    let id = h.load("a.glb").unwrap();
    h.set_field(TransformField::Position(Axis::X), "1.5");
    let transform = h.transform_of(&id).unwrap();

    h.set_show_gizmo(false);
    assert!(!h.gizmo_attached());
    assert_eq!(h.selected(), Some(id.clone()));

    h.set_show_gizmo(true);
    assert!(h.gizmo_attached_to(&id));
    assert_eq!(h.transform_of(&id).unwrap(), transform);
}

#[test]
fn test_mode_change_only_while_enabled() {
    let mut h = TestHarness::new();
    assert!(!h.set_mode(GizmoMode::Rotate));
    h.load("a.glb").unwrap();
    assert!(h.set_mode(GizmoMode::Rotate));
    h.deselect();
    assert!(!h.set_mode(GizmoMode::Scale));
    assert_eq!(h.state.selection.mode(), GizmoMode::Rotate);
}

#[test]
fn test_rotate_drag_updates_degrees() {
    let mut h = TestHarness::new();
    h.load("a.glb").unwrap();
    h.set_mode(GizmoMode::Rotate);
    h.drag(Axis::Z, std::f32::consts::FRAC_PI_2);
    assert_eq!(h.rotation_field(Axis::Z), "90");
}

#[test]
fn test_stale_ids_are_silent() {
    let mut h = TestHarness::new();
    let id = h.load("a.glb").unwrap();
    h.delete(&id).unwrap();
    let status = h.status_text().map(str::to_string);
    assert!(matches!(h.select(&id), Err(ViewerError::StaleReference(_))));
    assert!(matches!(h.delete(&id), Err(ViewerError::StaleReference(_))));
    assert_eq!(h.status_text().map(str::to_string), status);
}
