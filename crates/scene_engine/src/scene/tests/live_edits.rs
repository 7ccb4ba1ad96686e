use approx::assert_relative_eq;

use super::*;
use crate::assets::geometry::GeometryDescriptor;
use crate::foundation::color::Color;
use crate::render::lighting::{Light, LightKind};
use crate::render::surface::SurfaceOp;
use crate::scene::{EditOutcome, EditWarning, LoadState, ParameterChange, PanelResponse};
use crate::ui::{ControlPanelBinder, PanelEvent, WidgetInput};

#[test]
fn test_ambient_edit_touches_only_ambient() {
    let mut controller = loaded_controller();
    let before = controller.surface().snapshot();

    let outcome = controller.on_parameter_changed(ParameterChange::new("ambient", "intensity", 0.65));

    assert_eq!(outcome, EditOutcome::Applied);
    let after = controller.surface().snapshot();
    assert_eq!(after.nodes, before.nodes);
    assert_eq!(after.background, before.background);
    assert_eq!(after.lights[&LightKind::Directional], before.lights[&LightKind::Directional]);
    assert_relative_eq!(after.lights[&LightKind::Ambient].intensity(), 0.65);
    assert_eq!(controller.surface().ops(), &[SurfaceOp::UpdateLight(LightKind::Ambient)]);
}

#[test]
fn test_directional_color_and_position() {
    let mut controller = loaded_controller();

    controller.on_parameter_changed(ParameterChange::new("directional", "color", "#ff8800"));
    controller.on_parameter_changed(ParameterChange::new("directional", "position.x", -10.0));

    let Some(Light::Directional(light)) = controller.surface().light(LightKind::Directional).copied() else {
        panic!("directional light should be attached");
    };
    assert_eq!(light.color, Color::from_rgb8(0xff, 0x88, 0x00));
    assert_relative_eq!(light.position().x, -10.0);
    assert_relative_eq!(light.position().y, 20.0);
}

#[test]
fn test_unknown_object_is_warning_only() {
    let mut controller = loaded_controller();
    let before = controller.surface().snapshot();

    let outcome = controller.on_parameter_changed(ParameterChange::new("obj-404", "roughness", 0.5));

    assert_eq!(outcome, EditOutcome::Ignored(EditWarning::UnknownEditTarget("obj-404".to_string())));
    assert_eq!(controller.surface().snapshot(), before);
    assert!(controller.surface().ops().is_empty());
}

#[test]
fn test_edit_before_any_load() {
    let mut controller = controller();

    let outcome = controller.on_parameter_changed(ParameterChange::new("background", "color", "#ffffff"));

    assert_eq!(outcome, EditOutcome::Ignored(EditWarning::NoActiveScene));
    assert_eq!(controller.state(), LoadState::Empty);
    assert!(controller.surface().ops().is_empty());
}

#[test]
fn test_geometry_edit_updates_node_in_place() {
    let mut controller = loaded_controller();
    let key = controller.active().key_of("obj-1").unwrap();

    let outcome = controller.on_parameter_changed(ParameterChange::new("obj-1", "tube", 1.5));

    assert_eq!(outcome, EditOutcome::Applied);
    assert_eq!(controller.surface().ops(), &[SurfaceOp::UpdateNode(key)]);
    let GeometryDescriptor::TorusKnot(params) = controller.surface().node(key).unwrap().geometry;
    assert_relative_eq!(params.tube, 1.5);
    assert_eq!(params.tubular_segments, 100);
}

#[test]
fn test_material_edit_clamps_on_surface() {
    let mut controller = loaded_controller();
    let key = controller.active().key_of("obj-1").unwrap();

    controller.on_parameter_changed(ParameterChange::new("obj-1", "metalness", 3.0));
    controller.on_parameter_changed(ParameterChange::new("obj-1", "color", Color::from_rgb8(0, 128, 255)));

    let material = controller.surface().node(key).unwrap().material.surface();
    assert_eq!(material.metalness(), 1.0);
    assert_eq!(material.color().to_hex(), "#0080ff");
}

#[test]
fn test_visibility_detaches_and_reattaches_same_key() {
    let mut controller = loaded_controller();
    let key = controller.active().key_of("obj-1").unwrap();

    controller.on_parameter_changed(ParameterChange::new("obj-1", "visible", false));
    assert!(controller.surface().attached_keys().is_empty());

    // Edits to a hidden node are kept and show up when it comes back
    controller.on_parameter_changed(ParameterChange::new("obj-1", "roughness", 0.7));
    assert_eq!(
        controller.on_parameter_changed(ParameterChange::new("obj-1", "visible", false)),
        EditOutcome::Unchanged
    );

    controller.on_parameter_changed(ParameterChange::new("obj-1", "visible", true));
    assert_eq!(controller.surface().attached_keys(), vec![key]);
    assert_relative_eq!(controller.surface().node(key).unwrap().material.surface().roughness(), 0.7);
    assert_eq!(
        controller.surface().ops(),
        &[SurfaceOp::DetachNode(key), SurfaceOp::AttachNode(key)]
    );
    assert_eq!(controller.surface().anomalies(), 0);
}

#[test]
fn test_panel_drives_controller() {
    let mut controller = controller();
    let mut binder = ControlPanelBinder::new();

    let load = binder.translate(&WidgetInput::new("btnLoadScene", "")).unwrap();
    assert!(matches!(controller.handle(load), PanelResponse::Load(Ok(_))));
    binder.sync_with(controller.active());

    for (widget, value) in [("objMetal", "0.25"), ("bgColor", "#202020"), ("q", "5")] {
        let event = binder.translate(&WidgetInput::new(widget, value)).unwrap();
        assert!(matches!(event, PanelEvent::ParameterChanged(_)));
        assert_eq!(controller.handle(event), PanelResponse::Edit(EditOutcome::Applied));
    }

    let panel = binder.panel_state(controller.active());
    assert_eq!(panel.background.to_hex(), "#202020");
    let selected = panel.selected.unwrap();
    assert_relative_eq!(selected.metalness, 0.25);
    assert!(selected.geometry.contains(&("q", 5.0)));
}
