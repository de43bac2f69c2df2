//! Unit tests for the leaf modules: path access, identifiers, the type
//! registry, and error display.
mod common;
use common::*;
use kumitate::ident::{definition_id, slugify};
use kumitate::registry;
use kumitate::{path, prelude::*};
use serde_json::json;

#[test]
fn test_path_get_walks_nested_objects() {
    let record = json!({ "outputs": { "image": "img://1" }, "label": "Render" });
    assert_eq!(path::get(&record, "outputs.image"), Some(&json!("img://1")));
    assert_eq!(path::get(&record, "label"), Some(&json!("Render")));
}

#[test]
fn test_path_get_misses_are_none() {
    let record = json!({ "outputs": {} });
    assert_eq!(path::get(&record, "outputs.image"), None);
    assert_eq!(path::get(&record, "missing.deeply.nested"), None);
    // Intermediate is a string, not an object.
    let record = json!({ "outputs": "not-a-map" });
    assert_eq!(path::get(&record, "outputs.image"), None);
}

#[test]
fn test_path_set_creates_intermediates() {
    let mut record = json!({});
    path::set(&mut record, "outputs.image", json!("img://1"));
    assert_eq!(record, json!({ "outputs": { "image": "img://1" } }));
}

#[test]
fn test_path_set_replaces_non_object_intermediates() {
    let mut record = json!({ "outputs": 7 });
    path::set(&mut record, "outputs.image", json!("img://1"));
    assert_eq!(record, json!({ "outputs": { "image": "img://1" } }));
}

#[test]
fn test_path_set_overwrites_whole_values() {
    let mut record = json!({ "inputs": { "videos": ["a"] } });
    path::set(&mut record, "inputs.videos", json!(["b", "c"]));
    assert_eq!(
        path::get(&record, "inputs.videos"),
        Some(&json!(["b", "c"]))
    );
}

#[test]
fn test_node_value_paths_are_record_rooted() {
    let mut node = image_gen_node("n1", "Render");
    assert_eq!(node.value_at("data.aspectRatio"), Some(&json!("1:1")));
    // Mapping paths outside `data.` never resolve.
    assert_eq!(node.value_at("id"), None);

    node.set_value_at("data.outputs.image", json!("img://1"));
    assert_eq!(node.value_at("data.outputs.image"), Some(&json!("img://1")));
    node.set_value_at("position.x", json!(3.0));
    assert_eq!(node.value_at("position.x"), None);
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("Script Input"), "script_input");
    assert_eq!(slugify("  Aspect--Ratio!! "), "aspect_ratio");
    assert_eq!(slugify("UPPER case 123"), "upper_case_123");
    assert_eq!(slugify("___"), "");
}

#[test]
fn test_slugify_is_idempotent() {
    for text in ["Script Input", "a--b", "9 to 5", "", "Ünïcode mix"] {
        let once = slugify(text);
        assert_eq!(slugify(&once), once);
    }
}

#[test]
fn test_definition_ids_are_prefixed_and_unique() {
    let a = definition_id("Harbor Painter");
    let b = definition_id("Harbor Painter");
    assert!(a.starts_with("compound_harbor_painter_"));
    assert_ne!(a, b);
}

#[test]
fn test_node_kind_serde_round_trip() {
    let known: NodeKind = serde_json::from_value(json!("imageGeneration")).expect("known kind");
    assert_eq!(known, NodeKind::ImageGeneration);
    assert_eq!(serde_json::to_value(&known).expect("serialize"), json!("imageGeneration"));

    // Unknown type strings survive a round trip.
    let unknown: NodeKind = serde_json::from_value(json!("hologram")).expect("unknown kind");
    assert_eq!(unknown, NodeKind::Other("hologram".to_string()));
    assert_eq!(serde_json::to_value(&unknown).expect("serialize"), json!("hologram"));
}

#[test]
fn test_registry_source_declarations() {
    let decl = registry::declarations(&NodeKind::Text).expect("text is declared");
    assert!(decl.is_source());
    let (key, path) = decl.source_value.expect("designated value field");
    assert_eq!(key, "promptText");
    assert_eq!(path, "data.promptText");
    assert!(decl.inputs.is_empty());
}

#[test]
fn test_registry_generation_declarations() {
    let decl = registry::declarations(&NodeKind::VideoGeneration).expect("declared");
    assert_eq!(decl.generation_output.as_deref(), Some("video"));
    assert!(decl.inputs.iter().any(|c| c.id == "prompt" && c.required));
    assert_eq!(decl.params.len(), 3);

    let merge = registry::declarations(&NodeKind::MergeVideos).expect("declared");
    assert!(merge.inputs[0].accepts_multiple);
}

#[test]
fn test_registry_unknown_kinds_are_undeclared() {
    assert!(registry::declarations(&NodeKind::Other("holo".into())).is_none());
    let node = GraphNode::new("x1", NodeKind::Other("holo".into()), json!({}));
    assert!(registry::exposable_params(&node).is_empty());
}

#[test]
fn test_exposable_params_carry_paths_and_hints() {
    let params = registry::exposable_params(&image_gen_node("i1", "Still"));
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "Aspect Ratio");
    assert_eq!(params[0].path, "data.aspectRatio");
    assert!(matches!(params[0].control, ControlKind::Select { .. }));
}

#[test]
fn test_compound_node_declarations_come_from_its_surface() {
    let definition = two_node_definition();
    let node = definition.instantiate().to_node("c1");

    let decl = registry::node_declarations(&node).expect("compound surface");
    assert_eq!(decl.inputs.len(), 1);
    assert!(decl.inputs.iter().any(|c| c.id == "prompt"));
    assert_eq!(decl.params.len(), 1);
    assert_eq!(decl.params[0].path, "data.controlValues.aspect_ratio");
}

#[test]
fn test_control_synthetic_defaults() {
    let slider = ControlKind::Slider {
        min: 1.0,
        max: 30.0,
        step: 1.0,
    };
    assert_eq!(slider.synthetic_default(), json!(1.0));

    let select = ControlKind::Select {
        options: vec!["16:9".to_string(), "9:16".to_string()],
    };
    assert_eq!(select.synthetic_default(), json!("16:9"));

    assert_eq!(ControlKind::Toggle.synthetic_default(), json!(false));
    assert_eq!(ControlKind::Text.synthetic_default(), json!(""));
}

#[test]
fn test_error_display() {
    let err = BuildError::TooManyNodes {
        count: 250,
        max: 100,
    };
    assert!(err.to_string().contains("250"));
    assert!(err.to_string().contains("100"));

    let exec_err = ExecutionError::Delegate("boom".to_string());
    assert!(exec_err.to_string().contains("boom"));

    let store_err = StoreError::NotFound("compound_x_1".to_string());
    assert!(store_err.to_string().contains("compound_x_1"));
}
