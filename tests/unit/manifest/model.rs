use super::*;

fn basic_manifest() -> Manifest {
    serde_json::from_str(
        r#"{
            "images": [
                {"name": "post", "src": "img/post.png"},
                {"name": "rail", "src": "img/rail.png",
                 "relative": {"post": {"x": 12.0, "y": -4.0}}},
                {"name": "cap", "src": "img/cap.png"}
            ],
            "layers": [
                {"name": "posts", "mode": "base", "image": "post"},
                {"name": "rails", "fromLayer": "posts", "range": [0, -1], "image": "rail"},
                {"name": "caps", "mode": "decorate", "images": ["cap", "rail"]}
            ],
            "order": [
                {"type": "successive", "layers": ["posts", "rails"]},
                {"type": "alternate", "layers": ["caps"]}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn json_roundtrip() {
    let manifest = basic_manifest();
    let s = serde_json::to_string_pretty(&manifest).unwrap();
    let de: Manifest = serde_json::from_str(&s).unwrap();
    assert_eq!(de.images.len(), 3);
    assert_eq!(de.layers.len(), 3);
    assert_eq!(de.order.len(), 2);
}

#[test]
fn serde_defaults_apply() {
    let manifest = basic_manifest();
    assert_eq!(manifest.layers[1].mode, LayerMode::Match);
    assert!(manifest.layers[0].range.is_empty());
    assert!(manifest.layers[0].from_layer.is_none());

    let relative = &manifest.images[1].relative;
    assert_eq!(relative.get("post"), Some(&Vec2::new(12.0, -4.0)));
}

#[test]
fn image_select_parses_both_forms() {
    let manifest = basic_manifest();
    let Some(ImageSelect::Sequence(list)) = &manifest.layers[2].images else {
        panic!("expected sequence selection");
    };
    assert_eq!(list.len(), 2);

    let def: LayerDef = serde_json::from_str(
        r#"{"name": "posts", "images": {"first": "cap", "remains": "post"}}"#,
    )
    .unwrap();
    let Some(ImageSelect::Roles(roles)) = &def.images else {
        panic!("expected role selection");
    };
    assert_eq!(roles.first.as_deref(), Some("cap"));
    assert!(roles.last.is_none());
    assert_eq!(roles.remains, "post");
}

#[test]
fn validate_accepts_basic_manifest() {
    basic_manifest().validate().unwrap();
}

#[test]
fn validate_rejects_missing_base() {
    let mut manifest = basic_manifest();
    manifest.layers.remove(0);
    assert!(manifest.validate().is_err());
}

#[test]
fn validate_rejects_two_base_layers() {
    let mut manifest = basic_manifest();
    manifest.layers[1].mode = LayerMode::Base;
    assert!(manifest.validate().is_err());
}

#[test]
fn validate_rejects_long_range() {
    let mut manifest = basic_manifest();
    manifest.layers[1].range = vec![0, 1, 2];
    assert!(manifest.validate().is_err());
}

#[test]
fn validate_rejects_repeat_without_anchors() {
    let mut manifest = basic_manifest();
    manifest.layers[1].mode = LayerMode::Repeat;
    assert!(manifest.validate().is_err());

    manifest.layers[1].start = Some(AnchorRef {
        layer: "posts".to_string(),
        index: 0,
    });
    manifest.layers[1].end = Some(AnchorRef {
        layer: "posts".to_string(),
        index: -1,
    });
    manifest.validate().unwrap();
}

#[test]
fn validate_rejects_unknown_dependency() {
    let mut manifest = basic_manifest();
    manifest.layers[1].from_layer = Some("ghost".to_string());
    assert!(manifest.validate().is_err());
}

#[test]
fn validate_rejects_unknown_image() {
    let mut manifest = basic_manifest();
    manifest.layers[1].image = Some("ghost".to_string());
    assert!(manifest.validate().is_err());
}

#[test]
fn validate_rejects_empty_images_list() {
    let mut manifest = basic_manifest();
    manifest.layers[2].images = Some(ImageSelect::Sequence(Vec::new()));
    assert!(manifest.validate().is_err());
}

#[test]
fn validate_rejects_order_with_unknown_layer() {
    let mut manifest = basic_manifest();
    manifest.order.push(OrderGroup::Successive {
        layers: vec!["ghost".to_string()],
    });
    assert!(manifest.validate().is_err());
}
