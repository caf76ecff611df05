use super::*;

fn manifest() -> Manifest {
    serde_json::from_str(
        r#"{
            "images": [{"name": "post", "src": "post.png"}],
            "layers": [
                {"name": "posts", "mode": "base", "image": "post"},
                {"name": "rails", "image": "post"}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn every_layer_defaults_to_one_instance() {
    let config = effective_config(&manifest(), &[]);
    assert_eq!(config.len(), 2);
    assert_eq!(config[0].layer_name, "posts");
    assert_eq!(config[1].layer_name, "rails");
    assert!(config.iter().all(|c| c.number == 1));
}

#[test]
fn recommended_count_wins() {
    let recommended = vec![LayerCount {
        layer_name: "rails".to_string(),
        number: 5,
    }];
    let config = effective_config(&manifest(), &recommended);
    assert_eq!(config[0].number, 1);
    assert_eq!(config[1].number, 5);
}

#[test]
fn recommendation_for_unknown_layer_is_ignored() {
    let recommended = vec![LayerCount {
        layer_name: "ghost".to_string(),
        number: 9,
    }];
    let config = effective_config(&manifest(), &recommended);
    assert_eq!(config.len(), 2);
    assert!(config.iter().all(|c| c.number == 1));
}

#[test]
fn wire_shape_is_camel_case() {
    let count: LayerCount = serde_json::from_str(r#"{"layerName": "posts", "number": 3}"#).unwrap();
    assert_eq!(count.layer_name, "posts");
    assert_eq!(count.number, 3);

    let s = serde_json::to_string(&count).unwrap();
    assert!(s.contains("layerName"));
}
