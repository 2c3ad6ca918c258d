use super::*;
use crate::layout::LayoutType;

fn config(dirs: &[&str], layout: Layout) -> SceneConfig {
    SceneConfig {
        collection: Collection {
            dirs: dirs.iter().map(|d| d.to_string()).collect(),
            ..Collection::default()
        },
        layout,
        scene: SceneParams::default(),
    }
}

fn album(width: f64, height: f64) -> Layout {
    Layout::new(LayoutType::Album, width, height)
}

#[test]
fn directory_matching_is_one_directional() {
    let stored = config(&["/a", "/b"], album(1000.0, 100.0));
    let narrow = config(&["/a"], album(1000.0, 100.0));
    assert!(narrow.matches(&stored));
    assert!(!stored.matches(&narrow));
}

#[test]
fn limits_must_be_equal() {
    let stored = config(&["/a"], album(1000.0, 100.0));
    let mut query = stored.clone();
    query.collection.limit = 10;
    assert!(!query.matches(&stored));

    let mut query = stored.clone();
    query.collection.index_limit = 10;
    assert!(!query.matches(&stored));
}

#[test]
fn unspecified_layout_fields_do_not_block() {
    let stored = config(&["/a"], album(1000.0, 100.0));
    let query = config(&["/a"], Layout::default());
    assert!(query.matches(&stored));
    assert!(stored.matches(&query));

    let other_width = config(&["/a"], album(800.0, 100.0));
    assert!(!other_width.matches(&stored));

    let other_height = config(&["/a"], album(1000.0, 120.0));
    assert!(!other_height.matches(&stored));

    let timeline = config(&["/a"], Layout::new(LayoutType::Timeline, 1000.0, 100.0));
    assert!(!timeline.matches(&stored));
}

#[test]
fn parses_json_with_defaults() {
    let json = r#"{
        "collection": { "id": "trip", "dirs": ["/photos/trip"], "limit": 100 },
        "layout": { "type": "TIMELINE", "scene_width": 1200, "image_height": 160 }
    }"#;
    let cfg = SceneConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.collection.id, "trip");
    assert_eq!(cfg.collection.limit, 100);
    assert_eq!(cfg.collection.index_limit, 0);
    assert_eq!(cfg.layout.layout_type, LayoutType::Timeline);
    assert_eq!(cfg.layout.scene_width, 1200.0);
    assert_eq!(cfg.scene.id, None);
    cfg.validate().unwrap();
}

#[test]
fn rejects_malformed_json_and_non_finite_geometry() {
    assert!(matches!(
        SceneConfig::from_reader("{".as_bytes()),
        Err(PhotofieldError::Validation(_))
    ));
    SceneConfig::default().validate().unwrap();
    let mut cfg = SceneConfig::default();
    cfg.layout.image_height = f64::INFINITY;
    assert!(matches!(cfg.validate(), Err(PhotofieldError::Validation(_))));
    assert!(matches!(
        SceneConfig::from_path("/nonexistent/scene.json"),
        Err(PhotofieldError::Validation(_))
    ));
}

#[test]
fn json_output_parses_back_to_the_same_config() {
    let mut cfg = config(&["/a", "/b"], album(1000.0, 100.0));
    cfg.scene.id = Some("Bc7Kq9mTzd".to_string());
    let json = cfg.to_json().unwrap();
    assert!(json.contains("\"type\":\"ALBUM\""));
    assert_eq!(SceneConfig::from_reader(json.as_bytes()).unwrap(), cfg);
}
