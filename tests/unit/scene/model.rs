use super::*;

fn photo(id: u32, x: f64, y: f64) -> Photo {
    Photo {
        id: ImageId(id),
        sprite: Sprite {
            rect: Rect::new(x, y, x + 10.0, y + 10.0),
        },
    }
}

fn grid_scene() -> Scene {
    Scene {
        photos: vec![
            photo(1, 0.0, 0.0),
            photo(2, 20.0, 0.0),
            photo(3, 0.0, 20.0),
            photo(4, 20.0, 20.0),
        ],
        ..Scene::default()
    }
}

#[test]
fn visible_photos_are_in_scene_order() {
    let scene = grid_scene();
    let visible: Vec<usize> = scene
        .visible_photos(Rect::new(5.0, 5.0, 25.0, 25.0), 0)
        .map(|(idx, _)| idx)
        .collect();
    assert_eq!(visible, vec![0, 1, 2, 3]);
}

#[test]
fn visible_photos_respect_limit() {
    let scene = grid_scene();
    let visible: Vec<u32> = scene
        .visible_photos(Rect::new(0.0, 0.0, 100.0, 100.0), 3)
        .map(|(_, p)| p.id.0)
        .collect();
    assert_eq!(visible, vec![1, 2, 3]);
}

#[test]
fn touching_edges_do_not_count_as_visible() {
    let scene = grid_scene();
    assert_eq!(
        scene
            .visible_photos(Rect::new(10.0, 0.0, 20.0, 10.0), 0)
            .count(),
        0
    );
}

#[test]
fn place_fit_height_keeps_aspect() {
    let mut sprite = Sprite::default();
    sprite.place_fit_height(10.0, 20.0, 100.0, 1200.0, 800.0);
    assert_eq!(sprite.rect, Rect::new(10.0, 20.0, 160.0, 120.0));
}

#[test]
fn scene_without_region_source_reports_error() {
    let scene = grid_scene();
    assert!(scene.region_by_id(0, RegionConfig::default()).is_err());
}
