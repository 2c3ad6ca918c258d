use chrono::DateTime;

use super::*;
use crate::{
    foundation::core::{ImageId, ImageInfo},
    scene::model::Sprite,
    source::media::{Thumbnail, ThumbnailFit},
    source::memory::MemorySource,
};

fn thumbnail(name: &str, suffix: &str, size: u32) -> Thumbnail {
    Thumbnail {
        name: name.to_string(),
        path: format!("{{dir}}/.thumbs/{{stem}}_{suffix}.jpg"),
        fit: ThumbnailFit::Inside,
        width: size,
        height: size,
    }
}

fn media() -> MemorySource {
    let mut src = MemorySource::new().with_image_thumbnails(vec![
        thumbnail("thumb", "t", 300),
        thumbnail("large", "l", 1200),
    ]);
    src.insert(
        ImageId(5),
        "/photos/trip/IMG_0005.JPG",
        ImageInfo {
            width: 1200,
            height: 800,
            date_time: DateTime::parse_from_rfc3339("2021-05-01T10:15:00+02:00").unwrap(),
        },
    );
    src.insert(
        ImageId(6),
        "/photos/trip/clip.mp4",
        ImageInfo {
            width: 1920,
            height: 1080,
            date_time: DateTime::parse_from_rfc3339("2021-05-01T11:00:00Z").unwrap(),
        },
    );
    src.mark_existing("/photos/trip/.thumbs/IMG_0005_t.jpg");
    src
}

fn scene() -> Scene {
    let photo = |id: u32, x: f64| Photo {
        id: ImageId(id),
        sprite: Sprite {
            rect: Rect::new(x, 0.0, x + 150.0, 100.0),
        },
    };
    Scene {
        photos: vec![photo(5, 0.0), photo(6, 200.0)],
        file_count: 2,
        ..Scene::default()
    }
}

#[test]
fn region_lists_only_existing_thumbnails() {
    let regions = PhotoRegionSource::new(Arc::new(media()));
    let region = regions
        .region_by_id(0, &scene(), RegionConfig::default())
        .unwrap()
        .unwrap();

    assert_eq!(region.id, 0);
    assert_eq!(region.bounds, Rect::new(0.0, 0.0, 150.0, 100.0));
    assert_eq!(region.data.id, 5);
    assert_eq!(region.data.width, 1200);
    assert_eq!(region.data.height, 800);
    assert_eq!(
        region.data.thumbnails,
        vec![RegionThumbnail {
            name: "thumb".to_string(),
            width: 300,
            height: 200,
        }]
    );
}

#[test]
fn region_carries_path_parts_and_timestamp() {
    let regions = PhotoRegionSource::new(Arc::new(media()));
    let region = regions
        .region_by_id(0, &scene(), RegionConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(region.data.path, "/photos/trip/IMG_0005.JPG");
    assert_eq!(region.data.filename, "IMG_0005.JPG");
    assert_eq!(region.data.extension, ".jpg");
    assert!(!region.data.video);
    assert_eq!(region.data.created_at, "2021-05-01T10:15:00+02:00");

    let video = regions
        .region_by_id(1, &scene(), RegionConfig::default())
        .unwrap()
        .unwrap();
    assert!(video.data.video);
    assert!(video.data.thumbnails.is_empty());
    assert_eq!(video.data.created_at, "2021-05-01T11:00:00Z");
}

#[test]
fn last_index_resolves_and_past_end_is_none() {
    let regions = PhotoRegionSource::new(Arc::new(media()));
    let scene = scene();
    assert!(
        regions
            .region_by_id(1, &scene, RegionConfig::default())
            .unwrap()
            .is_some()
    );
    assert!(
        regions
            .region_by_id(2, &scene, RegionConfig::default())
            .unwrap()
            .is_none()
    );
}

#[test]
fn viewport_query_keeps_scene_order_and_limit() {
    let regions = PhotoRegionSource::new(Arc::new(media()));
    let scene = scene();
    let all = regions
        .regions_in(Rect::new(0.0, 0.0, 1000.0, 1000.0), &scene, RegionConfig::default())
        .unwrap();
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1]);

    let limited = regions
        .regions_in(
            Rect::new(0.0, 0.0, 1000.0, 1000.0),
            &scene,
            RegionConfig { limit: 1 },
        )
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].data.id, 5);

    let right = regions
        .regions_in(Rect::new(190.0, 10.0, 210.0, 20.0), &scene, RegionConfig::default())
        .unwrap();
    assert_eq!(right.len(), 1);
    assert_eq!(right[0].data.id, 6);
}

#[test]
fn unknown_photo_is_a_contract_violation() {
    let regions = PhotoRegionSource::new(Arc::new(MemorySource::new()));
    let err = regions
        .region_by_id(0, &scene(), RegionConfig::default())
        .unwrap_err();
    assert!(matches!(err, PhotofieldError::Contract(_)));
}

#[test]
fn region_json_uses_stable_field_names() {
    let regions = PhotoRegionSource::new(Arc::new(media()));
    let region = regions
        .region_by_id(0, &scene(), RegionConfig::default())
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&region.data).unwrap();
    for key in [
        "id",
        "path",
        "filename",
        "extension",
        "video",
        "width",
        "height",
        "created_at",
        "thumbnails",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}
