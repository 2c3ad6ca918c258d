use chrono::DateTime;

use super::*;
use crate::{
    foundation::core::{ImageId, ImageInfo},
    source::{collection::ListOptions, memory::MemorySource},
};

fn source() -> MemorySource {
    let mut s = MemorySource::new();
    let stamps = [
        ("2021-05-01T10:00:00Z", 400, 300),
        ("2021-05-01T10:20:00Z", 300, 400),
        ("2021-05-01T12:00:00Z", 1600, 900),
        ("2021-05-02T09:00:00Z", 500, 500),
    ];
    for (i, (ts, w, h)) in stamps.iter().enumerate() {
        s.push(
            format!("/photos/{i}.jpg"),
            ImageInfo {
                width: *w,
                height: *h,
                date_time: DateTime::parse_from_rfc3339(ts).unwrap(),
            },
        );
    }
    s
}

fn populate(layout_type: LayoutType) -> Scene {
    let layout = Layout::new(layout_type, 800.0, 120.0);
    let mut scene = Scene::default();
    layout_type.populate(&layout, &Collection::default(), &source(), &mut scene);
    scene
}

fn ids(scene: &Scene) -> Vec<u32> {
    scene.photos.iter().map(|p| p.id.0).collect()
}

#[test]
fn layout_type_parses_known_tags_and_falls_back() {
    let parse = |s: &str| serde_json::from_str::<LayoutType>(s).unwrap();
    assert_eq!(parse("\"ALBUM\""), LayoutType::Album);
    assert_eq!(parse("\"TIMELINE\""), LayoutType::Timeline);
    assert_eq!(parse("\"SQUARE\""), LayoutType::Square);
    assert_eq!(parse("\"WALL\""), LayoutType::Wall);
    assert_eq!(parse("\"\""), LayoutType::Unspecified);
    assert_eq!(parse("\"MOSAIC\""), LayoutType::Unspecified);
    assert!(!LayoutType::Unspecified.is_specified());
}

#[test]
fn unspecified_layout_matches_album() {
    let album = populate(LayoutType::Album);
    let fallback = populate(LayoutType::Unspecified);
    assert_eq!(album.photos, fallback.photos);
    assert_eq!(album.texts, fallback.texts);
    assert_eq!(album.bounds, fallback.bounds);
}

#[test]
fn timeline_lists_newest_first_with_one_header_per_event() {
    let scene = populate(LayoutType::Timeline);
    assert_eq!(ids(&scene), vec![4, 3, 2, 1]);
    // Events: {4}, {3}, {2, 1}.
    assert_eq!(scene.texts.len(), 3);
    assert!(scene.texts[2].text.ends_with("20 minutes"));
}

#[test]
fn wall_and_square_have_no_headers() {
    let wall = populate(LayoutType::Wall);
    assert!(wall.texts.is_empty());
    assert_eq!(ids(&wall), vec![1, 2, 3, 4]);

    let square = populate(LayoutType::Square);
    assert!(square.texts.is_empty());
    for photo in &square.photos {
        let r = photo.sprite.rect;
        assert!((r.width() - r.height()).abs() < 1e-9);
    }
}

#[test]
fn canvas_height_covers_all_photos() {
    for layout_type in [
        LayoutType::Album,
        LayoutType::Timeline,
        LayoutType::Square,
        LayoutType::Wall,
    ] {
        let scene = populate(layout_type);
        assert_eq!(scene.bounds.width, 800.0);
        let bottom = scene
            .photos
            .iter()
            .map(|p| p.sprite.rect.y1)
            .fold(0.0, f64::max);
        assert!(scene.bounds.height >= bottom + SCENE_MARGIN, "{layout_type:?}");
    }
}

#[test]
fn derived_spacing_is_fraction_of_row_height() {
    let layout = Layout::new(LayoutType::Album, 1000.0, 200.0).with_derived_spacing();
    assert_eq!(layout.image_spacing, 4.0);
    assert_eq!(layout.line_spacing, 4.0);
}

#[test]
fn wall_respects_collection_limit() {
    let layout = Layout::new(LayoutType::Wall, 800.0, 120.0);
    let collection = Collection {
        limit: 2,
        ..Collection::default()
    };
    let mut scene = Scene::default();
    LayoutType::Wall.populate(&layout, &collection, &source(), &mut scene);
    assert_eq!(ids(&scene), vec![1, 2]);
}

/// Endless one-photo-per-minute stream that ignores the requested limit.
struct EndlessSource;

impl InfoSource for EndlessSource {
    fn list_infos(&self, _dirs: &[String], _opts: ListOptions) -> InfoStream<'_> {
        let start = DateTime::parse_from_rfc3339("2021-05-01T00:00:00Z").unwrap();
        Box::new((1u32..).map(move |i| SourcedInfo {
            id: ImageId(i),
            info: ImageInfo {
                width: 300,
                height: 200,
                date_time: start + chrono::Duration::minutes(i64::from(i)),
            },
        }))
    }
}

#[test]
fn consumer_stops_an_unbounded_stream_at_the_collection_limit() {
    let limit = STREAM_CHANNEL_CAPACITY + 2_500;
    let collection = Collection {
        limit,
        ..Collection::default()
    };
    for layout_type in [
        LayoutType::Album,
        LayoutType::Timeline,
        LayoutType::Square,
        LayoutType::Wall,
    ] {
        let layout = Layout::new(layout_type, 1000.0, 100.0);
        let mut scene = Scene::default();
        layout_type.populate(&layout, &collection, &EndlessSource, &mut scene);
        assert_eq!(scene.photos.len(), limit, "{layout_type:?}");
        assert_eq!(scene.photos[0].id, ImageId(1), "{layout_type:?}");
        assert_eq!(
            scene.photos[limit - 1].id,
            ImageId(limit as u32),
            "{layout_type:?}"
        );
    }
}
