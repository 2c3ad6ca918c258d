use super::*;

fn thumb(fit: ThumbnailFit, width: u32, height: u32) -> Thumbnail {
    Thumbnail {
        name: "t".to_string(),
        path: "{dir}/.thumbs/{stem}_t.{ext}".to_string(),
        fit,
        width,
        height,
    }
}

#[test]
fn fit_inside_keeps_both_sides_in_box() {
    let t = thumb(ThumbnailFit::Inside, 300, 300);
    assert_eq!(t.fit(ImageSize::new(1200, 800)), ImageSize::new(300, 200));
    assert_eq!(t.fit(ImageSize::new(800, 1200)), ImageSize::new(200, 300));
}

#[test]
fn fit_outside_covers_box() {
    let t = thumb(ThumbnailFit::Outside, 300, 300);
    assert_eq!(t.fit(ImageSize::new(1200, 800)), ImageSize::new(450, 300));
}

#[test]
fn original_size_is_passthrough() {
    let t = thumb(ThumbnailFit::OriginalSize, 300, 300);
    assert_eq!(t.fit(ImageSize::new(1200, 800)), ImageSize::new(1200, 800));
}

#[test]
fn path_template_expands_from_original() {
    let t = thumb(ThumbnailFit::Inside, 1, 1);
    assert_eq!(
        t.path_for("/photos/2021/IMG_0001.JPG"),
        "/photos/2021/.thumbs/IMG_0001_t.JPG"
    );
}
