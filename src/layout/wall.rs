//! Header-less strategies packing the whole collection as one section.

use crate::{
    foundation::core::{ImageSize, SourcedInfo},
    layout::{Layout, finish_scene, pack::layout_stream_photos, stream_infos},
    scene::model::Scene,
    source::collection::{Collection, InfoSource, OrderBy},
};

/// Every item in a square cell of the row height, rows justified.
pub fn layout_square(
    layout: &Layout,
    collection: &Collection,
    infos: &dyn InfoSource,
    scene: &mut Scene,
) {
    layout_single_section(layout, collection, infos, scene, |_| ImageSize::new(1, 1));
}

/// Every item at its own aspect ratio, rows justified.
pub fn layout_wall(
    layout: &Layout,
    collection: &Collection,
    infos: &dyn InfoSource,
    scene: &mut Scene,
) {
    layout_single_section(layout, collection, infos, scene, |info| info.info.size());
}

fn layout_single_section(
    layout: &Layout,
    collection: &Collection,
    infos: &dyn InfoSource,
    scene: &mut Scene,
    size_of: impl Fn(&SourcedInfo) -> ImageSize,
) {
    let stream = collection.get_infos(infos, OrderBy::DateAsc);
    let limit = if collection.limit > 0 {
        collection.limit
    } else {
        usize::MAX
    };
    let rect = layout.content_rect();
    let packed = stream_infos(stream, |rx| {
        layout_stream_photos(rx.take(limit), rect, layout, scene, size_of)
    });
    tracing::info!(photos = scene.photos.len(), "wall laid out");
    finish_scene(layout, scene, packed.y1);
}
