use crate::{
    foundation::core::Rect,
    layout::{
        Layout, Progress, advance, finish_scene,
        header::{
            ALBUM_DATE_FONT_SIZE, ALBUM_TIME_FONT_SIZE, HEADER_HEIGHT, album_date_header,
            album_time_header,
        },
        header_rect,
        pack::layout_section_photos,
        segment::{ALBUM_EVENT_GAP, Direction, Event, EventSegmenter},
        stream_infos,
    },
    scene::model::{Scene, Text},
    source::collection::{Collection, InfoSource, OrderBy},
};

/// Extra gap after the last event of a day.
const DAY_GAP: f64 = 40.0;
/// Gap between events within the same day.
const EVENT_GAP: f64 = 6.0;

/// Lay out one album event at `rect.y0`, returning the rect moved past it.
pub fn layout_album_event(
    layout: &Layout,
    mut rect: Rect,
    event: &Event,
    scene: &mut Scene,
) -> Rect {
    if event.first_on_day {
        scene.texts.push(Text::from_rect(
            header_rect(rect),
            ALBUM_DATE_FONT_SIZE,
            album_date_header(event),
        ));
        rect = advance(rect, HEADER_HEIGHT + 15.0);
    }

    scene.texts.push(Text::from_rect(
        header_rect(rect),
        ALBUM_TIME_FONT_SIZE,
        album_time_header(event),
    ));
    rect = advance(rect, HEADER_HEIGHT + 10.0);

    let packed = layout_section_photos(&event.section, rect, layout, scene);
    let gap = if event.last_on_day { DAY_GAP } else { EVENT_GAP };
    Rect::new(rect.x0, packed.y1 + gap, rect.x1, packed.y1 + gap)
}

/// Ascending events with a date header on each new day and a start-time header per event.
pub fn layout_album(
    layout: &Layout,
    collection: &Collection,
    infos: &dyn InfoSource,
    scene: &mut Scene,
) {
    let stream = collection.get_infos(infos, OrderBy::DateAsc);
    let mut rect = layout.content_rect();

    let event_count = stream_infos(stream, |rx| {
        let mut progress = Progress::new("album");
        let mut count = 0usize;
        let segmenter =
            EventSegmenter::new(rx, Direction::Ascending, ALBUM_EVENT_GAP, collection.limit);
        for event in segmenter {
            rect = layout_album_event(layout, rect, &event, scene);
            count += 1;
            progress.tick(scene.photos.len());
        }
        count
    });

    tracing::info!(events = event_count, photos = scene.photos.len(), "album laid out");
    finish_scene(layout, scene, rect.y0);
}

#[cfg(test)]
#[path = "../../tests/unit/layout/album.rs"]
mod tests;
