use chrono::{Datelike, Local};

use crate::{
    foundation::core::Rect,
    layout::{
        Layout, Progress, advance, finish_scene,
        header::{HEADER_HEIGHT, TIMELINE_FONT_SIZE, timeline_header},
        header_rect,
        pack::layout_section_photos,
        segment::{Direction, Event, EventSegmenter, TIMELINE_EVENT_GAP},
        stream_infos,
    },
    scene::model::{Scene, Text},
    source::collection::{Collection, InfoSource, OrderBy},
};

/// Gap after every timeline event.
const EVENT_GAP: f64 = 10.0;

/// Lay out one timeline event at `rect.y0`, returning the rect moved past it.
pub fn layout_timeline_event(
    layout: &Layout,
    rect: Rect,
    event: &Event,
    current_year: i32,
    scene: &mut Scene,
) -> Rect {
    scene.texts.push(Text::from_rect(
        header_rect(rect),
        TIMELINE_FONT_SIZE,
        timeline_header(event, current_year),
    ));
    let rect = advance(rect, HEADER_HEIGHT + 15.0);

    let packed = layout_section_photos(&event.section, rect, layout, scene);
    Rect::new(rect.x0, packed.y1 + EVENT_GAP, rect.x1, packed.y1 + EVENT_GAP)
}

/// Newest-first events, each under a single date, time and duration header.
pub fn layout_timeline(
    layout: &Layout,
    collection: &Collection,
    infos: &dyn InfoSource,
    scene: &mut Scene,
) {
    let stream = collection.get_infos(infos, OrderBy::DateDesc);
    let current_year = Local::now().year();
    let mut rect = layout.content_rect();

    let event_count = stream_infos(stream, |rx| {
        let mut progress = Progress::new("timeline");
        let mut count = 0usize;
        let segmenter = EventSegmenter::new(
            rx,
            Direction::Descending,
            TIMELINE_EVENT_GAP,
            collection.limit,
        );
        for event in segmenter {
            rect = layout_timeline_event(layout, rect, &event, current_year, scene);
            count += 1;
            progress.tick(scene.photos.len());
        }
        count
    });

    tracing::info!(events = event_count, photos = scene.photos.len(), "timeline laid out");
    finish_scene(layout, scene, rect.y0);
}
