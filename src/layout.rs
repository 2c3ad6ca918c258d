//! Layout strategies turning an ordered metadata stream into a positioned [`Scene`].
//!
//! Every strategy follows the same shape:
//!
//! 1. stream metadata from the collection through a bounded channel ([`stream_infos`]),
//! 2. optionally segment it into [`segment::Event`]s,
//! 3. emit headers and pack each section into justified rows ([`pack::RowPacker`]),
//! 4. size the canvas to the final cursor plus [`SCENE_MARGIN`].

use std::{
    sync::mpsc,
    time::{Duration, Instant},
};

use crate::{
    foundation::core::{Rect, SourcedInfo},
    scene::model::Scene,
    source::collection::{Collection, InfoSource, InfoStream},
};

pub mod album;
pub mod header;
pub mod pack;
pub mod segment;
pub mod timeline;
pub mod wall;

/// Margin around the scene content, in scene units.
pub const SCENE_MARGIN: f64 = 10.0;

/// Spacing between images and between rows as a fraction of the row height.
pub const SPACING_FRACTION: f64 = 0.02;

/// Capacity of the channel between the metadata producer and the packing consumer.
pub const STREAM_CHANNEL_CAPACITY: usize = 10_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Layout strategy tag.
pub enum LayoutType {
    /// Ascending events with date and time headers.
    Album,
    /// Descending events with one combined header each.
    Timeline,
    /// Uniform square cells, no headers.
    Square,
    /// Justified rows of the whole collection, no headers.
    Wall,
    /// Empty or unrecognized tag. Laid out as [`LayoutType::Album`].
    #[default]
    #[serde(other)]
    Unspecified,
}

impl LayoutType {
    pub fn is_specified(self) -> bool {
        self != LayoutType::Unspecified
    }

    /// Populate `scene` with this strategy from `collection` as listed by `infos`.
    #[tracing::instrument(skip_all, fields(layout = ?self, collection = %collection.id))]
    pub fn populate(
        self,
        layout: &Layout,
        collection: &Collection,
        infos: &dyn InfoSource,
        scene: &mut Scene,
    ) {
        let layout = layout.with_derived_spacing();
        match self {
            LayoutType::Timeline => timeline::layout_timeline(&layout, collection, infos, scene),
            LayoutType::Square => wall::layout_square(&layout, collection, infos, scene),
            LayoutType::Wall => wall::layout_wall(&layout, collection, infos, scene),
            LayoutType::Album | LayoutType::Unspecified => {
                album::layout_album(&layout, collection, infos, scene)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Layout parameters of a scene request.
pub struct Layout {
    /// Strategy tag.
    #[serde(default, rename = "type")]
    pub layout_type: LayoutType,
    /// Canvas width, `0` when unspecified.
    #[serde(default)]
    pub scene_width: f64,
    /// Target row height, `0` when unspecified.
    #[serde(default)]
    pub image_height: f64,
    /// Horizontal gap between images. Derived from `image_height` when laying out.
    #[serde(default)]
    pub image_spacing: f64,
    /// Vertical gap between rows. Derived from `image_height` when laying out.
    #[serde(default)]
    pub line_spacing: f64,
}

impl Layout {
    pub fn new(layout_type: LayoutType, scene_width: f64, image_height: f64) -> Self {
        Self {
            layout_type,
            scene_width,
            image_height,
            ..Self::default()
        }
    }

    /// Copy with spacings set to [`SPACING_FRACTION`] of the row height.
    pub fn with_derived_spacing(&self) -> Self {
        Self {
            image_spacing: SPACING_FRACTION * self.image_height,
            line_spacing: SPACING_FRACTION * self.image_height,
            ..*self
        }
    }

    /// Content rectangle inside the scene margin, starting at the top.
    pub(crate) fn content_rect(&self) -> Rect {
        let width = (self.scene_width - SCENE_MARGIN * 2.0).max(0.0);
        Rect::new(
            SCENE_MARGIN,
            SCENE_MARGIN,
            SCENE_MARGIN + width,
            SCENE_MARGIN,
        )
    }
}

/// Run `consume` over `infos` fed by a scoped producer thread through a bounded channel.
///
/// The consumer may stop early; dropping its receiver ends the producer.
pub(crate) fn stream_infos<R>(
    infos: InfoStream<'_>,
    consume: impl FnOnce(mpsc::IntoIter<SourcedInfo>) -> R,
) -> R {
    std::thread::scope(|scope| {
        let (tx, rx) = mpsc::sync_channel::<SourcedInfo>(STREAM_CHANNEL_CAPACITY);
        scope.spawn(move || {
            for info in infos {
                if tx.send(info).is_err() {
                    break;
                }
            }
        });
        consume(rx.into_iter())
    })
}

/// Rate-limited progress logging while a scene is being laid out.
pub(crate) struct Progress {
    name: &'static str,
    last: Instant,
}

impl Progress {
    const INTERVAL: Duration = Duration::from_secs(1);

    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            last: Instant::now(),
        }
    }

    pub(crate) fn tick(&mut self, index: usize) {
        let now = Instant::now();
        if now.duration_since(self.last) > Self::INTERVAL {
            self.last = now;
            tracing::debug!(stage = self.name, index, "layout progress");
        }
    }
}

/// Header line reserved at the top of `rect`.
pub(crate) fn header_rect(rect: Rect) -> Rect {
    Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + header::HEADER_HEIGHT)
}

/// `rect` moved down by `dy`.
pub(crate) fn advance(rect: Rect, dy: f64) -> Rect {
    Rect::new(rect.x0, rect.y0 + dy, rect.x1, rect.y1 + dy)
}

/// Final canvas sizing shared by all strategies.
pub(crate) fn finish_scene(layout: &Layout, scene: &mut Scene, cursor_y: f64) {
    scene.bounds.width = layout.scene_width;
    scene.bounds.height = cursor_y + SCENE_MARGIN;
}

#[cfg(test)]
#[path = "../tests/unit/layout/strategy.rs"]
mod tests;
