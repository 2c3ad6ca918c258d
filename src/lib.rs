#![forbid(unsafe_code)]
//! Photo-collection layout engine and scene cache.
//!
//! A [`SceneConfig`] names a collection and a layout. [`SceneStore::add`] streams the
//! collection's metadata from an [`InfoSource`], lays it out into a [`Scene`] and keeps it;
//! [`SceneStore::find_matching`] and [`SceneCache::get_by_id`] serve it back. Placed photos
//! resolve to [`Region`]s through the scene's [`RegionSource`].

pub mod foundation;
pub mod layout;
pub mod scene;
pub mod source;

pub use foundation::core::{
    ImageId, ImageInfo, ImageSize, Point, Rect, Size, SourcedInfo, Vec2, same_day,
};
pub use foundation::error::{PhotofieldError, PhotofieldResult};
pub use layout::pack::{PackedRows, RowPacker, fit_row, pack};
pub use layout::segment::{Direction, Event, EventSegmenter, Section};
pub use layout::{Layout, LayoutType};
pub use scene::cache::{CacheMetrics, SceneCache, SceneCacheOpts, scene_cost};
pub use scene::config::{SceneConfig, SceneParams};
pub use scene::id::{ID_ALPHABET, ID_LENGTH, generate_id};
pub use scene::model::{Photo, Scene, Solid, Sprite, Text};
pub use scene::region::{
    PhotoRegionData, PhotoRegionSource, Region, RegionConfig, RegionSource, RegionThumbnail,
};
pub use scene::store::{SceneStore, SceneStoreOpts};
pub use source::collection::{Collection, InfoSource, InfoStream, ListOptions, OrderBy};
pub use source::media::{MediaSource, Thumbnail, ThumbnailFit};
pub use source::memory::MemorySource;
