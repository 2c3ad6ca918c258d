use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    foundation::core::{ImageId, Rect, Size},
    foundation::error::{PhotofieldError, PhotofieldResult},
    scene::region::{Region, RegionConfig, RegionSource},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Axis-aligned placement of one scene element.
pub struct Sprite {
    pub rect: Rect,
}

impl Sprite {
    /// Place at `(x, y)` with the given height, keeping the `width:height` aspect.
    pub fn place_fit_height(&mut self, x: f64, y: f64, fit_height: f64, width: f64, height: f64) {
        let ratio = if width > 0.0 && height > 0.0 {
            width / height
        } else {
            1.0
        };
        self.rect = Rect::new(x, y, x + fit_height * ratio, y + fit_height);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A placed photo.
pub struct Photo {
    /// Source item id.
    pub id: ImageId,
    /// Placement in scene coordinates.
    pub sprite: Sprite,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A filled rectangle.
pub struct Solid {
    pub sprite: Sprite,
    /// Straight RGBA8 color.
    pub color: [u8; 4],
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A text label reserved at layout time.
pub struct Text {
    pub sprite: Sprite,
    /// Nominal font size in pixels.
    pub font_size: f64,
    pub text: String,
}

impl Text {
    pub fn from_rect(rect: Rect, font_size: f64, text: impl Into<String>) -> Self {
        Self {
            sprite: Sprite { rect },
            font_size,
            text: text.into(),
        }
    }
}

/// Positioned collection of photos, texts and solids.
///
/// Built once by a layout strategy and shared read-only afterwards (see
/// [`crate::SceneStore::add`]).
#[derive(Clone, Default)]
pub struct Scene {
    /// Store-assigned identifier.
    pub id: String,
    /// Canvas size.
    pub bounds: Size,
    /// Placed photos in layout order.
    pub photos: Vec<Photo>,
    pub solids: Vec<Solid>,
    pub texts: Vec<Text>,
    /// Resolver used by [`Scene::regions_in`] and [`Scene::region_by_id`].
    pub region_source: Option<Arc<dyn RegionSource>>,
    /// Number of photos at the time the scene was stored.
    pub file_count: usize,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("bounds", &self.bounds)
            .field("photos", &self.photos.len())
            .field("solids", &self.solids.len())
            .field("texts", &self.texts.len())
            .field("has_region_source", &self.region_source.is_some())
            .field("file_count", &self.file_count)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Scene {
    /// Photos whose rectangle overlaps `rect`, in scene order, paired with their index.
    ///
    /// At most `limit` photos are returned when `limit > 0`.
    pub fn visible_photos(
        &self,
        rect: Rect,
        limit: usize,
    ) -> impl Iterator<Item = (usize, &Photo)> + '_ {
        let limit = if limit > 0 { limit } else { usize::MAX };
        self.photos
            .iter()
            .enumerate()
            .filter(move |(_, photo)| overlaps(photo.sprite.rect, rect))
            .take(limit)
    }

    /// Regions of the photos visible in `rect`.
    pub fn regions_in(&self, rect: Rect, config: RegionConfig) -> PhotofieldResult<Vec<Region>> {
        self.region_source()?.regions_in(rect, self, config)
    }

    /// Region of the photo at `id`, `None` when out of range.
    pub fn region_by_id(&self, id: usize, config: RegionConfig) -> PhotofieldResult<Option<Region>> {
        self.region_source()?.region_by_id(id, self, config)
    }

    fn region_source(&self) -> PhotofieldResult<&dyn RegionSource> {
        self.region_source
            .as_deref()
            .ok_or_else(|| PhotofieldError::validation("scene has no region source"))
    }
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
