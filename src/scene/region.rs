use std::{path::Path, sync::Arc};

use chrono::SecondsFormat;
use rayon::prelude::*;

use crate::{
    foundation::core::{ImageSize, Rect},
    foundation::error::{PhotofieldError, PhotofieldResult},
    scene::model::{Photo, Scene},
    source::media::MediaSource,
};

/// Options for region queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegionConfig {
    /// Maximum number of regions returned by a viewport query, `0` for no limit.
    #[serde(default)]
    pub limit: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A thumbnail variant present on backing storage.
pub struct RegionThumbnail {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rendering metadata of one placed photo.
pub struct PhotoRegionData {
    pub id: u32,
    pub path: String,
    pub filename: String,
    /// Lowercased, including the leading dot.
    pub extension: String,
    pub video: bool,
    pub width: u32,
    pub height: u32,
    /// RFC 3339 capture time with offset.
    pub created_at: String,
    pub thumbnails: Vec<RegionThumbnail>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A resolved, externally visible view of one placed photo.
pub struct Region {
    /// Index of the photo in the scene.
    pub id: usize,
    pub bounds: Rect,
    pub data: PhotoRegionData,
}

/// Resolves viewport rectangles and photo indices to [`Region`]s on a completed scene.
pub trait RegionSource: Send + Sync {
    /// Regions of the photos overlapping `rect`, in scene order, capped by `config.limit`.
    fn regions_in(
        &self,
        rect: Rect,
        scene: &Scene,
        config: RegionConfig,
    ) -> PhotofieldResult<Vec<Region>>;

    /// Region of the photo at index `id`, `None` when out of range.
    fn region_by_id(
        &self,
        id: usize,
        scene: &Scene,
        config: RegionConfig,
    ) -> PhotofieldResult<Option<Region>>;
}

/// Default [`RegionSource`] joining placed photos with the media layer.
#[derive(Clone)]
pub struct PhotoRegionSource {
    pub source: Arc<dyn MediaSource>,
}

impl PhotoRegionSource {
    pub fn new(source: Arc<dyn MediaSource>) -> Self {
        Self { source }
    }

    fn region_from_photo(&self, index: usize, photo: &Photo) -> PhotofieldResult<Region> {
        let source = self.source.as_ref();
        let original_path = source.original_path(photo.id).ok_or_else(|| {
            PhotofieldError::contract(format!("no path for placed photo {}", photo.id))
        })?;
        let info = source.info(photo.id).ok_or_else(|| {
            PhotofieldError::contract(format!("no info for placed photo {}", photo.id))
        })?;
        let original_size = ImageSize::new(info.width, info.height);
        let video = source.is_video(&original_path);

        let thumbnails = source
            .thumbnails(video)
            .iter()
            .filter(|thumbnail| source.exists(&source.thumbnail_path(thumbnail, &original_path)))
            .map(|thumbnail| {
                let size = source.fit(thumbnail, original_size);
                RegionThumbnail {
                    name: thumbnail.name.clone(),
                    width: size.width,
                    height: size.height,
                }
            })
            .collect();

        let path = Path::new(&original_path);
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| format!(".{}", s.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        Ok(Region {
            id: index,
            bounds: photo.sprite.rect,
            data: PhotoRegionData {
                id: photo.id.0,
                filename,
                extension,
                video,
                width: info.width,
                height: info.height,
                created_at: info.date_time.to_rfc3339_opts(SecondsFormat::Secs, true),
                thumbnails,
                path: original_path,
            },
        })
    }
}

impl RegionSource for PhotoRegionSource {
    fn regions_in(
        &self,
        rect: Rect,
        scene: &Scene,
        config: RegionConfig,
    ) -> PhotofieldResult<Vec<Region>> {
        let visible: Vec<(usize, &Photo)> = scene.visible_photos(rect, config.limit).collect();
        visible
            .into_par_iter()
            .map(|(index, photo)| self.region_from_photo(index, photo))
            .collect()
    }

    fn region_by_id(
        &self,
        id: usize,
        scene: &Scene,
        _config: RegionConfig,
    ) -> PhotofieldResult<Option<Region>> {
        match scene.photos.get(id) {
            Some(photo) => self.region_from_photo(id, photo).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/region.rs"]
mod tests;
