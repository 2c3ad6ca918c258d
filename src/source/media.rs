use std::path::Path;

use crate::foundation::core::{ImageId, ImageInfo, ImageSize};

/// How a thumbnail's nominal size relates to the original's size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThumbnailFit {
    /// Scaled down until both sides fit inside the nominal box.
    #[default]
    Inside,
    /// Scaled until the nominal box is fully covered.
    Outside,
    /// Same size as the original.
    OriginalSize,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A thumbnail variant that may exist next to an original.
pub struct Thumbnail {
    /// Variant name reported in regions.
    pub name: String,
    /// Path template. `{dir}`, `{filename}`, `{stem}` and `{ext}` expand from the original path.
    pub path: String,
    /// Fit policy for [`Thumbnail::fit`].
    #[serde(default)]
    pub fit: ThumbnailFit,
    /// Nominal width in pixels.
    pub width: u32,
    /// Nominal height in pixels.
    pub height: u32,
}

impl Thumbnail {
    /// Expand the path template for `original_path`.
    pub fn path_for(&self, original_path: &str) -> String {
        let path = Path::new(original_path);
        let dir = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .replace("{dir}", &dir)
            .replace("{filename}", &filename)
            .replace("{stem}", &stem)
            .replace("{ext}", &ext)
    }

    /// Output dimensions of this variant for an original of `original` size.
    pub fn fit(&self, original: ImageSize) -> ImageSize {
        if original.width == 0 || original.height == 0 || self.width == 0 || self.height == 0 {
            return original;
        }
        let mut w = f64::from(self.width);
        let mut h = f64::from(self.height);
        let thumb_ratio = w / h;
        let original_ratio = original.aspect_ratio();
        let shrink_height = match self.fit {
            ThumbnailFit::Inside => thumb_ratio < original_ratio,
            ThumbnailFit::Outside => thumb_ratio > original_ratio,
            ThumbnailFit::OriginalSize => return original,
        };
        if shrink_height {
            h = w / original_ratio;
        } else {
            w = h * original_ratio;
        }
        ImageSize::new(w.round() as u32, h.round() as u32)
    }
}

/// External media and thumbnail layer consulted during region resolution.
pub trait MediaSource: Send + Sync {
    /// Path of the original file, `None` for an unknown id.
    fn original_path(&self, id: ImageId) -> Option<String>;

    /// Dimensions and capture time, `None` for an unknown id.
    fn info(&self, id: ImageId) -> Option<ImageInfo>;

    fn is_video(&self, path: &str) -> bool;

    /// Candidate thumbnail variants, in preference order.
    fn thumbnails(&self, video: bool) -> &[Thumbnail];

    fn thumbnail_path(&self, thumbnail: &Thumbnail, original_path: &str) -> String {
        thumbnail.path_for(original_path)
    }

    fn exists(&self, path: &str) -> bool;

    fn fit(&self, thumbnail: &Thumbnail, original: ImageSize) -> ImageSize {
        thumbnail.fit(original)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/media.rs"]
mod tests;
