use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use crate::{
    foundation::core::{ImageId, ImageInfo, SourcedInfo},
    source::collection::{InfoSource, InfoStream, ListOptions, OrderBy},
    source::media::{MediaSource, Thumbnail},
};

const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "avi", "mkv", "webm"];

#[derive(Clone, Debug)]
struct MemoryItem {
    id: ImageId,
    path: String,
    info: ImageInfo,
}

/// In-memory media index implementing both [`InfoSource`] and [`MediaSource`].
///
/// Thumbnail existence is answered from a registered path set and, when
/// [`MemorySource::check_filesystem`] is enabled, from the local filesystem.
#[derive(Clone, Debug)]
pub struct MemorySource {
    items: Vec<MemoryItem>,
    by_id: HashMap<ImageId, usize>,
    next_id: u32,
    image_thumbnails: Vec<Thumbnail>,
    video_thumbnails: Vec<Thumbnail>,
    existing: HashSet<String>,
    check_filesystem: bool,
    video_extensions: Vec<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            by_id: HashMap::new(),
            next_id: 1,
            image_thumbnails: Vec::new(),
            video_thumbnails: Vec::new(),
            existing: HashSet::new(),
            check_filesystem: false,
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Add an item under the next free id.
    pub fn push(&mut self, path: impl Into<String>, info: ImageInfo) -> ImageId {
        let id = ImageId(self.next_id);
        self.insert(id, path, info);
        id
    }

    /// Add or replace the item stored under `id`.
    pub fn insert(&mut self, id: ImageId, path: impl Into<String>, info: ImageInfo) {
        let item = MemoryItem {
            id,
            path: path.into(),
            info,
        };
        match self.by_id.get(&id) {
            Some(&idx) => self.items[idx] = item,
            None => {
                self.by_id.insert(id, self.items.len());
                self.items.push(item);
            }
        }
        self.next_id = self.next_id.max(id.0.saturating_add(1));
    }

    pub fn with_image_thumbnails(mut self, thumbnails: Vec<Thumbnail>) -> Self {
        self.image_thumbnails = thumbnails;
        self
    }

    pub fn with_video_thumbnails(mut self, thumbnails: Vec<Thumbnail>) -> Self {
        self.video_thumbnails = thumbnails;
        self
    }

    /// Also answer [`MediaSource::exists`] by probing the local filesystem.
    pub fn check_filesystem(mut self, enabled: bool) -> Self {
        self.check_filesystem = enabled;
        self
    }

    /// Register a path as present on backing storage.
    pub fn mark_existing(&mut self, path: impl Into<String>) {
        self.existing.insert(path.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn in_dirs(path: &str, dirs: &[String]) -> bool {
        dirs.is_empty()
            || dirs
                .iter()
                .any(|dir| Path::new(path).starts_with(Path::new(dir)))
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InfoSource for MemorySource {
    fn list_infos(&self, dirs: &[String], opts: ListOptions) -> InfoStream<'_> {
        let mut listed: Vec<&MemoryItem> = self
            .items
            .iter()
            .filter(|item| Self::in_dirs(&item.path, dirs))
            .collect();
        match opts.order_by {
            OrderBy::DateAsc => listed.sort_by_key(|item| (item.info.date_time, item.id)),
            OrderBy::DateDesc => listed.sort_by(|a, b| {
                (b.info.date_time, b.id).cmp(&(a.info.date_time, a.id))
            }),
        }
        let limit = if opts.limit > 0 {
            opts.limit
        } else {
            usize::MAX
        };
        Box::new(listed.into_iter().take(limit).map(|item| SourcedInfo {
            id: item.id,
            info: item.info,
        }))
    }
}

impl MediaSource for MemorySource {
    fn original_path(&self, id: ImageId) -> Option<String> {
        self.by_id.get(&id).map(|&idx| self.items[idx].path.clone())
    }

    fn info(&self, id: ImageId) -> Option<ImageInfo> {
        self.by_id.get(&id).map(|&idx| self.items[idx].info)
    }

    fn is_video(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.video_extensions.iter().any(|v| *v == ext))
    }

    fn thumbnails(&self, video: bool) -> &[Thumbnail] {
        if video {
            &self.video_thumbnails
        } else {
            &self.image_thumbnails
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.existing.contains(path) || (self.check_filesystem && Path::new(path).is_file())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/memory.rs"]
mod tests;
