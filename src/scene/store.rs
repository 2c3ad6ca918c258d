use std::{sync::Arc, time::Instant};

use chrono::Utc;
use dashmap::DashMap;

use crate::{
    foundation::error::PhotofieldResult,
    scene::{
        config::SceneConfig,
        id::generate_id,
        model::Scene,
        region::PhotoRegionSource,
    },
    source::{collection::InfoSource, media::MediaSource},
};

/// Options for [`SceneStore`].
#[derive(Clone, Debug, Default)]
pub struct SceneStoreOpts {
    /// Template every new scene starts from (e.g. pre-seeded solids).
    pub default_scene: Scene,
}

#[derive(Clone)]
struct StoredScene {
    scene: Arc<Scene>,
    config: SceneConfig,
}

/// Authoritative map of every scene built in this process, keyed by scene id.
///
/// Safe to share across threads; entries are never removed.
#[derive(Default)]
pub struct SceneStore {
    opts: SceneStoreOpts,
    scenes: DashMap<String, StoredScene>,
}

impl SceneStore {
    pub fn new(opts: SceneStoreOpts) -> Self {
        Self {
            opts,
            scenes: DashMap::new(),
        }
    }

    /// Build a scene for `config` from `infos`, store it and return it.
    ///
    /// The id comes from `config.scene.id` or is freshly generated; existing ids are not
    /// checked for collisions. Regions resolve against `media` unless the layout installed
    /// its own region source.
    #[tracing::instrument(skip_all, fields(collection = %config.collection.id))]
    pub fn add(
        &self,
        config: &SceneConfig,
        infos: &dyn InfoSource,
        media: Arc<dyn MediaSource>,
    ) -> PhotofieldResult<Arc<Scene>> {
        config.validate()?;
        let id = match config.scene.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => generate_id()?,
        };

        let started = Instant::now();
        let mut scene = self.opts.default_scene.clone();
        config
            .layout
            .layout_type
            .populate(&config.layout, &config.collection, infos, &mut scene);
        if scene.region_source.is_none() {
            scene.region_source = Some(Arc::new(PhotoRegionSource::new(media)));
        }
        scene.id = id.clone();
        scene.file_count = scene.photos.len();
        scene.created_at = Utc::now();

        tracing::info!(
            scene = %id,
            photos = scene.file_count,
            width = scene.bounds.width,
            height = scene.bounds.height,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scene loaded"
        );

        let scene = Arc::new(scene);
        self.scenes.insert(
            id,
            StoredScene {
                scene: Arc::clone(&scene),
                config: config.clone(),
            },
        );
        Ok(scene)
    }

    /// All stored scenes whose configuration can serve `config` (see [`SceneConfig::matches`]).
    pub fn find_matching(&self, config: &SceneConfig) -> Vec<Arc<Scene>> {
        self.scenes
            .iter()
            .filter(|entry| config.matches(&entry.config))
            .map(|entry| Arc::clone(&entry.scene))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Scene>> {
        self.scenes.get(id).map(|entry| Arc::clone(&entry.scene))
    }

    /// Configuration a stored scene was built from.
    pub fn config(&self, id: &str) -> Option<SceneConfig> {
        self.scenes.get(id).map(|entry| entry.config.clone())
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
