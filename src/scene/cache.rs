use std::{
    mem::size_of,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::scene::{
    model::{Photo, Scene, Solid, Text},
    store::SceneStore,
};

/// Estimated payload of one text label beyond its struct size.
const TEXT_PAYLOAD_COST: usize = 100;

/// Options for [`SceneCache`].
#[derive(Clone, Copy, Debug)]
pub struct SceneCacheOpts {
    /// Total cost budget, in estimated bytes.
    pub max_cost: u64,
}

impl Default for SceneCacheOpts {
    fn default() -> Self {
        Self {
            max_cost: 1 << 27,
        }
    }
}

/// Cache counters. `entries` and `weighted_cost` lag behind pending maintenance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub weighted_cost: u64,
}

impl CacheMetrics {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cost-bounded lookup accelerator in front of a [`SceneStore`].
///
/// Admission and eviction are frequency-aware (TinyLFU) under [`SceneCacheOpts::max_cost`].
/// Lookups never build scenes: a miss in both tiers returns `None`.
pub struct SceneCache {
    store: Arc<SceneStore>,
    cache: moka::sync::Cache<String, Arc<Scene>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SceneCache {
    pub fn new(store: Arc<SceneStore>, opts: SceneCacheOpts) -> Self {
        let cache = moka::sync::Cache::builder()
            .name("scene_cache")
            .max_capacity(opts.max_cost)
            .weigher(|_id: &String, scene: &Arc<Scene>| scene_cost(scene))
            .build();
        Self {
            store,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Backing store.
    pub fn store(&self) -> &Arc<SceneStore> {
        &self.store
    }

    /// Look up a scene: cache first, then the store (promoting the hit into the cache).
    pub fn get_by_id(&self, id: &str) -> Option<Arc<Scene>> {
        if let Some(scene) = self.cache.get(id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Some(scene);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let scene = self.store.get(id)?;
        self.cache.insert(id.to_string(), Arc::clone(&scene));
        tracing::debug!(scene = id, cost = scene_cost(&scene), "scene cached");
        Some(scene)
    }

    pub fn metrics(&self) -> CacheMetrics {
        CacheMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
            weighted_cost: self.cache.weighted_size(),
        }
    }
}

/// Estimated memory cost of a scene, used as its cache weight.
pub fn scene_cost(scene: &Scene) -> u32 {
    let cost = size_of::<Scene>()
        + scene.photos.len() * size_of::<Photo>()
        + scene.solids.len() * size_of::<Solid>()
        + scene.texts.len() * (size_of::<Text>() + TEXT_PAYLOAD_COST);
    u32::try_from(cost).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/cache.rs"]
mod tests;
