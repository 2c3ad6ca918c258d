use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::error::{PhotofieldError, PhotofieldResult},
    layout::Layout,
    source::collection::Collection,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Scene-level request parameters.
pub struct SceneParams {
    /// Pre-assigned scene id; a fresh one is generated when absent.
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Everything that determines how a scene is produced. Stored next to each scene.
pub struct SceneConfig {
    #[serde(default)]
    pub collection: Collection,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub scene: SceneParams,
}

impl SceneConfig {
    /// Parse a scene configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PhotofieldResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PhotofieldError::validation(format!("parse scene config JSON: {e}")))
    }

    /// Parse a scene configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PhotofieldResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PhotofieldError::validation(format!("open scene config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to JSON, in the form accepted by [`SceneConfig::from_reader`].
    pub fn to_json(&self) -> PhotofieldResult<String> {
        serde_json::to_string(self)
            .map_err(|e| PhotofieldError::serde(format!("serialize scene config: {e}")))
    }

    /// Check that the configuration can be laid out.
    ///
    /// Zero width or row height means "unspecified" and is accepted; only non-finite values
    /// are rejected.
    pub fn validate(&self) -> PhotofieldResult<()> {
        let layout = &self.layout;
        if !layout.scene_width.is_finite() {
            return Err(PhotofieldError::validation("layout scene_width must be finite"));
        }
        if !layout.image_height.is_finite() {
            return Err(PhotofieldError::validation("layout image_height must be finite"));
        }
        Ok(())
    }

    /// Whether a scene stored with `stored` can serve a request for `self`.
    ///
    /// Limits must be equal and every requested directory must be covered by the stored
    /// directories (not the reverse). Width, row height and layout type only have to agree
    /// when both sides specify them.
    pub fn matches(&self, stored: &SceneConfig) -> bool {
        let (query, stored_collection) = (&self.collection, &stored.collection);
        if query.limit != stored_collection.limit {
            return false;
        }
        if query.index_limit != stored_collection.index_limit {
            return false;
        }
        if !query
            .dirs
            .iter()
            .all(|dir| stored_collection.dirs.contains(dir))
        {
            return false;
        }

        let (a, b) = (&self.layout, &stored.layout);
        if a.scene_width != 0.0 && b.scene_width != 0.0 && a.scene_width != b.scene_width {
            return false;
        }
        if a.image_height != 0.0 && b.image_height != 0.0 && a.image_height != b.image_height {
            return false;
        }
        if a.layout_type.is_specified()
            && b.layout_type.is_specified()
            && a.layout_type != b.layout_type
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
