use crate::foundation::core::SourcedInfo;

/// Ordering of a metadata listing by capture time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OrderBy {
    #[default]
    DateAsc,
    DateDesc,
}

/// Options passed to [`InfoSource::list_infos`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub order_by: OrderBy,
    /// Maximum number of records, `0` for no limit.
    pub limit: usize,
}

/// Lazily produced, ordered metadata records. Dropping it early must be safe.
pub type InfoStream<'a> = Box<dyn Iterator<Item = SourcedInfo> + Send + 'a>;

/// External collection enumerator.
pub trait InfoSource: Send + Sync {
    /// List the items under `dirs` (all items when empty) in the requested order.
    fn list_infos(&self, dirs: &[String], opts: ListOptions) -> InfoStream<'_>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A named set of source directories with listing limits.
pub struct Collection {
    /// Stable collection identifier, used in logs.
    #[serde(default)]
    pub id: String,
    /// Human-readable collection name.
    #[serde(default)]
    pub name: String,
    /// Maximum number of items laid out, `0` for no limit.
    #[serde(default)]
    pub limit: usize,
    /// Maximum number of items indexed; carried for scene matching only.
    #[serde(default)]
    pub index_limit: usize,
    /// Source directories.
    #[serde(default)]
    pub dirs: Vec<String>,
}

impl Collection {
    /// Stream this collection's items from `source` in the given order.
    pub fn get_infos<'a>(&self, source: &'a dyn InfoSource, order_by: OrderBy) -> InfoStream<'a> {
        source.list_infos(
            &self.dirs,
            ListOptions {
                order_by,
                limit: self.limit,
            },
        )
    }
}
