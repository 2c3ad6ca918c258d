use chrono::{DateTime, Datelike, FixedOffset};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Identifier of an item in the external media index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ImageId(pub u32);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel dimensions of an original or a thumbnail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Degenerate sizes are laid out as squares.
    pub fn aspect_ratio(self) -> f64 {
        if self.width == 0 || self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Metadata the layout needs for one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub date_time: DateTime<FixedOffset>,
}

impl ImageInfo {
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}

/// [`ImageInfo`] tagged with the id it was listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourcedInfo {
    pub id: ImageId,
    pub info: ImageInfo,
}

impl SourcedInfo {
    pub fn date_time(&self) -> DateTime<FixedOffset> {
        self.info.date_time
    }
}

/// Calendar-date equality, each timestamp read in its own offset.
pub fn same_day(a: DateTime<FixedOffset>, b: DateTime<FixedOffset>) -> bool {
    a.year() == b.year() && a.ordinal() == b.ordinal()
}
