use std::ops::Range;

use crate::{
    foundation::core::{ImageSize, Rect, SourcedInfo},
    layout::{Layout, Progress, segment::Section},
    scene::model::{Photo, Scene, Sprite},
};

/// Output of [`RowPacker::finish`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedRows {
    /// One rectangle per added item, in insertion order.
    pub rects: Vec<Rect>,
    /// Item index ranges of each row, top to bottom.
    pub rows: Vec<Range<usize>>,
    /// Packed area: input origin and width, height up to the final cursor.
    pub bounds: Rect,
}

/// Streaming justified-row packer.
///
/// Items are placed at the target row height and appended to the current row until the next
/// one would overflow the bounds width. The completed row is then scaled so that its right
/// edge lands exactly on the bounds. The final row keeps its natural width. An item wider than
/// the bounds on an empty row first closes that empty row, leaving one unscaled row of space.
#[derive(Clone, Debug)]
pub struct RowPacker {
    bounds: Rect,
    image_height: f64,
    image_spacing: f64,
    line_spacing: f64,
    x: f64,
    y: f64,
    rects: Vec<Rect>,
    row_start: usize,
    rows: Vec<Range<usize>>,
}

impl RowPacker {
    /// Pack into `bounds` (origin and width are used) with the layout's row height and spacings.
    pub fn new(bounds: Rect, layout: &Layout) -> Self {
        Self {
            bounds,
            image_height: layout.image_height,
            image_spacing: layout.image_spacing,
            line_spacing: layout.line_spacing,
            x: 0.0,
            y: 0.0,
            rects: Vec::new(),
            row_start: 0,
            rows: Vec::new(),
        }
    }

    /// Place one item, returning its index in [`PackedRows::rects`].
    pub fn add(&mut self, size: ImageSize) -> usize {
        let width = self.image_height * size.aspect_ratio();

        if self.x + width > self.bounds.width() {
            // An empty row closes with scale 1 and still advances the cursor.
            let scale = fit_row(
                &mut self.rects[self.row_start..],
                self.bounds,
                self.image_spacing,
            );
            if self.row_start < self.rects.len() {
                self.rows.push(self.row_start..self.rects.len());
            }
            self.row_start = self.rects.len();
            self.x = 0.0;
            self.y += self.image_height * scale + self.line_spacing;
        }

        let mut sprite = Sprite::default();
        sprite.place_fit_height(
            self.bounds.x0 + self.x,
            self.bounds.y0 + self.y,
            self.image_height,
            f64::from(size.width),
            f64::from(size.height),
        );
        self.rects.push(sprite.rect);
        self.x += width + self.image_spacing;
        self.rects.len() - 1
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Close the tail row without justifying it.
    pub fn finish(mut self) -> PackedRows {
        if self.row_start < self.rects.len() {
            self.rows.push(self.row_start..self.rects.len());
        }
        let y = self.y + self.image_height + self.line_spacing;
        PackedRows {
            bounds: Rect::new(
                self.bounds.x0,
                self.bounds.y0,
                self.bounds.x1,
                self.bounds.y0 + y,
            ),
            rects: self.rects,
            rows: self.rows,
        }
    }
}

/// Scale `row` in place so it spans the full `bounds` width, left-aligned on its first item.
///
/// Returns the applied scale, `1.0` for an empty row.
pub fn fit_row(row: &mut [Rect], bounds: Rect, image_spacing: f64) -> f64 {
    let (Some(first), Some(last)) = (row.first().copied(), row.last().copied()) else {
        return 1.0;
    };
    let total_spacing = (row.len() - 1) as f64 * image_spacing;
    let row_width = last.x1 - first.x0;
    let content = row_width - total_spacing;
    if content <= 0.0 {
        return 1.0;
    }
    let scale = (bounds.width() - total_spacing) / content;

    let mut x = first.x0;
    for rect in row.iter_mut() {
        let width = rect.width() * scale;
        let height = rect.height() * scale;
        *rect = Rect::new(x, rect.y0, x + width, rect.y0 + height);
        x += width + image_spacing;
    }
    scale
}

/// Pack `sizes` in one go.
pub fn pack(
    sizes: impl IntoIterator<Item = ImageSize>,
    bounds: Rect,
    layout: &Layout,
) -> PackedRows {
    let mut packer = RowPacker::new(bounds, layout);
    for size in sizes {
        packer.add(size);
    }
    packer.finish()
}

/// Append `section` to the scene's photos and pack them below `bounds.y0`.
///
/// Returns the packed area; its `y1` is the cursor for the next element.
pub fn layout_section_photos(
    section: &Section,
    bounds: Rect,
    layout: &Layout,
    scene: &mut Scene,
) -> Rect {
    let start = scene.photos.len();
    scene.photos.extend(section.infos.iter().map(|info| Photo {
        id: info.id,
        sprite: Sprite::default(),
    }));
    let packed = pack(section.infos.iter().map(|info| info.info.size()), bounds, layout);
    place_packed(scene, start, packed)
}

/// Write packed rectangles into `scene.photos[start..]` and return the packed bounds.
pub(crate) fn place_packed(scene: &mut Scene, start: usize, packed: PackedRows) -> Rect {
    for (photo, rect) in scene.photos[start..].iter_mut().zip(packed.rects) {
        photo.sprite.rect = rect;
    }
    packed.bounds
}

/// Pack a whole stream as one section without headers, sizing each item with `size_of`.
pub(crate) fn layout_stream_photos(
    infos: impl Iterator<Item = SourcedInfo>,
    bounds: Rect,
    layout: &Layout,
    scene: &mut Scene,
    size_of: impl Fn(&SourcedInfo) -> ImageSize,
) -> Rect {
    let start = scene.photos.len();
    let mut packer = RowPacker::new(bounds, layout);
    let mut progress = Progress::new("pack");
    for (index, info) in infos.enumerate() {
        scene.photos.push(Photo {
            id: info.id,
            sprite: Sprite::default(),
        });
        packer.add(size_of(&info));
        progress.tick(index);
    }
    place_packed(scene, start, packer.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pack.rs"]
mod tests;
