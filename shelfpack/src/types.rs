use crate::geometry::Rect;

/// An input to the shelf packer.
///
/// `InputItem` is a 2D size plus an opaque payload. The packer never looks at
/// the payload; it's carried through to the matching [`PlacedItem`] so that
/// consumers can associate placements back to their own objects.
#[derive(Debug, Clone, PartialEq)]
pub struct InputItem<T> {
    pub(crate) size: (f64, f64),
    pub(crate) payload: T,
}

impl<T> InputItem<T> {
    #[inline]
    pub fn new(size: (f64, f64), payload: T) -> Self {
        Self { size, payload }
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }
}

/// An item that was placed by the packer.
///
/// `PlacedItem` corresponds 1:1 to the `InputItem` values passed to
/// [`ShelfPacker::pack`][crate::ShelfPacker::pack]. Positions are the top-left
/// corner of the visible rectangle in page-local coordinates, with y growing
/// downwards. Sizes are unpadded and reflect any rescaling the packer did.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem<T> {
    pub(crate) rect: Rect,
    pub(crate) payload: T,
    pub(crate) scaled: bool,
}

impl<T> PlacedItem<T> {
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        self.rect.pos
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.rect.size
    }

    #[inline]
    pub fn min(&self) -> (f64, f64) {
        self.rect.pos
    }

    #[inline]
    pub fn max(&self) -> (f64, f64) {
        self.rect.max()
    }

    /// Whether the packer had to shrink this item to make it fit on a page.
    #[inline]
    pub fn is_scaled(&self) -> bool {
        self.scaled
    }

    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    #[inline]
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Tells whether the visible areas of two placed items overlap. Items that
    /// only share an edge don't count as overlapping.
    pub fn overlaps<U>(&self, other: &PlacedItem<U>) -> bool {
        self.rect.intersects(&other.rect)
    }
}

/// The results from running the packer.
#[derive(Debug, Clone, PartialEq)]
pub struct PackOutput<T> {
    pub(crate) pages: Vec<Page<T>>,
}

impl<T> PackOutput<T> {
    #[inline]
    pub fn pages(&self) -> &[Page<T>] {
        &self.pages
    }

    #[inline]
    pub fn into_pages(self) -> Vec<Page<T>> {
        self.pages
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The total number of placed items across every page.
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|page| page.items.len()).sum()
    }
}

/// A single fixed-size page and the items placed on it, in placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub(crate) size: (f64, f64),
    pub(crate) items: Vec<PlacedItem<T>>,
}

impl<T> Page<T> {
    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    #[inline]
    pub fn items(&self) -> &[PlacedItem<T>] {
        &self.items
    }

    #[inline]
    pub fn into_items(self) -> Vec<PlacedItem<T>> {
        self.items
    }
}
