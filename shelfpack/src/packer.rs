use std::mem;

use crate::{
    error::PackError,
    geometry::{fits, Rect},
    types::{InputItem, Page, PackOutput, PlacedItem},
};

/// Padding applied around every rectangle when none is configured, in the
/// same units as the page size.
pub const DEFAULT_PADDING: f64 = 10.0;

/// Packs rectangles into rows ("shelves") on a sequence of fixed-size pages.
///
/// Rectangles are sorted tallest-first and then placed left to right, wrapping
/// to a new row when the current one is full and to a new page when the page
/// runs out of vertical space. Rectangles that can't fit on an empty page are
/// shrunk uniformly until they do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfPacker {
    page_size: (f64, f64),
    padding: f64,
}

impl ShelfPacker {
    pub fn new(page_size: (f64, f64)) -> Self {
        Self {
            page_size,
            padding: DEFAULT_PADDING,
        }
    }

    /// Sets the gap reserved around each rectangle. Half of it is applied on
    /// every side.
    pub fn with_padding(self, padding: f64) -> Self {
        Self { padding, ..self }
    }

    #[inline]
    pub fn page_size(&self) -> (f64, f64) {
        self.page_size
    }

    #[inline]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Checks that this packer can place any well-formed rectangle.
    pub fn validate(&self) -> Result<(), PackError> {
        let (page_width, page_height) = self.page_size;

        if !(page_width.is_finite() && page_height.is_finite()) {
            return Err(PackError::configuration(format!(
                "page size {}x{} is not finite",
                page_width, page_height
            )));
        }

        if page_width <= 0.0 || page_height <= 0.0 {
            return Err(PackError::configuration(format!(
                "page size {}x{} must be positive",
                page_width, page_height
            )));
        }

        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(PackError::configuration(format!(
                "padding {} must be a non-negative number",
                self.padding
            )));
        }

        if self.padding >= page_width || self.padding >= page_height {
            return Err(PackError::configuration(format!(
                "padding {} leaves no room on a {}x{} page",
                self.padding, page_width, page_height
            )));
        }

        Ok(())
    }

    /// Places every item onto one of a list of pages.
    ///
    /// Either every item is placed exactly once or nothing is: a bad
    /// configuration or a single malformed rectangle rejects the whole batch.
    pub fn pack<T, I>(&self, items: I) -> Result<PackOutput<T>, PackError>
    where
        I: IntoIterator<Item = InputItem<T>>,
    {
        self.validate()?;

        let mut remaining_items: Vec<_> = items.into_iter().collect();

        for (index, item) in remaining_items.iter().enumerate() {
            let (width, height) = item.size;
            let valid = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;

            if !valid {
                return Err(PackError::InvalidRectangle {
                    index,
                    width,
                    height,
                });
            }
        }

        // Tallest first. sort_by is stable, so equal heights keep their input
        // order.
        remaining_items.sort_by(|a, b| b.size.1.total_cmp(&a.size.1));

        let num_items = remaining_items.len();
        log::trace!("Packing {} items", num_items);

        let half_padding = self.padding / 2.0;
        let mut state = ShelfState::new(self.page_size);

        for input_item in remaining_items {
            let footprint = self.footprint(input_item.size);
            let (x, y) = state.place(footprint.padded);

            log::trace!(
                "Placed {}x{} item at ({}, {}) on page {}{}",
                footprint.size.0,
                footprint.size.1,
                x,
                y,
                state.page_index(),
                if footprint.scaled { " (scaled)" } else { "" }
            );

            state.push(PlacedItem {
                rect: Rect {
                    pos: (x + half_padding, y + half_padding),
                    size: footprint.size,
                },
                payload: input_item.payload,
                scaled: footprint.scaled,
            });
        }

        let pages = state.finish();

        log::trace!(
            "Finished packing {} items onto {} pages",
            num_items,
            pages.len()
        );

        Ok(PackOutput { pages })
    }

    /// Computes the padded cell a rectangle occupies, shrinking it uniformly if
    /// it can't fit on an empty page.
    fn footprint(&self, size: (f64, f64)) -> Footprint {
        let (page_width, page_height) = self.page_size;
        let padding = self.padding;

        let (mut width, mut height) = size;
        let mut scaled = false;

        if width + padding > page_width {
            let scale = (page_width - padding) / width;
            width = page_width - padding;
            height *= scale;
            scaled = true;
        }

        if height + padding > page_height {
            let scale = (page_height - padding) / height;
            height = page_height - padding;
            width *= scale;
            scaled = true;
        }

        let padded = (width + padding, height + padding);

        debug_assert!(
            fits(padded.0, page_width) && fits(padded.1, page_height),
            "rectangle {:?} does not fit on a {:?} page after rescaling",
            padded,
            self.page_size
        );

        Footprint {
            size: (width, height),
            padded,
            scaled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Footprint {
    size: (f64, f64),
    padded: (f64, f64),
    scaled: bool,
}

/// Layout state for a single packing pass. Created by `ShelfPacker::pack` and
/// consumed when the pass finishes.
#[derive(Debug)]
struct ShelfState<T> {
    page_size: (f64, f64),
    pages: Vec<Page<T>>,
    current_page: Option<Vec<PlacedItem<T>>>,
    cursor: (f64, f64),
    row_height: f64,
}

impl<T> ShelfState<T> {
    fn new(page_size: (f64, f64)) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
            current_page: None,
            cursor: (0.0, 0.0),
            row_height: 0.0,
        }
    }

    /// Zero-based index of the page that's currently open.
    fn page_index(&self) -> usize {
        self.pages.len()
    }

    /// Reserves a padded cell and returns the top-left corner of that cell.
    fn place(&mut self, padded: (f64, f64)) -> (f64, f64) {
        let (page_width, page_height) = self.page_size;
        let (width, height) = padded;

        if self.current_page.is_none() || !fits(self.cursor.1 + height, page_height) {
            self.start_page();
        }

        let position = if fits(self.cursor.0 + width, page_width) {
            self.cursor
        } else {
            self.cursor.1 += self.row_height;
            self.cursor.0 = 0.0;
            self.row_height = 0.0;

            log::trace!("Starting new row at y = {}", self.cursor.1);

            if !fits(self.cursor.1 + height, page_height) {
                self.start_page();
            }

            (0.0, self.cursor.1)
        };

        self.cursor.0 = position.0 + width;
        self.row_height = self.row_height.max(height);

        position
    }

    fn push(&mut self, item: PlacedItem<T>) {
        self.current_page.get_or_insert_with(Vec::new).push(item);
    }

    /// Closes the current page, if any, and opens an empty one.
    fn start_page(&mut self) {
        self.close_page();

        log::trace!("Starting page {}", self.page_index());

        self.current_page = Some(Vec::new());
        self.cursor = (0.0, 0.0);
        self.row_height = 0.0;
    }

    fn close_page(&mut self) {
        if let Some(items) = self.current_page.take() {
            if !items.is_empty() {
                self.pages.push(Page {
                    size: self.page_size,
                    items,
                });
            }
        }
    }

    fn finish(mut self) -> Vec<Page<T>> {
        self.close_page();
        mem::take(&mut self.pages)
    }
}
