//! Shelfpack is a small library for laying rectangles out onto fixed-size
//! pages. It was built for pagepack, a tool that packs a folder of images into
//! a printable PDF.
//!
//! Shelfpack exposes a single greedy shelf packer,
//! [`ShelfPacker`][ShelfPacker]. It places rectangles tallest-first in rows,
//! wrapping to a new row or a new page when it runs out of room, and shrinks
//! any rectangle too large for an empty page. It makes no attempt at finding
//! the minimal number of pages.
//!
//! ## Example
//! ```
//! use shelfpack::{InputItem, ShelfPacker};
//!
//! // First, describe the rectangles you want to pack. The second value is a
//! // payload that's handed back untouched with each placement.
//! let my_items = vec![
//!     InputItem::new((128.0, 64.0), "wide"),
//!     InputItem::new((64.0, 64.0), "square"),
//!     InputItem::new((10.0, 300.0), "tall"),
//! ];
//!
//! // Construct a packer and configure it with your constraints.
//! let packer = ShelfPacker::new((595.0, 842.0)).with_padding(10.0);
//!
//! // Compute a solution.
//! let output = packer.pack(my_items).unwrap();
//!
//! assert_eq!(output.page_count(), 1);
//! assert_eq!(*output.pages()[0].items()[0].payload(), "tall");
//! ```

mod error;
mod geometry;
mod packer;
mod types;

pub use error::*;
pub use geometry::EPSILON;
pub use packer::*;
pub use types::*;
