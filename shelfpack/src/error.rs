use thiserror::Error;

/// Reasons a call to [`ShelfPacker::pack`][crate::ShelfPacker::pack] can be
/// rejected. Both variants are raised before any placement happens, so a
/// failed call never produces partial pages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackError {
    #[error("invalid packer configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("rectangle #{index} has invalid size {width}x{height}; sizes must be positive and finite")]
    InvalidRectangle {
        index: usize,
        width: f64,
        height: f64,
    },
}

impl PackError {
    pub(crate) fn configuration<S: Into<String>>(reason: S) -> Self {
        PackError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
