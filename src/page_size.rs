use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A named paper size. Dimensions are in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in points, portrait orientation.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            // 210mm x 297mm
            PageSize::A4 => (210.0 / 25.4 * 72.0, 297.0 / 25.4 * 72.0),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(value: &str) -> Result<PageSize, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),

            _ => Err(String::from(
                "Invalid page size. Valid options are 'a4' and 'letter'.",
            )),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PageSize::A4 => write!(formatter, "A4"),
            PageSize::Letter => write!(formatter, "letter"),
        }
    }
}
