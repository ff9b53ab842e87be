use std::path::PathBuf;

use anyhow::bail;

use crate::{config::Config, options::InputOptions, page_size::PageSize};

pub const DEFAULT_COMPRESSION: u8 = 5;
pub const MAX_COMPRESSION: u8 = 9;
pub const DEFAULT_DPI: f64 = 200.0;
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff"];

/// The final values a packing run works with, after merging command line
/// options, the project config, and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub page_size: PageSize,
    pub padding: f64,
    pub compression: u8,
    pub dpi: f64,
    pub extensions: Vec<String>,
}

impl Settings {
    pub fn resolve(options: &InputOptions, config: &Config) -> anyhow::Result<Self> {
        let compression = options
            .compression
            .or(config.compression)
            .map(clamp_compression)
            .unwrap_or(DEFAULT_COMPRESSION);

        let dpi = config.dpi.unwrap_or(DEFAULT_DPI);
        if !(dpi.is_finite() && dpi > 0.0) {
            bail!("dpi must be a positive number, but was {}", dpi);
        }

        let extensions = match &config.extensions {
            Some(extensions) => extensions
                .iter()
                .map(|extension| extension.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            None => DEFAULT_EXTENSIONS
                .iter()
                .map(|extension| extension.to_string())
                .collect(),
        };

        Ok(Self {
            input_dir: options.input.clone(),
            page_size: options.page_size.or(config.page_size).unwrap_or_default(),
            padding: options
                .padding
                .or(config.padding)
                .unwrap_or(shelfpack::DEFAULT_PADDING),
            compression,
            dpi,
            extensions,
        })
    }

    /// The JPEG quality images are re-encoded with. Each compression level
    /// costs ten points of quality, down to a floor of 10.
    pub fn jpeg_quality(&self) -> u8 {
        100u8.saturating_sub(self.compression * 10).max(10)
    }
}

fn clamp_compression(level: i64) -> u8 {
    let clamped = level.max(0).min(MAX_COMPRESSION as i64) as u8;

    if clamped as i64 != level {
        log::warn!(
            "Compression level {} is out of range, using {} instead",
            level,
            clamped
        );
    }

    clamped
}

#[cfg(test)]
mod test {
    use super::*;

    fn input_options() -> InputOptions {
        InputOptions {
            input: PathBuf::from("input_images"),
            page_size: None,
            compression: None,
            padding: None,
            config: None,
        }
    }

    #[test]
    fn defaults() {
        let settings = Settings::resolve(&input_options(), &Config::default()).unwrap();

        assert_eq!(settings.page_size, PageSize::A4);
        assert_eq!(settings.padding, 10.0);
        assert_eq!(settings.compression, 5);
        assert_eq!(settings.dpi, 200.0);
        assert_eq!(settings.extensions.len(), DEFAULT_EXTENSIONS.len());
        assert_eq!(settings.jpeg_quality(), 50);
    }

    #[test]
    fn options_override_config() {
        let options = InputOptions {
            page_size: Some(PageSize::A4),
            padding: Some(2.0),
            ..input_options()
        };
        let config = Config {
            page_size: Some(PageSize::Letter),
            padding: Some(6.0),
            compression: Some(1),
            extensions: Some(vec![".PNG".to_owned()]),
            ..Config::default()
        };

        let settings = Settings::resolve(&options, &config).unwrap();

        assert_eq!(settings.page_size, PageSize::A4);
        assert_eq!(settings.padding, 2.0);
        assert_eq!(settings.compression, 1);
        assert_eq!(settings.extensions, vec!["png".to_owned()]);
    }

    #[test]
    fn compression_is_clamped() {
        assert_eq!(clamp_compression(-4), 0);
        assert_eq!(clamp_compression(3), 3);
        assert_eq!(clamp_compression(42), 9);
    }

    #[test]
    fn quality_follows_compression() {
        let mut settings = Settings::resolve(&input_options(), &Config::default()).unwrap();

        settings.compression = 0;
        assert_eq!(settings.jpeg_quality(), 100);

        settings.compression = 9;
        assert_eq!(settings.jpeg_quality(), 10);
    }

    #[test]
    fn bad_dpi_is_rejected() {
        let config = Config {
            dpi: Some(0.0),
            ..Config::default()
        };

        assert!(Settings::resolve(&input_options(), &config).is_err());
    }
}
