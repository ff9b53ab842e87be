use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::page_size::PageSize;

static CONFIG_FILENAME: &str = "pagepack.toml";

/// Project configuration, contained in a pagepack.toml file.
///
/// Every field is optional. Values given on the command line win over values
/// from the config file, which win over built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The paper size to lay images out on.
    #[serde(default)]
    pub page_size: Option<PageSize>,

    /// The gap to leave around each image, in points.
    #[serde(default)]
    pub padding: Option<f64>,

    /// JPEG compression level, from 0 to 9.
    #[serde(default)]
    pub compression: Option<i64>,

    /// The resolution images are assumed to have when converting their pixel
    /// size into points.
    #[serde(default)]
    pub dpi: Option<f64>,

    /// File extensions that are considered images.
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// The path that this config came from.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Config {
    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        if meta.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_folder(path)
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mut config: Self = toml::from_slice(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = path.to_owned();

        log::debug!("Loaded config from {}", path.display());

        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{} in {}", .source, .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{} in {}", .source, .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    ///
    /// This is intended for use with methods like `Config::read_from_folder` in
    /// order to avoid needing to check if a file with the right name exists.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            page-size = "letter"
            padding = 4.5
            compression = 7
            dpi = 300.0
            extensions = ["png", "webp"]
            "#,
        )
        .unwrap();

        assert_eq!(config.page_size, Some(PageSize::Letter));
        assert_eq!(config.padding, Some(4.5));
        assert_eq!(config.compression, Some(7));
        assert_eq!(config.dpi, Some(300.0));
        assert_eq!(
            config.extensions,
            Some(vec!["png".to_owned(), "webp".to_owned()])
        );
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<Config>("margins = 3").is_err());
    }

    #[test]
    fn missing_config_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::read_from_folder(dir.path()).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn read_from_folder_or_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&file_path, "padding = 2.0\n").unwrap();

        let from_folder = Config::read_from_folder_or_file(dir.path()).unwrap();
        let from_file = Config::read_from_folder_or_file(&file_path).unwrap();

        assert_eq!(from_folder.padding, Some(2.0));
        assert_eq!(from_folder, from_file);
        assert_eq!(from_file.file_path, file_path);
    }

    #[test]
    fn bad_toml_mentions_path() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&file_path, "padding = \"wide\"\n").unwrap();

        let err = Config::read_from_file(&file_path).unwrap_err();

        assert!(!err.is_not_found());
        assert!(err.to_string().contains(CONFIG_FILENAME));
    }
}
