use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Lists the images directly inside `folder`, sorted by file name.
///
/// Subfolders aren't searched. A file counts as an image if its extension,
/// compared case-insensitively, is one of `extensions`.
pub fn discover_images(folder: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, DiscoverError> {
    log::trace!("Searching for images in '{}'", folder.display());

    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    let mut images = Vec::new();

    for entry in walker {
        let entry = entry.map_err(|source| DiscoverError::Walk {
            path: folder.to_owned(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if is_image(entry.path(), extensions) {
            log::trace!("Found image {}", entry.path().display());
            images.push(entry.into_path());
        }
    }

    Ok(images)
}

fn is_image(path: &Path, extensions: &[String]) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|allowed| *allowed == ext)
        }
        None => false,
    }
}

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("couldn't read images from {}: {}", .path.display(), .source)]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}
