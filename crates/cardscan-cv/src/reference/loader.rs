//! Reference image loading

use super::{ReferenceImage, ReferenceLibrary};
use crate::utils::image::ImageUtils;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads `<label>.<ext>` files from a directory into a [`ReferenceLibrary`].
pub struct ReferenceLoader {
    supported_extensions: Vec<String>,
}

impl ReferenceLoader {
    /// Create new reference loader
    pub fn new() -> Self {
        Self {
            supported_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }

    /// Load every supported, decodable image in `dir`.
    ///
    /// Unreadable directories, unsupported extensions and files that fail to
    /// decode are skipped; this never fails.
    pub fn load_dir<P: AsRef<Path>>(&self, dir: P) -> ReferenceLibrary {
        let dir = dir.as_ref();
        let mut library = ReferenceLibrary::new();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Cannot read reference directory {:?}: {}", dir, e);
                return library;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && self.is_supported(path))
            .collect();
        paths.sort();

        for path in paths {
            match self.load_file(&path) {
                Ok(reference) => {
                    let label = reference.label.clone();
                    if !library.insert(reference) {
                        log::warn!("Duplicate reference label {}, ignoring {:?}", label, path);
                    }
                }
                Err(e) => log::debug!("Skipping reference {:?}: {:#}", path, e),
            }
        }

        log::info!("Loaded {} reference images from {:?}", library.len(), dir);
        library
    }

    /// Load one reference: grayscale, then cropped to its top half.
    pub fn load_file(&self, path: &Path) -> Result<ReferenceImage> {
        let label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .ok_or_else(|| anyhow::anyhow!("No file name in {:?}", path))?;

        let image = ImageUtils::load_grayscale(path)?;
        let image = ImageUtils::upper_half(&image)?;

        Ok(ReferenceImage::new(label, image))
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.supported_extensions.contains(&ext))
    }
}

impl Default for ReferenceLoader {
    fn default() -> Self {
        Self::new()
    }
}
