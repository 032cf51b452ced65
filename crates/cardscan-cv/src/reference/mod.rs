//! Reference card library

pub mod loader;

pub use loader::ReferenceLoader;

use opencv::core::Mat;
use opencv::prelude::*;
use std::collections::BTreeMap;

/// Grayscale top half of one reference card image.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub label: String,
    pub image: Mat,
}

impl ReferenceImage {
    pub fn new(label: impl Into<String>, image: Mat) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }

    pub fn height(&self) -> i32 {
        self.image.rows()
    }
}

/// Label-keyed reference set. Iteration is in label order so repeated scans
/// over the same directory break ties identically.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLibrary {
    images: BTreeMap<String, ReferenceImage>,
}

impl ReferenceLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference; returns false (keeping the existing one) on a
    /// duplicate label.
    pub fn insert(&mut self, reference: ReferenceImage) -> bool {
        if self.images.contains_key(&reference.label) {
            return false;
        }
        self.images.insert(reference.label.clone(), reference);
        true
    }

    pub fn get(&self, label: &str) -> Option<&ReferenceImage> {
        self.images.get(label)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceImage> {
        self.images.values()
    }
}

impl FromIterator<ReferenceImage> for ReferenceLibrary {
    fn from_iter<T: IntoIterator<Item = ReferenceImage>>(iter: T) -> Self {
        let mut library = Self::new();
        for reference in iter {
            library.insert(reference);
        }
        library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_label_keeps_first() {
        let mut library = ReferenceLibrary::new();
        assert!(library.insert(ReferenceImage::new("OP10-001", Mat::default())));
        assert!(!library.insert(ReferenceImage::new("OP10-001", Mat::default())));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_iterates_in_label_order() {
        let library: ReferenceLibrary = ["OP10-010", "OP10-002", "OP10-002_alt"]
            .into_iter()
            .map(|label| ReferenceImage::new(label, Mat::default()))
            .collect();

        let labels: Vec<_> = library.labels().collect();
        assert_eq!(labels, vec!["OP10-002", "OP10-002_alt", "OP10-010"]);
    }
}
