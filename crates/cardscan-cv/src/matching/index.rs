//! Precomputed reference descriptors

use super::FeatureSet;
use opencv::core::Mat;

/// A reference with its extracted features.
#[derive(Debug, Clone)]
pub struct IndexedReference {
    pub label: String,
    pub image: Mat,
    pub features: FeatureSet,
}

/// References that produced at least one descriptor, in library order.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    entries: Vec<IndexedReference>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: IndexedReference) {
        self.entries.push(entry);
    }

    pub fn get(&self, label: &str) -> Option<&IndexedReference> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexedReference> {
        self.entries.iter()
    }
}
