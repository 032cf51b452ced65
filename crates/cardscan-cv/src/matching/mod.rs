//! Keypoint matching against the reference library

pub mod index;
pub mod matcher;

pub use index::{IndexedReference, ReferenceIndex};
pub use matcher::FeatureMatcher;

use opencv::core::{DMatch, KeyPoint, Mat, Vector};
use opencv::prelude::*;
use serde::{Deserialize, Serialize};

/// Binary keypoint descriptors of one image.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub keypoints: Vector<KeyPoint>,
    pub descriptors: Mat,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty() || self.descriptors.empty()
    }
}

/// Best-scoring reference for one detected region.
///
/// Carries the ratio-test matches and both keypoint sets so callers can draw
/// the correspondences without re-running the matcher.
#[derive(Debug, Clone)]
pub struct CardMatch {
    pub label: String,
    pub inliers: u32,
    pub matches: Vector<DMatch>,
    pub query_keypoints: Vector<KeyPoint>,
    pub reference_keypoints: Vector<KeyPoint>,
}

/// Feature matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// ORB keypoint cap per image.
    pub max_features: i32,
    /// Lowe ratio: best distance must be below `ratio` times the second best.
    pub ratio: f32,
    /// Ratio-test survivors needed before a homography is attempted.
    pub min_good_matches: usize,
    /// RANSAC inlier reprojection threshold in pixels.
    pub ransac_reproj_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            ratio: 0.75,
            min_good_matches: 4,
            ransac_reproj_threshold: 5.0,
        }
    }
}
