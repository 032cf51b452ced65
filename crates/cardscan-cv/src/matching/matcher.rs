//! ORB matching with ratio test and RANSAC homography verification

use super::{CardMatch, FeatureSet, IndexedReference, MatcherConfig, ReferenceIndex};
use crate::reference::ReferenceLibrary;
use crate::Result;
use anyhow::Context;
use opencv::{
    calib3d,
    core::{self, DMatch, KeyPoint, Mat, Point2f, Ptr, Vector},
    features2d::{self, BFMatcher, ORB},
    prelude::*,
};

/// Scores a detected region against every indexed reference.
pub struct FeatureMatcher {
    config: MatcherConfig,
    orb: Ptr<ORB>,
    matcher: BFMatcher,
}

impl FeatureMatcher {
    /// Create new feature matcher
    pub fn new(config: MatcherConfig) -> Result<Self> {
        let orb = ORB::create(
            config.max_features,
            1.2,
            8,
            31,
            0,
            2,
            features2d::ORB_ScoreType::HARRIS_SCORE,
            31,
            20,
        )
        .context("Failed to create ORB detector")?;

        let matcher =
            BFMatcher::new(core::NORM_HAMMING, false).context("Failed to create matcher")?;

        Ok(Self {
            config,
            orb,
            matcher,
        })
    }

    /// Detect keypoints and compute descriptors; `None` when the image has
    /// no usable texture.
    pub fn extract(&mut self, image: &Mat) -> Result<Option<FeatureSet>> {
        if image.empty() {
            return Ok(None);
        }

        let mut keypoints = Vector::<KeyPoint>::new();
        let mut descriptors = Mat::default();
        self.orb
            .detect_and_compute(
                image,
                &core::no_array(),
                &mut keypoints,
                &mut descriptors,
                false,
            )
            .context("Feature extraction failed")?;

        let features = FeatureSet {
            keypoints,
            descriptors,
        };
        Ok((!features.is_empty()).then_some(features))
    }

    /// Extract descriptors for every reference once. References without
    /// descriptors (or whose extraction fails) are left out.
    pub fn index(&mut self, library: &ReferenceLibrary) -> ReferenceIndex {
        let mut index = ReferenceIndex::new();

        for reference in library.iter() {
            match self.extract(&reference.image) {
                Ok(Some(features)) => index.push(IndexedReference {
                    label: reference.label.clone(),
                    image: reference.image.clone(),
                    features,
                }),
                Ok(None) => log::debug!("Reference {} has no descriptors", reference.label),
                Err(e) => log::warn!("Skipping reference {}: {:#}", reference.label, e),
            }
        }

        log::info!("Indexed {}/{} references", index.len(), library.len());
        index
    }

    /// Best reference for `region`, or `None`. Never fails: extraction
    /// errors are logged and count as no match.
    pub fn match_region(&mut self, region: &Mat, index: &ReferenceIndex) -> Option<CardMatch> {
        match self.try_match_region(region, index) {
            Ok(best) => best,
            Err(e) => {
                log::debug!("Matching failed: {:#}", e);
                None
            }
        }
    }

    pub fn try_match_region(
        &mut self,
        region: &Mat,
        index: &ReferenceIndex,
    ) -> Result<Option<CardMatch>> {
        let Some(query) = self.extract(region)? else {
            return Ok(None);
        };

        let mut best: Option<CardMatch> = None;
        let mut best_inliers = 0;

        for reference in index.iter() {
            let (inliers, matches) = match self.score(&query, &reference.features) {
                Ok(scored) => scored,
                Err(e) => {
                    log::debug!("Scoring {} failed: {:#}", reference.label, e);
                    continue;
                }
            };

            if inliers > best_inliers {
                best_inliers = inliers;
                best = Some(CardMatch {
                    label: reference.label.clone(),
                    inliers,
                    matches,
                    query_keypoints: query.keypoints.clone(),
                    reference_keypoints: reference.features.keypoints.clone(),
                });
            }
        }

        Ok(best)
    }

    /// Inlier count and ratio-test matches of `query` against `reference`.
    fn score(&self, query: &FeatureSet, reference: &FeatureSet) -> Result<(u32, Vector<DMatch>)> {
        let good = self.ratio_matches(query, reference)?;
        if good.len() < self.config.min_good_matches {
            return Ok((0, good));
        }

        let inliers = self.homography_inliers(query, reference, &good)?;
        Ok((inliers, good))
    }

    /// Two nearest neighbours per query descriptor, kept only when the best
    /// is clearly closer than the runner-up.
    fn ratio_matches(&self, query: &FeatureSet, reference: &FeatureSet) -> Result<Vector<DMatch>> {
        let mut knn = Vector::<Vector<DMatch>>::new();
        self.matcher
            .knn_train_match(
                &query.descriptors,
                &reference.descriptors,
                &mut knn,
                2,
                &core::no_array(),
                false,
            )
            .context("k-NN matching failed")?;

        let mut good = Vector::<DMatch>::new();
        for pair in knn.iter() {
            if pair.len() < 2 {
                continue;
            }
            let nearest = pair.get(0)?;
            let second = pair.get(1)?;
            if nearest.distance < self.config.ratio * second.distance {
                good.push(nearest);
            }
        }

        Ok(good)
    }

    /// Number of matches consistent with one RANSAC homography; zero when
    /// no homography can be estimated.
    fn homography_inliers(
        &self,
        query: &FeatureSet,
        reference: &FeatureSet,
        good: &Vector<DMatch>,
    ) -> Result<u32> {
        let mut src = Vector::<Point2f>::with_capacity(good.len());
        let mut dst = Vector::<Point2f>::with_capacity(good.len());
        for m in good.iter() {
            src.push(query.keypoints.get(m.query_idx as usize)?.pt());
            dst.push(reference.keypoints.get(m.train_idx as usize)?.pt());
        }

        let mut mask = Mat::default();
        let homography = calib3d::find_homography(
            &src,
            &dst,
            &mut mask,
            calib3d::RANSAC,
            self.config.ransac_reproj_threshold,
        )
        .context("Homography estimation failed")?;

        if homography.empty() || mask.empty() {
            return Ok(0);
        }

        Ok(core::count_non_zero(&mask)? as u32)
    }
}
