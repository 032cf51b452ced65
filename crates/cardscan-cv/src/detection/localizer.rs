//! Quadrilateral card localization on edge contours

use super::config::LocalizerConfig;
use crate::bbox::BBox;
use crate::utils::ImageUtils;
use crate::Result;
use anyhow::Context;
use opencv::{
    core::{self, Mat, Point, Size, Vector},
    imgproc,
    prelude::*,
};

/// Cropped top half of a localized card plus where it was found.
#[derive(Debug, Clone)]
pub struct DetectedRegion {
    pub image: Mat,
    pub bbox: BBox,
}

/// Finds the largest four-cornered contour in a frame.
pub struct CardLocalizer {
    config: LocalizerConfig,
}

impl CardLocalizer {
    pub fn new(config: LocalizerConfig) -> Self {
        Self { config }
    }

    /// Locate a card in `frame`. OpenCV failures are logged and reported as
    /// "no region", same as a frame without a card.
    pub fn locate(&self, frame: &Mat) -> Option<DetectedRegion> {
        match self.try_locate(frame) {
            Ok(region) => region,
            Err(e) => {
                log::debug!("Localization failed: {:#}", e);
                None
            }
        }
    }

    pub fn try_locate(&self, frame: &Mat) -> Result<Option<DetectedRegion>> {
        if frame.empty() {
            return Ok(None);
        }

        let gray = ImageUtils::to_grayscale(frame)?;
        let edges = self.edges(&gray)?;

        let mut contours = Vector::<Vector<Point>>::new();
        imgproc::find_contours(
            &edges,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )
        .context("Contour extraction failed")?;

        let Some(quad) = self.select_card_contour(&contours)? else {
            return Ok(None);
        };

        let bbox = BBox::from_rect(imgproc::bounding_rect(&quad)?);
        if !bbox.is_valid() {
            return Ok(None);
        }

        let card = ImageUtils::crop(&gray, bbox.to_rect())?;
        let image = ImageUtils::upper_half(&card)?;
        if image.empty() {
            return Ok(None);
        }

        Ok(Some(DetectedRegion { image, bbox }))
    }

    fn edges(&self, gray: &Mat) -> Result<Mat> {
        let mut blurred = Mat::default();
        imgproc::gaussian_blur(
            gray,
            &mut blurred,
            Size::new(self.config.blur_kernel, self.config.blur_kernel),
            self.config.blur_sigma,
            0.0,
            core::BORDER_DEFAULT,
        )
        .context("Gaussian blur failed")?;

        let mut edges = Mat::default();
        imgproc::canny(
            &blurred,
            &mut edges,
            self.config.canny_low,
            self.config.canny_high,
            3,
            false,
        )
        .context("Canny failed")?;

        Ok(edges)
    }

    /// Largest-area contour whose approximation has exactly four vertices.
    /// Equal areas keep the earlier contour.
    fn select_card_contour(
        &self,
        contours: &Vector<Vector<Point>>,
    ) -> Result<Option<Vector<Point>>> {
        let mut card = None;
        let mut max_area = 0.0;

        for contour in contours.iter() {
            let area = imgproc::contour_area(&contour, false)?;
            if area < self.config.min_contour_area {
                continue;
            }

            let epsilon = self.config.approx_epsilon_ratio * imgproc::arc_length(&contour, true)?;
            let mut approx = Vector::<Point>::new();
            imgproc::approx_poly_dp(&contour, &mut approx, epsilon, true)?;

            if approx.len() == 4 && area > max_area {
                max_area = area;
                card = Some(approx);
            }
        }

        Ok(card)
    }
}

impl Default for CardLocalizer {
    fn default() -> Self {
        Self::new(LocalizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Rect, Scalar, CV_8UC3};

    fn frame_with_rect(rect: Rect) -> Result<Mat> {
        let mut frame = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0))?;
        let white = Scalar::all(255.0);
        imgproc::rectangle(&mut frame, rect, white, imgproc::FILLED, imgproc::LINE_8, 0)?;
        Ok(frame)
    }

    fn square(x: i32, y: i32, side: i32) -> Vector<Point> {
        Vector::from_iter([
            Point::new(x, y),
            Point::new(x + side, y),
            Point::new(x + side, y + side),
            Point::new(x, y + side),
        ])
    }

    #[test]
    fn test_locates_single_quad() -> Result<()> {
        let card = Rect::new(120, 90, 200, 280);
        let frame = frame_with_rect(card)?;

        let region = CardLocalizer::default()
            .locate(&frame)
            .expect("card should be found");

        let expected = BBox::from_rect(card);
        assert!(region.bbox.inflate(2).contains(&expected.inflate(-2)));
        assert!(expected.inflate(2).contains(&region.bbox));
        assert_eq!(region.image.rows(), region.bbox.height / 2);
        assert_eq!(region.image.cols(), region.bbox.width);
        assert_eq!(region.image.channels(), 1);
        Ok(())
    }

    #[test]
    fn test_small_quad_is_ignored() -> Result<()> {
        let frame = frame_with_rect(Rect::new(50, 50, 20, 20))?;
        assert!(CardLocalizer::default().locate(&frame).is_none());
        Ok(())
    }

    #[test]
    fn test_round_shape_is_not_a_card() -> Result<()> {
        let mut frame = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0))?;
        imgproc::circle(
            &mut frame,
            Point::new(320, 240),
            120,
            Scalar::all(255.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )?;

        assert!(CardLocalizer::default().locate(&frame).is_none());
        Ok(())
    }

    #[test]
    fn test_blank_and_empty_frames() -> Result<()> {
        let blank = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(90.0))?;
        let localizer = CardLocalizer::default();

        assert!(localizer.locate(&blank).is_none());
        assert!(localizer.locate(&Mat::default()).is_none());
        Ok(())
    }

    #[test]
    fn test_largest_quad_wins() -> Result<()> {
        let mut frame = frame_with_rect(Rect::new(20, 20, 100, 140))?;
        imgproc::rectangle(
            &mut frame,
            Rect::new(300, 100, 220, 300),
            Scalar::all(255.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )?;

        let region = CardLocalizer::default().locate(&frame).unwrap();
        assert!(region.bbox.x >= 297 && region.bbox.x <= 302);
        assert!(region.bbox.width >= 218);
        Ok(())
    }

    #[test]
    fn test_equal_areas_keep_first_contour() -> Result<()> {
        let localizer = CardLocalizer::default();
        let left = square(10, 10, 100);
        let right = square(300, 200, 100);

        let contours = Vector::from_iter([left.clone(), right.clone()]);
        let chosen = localizer.select_card_contour(&contours)?.unwrap();
        assert_eq!(imgproc::bounding_rect(&chosen)?, imgproc::bounding_rect(&left)?);

        let contours = Vector::from_iter([right.clone(), left]);
        let chosen = localizer.select_card_contour(&contours)?.unwrap();
        assert_eq!(imgproc::bounding_rect(&chosen)?, imgproc::bounding_rect(&right)?);
        Ok(())
    }
}
