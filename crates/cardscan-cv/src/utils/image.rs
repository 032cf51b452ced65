//! Image processing utilities using opencv-match conversions

use crate::Result;
use anyhow::Context;
use opencv::{
    core::{self, Mat, Rect},
    imgcodecs, imgproc,
    prelude::*,
};
use opencv_match::prelude::*;
use std::path::Path;

/// Image utility functions shared by the loader, localizer and renderer
pub struct ImageUtils;

impl ImageUtils {
    /// Decode an image file with the `image` crate and convert it to a
    /// single-channel Mat. Fails on unreadable or undecodable files.
    pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<Mat> {
        let img = image::open(&path)
            .with_context(|| format!("Failed to open image: {:?}", path.as_ref()))?
            .to_rgba8();

        opencv_match::convert::mat_to_grayscale(&img.try_into_cv()?, true)
            .context("Failed to convert image to grayscale")
    }

    /// Save Mat as image
    pub fn save_image<P: AsRef<Path>>(mat: &Mat, path: P) -> Result<()> {
        let path_str = path.as_ref().to_string_lossy();

        imgcodecs::imwrite(&path_str, mat, &core::Vector::new())
            .with_context(|| format!("Failed to save image: {}", path_str))?;

        Ok(())
    }

    /// Single-channel copy of a BGR, BGRA or already gray frame.
    pub fn to_grayscale(image: &Mat) -> Result<Mat> {
        let code = match image.channels() {
            1 => return image.try_clone().context("Failed to copy grayscale image"),
            3 => imgproc::COLOR_BGR2GRAY,
            4 => imgproc::COLOR_BGRA2GRAY,
            n => anyhow::bail!("Unsupported channel count for grayscale conversion: {}", n),
        };

        let mut gray = Mat::default();
        imgproc::cvt_color(image, &mut gray, code, 0).context("Grayscale conversion failed")?;
        Ok(gray)
    }

    /// Owned copy of `rect` inside `image`.
    pub fn crop(image: &Mat, rect: Rect) -> Result<Mat> {
        let roi = image
            .roi(rect)
            .with_context(|| format!("Crop {:?} outside image", rect))?;
        roi.try_clone().context("Failed to copy cropped region")
    }

    /// Keep the first `rows / 2` rows; an odd extra row falls in the
    /// discarded bottom half. Images shorter than two rows yield an empty Mat.
    pub fn upper_half(image: &Mat) -> Result<Mat> {
        let half = image.rows() / 2;
        if half == 0 || image.cols() == 0 {
            return Ok(Mat::default());
        }

        Self::crop(image, Rect::new(0, 0, image.cols(), half))
    }

    /// Keep the top `fraction` of rows (clamped to `0.0..=1.0`).
    pub fn top_fraction(image: &Mat, fraction: f64) -> Result<Mat> {
        let fraction = fraction.clamp(0.0, 1.0);
        let rows = (image.rows() as f64 * fraction) as i32;
        if rows >= image.rows() {
            return image.try_clone().context("Failed to copy frame");
        }
        if rows == 0 || image.cols() == 0 {
            return Ok(Mat::default());
        }

        Self::crop(image, Rect::new(0, 0, image.cols(), rows))
    }
}
