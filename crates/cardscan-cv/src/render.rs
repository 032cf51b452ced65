//! Overlay, history and match-preview drawing
//!
//! Everything here returns new Mats and never opens a window, so the scan
//! loop can render headless.

use crate::bbox::BBox;
use crate::matching::CardMatch;
use crate::Result;
use anyhow::Context;
use cardscan_core::{DetectionHistory, Readout};
use opencv::{
    core::{self, DMatch, Mat, Point, Scalar, Vector, CV_8UC3},
    features2d, imgproc,
    prelude::*,
};

/// Everything a display sink needs for one frame.
pub struct DisplayFrame<'a> {
    pub frame: &'a Mat,
    pub readout: &'a Readout,
    pub bbox: Option<BBox>,
    pub preview: Option<&'a Mat>,
    pub history: &'a DetectionHistory,
}

fn green() -> Scalar {
    Scalar::new(0.0, 255.0, 0.0, 0.0)
}

fn to_bgr(image: &Mat) -> Result<Mat> {
    if image.channels() == 3 {
        return image.try_clone().context("Failed to copy frame");
    }

    let code = if image.channels() == 4 {
        imgproc::COLOR_BGRA2BGR
    } else {
        imgproc::COLOR_GRAY2BGR
    };
    let mut bgr = Mat::default();
    imgproc::cvt_color(image, &mut bgr, code, 0)?;
    Ok(bgr)
}

/// Frame with a translucent box over the card plus status and price text.
pub fn annotate_frame(frame: &DisplayFrame, alpha: f64) -> Result<Mat> {
    let mut output = to_bgr(frame.frame)?;

    if let Some(bbox) = frame.bbox {
        let mut overlay = output.try_clone()?;
        imgproc::rectangle(
            &mut overlay,
            bbox.to_rect(),
            green(),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )?;

        let mut blended = Mat::default();
        core::add_weighted(&overlay, alpha, &output, 1.0 - alpha, 0.0, &mut blended, -1)
            .context("Overlay blend failed")?;
        output = blended;
    }

    imgproc::put_text(
        &mut output,
        &frame.readout.status,
        Point::new(10, 30),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.5,
        green(),
        2,
        imgproc::LINE_8,
        false,
    )?;
    imgproc::put_text(
        &mut output,
        &frame.readout.price,
        Point::new(10, 90),
        imgproc::FONT_HERSHEY_SIMPLEX,
        1.0,
        green(),
        2,
        imgproc::LINE_8,
        false,
    )?;

    Ok(output)
}

/// Black canvas listing `label: price`, oldest at the top.
pub fn history_canvas(history: &DetectionHistory, width: i32, height: i32) -> Result<Mat> {
    let mut canvas = Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(0.0))?;

    for (i, record) in history.iter().enumerate() {
        imgproc::put_text(
            &mut canvas,
            &format!("{}: {}", record.label, record.price),
            Point::new(10, 30 + i as i32 * 40),
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.7,
            Scalar::all(255.0),
            2,
            imgproc::LINE_8,
            false,
        )?;
    }

    Ok(canvas)
}

/// Region and reference side by side with the first `max_lines` matches.
pub fn match_preview(
    region: &Mat,
    reference: &Mat,
    card_match: &CardMatch,
    max_lines: usize,
) -> Result<Mat> {
    let shown: Vector<DMatch> = card_match.matches.iter().take(max_lines).collect();

    let mut preview = Mat::default();
    features2d::draw_matches(
        region,
        &card_match.query_keypoints,
        reference,
        &card_match.reference_keypoints,
        &shown,
        &mut preview,
        Scalar::all(-1.0),
        Scalar::all(-1.0),
        &Vector::new(),
        features2d::DrawMatchesFlags::NOT_DRAW_SINGLE_POINTS,
    )
    .context("Failed to draw matches")?;

    Ok(preview)
}
