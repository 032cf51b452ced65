#![allow(dead_code)]

use cardscan_cv::Result;
use opencv::{
    core::{Mat, Point, Rect, Scalar, CV_8UC3},
    imgproc,
    prelude::*,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const CARD_WIDTH: i32 = 200;
pub const CARD_HEIGHT: i32 = 280;
const BORDER: i32 = 6;
const BLOCK: i32 = 8;

/// Paint a white-bordered card with seeded blocky texture at `origin`.
pub fn draw_card(target: &mut Mat, origin: Point, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let card = Rect::new(origin.x, origin.y, CARD_WIDTH, CARD_HEIGHT);
    let white = Scalar::all(255.0);
    imgproc::rectangle(target, card, white, imgproc::FILLED, imgproc::LINE_8, 0)?;

    let inner_w = CARD_WIDTH - 2 * BORDER;
    let inner_h = CARD_HEIGHT - 2 * BORDER;
    for by in (0..inner_h).step_by(BLOCK as usize) {
        for bx in (0..inner_w).step_by(BLOCK as usize) {
            let value = rng.gen_range(20..=230u8) as f64;
            let block = Rect::new(
                origin.x + BORDER + bx,
                origin.y + BORDER + by,
                BLOCK.min(inner_w - bx),
                BLOCK.min(inner_h - by),
            );
            let shade = Scalar::all(value);
            imgproc::rectangle(target, block, shade, imgproc::FILLED, imgproc::LINE_8, 0)?;
        }
    }
    Ok(())
}

/// A card on its own, as a reference photo would be.
pub fn card_image(seed: u64) -> Result<Mat> {
    let black = Scalar::all(0.0);
    let mut card = Mat::new_rows_cols_with_default(CARD_HEIGHT, CARD_WIDTH, CV_8UC3, black)?;
    draw_card(&mut card, Point::new(0, 0), seed)?;
    Ok(card)
}

/// A 640x480 black camera frame with the card at `origin`.
pub fn frame_with_card(seed: u64, origin: Point) -> Result<Mat> {
    let mut frame = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0))?;
    draw_card(&mut frame, origin, seed)?;
    Ok(frame)
}

pub fn empty_frame() -> Result<Mat> {
    Ok(Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0))?)
}
