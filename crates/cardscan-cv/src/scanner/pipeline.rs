//! Per-frame scan pipeline and capture loop

use super::config::ScannerConfig;
use crate::bbox::BBox;
use crate::detection::CardLocalizer;
use crate::io::Signal;
use crate::matching::{CardMatch, FeatureMatcher, ReferenceIndex};
use crate::reference::{ReferenceLibrary, ReferenceLoader};
use crate::render::{self, DisplayFrame};
use crate::traits::{DisplaySink, FrameSource, SignalSource};
use crate::utils::ImageUtils;
use crate::Result;
use anyhow::Context;
use cardscan_core::{Clock, DetectionRecord, PriceSource, Readout, Resolution, ScanSession};
use opencv::{
    core::{self, Mat},
    prelude::*,
};
use std::time::Instant;

/// What happened to one frame.
#[derive(Debug)]
pub struct FrameReport {
    /// The frame after preprocessing, as it should be displayed.
    pub frame: Mat,
    pub bbox: Option<BBox>,
    pub vote: Option<String>,
    pub resolution: Option<Resolution>,
    pub readout: Readout,
    pub preview: Option<Mat>,
}

/// Result of a finished capture loop.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub frames: usize,
    pub history: Vec<DetectionRecord>,
}

/// Localizer, matcher and session wired together for one scan session.
pub struct CardScanner {
    config: ScannerConfig,
    localizer: CardLocalizer,
    matcher: FeatureMatcher,
    index: ReferenceIndex,
    session: ScanSession,
}

impl CardScanner {
    /// Build a scanner over an already loaded library.
    pub fn new(config: ScannerConfig, library: &ReferenceLibrary) -> Result<Self> {
        let localizer = CardLocalizer::new(config.localizer.clone());
        let mut matcher = FeatureMatcher::new(config.matcher.clone())?;
        let index = matcher.index(library);
        let session = ScanSession::new(config.session.clone());

        Ok(Self {
            config,
            localizer,
            matcher,
            index,
            session,
        })
    }

    /// Load references from `config.reference_dir` and build a scanner.
    pub fn from_config(config: ScannerConfig) -> Result<Self> {
        let library = ReferenceLoader::new().load_dir(&config.reference_dir);
        if library.is_empty() {
            log::warn!("No reference images in {:?}", config.reference_dir);
        }
        Self::new(config, &library)
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Rotate and crop a raw capture per [`PreprocessConfig`](super::PreprocessConfig).
    pub fn preprocess(&self, frame: &Mat) -> Result<Mat> {
        let rotated = if self.config.preprocess.rotate_clockwise {
            let mut rotated = Mat::default();
            core::rotate(frame, &mut rotated, core::ROTATE_90_CLOCKWISE)
                .context("Frame rotation failed")?;
            rotated
        } else {
            frame.try_clone()?
        };

        ImageUtils::top_fraction(&rotated, self.config.preprocess.keep_top_fraction)
    }

    /// Run one frame through the session. Never fails: any vision error
    /// degrades to "no vote" for this frame.
    pub fn process_frame(
        &mut self,
        raw: &Mat,
        signal: Signal,
        now: Instant,
        prices: &dyn PriceSource,
    ) -> FrameReport {
        let frame = match self.preprocess(raw) {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("Preprocessing failed, using raw frame: {:#}", e);
                raw.try_clone().unwrap_or_default()
            }
        };

        if signal == Signal::StartScan {
            self.session.start(now);
        }

        let mut bbox = None;
        let mut vote = None;
        let mut preview = None;

        if self.session.is_tracking() {
            if let Some(region) = self.localizer.locate(&frame) {
                bbox = Some(region.bbox);

                if let Some(card_match) = self.matcher.match_region(&region.image, &self.index) {
                    log::debug!("detected: {} ({} inliers)", card_match.label, card_match.inliers);
                    self.session.cast_vote(&card_match.label);

                    if self.config.display.show_matches {
                        preview = self.preview(&region.image, &card_match);
                    }
                    vote = Some(card_match.label);
                }
            }
        }

        let resolution = self.session.poll(now, prices);
        let readout = self.session.readout(now);

        FrameReport {
            frame,
            bbox,
            vote,
            resolution,
            readout,
            preview,
        }
    }

    fn preview(&self, region: &Mat, card_match: &CardMatch) -> Option<Mat> {
        let reference = self.index.get(&card_match.label)?;
        render::match_preview(
            region,
            &reference.image,
            card_match,
            self.config.display.match_preview_lines,
        )
        .map_err(|e| log::debug!("Match preview failed: {:#}", e))
        .ok()
    }

    /// Process frames until the source runs dry or a quit signal arrives.
    /// Only a capture failure ends the loop early; input and display errors
    /// are logged per frame. The source is released on every exit path.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        input: &mut dyn SignalSource,
        display: &mut dyn DisplaySink,
        prices: &dyn PriceSource,
        clock: &dyn Clock,
    ) -> Result<SessionSummary> {
        let outcome = self.run_loop(source, input, display, prices, clock);

        if let Err(e) = source.release() {
            log::warn!("{:#}", e);
        }

        outcome
    }

    fn run_loop(
        &mut self,
        source: &mut dyn FrameSource,
        input: &mut dyn SignalSource,
        display: &mut dyn DisplaySink,
        prices: &dyn PriceSource,
        clock: &dyn Clock,
    ) -> Result<SessionSummary> {
        let mut frames = 0;

        while let Some(raw) = source.read_frame()? {
            frames += 1;

            let signal = input.poll().unwrap_or_else(|e| {
                log::debug!("Input poll failed: {:#}", e);
                Signal::None
            });

            let report = self.process_frame(&raw, signal, clock.now(), prices);

            let shown = display.show(&DisplayFrame {
                frame: &report.frame,
                readout: &report.readout,
                bbox: report.bbox,
                preview: report.preview.as_ref(),
                history: self.session.history(),
            });
            if let Err(e) = shown {
                log::warn!("Display failed: {:#}", e);
            }

            if signal == Signal::Quit {
                log::info!("Quit requested after {} frames", frames);
                break;
            }
        }

        Ok(SessionSummary {
            frames,
            history: self.session.history().to_vec(),
        })
    }
}
