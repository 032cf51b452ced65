use cardscan_core::{Clock, DetectionRecord, PriceBook, Readout};
use cardscan_cv::render::DisplayFrame;
use cardscan_cv::scanner::PreprocessConfig;
use cardscan_cv::traits::{DisplaySink, FrameSource, SignalSource};
use cardscan_cv::utils::ImageUtils;
use cardscan_cv::{CardScanner, Result, ScannerConfig, Signal};
use opencv::core::{Mat, Point};
use std::cell::Cell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

#[path = "../crates/cardscan-cv/tests/common/mod.rs"]
mod common;

fn write_reference(dir: &Path, label: &str, seed: u64) -> Result<()> {
    let card = common::card_image(seed)?;
    ImageUtils::save_image(&card, dir.join(format!("{}.jpg", label)))
}

fn camera_frame(seed: u64) -> Result<Mat> {
    common::frame_with_card(seed, Point::new(200, 90))
}

struct ScriptedCamera {
    frames: VecDeque<Mat>,
    released: bool,
}

impl FrameSource for ScriptedCamera {
    fn read_frame(&mut self) -> Result<Option<Mat>> {
        Ok(self.frames.pop_front())
    }

    fn release(&mut self) -> Result<()> {
        self.released = true;
        Ok(())
    }
}

struct ScriptedKeys(VecDeque<Signal>);

impl SignalSource for ScriptedKeys {
    fn poll(&mut self) -> Result<Signal> {
        Ok(self.0.pop_front().unwrap_or(Signal::None))
    }
}

#[derive(Default)]
struct RecordingDisplay {
    readouts: Vec<Readout>,
    boxes: usize,
}

impl DisplaySink for RecordingDisplay {
    fn show(&mut self, frame: &DisplayFrame) -> Result<()> {
        self.readouts.push(frame.readout.clone());
        if frame.bbox.is_some() {
            self.boxes += 1;
        }
        Ok(())
    }
}

struct BrokenDisplay {
    attempts: usize,
}

impl DisplaySink for BrokenDisplay {
    fn show(&mut self, _frame: &DisplayFrame) -> Result<()> {
        self.attempts += 1;
        anyhow::bail!("window closed")
    }
}

/// Advances by a fixed step on every reading.
struct SteppedClock {
    start: Instant,
    step: Duration,
    ticks: Cell<u32>,
}

impl Clock for SteppedClock {
    fn now(&self) -> Instant {
        let tick = self.ticks.get();
        self.ticks.set(tick + 1);
        self.start + self.step * tick
    }
}

fn headless_config(sources: &Path) -> ScannerConfig {
    let mut config = ScannerConfig::headless();
    config.reference_dir = sources.to_path_buf();
    config.price_dir = sources.to_path_buf();
    config.preprocess = PreprocessConfig::passthrough();
    config
}

#[test]
fn test_window_of_matching_frames_records_card_and_price() -> Result<()> {
    let sources = tempfile::tempdir()?;
    write_reference(sources.path(), "OP10-001", 1)?;
    write_reference(sources.path(), "OP10-002", 2)?;
    fs::write(sources.path().join("OP10-001.txt"), "$1.23")?;
    fs::write(sources.path().join("OP10-002.txt"), "$4.56")?;

    let config = headless_config(sources.path());
    let prices = PriceBook::new(&config.price_dir);
    let mut scanner = CardScanner::from_config(config)?;
    assert_eq!(scanner.index().len(), 2);

    let mut camera = ScriptedCamera {
        frames: (0..3).map(|_| camera_frame(1)).collect::<Result<_>>()?,
        released: false,
    };
    let mut keys = ScriptedKeys(VecDeque::from([Signal::StartScan]));
    let mut display = RecordingDisplay::default();
    let clock = SteppedClock {
        start: Instant::now(),
        step: Duration::from_millis(2500),
        ticks: Cell::new(0),
    };

    let summary = scanner.run(&mut camera, &mut keys, &mut display, &prices, &clock)?;

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.history, vec![DetectionRecord::new("OP10-001", "$1.23")]);
    assert!(camera.released);

    assert_eq!(display.readouts.len(), 3);
    assert_eq!(display.boxes, 3);
    assert_eq!(display.readouts[0].price, "...");
    let last = display.readouts.last().unwrap();
    assert_eq!(last.status, "Detected: OP10-001 (Royal Blood)");
    assert_eq!(last.price, "$1.23");
    Ok(())
}

#[test]
fn test_quit_stops_loop_and_releases_camera() -> Result<()> {
    let sources = tempfile::tempdir()?;
    write_reference(sources.path(), "OP10-001", 1)?;

    let config = headless_config(sources.path());
    let prices = PriceBook::new(&config.price_dir);
    let mut scanner = CardScanner::from_config(config)?;

    let mut camera = ScriptedCamera {
        frames: (0..5).map(|_| camera_frame(1)).collect::<Result<_>>()?,
        released: false,
    };
    let mut keys = ScriptedKeys(VecDeque::from([Signal::StartScan, Signal::Quit]));
    let mut display = RecordingDisplay::default();
    let clock = SteppedClock {
        start: Instant::now(),
        step: Duration::from_millis(100),
        ticks: Cell::new(0),
    };

    let summary = scanner.run(&mut camera, &mut keys, &mut display, &prices, &clock)?;

    assert_eq!(summary.frames, 2);
    assert!(summary.history.is_empty());
    assert_eq!(camera.frames.len(), 3);
    assert!(camera.released);
    Ok(())
}

#[test]
fn test_missing_price_and_empty_library() -> Result<()> {
    let sources = tempfile::tempdir()?;
    write_reference(sources.path(), "ST01-004", 4)?;

    let config = headless_config(sources.path());
    let prices = PriceBook::new(&config.price_dir);
    let mut scanner = CardScanner::from_config(config)?;

    let t0 = Instant::now();
    let frame = camera_frame(4)?;
    scanner.process_frame(&frame, Signal::StartScan, t0, &prices);
    let report = scanner.process_frame(&frame, Signal::None, t0 + Duration::from_secs(5), &prices);

    let winner = report.resolution.and_then(|r| r.winner).expect("card resolved");
    assert_eq!(winner, DetectionRecord::new("ST01-004", "Price not available"));
    assert_eq!(report.readout.status, "Detected: ST01-004");

    let empty = tempfile::tempdir()?;
    let mut blind = CardScanner::from_config(headless_config(empty.path()))?;
    blind.process_frame(&frame, Signal::StartScan, t0, &prices);
    let report = blind.process_frame(&frame, Signal::None, t0 + Duration::from_secs(5), &prices);
    assert_eq!(report.resolution.map(|r| r.winner), Some(None));
    Ok(())
}

#[test]
fn test_display_errors_do_not_end_session() -> Result<()> {
    let sources = tempfile::tempdir()?;
    write_reference(sources.path(), "OP10-001", 1)?;
    fs::write(sources.path().join("OP10-001.txt"), "$1.23")?;

    let config = headless_config(sources.path());
    let prices = PriceBook::new(&config.price_dir);
    let mut scanner = CardScanner::from_config(config)?;

    let mut camera = ScriptedCamera {
        frames: (0..3).map(|_| camera_frame(1)).collect::<Result<_>>()?,
        released: false,
    };
    let mut keys = ScriptedKeys(VecDeque::from([Signal::StartScan]));
    let mut display = BrokenDisplay { attempts: 0 };
    let clock = SteppedClock {
        start: Instant::now(),
        step: Duration::from_millis(2500),
        ticks: Cell::new(0),
    };

    let summary = scanner.run(&mut camera, &mut keys, &mut display, &prices, &clock)?;

    assert_eq!(summary.frames, 3);
    assert_eq!(display.attempts, 3);
    assert_eq!(summary.history, vec![DetectionRecord::new("OP10-001", "$1.23")]);
    assert!(camera.released);
    Ok(())
}
