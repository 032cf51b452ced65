//! Session wiring: camera, keyboard, windows and the local price book

use anyhow::{Context, Result};
use cardscan_core::{PriceBook, SystemClock};
use cardscan_cv::{
    scanner::SessionSummary, CameraSource, CardScanner, HighGuiDisplay, KeyboardInput,
    ScannerConfig,
};

/// `info` by default, `debug` when verbose; `RUST_LOG` overrides either.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Open the configured camera and run scan windows until quit or the feed ends.
pub fn run(config: ScannerConfig) -> Result<SessionSummary> {
    let prices = PriceBook::new(&config.price_dir);
    let mut camera = CameraSource::open(config.camera_index)
        .with_context(|| format!("Camera {} is not available", config.camera_index))?;
    let mut keyboard = KeyboardInput::default();
    let mut display = HighGuiDisplay::new(config.display.clone());

    let reference_dir = config.reference_dir.clone();
    let mut scanner = CardScanner::from_config(config)
        .with_context(|| format!("Failed to prepare references from {:?}", reference_dir))?;
    log::info!(
        "Ready with {} references. Press 's' to scan, 'q' to quit.",
        scanner.index().len()
    );

    scanner.run(&mut camera, &mut keyboard, &mut display, &prices, &SystemClock)
}
