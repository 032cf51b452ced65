//! Scan loop: localization, matching and vote aggregation per frame

pub mod config;
pub mod pipeline;

pub use config::{DisplayConfig, PreprocessConfig, ScannerConfig};
pub use pipeline::{CardScanner, FrameReport, SessionSummary};
