//! Card localization

pub mod config;
pub mod localizer;

pub use config::LocalizerConfig;
pub use localizer::{CardLocalizer, DetectedRegion};
