//! Scanner configuration

use crate::detection::LocalizerConfig;
use crate::matching::MatcherConfig;
use crate::Result;
use anyhow::Context;
use cardscan_core::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub camera_index: i32,
    pub reference_dir: PathBuf,
    pub price_dir: PathBuf,
    /// Log at debug level, including every per-frame vote.
    pub verbose: bool,
    pub preprocess: PreprocessConfig,
    pub localizer: LocalizerConfig,
    pub matcher: MatcherConfig,
    pub session: SessionConfig,
    pub display: DisplayConfig,
}

/// Frame orientation fix-ups applied before localization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Camera is mounted sideways.
    pub rotate_clockwise: bool,
    /// Rows kept from the top of the (rotated) frame.
    pub keep_top_fraction: f64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Open HighGUI windows; when off, readouts only go to the trace log.
    pub enabled: bool,
    pub show_matches: bool,
    pub match_preview_lines: usize,
    pub history_width: i32,
    pub history_height: i32,
    pub overlay_alpha: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            reference_dir: "sources".into(),
            price_dir: "sources".into(),
            verbose: false,
            preprocess: PreprocessConfig::default(),
            localizer: LocalizerConfig::default(),
            matcher: MatcherConfig::default(),
            session: SessionConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            rotate_clockwise: true,
            keep_top_fraction: 0.8,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_matches: true,
            match_preview_lines: 10,
            history_width: 400,
            history_height: 500,
            overlay_alpha: 0.3,
        }
    }
}

impl PreprocessConfig {
    /// Leave frames exactly as captured.
    pub fn passthrough() -> Self {
        Self {
            rotate_clockwise: false,
            keep_top_fraction: 1.0,
        }
    }
}

impl ScannerConfig {
    /// Configuration for running without windows (no preview rendering).
    pub fn headless() -> Self {
        Self {
            display: DisplayConfig {
                enabled: false,
                show_matches: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {:?}", path.as_ref()))
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write config: {:?}", path.as_ref()))?;

        Ok(())
    }
}
