//! Localizer configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizerConfig {
    /// Gaussian kernel side (odd).
    pub blur_kernel: i32,
    /// Gaussian sigma; 0 derives it from the kernel size.
    pub blur_sigma: f64,
    pub canny_low: f64,
    pub canny_high: f64,
    /// Contours enclosing fewer pixels than this are ignored.
    pub min_contour_area: f64,
    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub approx_epsilon_ratio: f64,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            blur_sigma: 0.0,
            canny_low: 50.0,
            canny_high: 150.0,
            min_contour_area: 1000.0,
            approx_epsilon_ratio: 0.02,
        }
    }
}
