//! Card Scanner Computer Vision Library
//!
//! Locates a card in camera frames, identifies it against a reference library
//! with ORB keypoints and homography verification, and feeds the per-frame
//! votes into a `cardscan_core` session.

pub mod bbox;
pub mod detection;
pub mod error;
pub mod io;
pub mod matching;
pub mod reference;
pub mod render;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use bbox::BBox;
pub use detection::{CardLocalizer, DetectedRegion, LocalizerConfig};
pub use error::ScanError;
pub use io::{CameraSource, HighGuiDisplay, KeyboardInput, Signal};
pub use matching::{CardMatch, FeatureMatcher, MatcherConfig, ReferenceIndex};
pub use reference::{ReferenceImage, ReferenceLibrary, ReferenceLoader};
pub use scanner::{CardScanner, ScannerConfig};

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Seams between the scan loop and the outside world
pub mod traits {
    use super::*;
    use crate::render::DisplayFrame;
    use opencv::core::Mat;

    /// Blocking frame supplier, e.g. a camera.
    pub trait FrameSource {
        /// Next frame, or `None` once the source has nothing more to give.
        fn read_frame(&mut self) -> Result<Option<Mat>>;
        fn release(&mut self) -> Result<()>;
    }

    /// Per-frame, non-queued user command poll.
    pub trait SignalSource {
        fn poll(&mut self) -> Result<Signal>;
    }

    /// Consumer of rendered frame state.
    pub trait DisplaySink {
        fn show(&mut self, frame: &DisplayFrame) -> Result<()>;
    }
}
