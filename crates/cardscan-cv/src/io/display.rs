use crate::render::{self, DisplayFrame};
use crate::scanner::DisplayConfig;
use crate::traits::DisplaySink;
use crate::Result;
use opencv::highgui;

const VIDEO_WINDOW: &str = "Video Output";
const HISTORY_WINDOW: &str = "Detected Cards";
const MATCHES_WINDOW: &str = "Matches";

/// Shows the annotated feed, history and match preview in HighGUI windows.
pub struct HighGuiDisplay {
    config: DisplayConfig,
}

impl HighGuiDisplay {
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }
}

impl DisplaySink for HighGuiDisplay {
    fn show(&mut self, frame: &DisplayFrame) -> Result<()> {
        if !self.config.enabled {
            log::trace!("{} | {}", frame.readout.status, frame.readout.price);
            return Ok(());
        }

        let annotated = render::annotate_frame(frame, self.config.overlay_alpha)?;
        highgui::imshow(VIDEO_WINDOW, &annotated)?;

        let history = render::history_canvas(
            frame.history,
            self.config.history_width,
            self.config.history_height,
        )?;
        highgui::imshow(HISTORY_WINDOW, &history)?;

        if let Some(preview) = frame.preview {
            highgui::imshow(MATCHES_WINDOW, preview)?;
        }

        Ok(())
    }
}

impl Drop for HighGuiDisplay {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close windows: {}", e);
        }
    }
}
