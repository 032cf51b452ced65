use crate::error::ScanError;
use crate::traits::FrameSource;
use crate::Result;
use anyhow::Context;
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};

/// Exclusively owned camera; released explicitly or on drop.
pub struct CameraSource {
    index: i32,
    capture: VideoCapture,
    released: bool,
}

impl CameraSource {
    pub fn open(index: i32) -> Result<Self> {
        let capture = VideoCapture::new(index, videoio::CAP_ANY)
            .with_context(|| format!("Failed to create capture for device {}", index))?;

        if !capture.is_opened()? {
            return Err(ScanError::DeviceUnavailable { index }.into());
        }

        log::info!("Opened capture device {}", index);
        Ok(Self {
            index,
            capture,
            released: false,
        })
    }
}

impl FrameSource for CameraSource {
    fn read_frame(&mut self) -> Result<Option<Mat>> {
        if self.released {
            return Ok(None);
        }

        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }

    fn release(&mut self) -> Result<()> {
        if !self.released {
            self.released = true;
            self.capture
                .release()
                .with_context(|| format!("Failed to release capture device {}", self.index))?;
            log::info!("Released capture device {}", self.index);
        }
        Ok(())
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("{:#}", e);
        }
    }
}
