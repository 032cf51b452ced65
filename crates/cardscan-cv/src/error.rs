use thiserror::Error;

/// Failures that end a scan session rather than a single frame.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("could not open video capture device {index}")]
    DeviceUnavailable { index: i32 },
}
