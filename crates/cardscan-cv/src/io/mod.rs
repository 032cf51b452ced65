//! Camera, keyboard and window adapters for the scan loop

pub mod capture;
pub mod display;
pub mod input;

pub use capture::CameraSource;
pub use display::HighGuiDisplay;
pub use input::{KeyboardInput, Signal};
