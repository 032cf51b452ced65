use crate::traits::SignalSource;
use crate::Result;
use opencv::highgui;

/// Discrete user command sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    None,
    StartScan,
    Quit,
}

impl Signal {
    /// Map a HighGUI key code (`-1` when nothing was pressed).
    pub fn from_key(key: i32) -> Self {
        if key < 0 {
            return Signal::None;
        }
        match (key & 0xFF) as u8 {
            b's' => Signal::StartScan,
            b'q' => Signal::Quit,
            _ => Signal::None,
        }
    }
}

/// Polls HighGUI for a key press; also pumps the window event loop.
pub struct KeyboardInput {
    delay_ms: i32,
}

impl KeyboardInput {
    pub fn new(delay_ms: i32) -> Self {
        Self { delay_ms }
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SignalSource for KeyboardInput {
    fn poll(&mut self) -> Result<Signal> {
        Ok(Signal::from_key(highgui::wait_key(self.delay_ms)?))
    }
}
