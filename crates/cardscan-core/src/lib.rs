//! Card scan session logic: vote aggregation, detection history and pricing.
//!
//! Nothing in this crate touches pixels; the vision side lives in
//! `cardscan-cv` and feeds votes into a [`ScanSession`].

pub mod clock;
pub mod config;
pub mod history;
pub mod pricing;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use config::SessionConfig;
pub use history::{DetectionHistory, DetectionRecord};
pub use pricing::{format_currency, PriceBook, PriceSource};
pub use session::{Readout, Resolution, ScanSession};
