//! Observation-window state machine
//!
//! A scan is an explicit start signal followed by a fixed-duration window in
//! which every frame may cast one vote. When the window expires the label with
//! the most votes is resolved, priced, and appended to the history; the
//! session then returns to idle.

pub mod tally;
pub mod window;

pub use tally::VoteTally;
pub use window::ObservationWindow;

use crate::config::SessionConfig;
use crate::history::{DetectionHistory, DetectionRecord};
use crate::pricing::PriceSource;
use std::time::Instant;

/// Where the session currently is. `Resolved` is transient and surfaces only
/// as the [`Resolution`] returned from [`ScanSession::poll`].
#[derive(Debug, Clone)]
enum SessionState {
    Idle,
    Tracking(ObservationWindow),
}

/// Outcome of a closed window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub winner: Option<DetectionRecord>,
    pub votes: u32,
}

/// Text pair shown to the user for the current frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub status: String,
    pub price: String,
}

impl Readout {
    fn new(status: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            price: price.into(),
        }
    }
}

pub struct ScanSession {
    config: SessionConfig,
    state: SessionState,
    history: DetectionHistory,
    last_readout: Readout,
}

impl ScanSession {
    pub fn new(config: SessionConfig) -> Self {
        let history = DetectionHistory::new(config.history_capacity);
        let last_readout = Readout::new(config.idle_prompt.clone(), "");

        Self {
            config,
            state: SessionState::Idle,
            history,
            last_readout,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, SessionState::Tracking(_))
    }

    pub fn history(&self) -> &DetectionHistory {
        &self.history
    }

    /// Open a new window at `now`. An already active window is discarded.
    pub fn start(&mut self, now: Instant) {
        if self.is_tracking() {
            log::debug!("scan restarted, discarding active window");
        }
        log::info!("scan started ({:.1}s window)", self.config.window.as_secs_f64());

        self.state = SessionState::Tracking(ObservationWindow::open(now, self.config.window));
    }

    /// Count a vote for `label`. Ignored (returns false) while idle.
    pub fn cast_vote(&mut self, label: &str) -> bool {
        match &mut self.state {
            SessionState::Tracking(window) => {
                window.vote(label);
                true
            }
            SessionState::Idle => false,
        }
    }

    /// Close the window if it has expired at `now`.
    ///
    /// The winner (if any) is priced through `prices` and appended to the
    /// history before the session returns to idle.
    pub fn poll(&mut self, now: Instant, prices: &dyn PriceSource) -> Option<Resolution> {
        let expired = match &self.state {
            SessionState::Tracking(window) => window.is_expired(now),
            SessionState::Idle => false,
        };
        if !expired {
            return None;
        }

        let SessionState::Tracking(window) = std::mem::replace(&mut self.state, SessionState::Idle)
        else {
            return None;
        };

        let tally = window.tally();
        let votes = tally.total_votes();
        let winner = tally.winner().map(|(label, count)| {
            log::info!("window closed: {} with {}/{} votes", label, count, votes);
            DetectionRecord::new(label, prices.price_for(label))
        });

        match &winner {
            Some(record) => {
                let status = match self.config.set_name_for(&record.label) {
                    Some(set) => format!("Detected: {} ({})", record.label, set),
                    None => format!("Detected: {}", record.label),
                };
                self.last_readout = Readout::new(status, record.price.clone());
                self.history.push(record.clone());
            }
            None => {
                log::info!("window closed with no votes");
                self.last_readout = Readout::new(
                    self.config.no_match_text.clone(),
                    self.config.no_match_price.clone(),
                );
            }
        }

        Some(Resolution { winner, votes })
    }

    /// Status and price text for a frame captured at `now`.
    pub fn readout(&self, now: Instant) -> Readout {
        match &self.state {
            SessionState::Tracking(window) => Readout::new(
                format!("Loading... {:.1}s", window.remaining(now).as_secs_f64()),
                "...",
            ),
            SessionState::Idle => self.last_readout.clone(),
        }
    }
}
