//! UI feedback for hosts without a screen.
//!
//! The replay tool has no zoom indicator and no vibration motor, so
//! [`LogFeedback`] records the requests as `debug!` lines and counts them.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

use crate::application::ports::UiFeedback;

#[derive(Debug, Default)]
pub struct LogFeedback {
    indicator_shows: AtomicU32,
    haptics: AtomicU32,
}

impl LogFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the zoom indicator was asked to show.
    pub fn indicator_shows(&self) -> u32 {
        self.indicator_shows.load(Ordering::Relaxed)
    }

    pub fn haptics(&self) -> u32 {
        self.haptics.load(Ordering::Relaxed)
    }
}

impl UiFeedback for LogFeedback {
    fn show_zoom_indicator(&self, visible: bool) {
        if visible {
            self.indicator_shows.fetch_add(1, Ordering::Relaxed);
        }
        debug!(visible, "zoom indicator");
    }

    fn perform_long_press_haptic(&self) {
        self.haptics.fetch_add(1, Ordering::Relaxed);
        debug!("long-press haptic");
    }
}
