//! A remote sink that logs instead of sending.
//!
//! Used by the `touchpad-replay` tool: every pointer and key event the
//! translator emits becomes one `info!` line, so a replayed script shows the
//! exact RFB traffic a real session would have produced.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;
use touchpad_core::ButtonMask;

use crate::application::ports::RemoteSink;

/// Logs every event and counts them.
#[derive(Debug, Default)]
pub struct TracingSink {
    sent: AtomicU64,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events logged so far.
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

impl RemoteSink for TracingSink {
    fn send_pointer_event(&self, x: i32, y: i32, mask: ButtonMask) -> bool {
        let seq = self.sent.fetch_add(1, Ordering::Relaxed);
        info!(seq, x, y, mask = mask.0, "PointerEvent");
        true
    }

    fn send_key_event(&self, keysym: u32, down: bool) -> bool {
        let seq = self.sent.fetch_add(1, Ordering::Relaxed);
        info!(seq, keysym, down, "KeyEvent");
        true
    }
}
