//! Click pacers.
//!
//! Translator callbacks run on the UI event thread and pace synthesized
//! clicks by blocking it briefly.  The pause is only ever taken between the
//! transitions of one click (tens of milliseconds).
//!
//! When the caller is a Tokio worker, [`TokioBlockingPacer`] marks the
//! pause as a blocking section so the worker's other tasks (the d-pad mouse
//! mover's ticks among them) move to another thread instead of stalling.

use std::time::Duration;

use tokio::runtime::{Handle, RuntimeFlavor};

use crate::application::ports::ClickPacer;

/// Blocks the calling thread for the requested duration, inside
/// [`tokio::task::block_in_place`] when running on a multi-threaded runtime.
///
/// A current-thread runtime cannot hand its tasks off; there the pause is a
/// plain sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioBlockingPacer;

impl ClickPacer for TokioBlockingPacer {
    fn pause(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let multi_thread = Handle::try_current()
            .map(|handle| handle.runtime_flavor() == RuntimeFlavor::MultiThread)
            .unwrap_or(false);
        if multi_thread {
            tokio::task::block_in_place(|| std::thread::sleep(duration));
        } else {
            std::thread::sleep(duration);
        }
    }
}

/// Never pauses.  For hosts that already space events on the wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

impl ClickPacer for NoPacer {
    fn pause(&self, _duration: Duration) {}
}
