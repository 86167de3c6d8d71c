//! In-memory remote sink for tests and dry runs.
//!
//! [`RecordingSink`] implements both [`RemoteSink`] and [`ClickPacer`] and
//! pushes every call into one ordered `Mutex<Vec<RemoteEvent>>`, so a test
//! can assert the exact interleaving of pointer events, key events and click
//! pauses.  Pauses are recorded, never slept.
//!
//! # Usage in tests
//!
//! ```ignore
//! let sink = Arc::new(RecordingSink::new());
//! // ... wire `sink` in as both the RemoteSink and the ClickPacer ...
//! assert_eq!(sink.take(), vec![RemoteEvent::Pointer { x: 5, y: 5, mask: ButtonMask::PRIMARY }]);
//! ```
//!
//! # `should_fail` flag
//!
//! With `should_fail = true` every send is still recorded but reported as
//! rejected, which exercises the warn-and-continue path of callers.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use touchpad_core::ButtonMask;

use crate::application::ports::{ClickPacer, RemoteSink};

/// One call observed by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemoteEvent {
    Pointer { x: i32, y: i32, mask: ButtonMask },
    Key { keysym: u32, down: bool },
    Pause { ms: u64 },
}

/// Records all remote traffic without sending anything.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<RemoteEvent>>,
    /// When `true`, sends are recorded but return `false`.
    pub should_fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every send.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RemoteEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of everything recorded so far.
    pub fn events(&self) -> Vec<RemoteEvent> {
        self.lock().clone()
    }

    /// Drains the record.
    pub fn take(&self) -> Vec<RemoteEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Only the pointer events, as `(x, y, mask)`.
    pub fn pointer_events(&self) -> Vec<(i32, i32, ButtonMask)> {
        self.lock()
            .iter()
            .filter_map(|e| match *e {
                RemoteEvent::Pointer { x, y, mask } => Some((x, y, mask)),
                _ => None,
            })
            .collect()
    }
}

impl RemoteSink for RecordingSink {
    fn send_pointer_event(&self, x: i32, y: i32, mask: ButtonMask) -> bool {
        self.lock().push(RemoteEvent::Pointer { x, y, mask });
        !self.should_fail
    }

    fn send_key_event(&self, keysym: u32, down: bool) -> bool {
        self.lock().push(RemoteEvent::Key { keysym, down });
        !self.should_fail
    }
}

impl ClickPacer for RecordingSink {
    fn pause(&self, duration: Duration) {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.lock().push(RemoteEvent::Pause { ms });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
