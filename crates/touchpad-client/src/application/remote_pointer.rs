//! The shared remote cursor.
//!
//! Touch callbacks and the d-pad mouse mover tick both move the remote
//! cursor, so the [`RemotePointerState`] lives behind a mutex and every
//! update is sent to the [`RemoteSink`] while the lock is held.  That keeps
//! the recorded state and the order of events on the wire in agreement.
//!
//! A poisoned lock is recovered rather than propagated: the state is three
//! plain fields and is valid after any partial update.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{trace, warn};
use touchpad_core::{ButtonMask, RemotePointerState};

use super::ports::RemoteSink;

/// Cloneable handle to the remote cursor and the sink it reports to.
#[derive(Clone)]
pub struct RemotePointer {
    state: Arc<Mutex<RemotePointerState>>,
    sink: Arc<dyn RemoteSink>,
}

impl RemotePointer {
    pub fn new(state: RemotePointerState, sink: Arc<dyn RemoteSink>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            sink,
        }
    }

    fn lock(&self) -> MutexGuard<'_, RemotePointerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> RemotePointerState {
        self.lock().clone()
    }

    pub fn position(&self) -> (i32, i32) {
        self.lock().position()
    }

    pub fn mask(&self) -> ButtonMask {
        self.lock().mask()
    }

    /// Moves to the remote position `(x, y)` with `mask` held and reports it.
    pub fn move_to(&self, x: f32, y: f32, mask: ButtonMask) -> bool {
        let mut state = self.lock();
        let (x, y) = state.apply(x, y, mask);
        self.emit(x, y, mask)
    }

    /// Moves by `(dx, dy)` keeping the currently held buttons.
    pub fn move_by(&self, dx: f32, dy: f32) -> bool {
        let mut state = self.lock();
        let mask = state.mask();
        let (x0, y0) = state.position();
        let (x, y) = state.apply(x0 as f32 + dx, y0 as f32 + dy, mask);
        self.emit(x, y, mask)
    }

    /// Reports a button transition without moving the cursor.
    pub fn stay_put(&self, mask: ButtonMask) -> bool {
        let mut state = self.lock();
        let (x, y) = state.position();
        state.apply(x as f32, y as f32, mask);
        self.emit(x, y, mask)
    }

    /// Moves the recorded cursor without reporting anything.
    pub fn set_position(&self, x: i32, y: i32) {
        self.lock().set_position(x, y);
    }

    /// Sends an RFB `KeyEvent`.
    pub fn send_key(&self, keysym: u32, down: bool) -> bool {
        // Taken so key events interleave with pointer events in call order.
        let _state = self.lock();
        trace!(keysym, down, "key event");
        let accepted = self.sink.send_key_event(keysym, down);
        if !accepted {
            warn!(keysym, down, "remote sink rejected key event");
        }
        accepted
    }

    fn emit(&self, x: i32, y: i32, mask: ButtonMask) -> bool {
        trace!(x, y, mask = mask.0, "pointer event");
        let accepted = self.sink.send_pointer_event(x, y, mask);
        if !accepted {
            warn!(x, y, mask = mask.0, "remote sink rejected pointer event");
        }
        accepted
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
