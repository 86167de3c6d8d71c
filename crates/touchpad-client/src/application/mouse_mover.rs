//! Periodic pointer motion while a d-pad direction is held.
//!
//! [`MouseMover::start`] spawns a tick task on the Tokio runtime.  Every tick
//! advances a [`VelocityIntegrator`] by the real elapsed time and moves the
//! remote pointer by the resulting velocity, keeping whatever buttons are
//! held so d-pad centre + direction drags.
//!
//! # Stopping without a stray tick
//!
//! Each run owns its integrator in a fresh `Mutex<Option<_>>` shared only
//! with that run's task.  A tick holds the lock for the whole step-and-send,
//! and [`MouseMover::stop`] clears the option under the same lock before
//! aborting the task.  Once `stop()` returns, a tick of that run is either
//! fully sent already or will find `None` and exit.  A later `start()` never
//! refills the slot an old task can still see.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;
use touchpad_core::{Impulse, VelocityIntegrator};

use super::remote_pointer::RemotePointer;

/// Default tick period.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

type SharedIntegrator = Arc<Mutex<Option<VelocityIntegrator>>>;

/// Drives the remote pointer from a held directional impulse.
pub struct MouseMover {
    pointer: RemotePointer,
    tick: Duration,
    runtime: Handle,
    integrator: SharedIntegrator,
    task: Option<JoinHandle<()>>,
}

impl MouseMover {
    /// Creates an idle mover that will spawn its tick task on `runtime`.
    pub fn new(pointer: RemotePointer, tick: Duration, runtime: Handle) -> Self {
        Self {
            pointer,
            tick: tick.max(Duration::from_millis(1)),
            runtime,
            integrator: Arc::new(Mutex::new(None)),
            task: None,
        }
    }

    /// Starts accelerating along `impulse` from rest.  A running mover is
    /// stopped first.
    pub fn start(&mut self, impulse: Impulse) {
        self.stop();
        self.integrator = Arc::new(Mutex::new(Some(VelocityIntegrator::new(impulse))));
        debug!(dx = impulse.dx, dy = impulse.dy, "mouse mover started");

        let shared = Arc::clone(&self.integrator);
        let pointer = self.pointer.clone();
        let tick = self.tick;
        self.task = Some(self.runtime.spawn(async move {
            let mut last = Instant::now();
            let mut ticks = interval_at(last + tick, tick);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                let now = ticks.tick().await;
                let elapsed_ms = u64::try_from(now.duration_since(last).as_millis()).unwrap_or(u64::MAX);
                last = now;
                if !step(&shared, &pointer, elapsed_ms) {
                    break;
                }
            }
        }));
    }

    /// Zeroes the velocity and deschedules the tick.  Idempotent.
    pub fn stop(&mut self) {
        let was_running = self.lock_integrator().take().is_some();
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if was_running {
            debug!("mouse mover stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock_integrator().is_some()
    }

    fn lock_integrator(&self) -> std::sync::MutexGuard<'_, Option<VelocityIntegrator>> {
        self.integrator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for MouseMover {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One tick.  Returns `false` once the mover has been stopped.
fn step(shared: &SharedIntegrator, pointer: &RemotePointer, elapsed_ms: u64) -> bool {
    let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
    match guard.as_mut() {
        Some(integrator) => {
            let velocity = integrator.step(elapsed_ms);
            pointer.move_by(velocity.x, velocity.y);
            true
        }
        None => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
