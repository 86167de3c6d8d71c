//! # touchpad-core
//!
//! Shared library for the VNC touchpad input core containing the gesture
//! classifier, the pointer response curve, the d-pad velocity integrator,
//! remote pointer state, and the d-pad key tables.
//!
//! It has zero dependencies on OS APIs, UI frameworks, timers, or network
//! sockets; the `touchpad-client` crate wires it to those.
//!
//! # Architecture overview (for beginners)
//!
//! A touchscreen has no mouse buttons and no scroll wheel, yet a remote
//! desktop expects both.  The client therefore has to *guess* what the user
//! meant from finger positions alone: one finger sliding is a pointer move,
//! two fingers sliding together is a scroll, two fingers spreading apart is a
//! zoom, a second finger tapped briefly is a right click, and so on.
//!
//! This crate (`touchpad-core`) holds the pieces of that guessing that are
//! pure arithmetic and state:
//!
//! - **`domain`** – Touch event types, the shared remote pointer state and its
//!   RFB button mask, the two-finger [`GestureClassifier`], the
//!   [`fine_ctrl_scale`] response curve, and the [`VelocityIntegrator`] used to
//!   accelerate the pointer while a d-pad key is held.
//!
//! - **`keymap`** – The d-pad key set, its 90° rotation relabel, and the X11
//!   KeySyms that the RFB `KeyEvent` message carries for arrow keys.

pub mod domain;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `touchpad_core::GestureClassifier` instead of the full module path.
pub use domain::gesture::{
    GestureClassifier, GestureOutcome, GesturePhase, ScaleSample, SwipeDirection,
};
pub use domain::pointer::{ButtonMask, PointerError, RemotePointerState};
pub use domain::scaling::fine_ctrl_scale;
pub use domain::touch::{EventSource, HostButtons, Point, TouchAction, TouchEvent, TouchPointer};
pub use domain::velocity::{Impulse, Velocity, VelocityIntegrator};
pub use keymap::dpad::DeviceKey;
