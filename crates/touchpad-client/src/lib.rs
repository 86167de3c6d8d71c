//! touchpad-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does touchpad-client do? (for beginners)
//!
//! A VNC viewer on a phone or tablet shows the remote desktop, but the user
//! only has fingers and perhaps a d-pad.  This crate turns those into what a
//! VNC server understands: RFB `PointerEvent`s (absolute position plus a
//! button mask) and `KeyEvent`s (X11 KeySyms).
//!
//! The touchscreen behaves like a laptop touchpad:
//!
//! 1. One finger sliding moves the remote cursor (with a fine-control curve).
//! 2. A tap clicks, a double tap double-clicks, and a long press starts a drag.
//! 3. A second finger tapped while the first is down right-clicks; a third
//!    finger middle-clicks.
//! 4. Two fingers sliding together scroll; two fingers spreading zoom the view.
//!
//! A d-pad either sends arrow keys or moves the cursor with acceleration.

/// Application layer: the translator, the d-pad emulator, and their ports.
pub mod application;

/// Infrastructure layer: gesture detection, sinks, pacing, configuration.
pub mod infrastructure;
