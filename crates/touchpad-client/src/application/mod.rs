//! Application layer use cases for the touchpad client.
//!
//! # What use cases does the client have?
//!
//! - **`translate_touch`** – The per-touch-session state machine.  Receives
//!   every touch and host-mouse event, consults the gesture classifier, and
//!   emits remote pointer events for moves, clicks, drags and scrolls.
//!
//! - **`dpad_mouse`** – Maps d-pad keys to arrow keys or, in mouse mode, to an
//!   accelerating cursor via the `mouse_mover`.
//!
//! - **`mouse_mover`** – The periodic tick that integrates d-pad velocity into
//!   the remote pointer position.
//!
//! - **`remote_pointer`** – The shared, lock-guarded cursor every path above
//!   writes through.
//!
//! - **`ports`** – Traits for the collaborators this layer needs but does not
//!   own (protocol sender, viewport, UI feedback, pacing, gesture source).

pub mod dpad_mouse;
pub mod mouse_mover;
pub mod ports;
pub mod remote_pointer;
pub mod translate_touch;
