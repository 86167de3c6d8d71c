//! Key tables for the directional pad.
//!
//! The RFB `KeyEvent` message identifies keys by X11 KeySym, so every key the
//! client forwards is expressed as a KeySym at this boundary.

pub mod dpad;

pub use dpad::DeviceKey;
