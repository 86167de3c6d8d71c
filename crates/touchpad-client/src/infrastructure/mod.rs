//! Infrastructure adapters for the touchpad client.
//!
//! Concrete implementations of the application-layer ports plus the
//! file-backed configuration and replay scripts:
//!
//! - **`gesture_detector`** – Portable tap, long-press, scroll and scale
//!   detection from raw touch frames (`GestureSource`).
//! - **`recording`** / **`tracing_sink`** – `RemoteSink`s that record or log
//!   instead of talking to a VNC server.
//! - **`pacing`** – `ClickPacer`s.
//! - **`viewport`** – A standalone zoomable `Viewport`.
//! - **`feedback`** – A log-only `UiFeedback`.
//! - **`config`** – TOML configuration.
//! - **`script`** – JSON replay scripts.

pub mod config;
pub mod feedback;
pub mod gesture_detector;
pub mod pacing;
pub mod recording;
pub mod script;
pub mod tracing_sink;
pub mod viewport;
