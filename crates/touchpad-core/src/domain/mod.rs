//! Domain entities for the touchpad input core.
//!
//! This module contains pure input-translation logic with no infrastructure
//! dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code has no imports from OS APIs,
//! timers, network libraries, or UI frameworks, so every rule in here can be
//! tested by feeding numbers in and checking numbers out.
//!
//! Here the domain is the set of rules that decide what a finger movement
//! *means*: whether two fingers are swiping or pinching, how far a small
//! drag should move the remote cursor, and how fast a held d-pad key should
//! accelerate it.

/// Two-finger swipe / pinch classification.
pub mod gesture;

/// Remote cursor position and RFB button mask.
pub mod pointer;

/// Non-linear screen-to-remote movement curve.
pub mod scaling;

/// Platform-neutral touch and host-mouse event types.
pub mod touch;

/// Accelerating velocity for d-pad pointer movement.
pub mod velocity;
