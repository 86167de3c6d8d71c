//! DpadMouseHandler: d-pad keys as arrow keys or as a mouse.
//!
//! In arrow-key mode every key is forwarded to the remote as an RFB
//! `KeyEvent`.  In mouse mode the four arrows accelerate the cursor through
//! the [`MouseMover`] and the centre button is the primary mouse button.
//! Keys that are not part of the d-pad are always forwarded.
//!
//! With `rotate_dpad` set, arrows are relabelled by 90° before anything else
//! looks at them, for both key-down and key-up, so a rotated press and its
//! release always name the same key.

use serde::{Deserialize, Serialize};
use tracing::debug;
use touchpad_core::{ButtonMask, DeviceKey};

use super::mouse_mover::MouseMover;
use super::remote_pointer::RemotePointer;

/// Construction-time d-pad behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DpadSettings {
    /// Forward arrows as remote arrow keys instead of moving the mouse.
    pub use_dpad_as_arrows: bool,
    /// Relabel arrows by 90° for devices held sideways.
    pub rotate_dpad: bool,
}

/// Handles d-pad key events.
pub struct DpadMouseHandler {
    pointer: RemotePointer,
    mover: MouseMover,
    settings: DpadSettings,
    mouse_down: bool,
    moving: bool,
}

impl DpadMouseHandler {
    pub fn new(pointer: RemotePointer, mover: MouseMover, settings: DpadSettings) -> Self {
        Self {
            pointer,
            mover,
            settings,
            mouse_down: false,
            moving: false,
        }
    }

    pub fn settings(&self) -> DpadSettings {
        self.settings
    }

    /// Whether a direction is currently held in mouse mode.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Handles a key press.  Returns whether the event was consumed.
    pub fn on_key_down(&mut self, key: DeviceKey) -> bool {
        let key = self.relabel(key);
        if self.settings.use_dpad_as_arrows {
            return self.pointer.send_key(key.keysym(), true);
        }

        match key {
            DeviceKey::DpadCenter => {
                if self.mouse_down {
                    return true;
                }
                self.mouse_down = true;
                self.pointer.stay_put(ButtonMask::PRIMARY)
            }
            DeviceKey::Other(_) => self.pointer.send_key(key.keysym(), true),
            _ => {
                if let Some(impulse) = key.impulse() {
                    if !self.moving {
                        self.moving = true;
                        self.mover.start(impulse);
                        self.pointer
                            .move_by(f32::from(impulse.dx), f32::from(impulse.dy));
                    }
                }
                true
            }
        }
    }

    /// Handles a key release.  Returns whether the event was consumed.
    pub fn on_key_up(&mut self, key: DeviceKey) -> bool {
        let key = self.relabel(key);
        if self.settings.use_dpad_as_arrows {
            return self.pointer.send_key(key.keysym(), false);
        }

        match key {
            DeviceKey::DpadCenter => {
                if !self.mouse_down {
                    return true;
                }
                self.mouse_down = false;
                self.pointer.stay_put(ButtonMask::NONE)
            }
            DeviceKey::Other(_) => self.pointer.send_key(key.keysym(), false),
            _ => {
                self.mover.stop();
                if self.moving {
                    debug!(?key, "d-pad movement ended");
                }
                self.moving = false;
                true
            }
        }
    }

    fn relabel(&self, key: DeviceKey) -> DeviceKey {
        if self.settings.rotate_dpad {
            key.rotated()
        } else {
            key
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
