//! Directional-pad keys, their rotation relabel, and their X11 KeySyms.
//!
//! # D-pads and rotated devices (for beginners)
//!
//! Many tablets, TV remotes and game controllers have a five-way directional
//! pad: four arrows and a centre "select" button.  When the device is held
//! sideways the arrows no longer point where the user expects, so the client
//! can *rotate* the pad by 90°, relabelling each arrow before it is used:
//!
//! | Pressed | Treated as |
//! |---------|------------|
//! | Left    | Up         |
//! | Right   | Down       |
//! | Up      | Right      |
//! | Down    | Left       |
//!
//! # KeySyms
//!
//! Values come from X11/keysymdef.h:
//!
//! | KeySym name | Value  |
//! |-------------|--------|
//! | `XK_Left`   | 0xFF51 |
//! | `XK_Up`     | 0xFF52 |
//! | `XK_Right`  | 0xFF53 |
//! | `XK_Down`   | 0xFF54 |
//! | `XK_Return` | 0xFF0D |

use serde::{Deserialize, Serialize};

use crate::domain::velocity::Impulse;

pub const XK_LEFT: u32 = 0xFF51;
pub const XK_UP: u32 = 0xFF52;
pub const XK_RIGHT: u32 = 0xFF53;
pub const XK_DOWN: u32 = 0xFF54;
pub const XK_RETURN: u32 = 0xFF0D;

/// A key reported by the local device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKey {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    DpadCenter,
    /// Any other key, already translated to an X11 KeySym.
    Other(u32),
}

impl DeviceKey {
    /// Applies the 90° rotation relabel.  Non-arrow keys are unchanged.
    pub fn rotated(self) -> Self {
        match self {
            DeviceKey::DpadLeft => DeviceKey::DpadUp,
            DeviceKey::DpadRight => DeviceKey::DpadDown,
            DeviceKey::DpadUp => DeviceKey::DpadRight,
            DeviceKey::DpadDown => DeviceKey::DpadLeft,
            other => other,
        }
    }

    /// Returns `true` for the four arrow keys.
    pub fn is_direction(&self) -> bool {
        self.impulse().is_some()
    }

    /// The unit pointer impulse for an arrow key; screen y grows downwards.
    pub fn impulse(&self) -> Option<Impulse> {
        match self {
            DeviceKey::DpadLeft => Some(Impulse::LEFT),
            DeviceKey::DpadRight => Some(Impulse::RIGHT),
            DeviceKey::DpadUp => Some(Impulse::UP),
            DeviceKey::DpadDown => Some(Impulse::DOWN),
            DeviceKey::DpadCenter | DeviceKey::Other(_) => None,
        }
    }

    /// The X11 KeySym sent to the remote for this key.
    pub fn keysym(&self) -> u32 {
        match self {
            DeviceKey::DpadLeft => XK_LEFT,
            DeviceKey::DpadUp => XK_UP,
            DeviceKey::DpadRight => XK_RIGHT,
            DeviceKey::DpadDown => XK_DOWN,
            DeviceKey::DpadCenter => XK_RETURN,
            DeviceKey::Other(keysym) => *keysym,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
