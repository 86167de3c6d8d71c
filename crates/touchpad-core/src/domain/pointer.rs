//! Remote pointer state: what the remote session was last told.
//!
//! # The RFB button mask (for beginners)
//!
//! The VNC (RFB) `PointerEvent` message carries an absolute position and an
//! 8-bit mask of buttons that are *currently held*.  There is no separate
//! "click" message: a click is one event with the bit set followed by one with
//! it cleared.  Scroll wheels are modelled as buttons 4–7; one scroll tick is a
//! press of the wheel button followed by a release.
//!
//! | Bit | Button            |
//! |-----|-------------------|
//! | 0   | primary (left)    |
//! | 1   | middle            |
//! | 2   | secondary (right) |
//! | 3   | wheel up          |
//! | 4   | wheel down        |
//! | 5   | wheel left        |
//! | 6   | wheel right       |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::gesture::SwipeDirection;

/// Errors raised when building a [`RemotePointerState`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointerError {
    /// The remote framebuffer has a zero dimension.
    #[error("remote framebuffer bounds must be non-empty, got {width}x{height}")]
    EmptyBounds { width: u32, height: u32 },
}

/// RFB pointer button mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct ButtonMask(pub u8);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);
    pub const PRIMARY: ButtonMask = ButtonMask(1 << 0);
    pub const TERTIARY: ButtonMask = ButtonMask(1 << 1);
    pub const SECONDARY: ButtonMask = ButtonMask(1 << 2);
    pub const SCROLL_UP: ButtonMask = ButtonMask(1 << 3);
    pub const SCROLL_DOWN: ButtonMask = ButtonMask(1 << 4);
    pub const SCROLL_LEFT: ButtonMask = ButtonMask(1 << 5);
    pub const SCROLL_RIGHT: ButtonMask = ButtonMask(1 << 6);

    /// The wheel button that scrolls in `direction`.
    pub fn scroll(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Up => Self::SCROLL_UP,
            SwipeDirection::Down => Self::SCROLL_DOWN,
            SwipeDirection::Left => Self::SCROLL_LEFT,
            SwipeDirection::Right => Self::SCROLL_RIGHT,
        }
    }

    /// Returns `true` if every bit in `other` is set in `self`.
    pub fn contains(&self, other: ButtonMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        ButtonMask(self.0 | rhs.0)
    }
}

/// Cursor position and held buttons as last reported to the remote session.
///
/// Coordinates are remote framebuffer pixels.  When bounds are known every
/// update is clamped into `[0, width) × [0, height)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemotePointerState {
    x: i32,
    y: i32,
    mask: ButtonMask,
    bounds: Option<(u32, u32)>,
}

impl RemotePointerState {
    /// Creates an unbounded pointer at `(x, y)` with no buttons held.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            mask: ButtonMask::NONE,
            bounds: None,
        }
    }

    /// Creates a pointer centred on a `width × height` remote framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError::EmptyBounds`] if either dimension is zero.
    pub fn with_bounds(width: u32, height: u32) -> Result<Self, PointerError> {
        if width == 0 || height == 0 {
            return Err(PointerError::EmptyBounds { width, height });
        }
        Ok(Self {
            x: (width / 2) as i32,
            y: (height / 2) as i32,
            mask: ButtonMask::NONE,
            bounds: Some((width, height)),
        })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn mask(&self) -> ButtonMask {
        self.mask
    }

    pub fn bounds(&self) -> Option<(u32, u32)> {
        self.bounds
    }

    /// Records a pointer transition at a fractional remote position.
    ///
    /// The position is rounded to the nearest pixel and clamped to the bounds.
    /// Returns the integer position that should be sent to the remote.
    pub fn apply(&mut self, x: f32, y: f32, mask: ButtonMask) -> (i32, i32) {
        self.set_position(x.round() as i32, y.round() as i32);
        self.mask = mask;
        (self.x, self.y)
    }

    /// Moves the recorded position without reporting anything.
    pub fn set_position(&mut self, x: i32, y: i32) {
        let (x, y) = match self.bounds {
            Some((w, h)) => (x.clamp(0, last_index(w)), y.clamp(0, last_index(h))),
            None => (x, y),
        };
        self.x = x;
        self.y = y;
    }
}

/// Largest coordinate inside an extent, saturating at `i32::MAX`.
fn last_index(extent: u32) -> i32 {
    i32::try_from(extent.saturating_sub(1)).unwrap_or(i32::MAX)
}
