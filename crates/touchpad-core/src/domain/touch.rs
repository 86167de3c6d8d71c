//! Platform-neutral touch and host-mouse events.
//!
//! Platform event objects (Android `MotionEvent`, Wayland touch frames, web
//! `PointerEvent`s) are adapted into [`TouchEvent`] at the boundary so they
//! never leak into the translator.  The shape deliberately mirrors a
//! multi-touch frame: every event carries the positions of *all* fingers that
//! are currently down, plus which finger the action applies to.

use serde::{Deserialize, Serialize};

/// A position in screen (or remote) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a point from its coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// What happened in a [`TouchEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    /// The first finger (or a mouse button) went down.
    Down,
    /// The last finger (or a mouse button) went up.
    Up,
    /// One or more fingers moved, or the mouse moved with a button held.
    Move,
    /// An additional finger went down while others are already down.
    PointerDown,
    /// A finger went up while others remain down.
    PointerUp,
    /// The platform aborted the gesture.
    Cancel,
    /// The mouse moved with no button held.
    HoverMove,
    /// The mouse wheel turned; see [`TouchEvent::scroll`].
    Scroll,
}

/// Where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    #[default]
    Touch,
    /// A physical (USB / Bluetooth) mouse attached to the device.
    Mouse,
}

/// Host mouse buttons currently held, reported only for [`EventSource::Mouse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostButtons(pub u8);

impl HostButtons {
    pub const PRIMARY: u8 = 1 << 0;
    pub const SECONDARY: u8 = 1 << 1;
    pub const TERTIARY: u8 = 1 << 2;

    pub fn primary(&self) -> bool {
        self.0 & Self::PRIMARY != 0
    }

    pub fn secondary(&self) -> bool {
        self.0 & Self::SECONDARY != 0
    }

    pub fn tertiary(&self) -> bool {
        self.0 & Self::TERTIARY != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// A single finger within a [`TouchEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPointer {
    /// Stable id for the lifetime of the finger; the first finger is 0.
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl TouchPointer {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One touch frame or host-mouse event.
///
/// For [`TouchAction::PointerUp`] and [`TouchAction::Up`] the lifting finger is
/// still listed in `pointers`, so `pointer_count()` counts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub action: TouchAction,
    /// Id of the finger the action applies to.
    #[serde(default)]
    pub action_pointer: u32,
    #[serde(default)]
    pub pointers: Vec<TouchPointer>,
    /// Event timestamp in milliseconds on a monotonic clock.
    pub time_ms: u64,
    #[serde(default)]
    pub source: EventSource,
    #[serde(default)]
    pub buttons: HostButtons,
    /// Wheel axis values: `x` is the horizontal axis, `y` the vertical one.
    #[serde(default)]
    pub scroll: Point,
}

impl TouchEvent {
    /// Builds a touch event from an explicit pointer list.
    pub fn new(action: TouchAction, action_pointer: u32, pointers: Vec<TouchPointer>, time_ms: u64) -> Self {
        Self {
            action,
            action_pointer,
            pointers,
            time_ms,
            source: EventSource::Touch,
            buttons: HostButtons::default(),
            scroll: Point::default(),
        }
    }

    /// Builds a single-finger touch event for finger 0.
    pub fn single(action: TouchAction, x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(action, 0, vec![TouchPointer { id: 0, x, y }], time_ms)
    }

    /// Builds a host-mouse event.
    pub fn mouse(action: TouchAction, x: f32, y: f32, buttons: HostButtons, time_ms: u64) -> Self {
        Self {
            source: EventSource::Mouse,
            buttons,
            ..Self::single(action, x, y, time_ms)
        }
    }

    /// Builds a host-mouse wheel event with the given axis values.
    pub fn wheel(x: f32, y: f32, horizontal: f32, vertical: f32, time_ms: u64) -> Self {
        Self {
            scroll: Point::new(horizontal, vertical),
            ..Self::mouse(TouchAction::Scroll, x, y, HostButtons::default(), time_ms)
        }
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Position of the first listed finger (the platform's "primary" pointer).
    pub fn position(&self) -> Point {
        self.pointers
            .first()
            .map(TouchPointer::position)
            .unwrap_or_default()
    }

    /// Position of the finger with the given id, if it is down.
    pub fn pointer(&self, id: u32) -> Option<Point> {
        self.pointers
            .iter()
            .find(|p| p.id == id)
            .map(TouchPointer::position)
    }

    /// Mean position of the fingers, excluding `skip` (a lifting finger).
    pub fn focus_excluding(&self, skip: Option<u32>) -> Point {
        let mut sum = Point::default();
        let mut count = 0.0f32;
        for p in self.pointers.iter().filter(|p| Some(p.id) != skip) {
            sum.x += p.x;
            sum.y += p.y;
            count += 1.0;
        }
        if count == 0.0 {
            return Point::default();
        }
        Point::new(sum.x / count, sum.y / count)
    }

    /// Mean position of all listed fingers.
    pub fn focus(&self) -> Point {
        self.focus_excluding(None)
    }

    /// Mean distance of the fingers from their focus.
    pub fn span(&self) -> f32 {
        if self.pointers.is_empty() {
            return 0.0;
        }
        let focus = self.focus();
        let total: f32 = self
            .pointers
            .iter()
            .map(|p| focus.distance_to(p.position()))
            .sum();
        total / self.pointers.len() as f32
    }

    pub fn is_mouse(&self) -> bool {
        self.source == EventSource::Mouse
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
