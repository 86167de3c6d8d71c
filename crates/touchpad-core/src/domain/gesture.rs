//! Two-finger gesture classifier: swipe vs. pinch-scale vs. noise.
//!
//! The classifier receives one [`ScaleSample`] per two-finger update between
//! [`GestureClassifier::begin`] and [`GestureClassifier::end`] and decides
//! what the fingers are doing.
//!
//! # State machine
//!
//! ```text
//!            begin()                 focus moved > 40 px
//!   Idle ───────────► TrackingFocus ───────────────────► Swiping
//!    ▲                     │                                │
//!    │                     │ |1 - scale| >= 0.1             │ end()
//!    │                     ▼                                ▼
//!    │                  Scaling ──────── end() ───► JustFinishedScaling
//!    │                                                      │
//!    └──────────────── clear_just_finished() ───────────────┘
//! ```
//!
//! `Swiping` and `Scaling` are mutually exclusive for the lifetime of one
//! interaction: only `begin()` leaves either of them for the other.
//!
//! # Direction naming
//!
//! A [`SwipeDirection`] names the *scroll* produced, which runs opposite to
//! the finger travel: fingers moving up the screen scroll the remote down.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::touch::Point;

/// Focus travel (per axis) that starts swiping, and that produces each
/// further swipe tick once swiping.
pub const SWIPE_DISTANCE: f32 = 40.0;

/// A swipe update arriving this many milliseconds after the previous one
/// yields a speed of 1; faster updates yield proportionally more ticks.
pub const BASE_SWIPE_INTERVAL_MS: u64 = 600;

/// Minimum `|1 - scale_factor|` that counts as a deliberate pinch.
pub const MIN_SCALE_FACTOR: f32 = 0.1;

/// Direction of a reported swipe, named after the scroll it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Where the classifier is within a two-finger interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No two-finger interaction in progress.
    #[default]
    Idle,
    /// Two fingers are down; the focus has not yet travelled far enough to
    /// count as a swipe and the span has not changed enough to count as a pinch.
    TrackingFocus,
    Swiping,
    Scaling,
    /// A two-finger interaction just ended; single-finger scrolls are still
    /// suppressed until the first finger of the next touch goes down.
    JustFinishedScaling,
}

/// One two-finger update from the scale gesture source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSample {
    /// Midpoint between the fingers, in screen pixels.
    pub focus: Point,
    /// Ratio of the current finger span to the previous one.
    pub scale_factor: f32,
    /// Milliseconds since the previous update.
    pub elapsed_ms: u64,
}

/// Result of classifying one [`ScaleSample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing to report; the update was not consumed.
    NoOp,
    /// The fingers travelled one swipe step.
    Swipe { direction: SwipeDirection, speed: u32 },
    /// The fingers are pinching; zoom by `factor` around `focus`.
    ScaleAdjust { factor: f32, focus: Point },
}

/// Classifies two-finger updates into swipes and pinches.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    initial_focus: Point,
    current_focus: Point,
    previous_focus: Point,
    phase: GesturePhase,
    swipe_direction: Option<SwipeDirection>,
    swipe_speed: u32,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self {
            swipe_speed: 1,
            ..Self::default()
        }
    }

    /// Starts a new two-finger interaction with the fingers' initial focus.
    ///
    /// Any swipe direction left over from the previous interaction is cleared.
    pub fn begin(&mut self, focus: Point) {
        self.current_focus = focus;
        self.initial_focus = focus;
        self.previous_focus = focus;
        self.phase = GesturePhase::TrackingFocus;
        self.swipe_direction = None;
        self.swipe_speed = 1;
    }

    /// Classifies one update.  Updates outside `begin()`/`end()` are ignored.
    pub fn update(&mut self, sample: ScaleSample) -> GestureOutcome {
        if !matches!(
            self.phase,
            GesturePhase::TrackingFocus | GesturePhase::Swiping | GesturePhase::Scaling
        ) {
            return GestureOutcome::NoOp;
        }

        self.current_focus = sample.focus;

        if self.phase != GesturePhase::Scaling {
            if self.phase == GesturePhase::TrackingFocus && self.left_initial_focus() {
                debug!(
                    x = self.current_focus.x,
                    y = self.current_focus.y,
                    "two-finger swipe started"
                );
                self.phase = GesturePhase::Swiping;
                self.previous_focus = self.initial_focus;
            }

            if self.phase == GesturePhase::Swiping {
                self.swipe_speed = swipe_speed(sample.elapsed_ms);
                self.swipe_direction = self.next_swipe_step();
                return match self.swipe_direction {
                    Some(direction) => GestureOutcome::Swipe {
                        direction,
                        speed: self.swipe_speed,
                    },
                    None => GestureOutcome::NoOp,
                };
            }
        }

        if self.phase != GesturePhase::Scaling
            && (1.0 - sample.scale_factor).abs() < MIN_SCALE_FACTOR
        {
            return GestureOutcome::NoOp;
        }

        if self.phase != GesturePhase::Scaling {
            debug!(factor = sample.scale_factor, "pinch scaling started");
            self.phase = GesturePhase::Scaling;
        }
        GestureOutcome::ScaleAdjust {
            factor: sample.scale_factor,
            focus: self.current_focus,
        }
    }

    /// Ends the two-finger interaction.
    pub fn end(&mut self) {
        self.phase = match self.phase {
            GesturePhase::Scaling | GesturePhase::Swiping => GesturePhase::JustFinishedScaling,
            GesturePhase::JustFinishedScaling => GesturePhase::JustFinishedScaling,
            GesturePhase::Idle | GesturePhase::TrackingFocus => GesturePhase::Idle,
        };
        self.swipe_direction = None;
    }

    /// Consumes the one-shot "just finished" flag, returning to `Idle`.
    pub fn clear_just_finished(&mut self) {
        if self.phase == GesturePhase::JustFinishedScaling {
            self.phase = GesturePhase::Idle;
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_swiping(&self) -> bool {
        self.phase == GesturePhase::Swiping
    }

    pub fn is_scaling(&self) -> bool {
        self.phase == GesturePhase::Scaling
    }

    /// Whether single-finger scrolls must be swallowed right now.
    pub fn suppresses_scroll(&self) -> bool {
        matches!(
            self.phase,
            GesturePhase::Swiping | GesturePhase::Scaling | GesturePhase::JustFinishedScaling
        )
    }

    /// The direction reported by the most recent update, if any.
    pub fn swipe_direction(&self) -> Option<SwipeDirection> {
        self.swipe_direction
    }

    pub fn swipe_speed(&self) -> u32 {
        self.swipe_speed
    }

    fn left_initial_focus(&self) -> bool {
        (self.current_focus.y - self.initial_focus.y).abs() > SWIPE_DISTANCE
            || (self.current_focus.x - self.initial_focus.x).abs() > SWIPE_DISTANCE
    }

    // Fixed tie-break order: down, up, right, left.
    fn next_swipe_step(&mut self) -> Option<SwipeDirection> {
        let current = self.current_focus;
        let previous = self.previous_focus;
        let direction = if current.y < previous.y - SWIPE_DISTANCE {
            SwipeDirection::Down
        } else if current.y > previous.y + SWIPE_DISTANCE {
            SwipeDirection::Up
        } else if current.x < previous.x - SWIPE_DISTANCE {
            SwipeDirection::Right
        } else if current.x > previous.x + SWIPE_DISTANCE {
            SwipeDirection::Left
        } else {
            return None;
        };
        self.previous_focus = current;
        Some(direction)
    }
}

/// Scroll ticks per swipe step for an update `elapsed_ms` after the last one.
fn swipe_speed(elapsed_ms: u64) -> u32 {
    let speed = BASE_SWIPE_INTERVAL_MS / elapsed_ms.max(1);
    u32::try_from(speed).unwrap_or(u32::MAX).max(1)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
