//! Portable touch gesture detection.
//!
//! [`TouchGestureDetector`] stands in for the platform's gesture and scale
//! detectors.  It watches the same [`TouchEvent`] stream the translator
//! receives and reports [`RecognizedGesture`]s:
//!
//! - **Scale family**: `ScaleBegin` when a second finger lands, one `Scale`
//!   sample per multi-finger move (focus, span ratio, elapsed time), and
//!   `ScaleEnd` when the finger set changes or lifts.
//! - **Tap family**: `LongPress`, `SingleTapConfirmed`, `DoubleTap`, and
//!   `Scroll` for one-finger (or multi-finger focus) motion past the slop.
//!
//! # Time (for beginners)
//!
//! Several gestures are defined by *nothing* happening for a while: a long
//! press is a finger that did not move or lift for 500 ms, and a single tap
//! is only confirmed once the double-tap window has closed.  The detector
//! has no timer of its own.  Deadlines are checked against each event's
//! timestamp and against the `now_ms` passed to [`GestureSource::poll`], so
//! the embedding event loop decides when "a while" has passed and tests can
//! use made-up timestamps.

use tracing::trace;
use touchpad_core::{Point, ScaleSample, TouchAction, TouchEvent};

use crate::application::ports::{GestureSource, RecognizedGesture};

/// Default time a finger must stay put to long-press.
pub const DEFAULT_LONG_PRESS_MS: u64 = 500;
/// Default window, from the first down, in which a second tap is a double tap.
pub const DEFAULT_DOUBLE_TAP_MS: u64 = 300;
/// Default distance a finger may wander and still tap or long-press.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Timing and distance thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorSettings {
    pub long_press_ms: u64,
    pub double_tap_ms: u64,
    pub touch_slop: f32,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            double_tap_ms: DEFAULT_DOUBLE_TAP_MS,
            touch_slop: DEFAULT_TOUCH_SLOP,
        }
    }
}

/// Baseline for the next scale sample.
#[derive(Debug, Clone, Copy)]
struct ScaleTrack {
    span: f32,
    time_ms: u64,
    /// Baseline before the last sample, restored by `reject_scale`.
    previous: Option<(f32, u64)>,
}

/// State of the finger sequence that began with the last `Down`.
#[derive(Debug, Clone, Copy)]
struct PressState {
    down_time_ms: u64,
    max_pointer_count: usize,
    start_focus: Point,
    last_focus: Point,
    position: Point,
    beyond_slop: bool,
    multi_touch: bool,
    long_press_fired: bool,
    /// This press is the second half of a double tap.
    double_tap: bool,
}

/// A completed tap waiting for the double-tap window to close.
#[derive(Debug, Clone, Copy)]
struct PendingTap {
    deadline_ms: u64,
    position: Point,
}

/// Timestamp-driven tap, long-press, scroll and scale detector.
#[derive(Debug, Default)]
pub struct TouchGestureDetector {
    settings: DetectorSettings,
    scale: Option<ScaleTrack>,
    press: Option<PressState>,
    pending_tap: Option<PendingTap>,
}

impl TouchGestureDetector {
    pub fn new(settings: DetectorSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> DetectorSettings {
        self.settings
    }

    /// Whether a scale interaction is in progress.
    pub fn is_scaling(&self) -> bool {
        self.scale.is_some()
    }

    /// Forgets every in-flight gesture without reporting anything.
    pub fn reset(&mut self) {
        self.scale = None;
        self.press = None;
        self.pending_tap = None;
    }

    fn track_scale(&mut self, event: &TouchEvent, out: &mut Vec<RecognizedGesture>) {
        let finger_set_changed = matches!(
            event.action,
            TouchAction::PointerDown | TouchAction::PointerUp | TouchAction::Up | TouchAction::Cancel
        );
        if finger_set_changed && self.scale.take().is_some() {
            out.push(RecognizedGesture::ScaleEnd);
        }
        if matches!(event.action, TouchAction::Up | TouchAction::Cancel) {
            return;
        }

        let active = active_points(event);
        if active.len() < 2 {
            return;
        }
        let (focus, span) = focus_and_span(&active);

        match self.scale.as_mut() {
            None => {
                if span > 0.0 {
                    self.scale = Some(ScaleTrack {
                        span,
                        time_ms: event.time_ms,
                        previous: None,
                    });
                    out.push(RecognizedGesture::ScaleBegin { focus });
                }
            }
            Some(track) if event.action == TouchAction::Move => {
                let scale_factor = if track.span > 0.0 { span / track.span } else { 1.0 };
                let elapsed_ms = event.time_ms.saturating_sub(track.time_ms);
                track.previous = Some((track.span, track.time_ms));
                track.span = span;
                track.time_ms = event.time_ms;
                out.push(RecognizedGesture::Scale(ScaleSample {
                    focus,
                    scale_factor,
                    elapsed_ms,
                }));
            }
            Some(_) => {}
        }
    }

    fn track_press(&mut self, event: &TouchEvent, out: &mut Vec<RecognizedGesture>) {
        match event.action {
            TouchAction::Down => {
                let position = event.position();
                let focus = event.focus();
                let double_tap = match self.pending_tap.take() {
                    Some(tap) => {
                        trace!(x = position.x, y = position.y, "double tap");
                        out.push(RecognizedGesture::DoubleTap {
                            position: tap.position,
                        });
                        true
                    }
                    None => false,
                };
                self.press = Some(PressState {
                    down_time_ms: event.time_ms,
                    max_pointer_count: event.pointer_count(),
                    start_focus: focus,
                    last_focus: focus,
                    position,
                    beyond_slop: false,
                    multi_touch: false,
                    long_press_fired: false,
                    double_tap,
                });
            }
            TouchAction::PointerDown => {
                self.pending_tap = None;
                if let Some(press) = self.press.as_mut() {
                    press.multi_touch = true;
                    press.max_pointer_count = press.max_pointer_count.max(event.pointer_count());
                    press.last_focus = event.focus();
                }
            }
            TouchAction::PointerUp => {
                if let Some(press) = self.press.as_mut() {
                    press.last_focus = event.focus_excluding(Some(event.action_pointer));
                }
            }
            TouchAction::Move => {
                let slop = self.settings.touch_slop;
                let Some(press) = self.press.as_mut() else {
                    return;
                };
                press.position = event.position();
                if press.long_press_fired || press.double_tap {
                    return;
                }
                let focus = event.focus();
                let distance = Point::new(press.last_focus.x - focus.x, press.last_focus.y - focus.y);
                let scrolled = if press.beyond_slop {
                    distance.x.abs() >= 1.0 || distance.y.abs() >= 1.0
                } else if focus.distance_to(press.start_focus) > slop {
                    press.beyond_slop = true;
                    true
                } else {
                    false
                };
                if scrolled {
                    press.last_focus = focus;
                    out.push(RecognizedGesture::Scroll {
                        pointer_count: press.max_pointer_count.max(event.pointer_count()),
                        action: event.action,
                        position: press.position,
                        distance,
                    });
                }
            }
            TouchAction::Up => {
                let Some(press) = self.press.take() else {
                    return;
                };
                if press.long_press_fired || press.double_tap || press.beyond_slop || press.multi_touch {
                    return;
                }
                let deadline_ms = press.down_time_ms + self.settings.double_tap_ms;
                let position = event.position();
                if event.time_ms >= deadline_ms {
                    out.push(RecognizedGesture::SingleTapConfirmed { position });
                } else {
                    self.pending_tap = Some(PendingTap {
                        deadline_ms,
                        position,
                    });
                }
            }
            TouchAction::Cancel => {
                self.press = None;
                self.pending_tap = None;
            }
            TouchAction::HoverMove | TouchAction::Scroll => {}
        }
    }
}

impl GestureSource for TouchGestureDetector {
    fn feed(&mut self, event: &TouchEvent) -> Vec<RecognizedGesture> {
        let mut out = self.poll(event.time_ms);
        self.track_scale(event, &mut out);
        self.track_press(event, &mut out);
        out
    }

    fn poll(&mut self, now_ms: u64) -> Vec<RecognizedGesture> {
        let mut out = Vec::new();

        if let Some(tap) = self.pending_tap {
            if now_ms >= tap.deadline_ms {
                self.pending_tap = None;
                out.push(RecognizedGesture::SingleTapConfirmed {
                    position: tap.position,
                });
            }
        }

        let long_press_ms = self.settings.long_press_ms;
        if let Some(press) = self.press.as_mut() {
            let eligible = !(press.long_press_fired
                || press.beyond_slop
                || press.multi_touch
                || press.double_tap);
            if eligible && now_ms >= press.down_time_ms + long_press_ms {
                press.long_press_fired = true;
                out.push(RecognizedGesture::LongPress {
                    position: press.position,
                });
            }
        }

        out
    }

    fn reject_scale(&mut self) {
        if let Some(track) = self.scale.as_mut() {
            if let Some((span, time_ms)) = track.previous.take() {
                track.span = span;
                track.time_ms = time_ms;
            }
        }
    }
}

/// Fingers that remain down after this event.
fn active_points(event: &TouchEvent) -> Vec<Point> {
    let lifting = matches!(event.action, TouchAction::PointerUp | TouchAction::Up)
        .then_some(event.action_pointer);
    event
        .pointers
        .iter()
        .filter(|p| Some(p.id) != lifting)
        .map(|p| p.position())
        .collect()
}

/// Mean position and mean distance from it.
fn focus_and_span(points: &[Point]) -> (Point, f32) {
    let n = points.len() as f32;
    let focus = Point::new(
        points.iter().map(|p| p.x).sum::<f32>() / n,
        points.iter().map(|p| p.y).sum::<f32>() / n,
    );
    let span = points.iter().map(|p| focus.distance_to(*p)).sum::<f32>() / n;
    (focus, span)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
