//! Collaborator traits used by the application layer.
//!
//! Each trait is implemented in the infrastructure layer (or by the embedding
//! application) and injected at construction time as an `Arc<dyn Trait>` or a
//! `Box<dyn Trait>`.  Tests substitute recording doubles.

use std::time::Duration;

use touchpad_core::{ButtonMask, Point, ScaleSample, TouchAction};

/// Outbound RFB events.
///
/// Implementations must not block: they hand the event to a queue or socket
/// writer.  A `false` return means the sender did not accept the event; the
/// caller reports it upwards and never retries.
pub trait RemoteSink: Send + Sync {
    /// Sends an RFB `PointerEvent` at remote pixel `(x, y)`.
    fn send_pointer_event(&self, x: i32, y: i32, mask: ButtonMask) -> bool;

    /// Sends an RFB `KeyEvent` for an X11 KeySym.
    fn send_key_event(&self, keysym: u32, down: bool) -> bool;
}

/// The local view of the remote framebuffer.
pub trait Viewport: Send + Sync {
    /// The zoom: screen pixels per remote pixel.
    ///
    /// Touchpad motion multiplies finger deltas by this value before the
    /// fine-control curve, so the pointer covers more remote pixels per
    /// finger pixel when zoomed in.
    fn current_scale(&self) -> f32;

    /// Zooms the view by `factor` around the screen point `focus`.
    fn adjust_scale(&self, factor: f32, focus: Point);

    /// Converts a screen position to a remote framebuffer position.
    fn to_remote(&self, screen: Point) -> Point;
}

/// Local, non-protocol feedback to the user.
#[cfg_attr(test, mockall::automock)]
pub trait UiFeedback: Send + Sync {
    fn show_zoom_indicator(&self, visible: bool);
    fn perform_long_press_haptic(&self);
}

/// Spacing between the transitions of a synthesized click.
///
/// Some remote applications ignore a press and release that arrive in the
/// same instant, so clicks are paced.  Only event callbacks pause; the mouse
/// mover tick never does.
pub trait ClickPacer: Send + Sync {
    fn pause(&self, duration: Duration);
}

/// Gestures produced by a [`GestureSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizedGesture {
    /// Two or more fingers are down; a scale interaction starts at `focus`.
    ScaleBegin { focus: Point },
    /// One update of an ongoing scale interaction.
    Scale(ScaleSample),
    /// The scale interaction ended.
    ScaleEnd,
    /// A finger stayed down, within the touch slop, past the long-press timeout.
    LongPress { position: Point },
    /// A tap that was not followed by a second tap in time.
    SingleTapConfirmed { position: Point },
    /// The second finger-down of a double tap.
    DoubleTap { position: Point },
    /// The focus moved by `-distance` since the previous scroll.
    ///
    /// `pointer_count` is the most fingers seen together since the initial
    /// down, counting fingers that landed later and have since lifted, or the
    /// current event's count if that is higher.
    Scroll {
        pointer_count: usize,
        action: TouchAction,
        position: Point,
        distance: Point,
    },
}

impl RecognizedGesture {
    /// Returns `true` for the gestures that drive the gesture classifier.
    pub fn is_scale_family(&self) -> bool {
        matches!(
            self,
            RecognizedGesture::ScaleBegin { .. }
                | RecognizedGesture::Scale(_)
                | RecognizedGesture::ScaleEnd
        )
    }
}

/// Turns raw touch events into [`RecognizedGesture`]s.
pub trait GestureSource: Send {
    /// Processes one event.  Timers that expired by the event's timestamp
    /// are reported first.
    fn feed(&mut self, event: &touchpad_core::TouchEvent) -> Vec<RecognizedGesture>;

    /// Reports timers (long press, single-tap confirmation) due by `now_ms`.
    fn poll(&mut self, now_ms: u64) -> Vec<RecognizedGesture>;

    /// The last [`RecognizedGesture::Scale`] was not acted on: keep measuring
    /// the next scale factor and elapsed time from the previous baseline.
    fn reject_scale(&mut self) {}
}
