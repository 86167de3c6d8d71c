//! TouchpadTranslator: the per-touch-session state machine.
//!
//! Every touch and host-mouse event enters through
//! [`TouchpadTranslator::on_touch_event`]; d-pad keys enter through
//! [`TouchpadTranslator::on_key_down`] / [`TouchpadTranslator::on_key_up`].
//! The translator decides what the fingers mean and writes the result to the
//! shared [`RemotePointer`].
//!
//! # Touch session (for beginners)
//!
//! A *touch session* runs from the first finger down to the last finger up.
//! Within it the translator remembers:
//!
//! | Field                 | Meaning                                          |
//! |-----------------------|--------------------------------------------------|
//! | `drag_mode`           | a long press grabbed the primary button          |
//! | `drag_anchor`         | last screen position used for drag deltas        |
//! | `second_pointer_seen` | a second finger landed (no long-press drag now)  |
//! | `third_pointer_seen`  | a third finger landed (middle click, no right)   |
//!
//! # Event routing
//!
//! Branches are tried in this order; the first match handles the event:
//!
//! 1. Two-finger swipe in progress: nothing but the gesture pipeline runs,
//!    and the pointer stays frozen while scroll ticks go out.
//! 2. Second finger lifts, no pinch, no third finger: right click.
//! 3. Third finger lands, no pinch: middle click.
//! 4. One finger in drag mode: move with the primary button held.
//! 5. Everything else: the gesture pipeline (taps, long press, scroll).
//!
//! The gesture pipeline always sees every event so its own bookkeeping stays
//! consistent; branches 3 and 4 only discard the tap-family gestures it
//! produces.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use touchpad_core::{
    fine_ctrl_scale, ButtonMask, DeviceKey, GestureClassifier, GestureOutcome, Point,
    SwipeDirection, TouchAction, TouchEvent,
};

use super::dpad_mouse::DpadMouseHandler;
use super::ports::{ClickPacer, GestureSource, RecognizedGesture, UiFeedback, Viewport};
use super::remote_pointer::RemotePointer;

/// Default pause between the transitions of a synthesized click.
pub const DEFAULT_CLICK_PACING: Duration = Duration::from_millis(50);

/// Collaborators the translator is wired to.
pub struct Collaborators {
    pub pointer: RemotePointer,
    pub viewport: Arc<dyn Viewport>,
    pub feedback: Arc<dyn UiFeedback>,
    pub pacer: Arc<dyn ClickPacer>,
    pub gestures: Box<dyn GestureSource>,
}

#[derive(Debug, Clone, Copy, Default)]
struct TouchSession {
    drag_mode: bool,
    drag_anchor: Point,
    second_pointer_seen: bool,
    third_pointer_seen: bool,
}

/// Which gestures from the pipeline an event route acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    All,
    ScaleOnly,
}

/// Converts touch, host-mouse and d-pad input into remote pointer and key events.
pub struct TouchpadTranslator {
    pointer: RemotePointer,
    viewport: Arc<dyn Viewport>,
    feedback: Arc<dyn UiFeedback>,
    pacer: Arc<dyn ClickPacer>,
    gestures: Box<dyn GestureSource>,
    dpad: DpadMouseHandler,
    classifier: GestureClassifier,
    session: TouchSession,
    scrolling: bool,
    click_pacing: Duration,
}

impl TouchpadTranslator {
    pub fn new(parts: Collaborators, dpad: DpadMouseHandler, click_pacing: Duration) -> Self {
        Self {
            pointer: parts.pointer,
            viewport: parts.viewport,
            feedback: parts.feedback,
            pacer: parts.pacer,
            gestures: parts.gestures,
            dpad,
            classifier: GestureClassifier::new(),
            session: TouchSession::default(),
            scrolling: false,
            click_pacing,
        }
    }

    /// Whether a one-finger scroll moved the pointer since the first finger
    /// went down.
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn is_drag_mode(&self) -> bool {
        self.session.drag_mode
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn pointer(&self) -> &RemotePointer {
        &self.pointer
    }

    /// Handles one touch or host-mouse event.  Returns whether it was consumed.
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> bool {
        // Timers that expired before this event happened first.
        self.poll(event.time_ms);

        if event.is_mouse() && self.handle_mouse_actions(event) {
            return true;
        }

        let pointer_id = event.action_pointer;
        let action = event.action;

        match (pointer_id, action) {
            (_, TouchAction::Cancel) => {
                self.release_drag("touch cancelled");
                self.scrolling = false;
            }
            (0, TouchAction::Down) => {
                self.release_drag("stale drag at new touch");
                self.session.second_pointer_seen = false;
                self.session.third_pointer_seen = false;
                self.classifier.clear_just_finished();
            }
            (0, TouchAction::Up) => self.scrolling = false,
            (1, TouchAction::PointerDown) => {
                self.release_drag("second finger cancelled drag");
                self.session.second_pointer_seen = true;
                self.session.third_pointer_seen = false;
            }
            _ => {}
        }

        let scaling = self.classifier.is_scaling();
        if self.classifier.is_swiping() {
            self.dispatch(event, Dispatch::All);
            true
        } else if !scaling
            && !self.session.third_pointer_seen
            && pointer_id == 1
            && action == TouchAction::PointerUp
        {
            self.right_click();
            self.dispatch(event, Dispatch::All);
            true
        } else if !scaling && pointer_id == 2 && action == TouchAction::PointerDown {
            self.session.third_pointer_seen = true;
            let accepted = self.middle_click();
            self.dispatch(event, Dispatch::ScaleOnly);
            accepted
        } else if event.pointer_count() == 1 && pointer_id == 0 && self.session.drag_mode {
            let accepted = self.drag(event);
            self.dispatch(event, Dispatch::ScaleOnly);
            accepted
        } else {
            self.dispatch(event, Dispatch::All);
            true
        }
    }

    /// Reports timer-driven gestures (long press, confirmed single tap) due
    /// by `now_ms`.  Call this from the event loop between events.
    pub fn poll(&mut self, now_ms: u64) {
        for gesture in self.gestures.poll(now_ms) {
            self.on_gesture(gesture, Dispatch::All);
        }
    }

    /// Handles a key press.  Returns whether it was consumed.
    pub fn on_key_down(&mut self, key: DeviceKey) -> bool {
        self.dpad.on_key_down(key)
    }

    /// Handles a key release.  Returns whether it was consumed.
    pub fn on_key_up(&mut self, key: DeviceKey) -> bool {
        self.dpad.on_key_up(key)
    }

    // ── Gesture pipeline ──────────────────────────────────────────────────────

    fn dispatch(&mut self, event: &TouchEvent, mode: Dispatch) {
        for gesture in self.gestures.feed(event) {
            self.on_gesture(gesture, mode);
        }
    }

    fn on_gesture(&mut self, gesture: RecognizedGesture, mode: Dispatch) {
        if mode == Dispatch::ScaleOnly && !gesture.is_scale_family() {
            return;
        }
        match gesture {
            RecognizedGesture::ScaleBegin { focus } => self.classifier.begin(focus),
            RecognizedGesture::Scale(sample) => match self.classifier.update(sample) {
                GestureOutcome::Swipe { direction, speed } => self.swipe(direction, speed),
                GestureOutcome::ScaleAdjust { factor, focus } => {
                    self.viewport.adjust_scale(factor, focus);
                }
                GestureOutcome::NoOp => self.gestures.reject_scale(),
            },
            RecognizedGesture::ScaleEnd => self.classifier.end(),
            RecognizedGesture::LongPress { position } => self.on_long_press(position),
            RecognizedGesture::SingleTapConfirmed { .. } => self.on_single_tap_confirmed(),
            RecognizedGesture::DoubleTap { .. } => self.on_double_tap(),
            RecognizedGesture::Scroll {
                pointer_count,
                action,
                position,
                distance,
            } => self.on_scroll(pointer_count, action, position, distance),
        }
    }

    // ── Routes ────────────────────────────────────────────────────────────────

    /// Scroll ticks for one swipe step, with the pointer frozen.
    fn swipe(&mut self, direction: SwipeDirection, speed: u32) {
        debug!(?direction, speed, "two-finger swipe step");
        let wheel = ButtonMask::scroll(direction);
        for _ in 0..speed {
            self.pointer.stay_put(wheel);
            self.pointer.stay_put(ButtonMask::NONE);
        }
    }

    fn right_click(&mut self) {
        debug!("two-finger tap: right click");
        let (x, y) = self.pointer.position();
        self.pointer.move_to(x as f32, y as f32, ButtonMask::SECONDARY);
        self.pacer.pause(self.click_pacing);
        // Release one pixel off the press so remote context menus stay open;
        // rightwards at the left edge, where a step left would clamp.
        let release_x = if x == 0 { 1 } else { x - 1 };
        self.pointer.move_to(release_x as f32, y as f32, ButtonMask::NONE);
        self.pointer.set_position(x, y);
    }

    fn middle_click(&mut self) -> bool {
        debug!("three-finger tap: middle click");
        self.pointer.stay_put(ButtonMask::TERTIARY);
        self.pacer.pause(self.click_pacing);
        self.pointer.stay_put(ButtonMask::NONE)
    }

    /// Lets go of a long-press drag at the current position, if one is held.
    fn release_drag(&mut self, reason: &'static str) {
        if self.session.drag_mode {
            debug!(reason, "drag released");
            self.session.drag_mode = false;
            self.pointer.stay_put(ButtonMask::NONE);
        }
    }

    fn drag(&mut self, event: &TouchEvent) -> bool {
        let scale = self.viewport.current_scale();
        let position = event.position();
        let dx = fine_ctrl_scale((position.x - self.session.drag_anchor.x) * scale);
        let dy = fine_ctrl_scale((position.y - self.session.drag_anchor.y) * scale);
        self.session.drag_anchor = position;

        let (x, y) = self.pointer.position();
        let (x, y) = (x as f32 + dx, y as f32 + dy);
        if event.action == TouchAction::Up {
            debug!("drag ended");
            self.session.drag_mode = false;
            return self.pointer.move_to(x, y, ButtonMask::NONE);
        }
        self.pointer.move_to(x, y, ButtonMask::PRIMARY)
    }

    // ── Tap-family callbacks ──────────────────────────────────────────────────

    fn on_long_press(&mut self, position: Point) {
        if self.session.second_pointer_seen || self.session.third_pointer_seen {
            return;
        }
        debug!(x = position.x, y = position.y, "long press: drag started");
        self.feedback.show_zoom_indicator(true);
        self.feedback.perform_long_press_haptic();
        self.session.drag_mode = true;
        self.session.drag_anchor = position;
        self.pointer.stay_put(ButtonMask::PRIMARY);
    }

    fn on_single_tap_confirmed(&mut self) {
        self.feedback.show_zoom_indicator(true);
        self.pointer.stay_put(ButtonMask::PRIMARY);
        self.pacer.pause(self.click_pacing);
        self.pointer.stay_put(ButtonMask::NONE);
    }

    fn on_double_tap(&mut self) {
        self.pointer.stay_put(ButtonMask::PRIMARY);
        self.pacer.pause(self.click_pacing);
        self.pointer.stay_put(ButtonMask::NONE);
        self.pacer.pause(self.click_pacing);
        self.pointer.stay_put(ButtonMask::PRIMARY);
        self.pacer.pause(self.click_pacing);
        self.pointer.stay_put(ButtonMask::NONE);
    }

    fn on_scroll(&mut self, pointer_count: usize, action: TouchAction, position: Point, distance: Point) {
        // Staggered finger lifts after a pinch or swipe produce one huge
        // scroll; it and everything until the next first-finger-down is dropped.
        if pointer_count > 1 || self.classifier.suppresses_scroll() {
            return;
        }

        self.feedback.show_zoom_indicator(true);
        let scale = self.viewport.current_scale();
        let dx = fine_ctrl_scale(-distance.x * scale);
        let dy = fine_ctrl_scale(-distance.y * scale);
        let (x, y) = self.pointer.position();
        let (x, y) = (x as f32 + dx, y as f32 + dy);

        if self.session.drag_mode {
            if action == TouchAction::Up {
                self.session.drag_mode = false;
            }
            self.session.drag_anchor = position;
            self.pointer.move_to(x, y, ButtonMask::PRIMARY);
        } else {
            self.pointer.move_to(x, y, ButtonMask::NONE);
        }
        self.scrolling = true;
    }

    // ── Host mouse ────────────────────────────────────────────────────────────

    /// Passes a physical mouse straight through.  Returns `false` for events
    /// that should continue down the touch path.
    fn handle_mouse_actions(&mut self, event: &TouchEvent) -> bool {
        let remote = self.viewport.to_remote(event.position());
        match event.action {
            TouchAction::Down | TouchAction::Move => match held_buttons(event) {
                Some(mask) => self.pointer.move_to(remote.x, remote.y, mask),
                None => false,
            },
            TouchAction::Up => self.pointer.move_to(remote.x, remote.y, ButtonMask::NONE),
            TouchAction::HoverMove => self.pointer.move_to(remote.x, remote.y, ButtonMask::NONE),
            TouchAction::Scroll => {
                let Some((direction, count)) = wheel_ticks(event.scroll) else {
                    return false;
                };
                for _ in 0..count {
                    self.pointer.move_to(remote.x, remote.y, ButtonMask::scroll(direction));
                    self.pointer.move_to(remote.x, remote.y, ButtonMask::NONE);
                }
                true
            }
            TouchAction::PointerDown | TouchAction::PointerUp | TouchAction::Cancel => false,
        }
    }
}

/// The RFB mask for the host buttons held in `event`, primary first.
fn held_buttons(event: &TouchEvent) -> Option<ButtonMask> {
    let buttons = event.buttons;
    if buttons.primary() {
        Some(ButtonMask::PRIMARY)
    } else if buttons.secondary() {
        Some(ButtonMask::SECONDARY)
    } else if buttons.tertiary() {
        Some(ButtonMask::TERTIARY)
    } else {
        None
    }
}

/// Direction and tick count for host wheel axes; vertical wins over horizontal.
fn wheel_ticks(axes: Point) -> Option<(SwipeDirection, u32)> {
    let (direction, amount) = if axes.y < 0.0 {
        (SwipeDirection::Down, -axes.y)
    } else if axes.y > 0.0 {
        (SwipeDirection::Up, axes.y)
    } else if axes.x < 0.0 {
        (SwipeDirection::Right, -axes.x)
    } else if axes.x > 0.0 {
        (SwipeDirection::Left, axes.x)
    } else {
        return None;
    };
    Some((direction, amount as u32))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mouse_mover::{MouseMover, DEFAULT_TICK};
    use crate::application::dpad_mouse::DpadSettings;
    use crate::application::ports::{MockUiFeedback, RemoteSink};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::runtime::Handle;
    use touchpad_core::{GesturePhase, HostButtons, RemotePointerState, ScaleSample, TouchPointer};

    // ── Test doubles ──────────────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Pointer(i32, i32, ButtonMask),
        Key(u32, bool),
        Pause,
    }

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<Sent>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<Sent> {
            std::mem::take(&mut *self.sent.lock().unwrap())
        }

        fn pointer_events(&self) -> Vec<(i32, i32, ButtonMask)> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .filter_map(|s| match s {
                    Sent::Pointer(x, y, m) => Some((*x, *y, *m)),
                    _ => None,
                })
                .collect()
        }
    }

    impl RemoteSink for Recorder {
        fn send_pointer_event(&self, x: i32, y: i32, mask: ButtonMask) -> bool {
            self.sent.lock().unwrap().push(Sent::Pointer(x, y, mask));
            true
        }

        fn send_key_event(&self, keysym: u32, down: bool) -> bool {
            self.sent.lock().unwrap().push(Sent::Key(keysym, down));
            true
        }
    }

    impl ClickPacer for Recorder {
        fn pause(&self, _duration: Duration) {
            self.sent.lock().unwrap().push(Sent::Pause);
        }
    }

    struct FixedScale {
        scale: f32,
        adjustments: Mutex<Vec<(f32, Point)>>,
    }

    impl Viewport for FixedScale {
        fn current_scale(&self) -> f32 {
            self.scale
        }

        fn adjust_scale(&self, factor: f32, focus: Point) {
            self.adjustments.lock().unwrap().push((factor, focus));
        }

        fn to_remote(&self, screen: Point) -> Point {
            Point::new(screen.x / 2.0, screen.y / 2.0)
        }
    }

    /// Replays scripted gestures: the n-th `feed` returns the n-th batch.
    #[derive(Default)]
    struct ScriptedGestures {
        batches: VecDeque<Vec<RecognizedGesture>>,
        rejected: Arc<Mutex<u32>>,
    }

    impl GestureSource for ScriptedGestures {
        fn feed(&mut self, _event: &TouchEvent) -> Vec<RecognizedGesture> {
            self.batches.pop_front().unwrap_or_default()
        }

        fn poll(&mut self, _now_ms: u64) -> Vec<RecognizedGesture> {
            Vec::new()
        }

        fn reject_scale(&mut self) {
            *self.rejected.lock().unwrap() += 1;
        }
    }

    struct Harness {
        translator: TouchpadTranslator,
        recorder: Arc<Recorder>,
        viewport: Arc<FixedScale>,
    }

    fn quiet_feedback() -> MockUiFeedback {
        let mut feedback = MockUiFeedback::new();
        feedback.expect_show_zoom_indicator().return_const(());
        feedback.expect_perform_long_press_haptic().return_const(());
        feedback
    }

    fn harness_with(batches: Vec<Vec<RecognizedGesture>>, feedback: MockUiFeedback) -> Harness {
        let recorder = Arc::new(Recorder::default());
        let viewport = Arc::new(FixedScale {
            scale: 1.0,
            adjustments: Mutex::new(Vec::new()),
        });
        let pointer = RemotePointer::new(
            RemotePointerState::new(500, 400),
            Arc::clone(&recorder) as Arc<dyn RemoteSink>,
        );
        let mover = MouseMover::new(pointer.clone(), DEFAULT_TICK, Handle::current());
        let dpad = DpadMouseHandler::new(pointer.clone(), mover, DpadSettings::default());
        let parts = Collaborators {
            pointer,
            viewport: Arc::clone(&viewport) as Arc<dyn Viewport>,
            feedback: Arc::new(feedback),
            pacer: Arc::clone(&recorder) as Arc<dyn ClickPacer>,
            gestures: Box::new(ScriptedGestures {
                batches: batches.into(),
                ..Default::default()
            }),
        };
        Harness {
            translator: TouchpadTranslator::new(parts, dpad, DEFAULT_CLICK_PACING),
            recorder,
            viewport,
        }
    }

    fn harness(batches: Vec<Vec<RecognizedGesture>>) -> Harness {
        harness_with(batches, quiet_feedback())
    }

    fn down(x: f32, y: f32) -> TouchEvent {
        TouchEvent::single(TouchAction::Down, x, y, 0)
    }

    fn fingers(action: TouchAction, pointer: u32, count: usize) -> TouchEvent {
        let pointers = (0..count as u32)
            .map(|id| TouchPointer {
                id,
                x: 100.0 + 50.0 * id as f32,
                y: 100.0,
            })
            .collect();
        TouchEvent::new(action, pointer, pointers, 0)
    }

    fn sample(x: f32, y: f32, factor: f32) -> RecognizedGesture {
        RecognizedGesture::Scale(ScaleSample {
            focus: Point::new(x, y),
            scale_factor: factor,
            elapsed_ms: 300,
        })
    }

    fn scroll(count: usize, dx: f32, dy: f32) -> RecognizedGesture {
        RecognizedGesture::Scroll {
            pointer_count: count,
            action: TouchAction::Move,
            position: Point::new(0.0, 0.0),
            distance: Point::new(dx, dy),
        }
    }

    // ── Taps ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_single_tap_clicks_in_place() {
        // Arrange
        let mut h = harness(vec![vec![RecognizedGesture::SingleTapConfirmed {
            position: Point::new(9.0, 9.0),
        }]]);

        // Act
        h.translator.on_touch_event(&down(9.0, 9.0));

        // Assert
        assert_eq!(
            h.recorder.take(),
            vec![
                Sent::Pointer(500, 400, ButtonMask::PRIMARY),
                Sent::Pause,
                Sent::Pointer(500, 400, ButtonMask::NONE),
            ]
        );
    }

    #[tokio::test]
    async fn test_double_tap_sends_two_paced_clicks() {
        let mut h = harness(vec![vec![RecognizedGesture::DoubleTap {
            position: Point::new(9.0, 9.0),
        }]]);

        h.translator.on_touch_event(&down(9.0, 9.0));

        assert_eq!(
            h.recorder.take(),
            vec![
                Sent::Pointer(500, 400, ButtonMask::PRIMARY),
                Sent::Pause,
                Sent::Pointer(500, 400, ButtonMask::NONE),
                Sent::Pause,
                Sent::Pointer(500, 400, ButtonMask::PRIMARY),
                Sent::Pause,
                Sent::Pointer(500, 400, ButtonMask::NONE),
            ]
        );
    }

    // ── Right / middle click ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_two_finger_tap_right_clicks_with_offset_release() {
        // Arrange
        let mut h = harness(vec![
            vec![],
            vec![RecognizedGesture::ScaleBegin {
                focus: Point::new(125.0, 100.0),
            }],
            vec![RecognizedGesture::ScaleEnd],
        ]);

        // Act
        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::PointerUp, 1, 2));

        // Assert
        assert_eq!(
            h.recorder.take(),
            vec![
                Sent::Pointer(500, 400, ButtonMask::SECONDARY),
                Sent::Pause,
                Sent::Pointer(499, 400, ButtonMask::NONE),
            ]
        );
        assert_eq!(h.translator.pointer().position(), (500, 400));
    }

    #[tokio::test]
    async fn test_right_click_at_left_edge_releases_to_the_right() {
        // Arrange
        let mut h = harness(vec![
            vec![],
            vec![RecognizedGesture::ScaleBegin {
                focus: Point::new(125.0, 100.0),
            }],
            vec![RecognizedGesture::ScaleEnd],
        ]);
        h.translator.pointer().set_position(0, 400);

        // Act
        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::PointerUp, 1, 2));

        // Assert – release lands off the press point, not on it
        assert_eq!(
            h.recorder.take(),
            vec![
                Sent::Pointer(0, 400, ButtonMask::SECONDARY),
                Sent::Pause,
                Sent::Pointer(1, 400, ButtonMask::NONE),
            ]
        );
        assert_eq!(h.translator.pointer().position(), (0, 400));
    }

    #[tokio::test]
    async fn test_two_finger_tap_leaves_one_finger_scroll_enabled() {
        // Arrange – begin/end with no swipe or pinch in between
        let mut h = harness(vec![
            vec![],
            vec![RecognizedGesture::ScaleBegin {
                focus: Point::new(125.0, 100.0),
            }],
            vec![RecognizedGesture::ScaleEnd],
            vec![],
            vec![],
            vec![scroll(1, -20.0, 0.0)],
        ]);
        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::PointerUp, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::Up, 0, 1));
        h.recorder.take();

        // Act
        h.translator.on_touch_event(&down(10.0, 10.0));
        h.translator.on_touch_event(&TouchEvent::single(TouchAction::Move, 30.0, 10.0, 0));

        // Assert
        assert_eq!(h.translator.classifier().phase(), GesturePhase::Idle);
        assert_eq!(h.recorder.pointer_events(), vec![(513, 400, ButtonMask::NONE)]);
    }

    #[tokio::test]
    async fn test_three_finger_tap_middle_clicks_without_right_click() {
        let mut h = harness(vec![]);

        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 2, 3));
        h.translator.on_touch_event(&fingers(TouchAction::PointerUp, 2, 3));
        h.translator.on_touch_event(&fingers(TouchAction::PointerUp, 1, 2));

        assert_eq!(
            h.recorder.take(),
            vec![
                Sent::Pointer(500, 400, ButtonMask::TERTIARY),
                Sent::Pause,
                Sent::Pointer(500, 400, ButtonMask::NONE),
            ]
        );
    }

    #[tokio::test]
    async fn test_pinch_suppresses_right_click() {
        // Arrange
        let mut h = harness(vec![
            vec![],
            vec![RecognizedGesture::ScaleBegin {
                focus: Point::new(125.0, 100.0),
            }],
            vec![sample(125.0, 100.0, 1.5)],
            vec![RecognizedGesture::ScaleEnd],
        ]);

        // Act
        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::Move, 0, 2));
        h.translator.on_touch_event(&fingers(TouchAction::PointerUp, 1, 2));

        // Assert
        assert!(h.recorder.take().is_empty());
        assert_eq!(
            *h.viewport.adjustments.lock().unwrap(),
            vec![(1.5, Point::new(125.0, 100.0))]
        );
    }

    // ── Swipe ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_swipe_emits_speed_scroll_ticks_each_with_release() {
        // Arrange – 300 ms between samples gives speed 2
        let mut h = harness(vec![
            vec![],
            vec![RecognizedGesture::ScaleBegin {
                focus: Point::new(100.0, 100.0),
            }],
            vec![sample(100.0, 50.0, 1.0)],
        ]);

        // Act
        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::Move, 0, 2));

        // Assert
        let down = ButtonMask::SCROLL_DOWN;
        assert_eq!(
            h.recorder.take(),
            vec![
                Sent::Pointer(500, 400, down),
                Sent::Pointer(500, 400, ButtonMask::NONE),
                Sent::Pointer(500, 400, down),
                Sent::Pointer(500, 400, ButtonMask::NONE),
            ]
        );
        assert!(h.translator.classifier().is_swiping());
    }

    #[tokio::test]
    async fn test_swipe_blocks_right_click_and_later_scrolls() {
        // Arrange
        let mut h = harness(vec![
            vec![],
            vec![RecognizedGesture::ScaleBegin {
                focus: Point::new(100.0, 100.0),
            }],
            vec![sample(100.0, 150.0, 1.0)],
            vec![RecognizedGesture::ScaleEnd],
            vec![scroll(1, -300.0, 0.0)],
        ]);
        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::Move, 0, 2));
        h.recorder.take();

        // Act – second finger lifts, first finger keeps moving
        h.translator.on_touch_event(&fingers(TouchAction::PointerUp, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::Move, 0, 1));

        // Assert – no click and no pointer move
        assert!(h.recorder.take().is_empty());
        assert!(!h.translator.is_scrolling());
    }

    #[tokio::test]
    async fn test_cancel_during_swipe_freezes_pointer_until_next_touch() {
        // Arrange
        let mut h = harness(vec![
            vec![],
            vec![RecognizedGesture::ScaleBegin {
                focus: Point::new(100.0, 100.0),
            }],
            vec![sample(100.0, 150.0, 1.0)],
            vec![RecognizedGesture::ScaleEnd],
            vec![],
            vec![scroll(1, -20.0, 0.0)],
        ]);
        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::Move, 0, 2));
        h.recorder.take();

        // Act
        h.translator.on_touch_event(&fingers(TouchAction::Cancel, 0, 2));
        let after_cancel = h.recorder.take();
        let phase_after_cancel = h.translator.classifier().phase();
        h.translator.on_touch_event(&down(10.0, 10.0));
        h.translator.on_touch_event(&TouchEvent::single(TouchAction::Move, 30.0, 10.0, 0));

        // Assert
        assert!(after_cancel.is_empty());
        assert_eq!(phase_after_cancel, GesturePhase::JustFinishedScaling);
        assert_eq!(h.recorder.pointer_events(), vec![(513, 400, ButtonMask::NONE)]);
    }

    #[tokio::test]
    async fn test_noise_sample_is_rejected_back_to_source() {
        let rejected = Arc::new(Mutex::new(0));
        let mut h = harness(vec![]);
        h.translator.gestures = Box::new(ScriptedGestures {
            batches: vec![
                vec![RecognizedGesture::ScaleBegin {
                    focus: Point::new(100.0, 100.0),
                }],
                vec![sample(101.0, 101.0, 1.02)],
            ]
            .into(),
            rejected: Arc::clone(&rejected),
        });

        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::Move, 0, 2));

        assert_eq!(*rejected.lock().unwrap(), 1);
        assert!(h.viewport.adjustments.lock().unwrap().is_empty());
    }

    // ── Scroll (one-finger pointer move) ──────────────────────────────────────

    #[tokio::test]
    async fn test_scroll_moves_pointer_with_fine_control() {
        // Arrange
        let mut h = harness(vec![vec![], vec![scroll(1, -20.0, 2.0)]]);

        // Act
        h.translator.on_touch_event(&down(10.0, 10.0));
        h.translator.on_touch_event(&TouchEvent::single(TouchAction::Move, 30.0, 8.0, 0));

        // Assert – +20 → +13.3, -2 → -1
        assert_eq!(h.recorder.pointer_events(), vec![(513, 399, ButtonMask::NONE)]);
        assert!(h.translator.is_scrolling());
    }

    #[tokio::test]
    async fn test_scroll_distance_is_multiplied_by_zoom() {
        // Arrange
        let mut h = harness(vec![vec![], vec![scroll(1, -5.0, 0.0)]]);
        h.translator.viewport = Arc::new(FixedScale {
            scale: 2.0,
            adjustments: Mutex::new(Vec::new()),
        });

        // Act
        h.translator.on_touch_event(&down(10.0, 10.0));
        h.translator.on_touch_event(&TouchEvent::single(TouchAction::Move, 15.0, 10.0, 0));

        // Assert – 5 px at zoom 2 is 10 px, damped to 3.4
        assert_eq!(h.recorder.pointer_events(), vec![(503, 400, ButtonMask::NONE)]);
    }

    #[tokio::test]
    async fn test_multi_finger_scroll_is_swallowed() {
        let mut h = harness(vec![vec![scroll(2, -50.0, 0.0)]]);

        h.translator.on_touch_event(&fingers(TouchAction::Move, 0, 2));

        assert!(h.recorder.take().is_empty());
    }

    #[tokio::test]
    async fn test_first_up_clears_scrolling_flag() {
        let mut h = harness(vec![vec![], vec![scroll(1, -20.0, 0.0)]]);
        h.translator.on_touch_event(&down(10.0, 10.0));
        h.translator.on_touch_event(&TouchEvent::single(TouchAction::Move, 30.0, 10.0, 0));

        h.translator.on_touch_event(&TouchEvent::single(TouchAction::Up, 30.0, 10.0, 0));

        assert!(!h.translator.is_scrolling());
    }

    // ── Long press / drag ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_long_press_drags_until_release() {
        // Arrange
        let mut feedback = MockUiFeedback::new();
        feedback.expect_show_zoom_indicator().withf(|v| *v).times(1).return_const(());
        feedback.expect_perform_long_press_haptic().times(1).return_const(());
        let mut h = harness_with(
            vec![
                vec![RecognizedGesture::LongPress {
                    position: Point::new(10.0, 10.0),
                }],
            ],
            feedback,
        );

        // Act
        h.translator.on_touch_event(&down(10.0, 10.0));
        h.translator.on_touch_event(&TouchEvent::single(TouchAction::Move, 12.0, 10.0, 0));
        h.translator.on_touch_event(&TouchEvent::single(TouchAction::Up, 12.0, 10.0, 0));

        // Assert – press, move 1 px held, release where the drag ended
        assert_eq!(
            h.recorder.pointer_events(),
            vec![
                (500, 400, ButtonMask::PRIMARY),
                (501, 400, ButtonMask::PRIMARY),
                (501, 400, ButtonMask::NONE),
            ]
        );
        assert!(!h.translator.is_drag_mode());
    }

    #[tokio::test]
    async fn test_long_press_after_second_finger_does_not_drag() {
        let mut h = harness(vec![
            vec![],
            vec![],
            vec![],
            vec![RecognizedGesture::LongPress {
                position: Point::new(10.0, 10.0),
            }],
        ]);
        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));
        h.translator.on_touch_event(&fingers(TouchAction::PointerUp, 1, 2));
        h.recorder.take();

        h.translator.on_touch_event(&fingers(TouchAction::Move, 0, 1));

        assert!(h.recorder.take().is_empty());
        assert!(!h.translator.is_drag_mode());
    }

    #[tokio::test]
    async fn test_second_finger_cancels_drag_with_release() {
        let mut h = harness(vec![vec![RecognizedGesture::LongPress {
            position: Point::new(100.0, 100.0),
        }]]);
        h.translator.on_touch_event(&fingers(TouchAction::Down, 0, 1));
        h.recorder.take();

        h.translator.on_touch_event(&fingers(TouchAction::PointerDown, 1, 2));

        assert_eq!(
            h.recorder.take(),
            vec![Sent::Pointer(500, 400, ButtonMask::NONE)]
        );
        assert!(!h.translator.is_drag_mode());
    }

    // ── Host mouse ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_cancel_during_drag_releases_in_place() {
        // Arrange
        let mut h = harness(vec![vec![RecognizedGesture::LongPress {
            position: Point::new(10.0, 10.0),
        }]]);
        h.translator.on_touch_event(&down(10.0, 10.0));
        h.recorder.take();

        // Act – a cancel may carry no pointers at all
        h.translator
            .on_touch_event(&TouchEvent::new(TouchAction::Cancel, 0, Vec::new(), 0));

        // Assert
        assert_eq!(
            h.recorder.take(),
            vec![Sent::Pointer(500, 400, ButtonMask::NONE)]
        );
        assert!(!h.translator.is_drag_mode());
    }

    #[tokio::test]
    async fn test_new_touch_after_lost_release_is_not_a_drag() {
        // Arrange – long press, then the lift never arrives
        let mut h = harness(vec![
            vec![RecognizedGesture::LongPress {
                position: Point::new(10.0, 10.0),
            }],
            vec![],
            vec![scroll(1, -20.0, 0.0)],
        ]);
        h.translator.on_touch_event(&down(10.0, 10.0));

        // Act
        h.translator.on_touch_event(&down(200.0, 200.0));
        h.translator.on_touch_event(&TouchEvent::single(TouchAction::Move, 220.0, 200.0, 0));

        // Assert – button let go first, then a plain move
        assert_eq!(
            h.recorder.pointer_events(),
            vec![
                (500, 400, ButtonMask::PRIMARY),
                (500, 400, ButtonMask::NONE),
                (513, 400, ButtonMask::NONE),
            ]
        );
        assert!(!h.translator.is_drag_mode());
    }

    #[tokio::test]
    async fn test_host_mouse_buttons_pass_through() {
        let mut h = harness(vec![]);
        let secondary = HostButtons(HostButtons::SECONDARY);

        h.translator
            .on_touch_event(&TouchEvent::mouse(TouchAction::Down, 200.0, 100.0, secondary, 0));
        h.translator
            .on_touch_event(&TouchEvent::mouse(TouchAction::Up, 200.0, 100.0, HostButtons(0), 0));

        assert_eq!(
            h.recorder.take(),
            vec![
                Sent::Pointer(100, 50, ButtonMask::SECONDARY),
                Sent::Pointer(100, 50, ButtonMask::NONE),
            ]
        );
    }

    #[tokio::test]
    async fn test_host_wheel_emits_tick_pairs() {
        let mut h = harness(vec![]);

        h.translator
            .on_touch_event(&TouchEvent::wheel(20.0, 20.0, 0.0, -2.0, 0));

        assert_eq!(
            h.recorder.take(),
            vec![
                Sent::Pointer(10, 10, ButtonMask::SCROLL_DOWN),
                Sent::Pointer(10, 10, ButtonMask::NONE),
                Sent::Pointer(10, 10, ButtonMask::SCROLL_DOWN),
                Sent::Pointer(10, 10, ButtonMask::NONE),
            ]
        );
    }

    #[test]
    fn test_wheel_axes_map_to_directions() {
        assert_eq!(wheel_ticks(Point::new(0.0, 3.0)), Some((SwipeDirection::Up, 3)));
        assert_eq!(wheel_ticks(Point::new(-1.0, 0.0)), Some((SwipeDirection::Right, 1)));
        assert_eq!(wheel_ticks(Point::new(2.0, 0.0)), Some((SwipeDirection::Left, 2)));
        assert_eq!(wheel_ticks(Point::new(0.0, 0.0)), None);
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_keys_route_to_dpad_handler() {
        let mut h = harness(vec![]);

        assert!(h.translator.on_key_down(DeviceKey::Other(0x0041)));
        assert!(h.translator.on_key_up(DeviceKey::Other(0x0041)));

        assert_eq!(
            h.recorder.take(),
            vec![Sent::Key(0x0041, true), Sent::Key(0x0041, false)]
        );
    }
}
