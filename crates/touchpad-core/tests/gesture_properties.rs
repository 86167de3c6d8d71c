//! Integration tests for the two-finger classifier and the pointer curve.
//!
//! These drive complete interactions through the public API: begin, a series
//! of updates, end, and the next interaction.

use touchpad_core::{
    fine_ctrl_scale, ButtonMask, GestureClassifier, GestureOutcome, GesturePhase, Point,
    RemotePointerState, ScaleSample, SwipeDirection,
};

fn update(c: &mut GestureClassifier, x: f32, y: f32, scale: f32) -> GestureOutcome {
    c.update(ScaleSample {
        focus: Point::new(x, y),
        scale_factor: scale,
        elapsed_ms: 50,
    })
}

#[test]
fn test_swipe_then_pinch_in_next_interaction() {
    // Arrange – a swipe interaction
    let mut c = GestureClassifier::new();
    c.begin(Point::new(200.0, 400.0));
    let swipe = update(&mut c, 200.0, 300.0, 1.0);
    assert!(matches!(swipe, GestureOutcome::Swipe { direction: SwipeDirection::Down, speed: 12 }));

    // Scaling stays locked out for the rest of the swipe.
    assert_eq!(update(&mut c, 200.0, 290.0, 2.0), GestureOutcome::NoOp);
    c.end();
    assert_eq!(c.phase(), GesturePhase::JustFinishedScaling);

    // Act – next interaction starts with a pinch
    c.clear_just_finished();
    c.begin(Point::new(200.0, 300.0));
    let pinch = update(&mut c, 201.0, 301.0, 0.7);

    // Assert
    assert_eq!(
        pinch,
        GestureOutcome::ScaleAdjust {
            factor: 0.7,
            focus: Point::new(201.0, 301.0)
        }
    );
}

#[test]
fn test_long_swipe_emits_one_step_per_forty_pixels() {
    let mut c = GestureClassifier::new();
    c.begin(Point::new(100.0, 100.0));

    let steps = (1..=30)
        .map(|i| update(&mut c, 100.0 + 10.0 * i as f32, 100.0, 1.0))
        .filter(|o| matches!(o, GestureOutcome::Swipe { direction: SwipeDirection::Left, .. }))
        .count();

    // 300 px of travel with a fresh step whenever > 40 px accumulates.
    assert_eq!(steps, 6);
}

#[test]
fn test_scaled_drag_reaches_remote_pointer() {
    // Arrange
    let mut pointer = RemotePointerState::with_bounds(800, 600).unwrap();
    let (x0, y0) = pointer.position();

    // Act – a 20 px finger move at 1.0 zoom
    let dx = fine_ctrl_scale(20.0);
    let dy = fine_ctrl_scale(-2.0);
    pointer.apply(x0 as f32 + dx, y0 as f32 + dy, ButtonMask::PRIMARY);

    // Assert
    assert_eq!(pointer.position(), (x0 + 13, y0 - 1));
    assert_eq!(pointer.mask(), ButtonMask::PRIMARY);
}
