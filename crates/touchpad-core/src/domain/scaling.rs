//! Fine-control response curve for converting screen deltas to remote deltas.
//!
//! Small finger movements are damped so the remote cursor can be placed on a
//! single pixel; large flicks are amplified so the cursor can cross a wide
//! remote desktop in one stroke.  The band boundaries were tuned empirically
//! and are kept exactly: the `(10, 30]` and `(30, 90]` bands share the same
//! quadratic formula, which is continuous at 30 but not smooth at 10 or 90.

/// Applies the fine-control curve to one axis of a movement delta.
///
/// | `|delta|`     | result magnitude  |
/// |---------------|-------------------|
/// | `[1, 3]`      | `1`               |
/// | `< 1`, `(3, 10]` | `|delta| × 0.34` |
/// | `(10, 30]`    | `|delta|² / 30`   |
/// | `(30, 90]`    | `|delta|² / 30`   |
/// | `> 90`        | `|delta| × 3`     |
///
/// The sign of `delta` is preserved.
pub fn fine_ctrl_scale(delta: f32) -> f32 {
    let sign = if delta > 0.0 { 1.0 } else { -1.0 };
    let mut magnitude = delta.abs();
    if (1.0..=3.0).contains(&magnitude) {
        magnitude = 1.0;
    } else if magnitude <= 10.0 {
        magnitude *= 0.34;
    } else if magnitude <= 30.0 {
        magnitude *= magnitude / 30.0;
    } else if magnitude <= 90.0 {
        magnitude *= magnitude / 30.0;
    } else {
        magnitude *= 3.0;
    }
    sign * magnitude
}
