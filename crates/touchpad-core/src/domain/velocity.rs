//! Accelerating pointer velocity for a held directional key.
//!
//! While a d-pad direction is held the pointer should start slowly and speed
//! up.  Each tick adds `1.2 × elapsed_ms / 50` units of the impulse to the
//! velocity, so at the default 50 ms tick the pointer gains 1.2 px/tick per
//! tick.  Each component stops growing once it reaches [`MAX_SPEED`].

use serde::{Deserialize, Serialize};

/// Largest absolute velocity component, in remote pixels per tick.
pub const MAX_SPEED: f32 = 500.0;

/// Acceleration per [`ACCEL_INTERVAL_MS`] of held time.
const ACCEL_PER_INTERVAL: f32 = 1.2;
const ACCEL_INTERVAL_MS: f32 = 50.0;

/// A unit direction from a d-pad key: each component is -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Impulse {
    pub dx: i8,
    pub dy: i8,
}

impl Impulse {
    pub const LEFT: Impulse = Impulse { dx: -1, dy: 0 };
    pub const RIGHT: Impulse = Impulse { dx: 1, dy: 0 };
    pub const UP: Impulse = Impulse { dx: 0, dy: -1 };
    pub const DOWN: Impulse = Impulse { dx: 0, dy: 1 };

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Pointer velocity in remote pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Integrates a constant [`Impulse`] into a growing [`Velocity`].
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityIntegrator {
    impulse: Impulse,
    velocity: Velocity,
}

impl VelocityIntegrator {
    /// Starts at rest, accelerating along `impulse`.
    pub fn new(impulse: Impulse) -> Self {
        Self {
            impulse,
            velocity: Velocity::default(),
        }
    }

    pub fn impulse(&self) -> Impulse {
        self.impulse
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Advances by one tick that lasted `elapsed_ms` and returns the new
    /// velocity, which the caller adds to the pointer position.
    pub fn step(&mut self, elapsed_ms: u64) -> Velocity {
        let scale = ACCEL_PER_INTERVAL * elapsed_ms as f32 / ACCEL_INTERVAL_MS;
        self.velocity.x = accelerate(self.velocity.x, scale * f32::from(self.impulse.dx));
        self.velocity.y = accelerate(self.velocity.y, scale * f32::from(self.impulse.dy));
        self.velocity
    }

    /// Brings the pointer to rest without changing direction.
    pub fn reset(&mut self) {
        self.velocity = Velocity::default();
    }
}

// A component already at the cap keeps its speed; one below it may overshoot
// by a single step and is then clamped back.
fn accelerate(component: f32, delta: f32) -> f32 {
    if component.abs() < MAX_SPEED {
        (component + delta).clamp(-MAX_SPEED, MAX_SPEED)
    } else {
        component
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_new_integrator_is_at_rest() {
        let v = VelocityIntegrator::new(Impulse::RIGHT);
        assert!(v.velocity().is_zero());
    }

    #[test]
    fn test_step_accelerates_along_impulse() {
        // Arrange
        let mut v = VelocityIntegrator::new(Impulse::RIGHT);

        // Act
        let first = v.step(50);
        let second = v.step(50);

        // Assert
        assert!(approx(first.x, 1.2));
        assert!(approx(second.x, 2.4));
        assert_eq!(second.y, 0.0);
    }

    #[test]
    fn test_step_scales_with_elapsed_time() {
        let mut v = VelocityIntegrator::new(Impulse::UP);
        let vel = v.step(100);
        assert!(approx(vel.y, -2.4));
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_velocity_is_capped() {
        let mut v = VelocityIntegrator::new(Impulse::LEFT);
        for _ in 0..1_000 {
            v.step(50);
        }
        assert_eq!(v.velocity().x, -MAX_SPEED);
    }

    #[test]
    fn test_reset_zeroes_velocity_and_keeps_impulse() {
        let mut v = VelocityIntegrator::new(Impulse::DOWN);
        v.step(50);
        v.step(50);

        v.reset();

        assert!(v.velocity().is_zero());
        assert_eq!(v.impulse(), Impulse::DOWN);
    }

    #[test]
    fn test_zero_impulse_never_moves() {
        let mut v = VelocityIntegrator::new(Impulse::default());
        assert!(v.step(50).is_zero());
        assert!(Impulse::default().is_zero());
    }
}
