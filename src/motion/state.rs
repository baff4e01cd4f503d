//! Rotation state shared between pointer input and the frame loop
//!
//! Input handlers write it, the per-frame update decays it. The host is
//! expected to serialize the two (see `app::Spinner`).

use glam::Vec2;

use crate::consts::{TOUCH_SCALE_FACTOR, VELOCITY_DECAY, VELOCITY_SCALE};

/// Sign of the most recent drag
///
/// `Positive` is recorded when the (mirrored) drag sum is negative. Free spin
/// advances the angle *against* the recorded sign, so a positive direction
/// decreases the angle while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinDirection {
    #[default]
    Positive,
    Negative,
}

impl SpinDirection {
    /// +1.0 or -1.0
    pub fn sign(self) -> f32 {
        match self {
            SpinDirection::Positive => 1.0,
            SpinDirection::Negative => -1.0,
        }
    }

    /// Multiplier applied to angular velocity when advancing the angle
    #[inline]
    fn advance_sign(self) -> f32 {
        -self.sign()
    }
}

/// Current rotation of the scene
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    /// Rotation in degrees. Never normalized; wrapping happens when the
    /// rotation matrix is built.
    pub angle: f32,
    /// Degrees per frame, always >= 0
    pub angular_velocity: f32,
    /// Sign of the last drag
    pub direction: SpinDirection,
    /// True while a pointer is held down; freezes free spin
    pub touch_active: bool,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a drag of `(dx, dy)` observed at `pointer` inside a view of the
    /// given size.
    ///
    /// The delta is mirrored so that dragging "around" the center always
    /// turns the same way: `dx` flips below the horizontal midline and `dy`
    /// flips left of the vertical midline.
    pub fn on_drag_delta(
        &mut self,
        dx: f32,
        dy: f32,
        view_width: u32,
        view_height: u32,
        pointer: Vec2,
    ) {
        // Midlines use integer halving of the pixel size
        let mid_x = (view_width / 2) as f32;
        let mid_y = (view_height / 2) as f32;

        let dx = if pointer.y > mid_y { -dx } else { dx };
        let dy = if pointer.x < mid_x { -dy } else { dy };

        let sum = dx + dy;
        self.direction = if sum < 0.0 {
            SpinDirection::Positive
        } else {
            SpinDirection::Negative
        };
        self.angle += sum * TOUCH_SCALE_FACTOR;
    }

    /// Set angular velocity from a pointer velocity sample (units/second).
    ///
    /// This is a coarse proxy rather than a true angular velocity: the
    /// absolute components are summed and scaled down.
    pub fn on_velocity_sample(&mut self, x_velocity: f32, y_velocity: f32) {
        self.angular_velocity = (x_velocity.abs() + y_velocity.abs()) / VELOCITY_SCALE;
    }

    /// Advance one frame of free spin. No-op while touch is active.
    pub fn tick(&mut self) {
        if self.touch_active {
            return;
        }
        self.angular_velocity *= VELOCITY_DECAY;
        self.angle += self.angular_velocity * self.direction.advance_sign();
    }

    /// Multiply angular velocity by `factor` (expected >= 0)
    pub fn boost(&mut self, factor: f32) {
        self.angular_velocity *= factor;
    }

    pub fn set_touch_active(&mut self, active: bool) {
        self.touch_active = active;
    }

    /// Angle folded into (-360, 360), as used for the rotation matrix
    #[inline]
    pub fn wrapped_angle(&self) -> f32 {
        self.angle % 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_BOOST;
    use proptest::prelude::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_default_state() {
        let motion = MotionState::new();
        assert_eq!(motion.angle, 0.0);
        assert_eq!(motion.angular_velocity, 0.0);
        assert_eq!(motion.direction, SpinDirection::Positive);
        assert!(!motion.touch_active);
    }

    #[test]
    fn test_tick_decays_velocity() {
        let mut motion = MotionState {
            angular_velocity: 2.0,
            ..Default::default()
        };
        motion.tick();
        assert_eq!(motion.angular_velocity, 2.0 * 0.995);
    }

    #[test]
    fn test_tick_advances_against_direction() {
        let mut motion = MotionState {
            angular_velocity: 1.0,
            direction: SpinDirection::Negative,
            ..Default::default()
        };
        motion.tick();
        assert!((motion.angle - 0.995).abs() < EPS);

        let mut motion = MotionState {
            angular_velocity: 1.0,
            direction: SpinDirection::Positive,
            ..Default::default()
        };
        motion.tick();
        assert!((motion.angle + 0.995).abs() < EPS);
    }

    #[test]
    fn test_velocity_sample_scaling() {
        let mut motion = MotionState::new();
        motion.on_velocity_sample(300.0, 400.0);
        assert!((motion.angular_velocity - 0.7).abs() < EPS);

        // Signs are discarded
        motion.on_velocity_sample(-300.0, 400.0);
        assert!((motion.angular_velocity - 0.7).abs() < EPS);
    }

    #[test]
    fn test_boost_default_factor() {
        let mut motion = MotionState {
            angular_velocity: 1.0,
            ..Default::default()
        };
        motion.boost(DEFAULT_BOOST);
        assert!((motion.angular_velocity - 1.3).abs() < EPS);
    }

    #[test]
    fn test_touch_active_freezes_motion() {
        let mut motion = MotionState {
            angle: 42.0,
            angular_velocity: 3.0,
            ..Default::default()
        };
        motion.set_touch_active(true);
        for _ in 0..100 {
            motion.tick();
        }
        assert_eq!(motion.angle, 42.0);
        assert_eq!(motion.angular_velocity, 3.0);

        motion.set_touch_active(false);
        motion.tick();
        assert!(motion.angular_velocity < 3.0);
    }

    #[test]
    fn test_drag_upper_left_flips_dy() {
        // Pointer above the horizontal midline and left of the vertical one
        let mut motion = MotionState::new();
        motion.on_drag_delta(10.0, -4.0, 720, 1280, Vec2::new(100.0, 200.0));

        assert_eq!(motion.direction, SpinDirection::Negative);
        assert!((motion.angle - 14.0 * TOUCH_SCALE_FACTOR).abs() < EPS);
    }

    #[test]
    fn test_drag_lower_right_flips_dx() {
        let mut motion = MotionState::new();
        motion.on_drag_delta(10.0, -4.0, 720, 1280, Vec2::new(600.0, 1000.0));

        // dx -> -10, dy stays -4
        assert_eq!(motion.direction, SpinDirection::Positive);
        assert!((motion.angle + 14.0 * TOUCH_SCALE_FACTOR).abs() < EPS);
    }

    #[test]
    fn test_drag_midline_uses_integer_half() {
        // Odd height: midline is 50, so y = 50.25 is already "below"
        let mut motion = MotionState::new();
        motion.on_drag_delta(1.0, 0.0, 100, 101, Vec2::new(80.0, 50.25));
        assert!(motion.angle < 0.0);
    }

    #[test]
    fn test_zero_drag_sets_negative_direction() {
        let mut motion = MotionState::new();
        motion.on_drag_delta(0.0, 0.0, 100, 100, Vec2::new(10.0, 10.0));
        assert_eq!(motion.direction, SpinDirection::Negative);
        assert_eq!(motion.angle, 0.0);
    }

    #[test]
    fn test_angle_not_normalized() {
        let mut motion = MotionState {
            angle: 359.0,
            angular_velocity: 5.0,
            direction: SpinDirection::Negative,
            ..Default::default()
        };
        motion.tick();
        assert!(motion.angle > 360.0);
        assert!((motion.wrapped_angle() - (motion.angle - 360.0)).abs() < EPS);
    }

    proptest! {
        #[test]
        fn prop_single_tick_decay(v in 0.0f32..1.0e4) {
            let mut motion = MotionState { angular_velocity: v, ..Default::default() };
            motion.tick();
            prop_assert_eq!(motion.angular_velocity, v * 0.995);
        }

        #[test]
        fn prop_decay_never_negative(v in 0.0f32..1.0e4, ticks in 1usize..3000) {
            let mut motion = MotionState { angular_velocity: v, ..Default::default() };
            let mut previous = v;
            for _ in 0..ticks {
                motion.tick();
                prop_assert!(motion.angular_velocity >= 0.0);
                prop_assert!(motion.angular_velocity <= previous);
                previous = motion.angular_velocity;
            }
        }

        #[test]
        fn prop_held_ticks_are_noops(
            angle in -1.0e4f32..1.0e4,
            v in 0.0f32..100.0,
            ticks in 0usize..500,
        ) {
            let mut motion = MotionState {
                angle,
                angular_velocity: v,
                touch_active: true,
                ..Default::default()
            };
            for _ in 0..ticks {
                motion.tick();
            }
            prop_assert_eq!(motion.angle, angle);
            prop_assert_eq!(motion.angular_velocity, v);
        }
    }
}
