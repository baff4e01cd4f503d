//! Host bridge
//!
//! [`Spinner`] is the one object a host talks to. It owns the motion state
//! and forwards surface, frame and pointer callbacks to the right place.
//!
//! The host must not call into a `Spinner` from two threads at once. On the
//! web it lives in an `Rc<RefCell<_>>` driven by browser callbacks, which
//! are already serialized; a multi-threaded host should wrap it in a mutex.

use glam::{Mat4, Vec2};

use crate::motion::{MotionState, PointerEvent, PointerId, TouchController};
use crate::renderer::{DrawSink, FrameComposer};
use crate::settings::Settings;

/// Device pixels per CSS pixel
///
/// Surface size and pointer positions must be scaled by the same ratio, or
/// the drag midlines drift away from the drawn center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRatio(pub f32);

impl PixelRatio {
    /// Surface size in pixels for an element of the given CSS size
    pub fn surface_size(self, css_width: i32, css_height: i32) -> (u32, u32) {
        (
            (css_width.max(0) as f32 * self.0) as u32,
            (css_height.max(0) as f32 * self.0) as u32,
        )
    }

    /// Pointer position in surface pixels
    pub fn surface_pos(self, css_x: i32, css_y: i32) -> (f32, f32) {
        (css_x as f32 * self.0, css_y as f32 * self.0)
    }
}

impl Default for PixelRatio {
    fn default() -> Self {
        Self(1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Spinner {
    motion: MotionState,
    touch: TouchController,
    composer: FrameComposer,
    settings: Settings,
    surface_ready: bool,
    frame_count: u64,
}

impl Spinner {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The drawing surface exists; frames may be produced once it is sized
    pub fn on_surface_ready(&mut self) {
        self.surface_ready = true;
        log::info!("Surface ready");
    }

    /// Surface size in pixels. Pointer positions must use the same units.
    pub fn on_surface_resized(&mut self, width: u32, height: u32) {
        self.composer.on_viewport_resize(width, height);
    }

    /// Produce one frame into `sink`. Returns the frame transform, or
    /// `None` if the surface is not ready or not sized yet.
    pub fn on_frame_tick(&mut self, sink: &mut impl DrawSink) -> Option<Mat4> {
        if !self.surface_ready {
            return None;
        }
        let mvp = self.composer.render_frame(&mut self.motion, sink)?;
        self.frame_count += 1;
        Some(mvp)
    }

    /// Only the first pointer down drives the spin; others are ignored
    /// until it lifts
    pub fn on_pointer_down(&mut self, id: PointerId, x: f32, y: f32, time_ms: f64) {
        self.pointer(PointerEvent::Down {
            id,
            pos: Vec2::new(x, y),
            time_ms,
        });
    }

    pub fn on_pointer_move(&mut self, id: PointerId, x: f32, y: f32, time_ms: f64) {
        self.pointer(PointerEvent::Move {
            id,
            pos: Vec2::new(x, y),
            time_ms,
        });
    }

    pub fn on_pointer_up(&mut self, id: PointerId) {
        self.pointer(PointerEvent::Up { id });
    }

    pub fn on_pointer_cancel(&mut self, id: PointerId) {
        self.pointer(PointerEvent::Cancel { id });
    }

    /// Kick the spin by the configured boost factor
    pub fn boost(&mut self) {
        self.motion.boost(self.settings.boost_factor);
        log::debug!(
            "Boost x{} -> velocity {:.3}",
            self.settings.boost_factor,
            self.motion.angular_velocity
        );
    }

    fn pointer(&mut self, event: PointerEvent) {
        let view = self.composer.viewport();
        self.touch.handle(event, &mut self.motion, view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TOUCH_SCALE_FACTOR;
    use crate::renderer::{DrawCall, Shape};

    fn ready_spinner() -> Spinner {
        let mut spinner = Spinner::new(Settings::default());
        spinner.on_surface_ready();
        spinner.on_surface_resized(720, 1280);
        spinner
    }

    /// Records only the matrices handed to the draw boundary
    #[derive(Default)]
    struct MatrixCapture {
        matrices: Vec<Mat4>,
        velocities: Vec<f32>,
    }

    impl DrawSink for MatrixCapture {
        fn draw(&mut self, _shape_index: usize, _shape: &Shape, mvp: &Mat4, velocity: f32) {
            self.matrices.push(*mvp);
            self.velocities.push(velocity);
        }
    }

    #[test]
    fn test_no_frames_until_ready() {
        let mut spinner = Spinner::new(Settings::default());
        let mut draws: Vec<DrawCall> = Vec::new();
        assert!(spinner.on_frame_tick(&mut draws).is_none());

        spinner.on_surface_resized(100, 100);
        assert!(spinner.on_frame_tick(&mut draws).is_none());

        spinner.on_surface_ready();
        assert!(spinner.on_frame_tick(&mut draws).is_some());
        assert_eq!(draws.len(), 2);
        assert_eq!(spinner.frame_count(), 1);
    }

    #[test]
    fn test_drag_then_release_spins_down() {
        let mut spinner = ready_spinner();
        spinner.on_pointer_down(0, 600.0, 300.0, 0.0);
        for i in 1..=5 {
            spinner.on_pointer_move(0, 600.0, 300.0 + i as f32 * 8.0, i as f64 * 16.0);
        }

        // Held: frames don't move the angle
        let held_angle = spinner.motion().angle;
        let mut capture = MatrixCapture::default();
        spinner.on_frame_tick(&mut capture);
        assert_eq!(spinner.motion().angle, held_angle);

        spinner.on_pointer_up(0);
        let released_velocity = spinner.motion().angular_velocity;
        assert!(released_velocity > 0.0);

        for _ in 0..200 {
            spinner.on_frame_tick(&mut capture);
        }
        assert!(spinner.motion().angular_velocity < released_velocity);
        assert_ne!(spinner.motion().angle, held_angle);
        assert_eq!(capture.matrices.len(), 201 * 2);
        assert!(capture.velocities.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_drag_uses_surface_midlines() {
        let mut spinner = ready_spinner();
        spinner.on_pointer_down(0, 100.0, 204.0, 0.0);
        spinner.on_pointer_move(0, 110.0, 200.0, 16.0);
        assert!((spinner.motion().angle - 14.0 * TOUCH_SCALE_FACTOR).abs() < 1e-5);
    }

    #[test]
    fn test_boost_uses_settings() {
        let mut spinner = Spinner::new(Settings {
            boost_factor: 2.0,
            ..Default::default()
        });
        spinner.on_pointer_down(0, 0.0, 0.0, 0.0);
        spinner.on_pointer_move(0, 10.0, 0.0, 10.0);
        let before = spinner.motion().angular_velocity;
        spinner.boost();
        assert!((spinner.motion().angular_velocity - before * 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut spinner = ready_spinner();
        spinner.on_pointer_down(0, 10.0, 10.0, 0.0);
        assert!(spinner.motion().touch_active);
        spinner.on_pointer_cancel(0);
        assert!(!spinner.motion().touch_active);
    }

    #[test]
    fn test_second_finger_does_not_jump_the_spin() {
        let mut spinner = ready_spinner();
        spinner.on_pointer_down(0, 600.0, 300.0, 0.0);
        spinner.on_pointer_move(0, 600.0, 302.0, 16.0);
        let step = spinner.motion().angle;

        spinner.on_pointer_down(1, 100.0, 1000.0, 20.0);
        spinner.on_pointer_move(0, 600.0, 304.0, 32.0);
        assert!((spinner.motion().angle - 2.0 * step).abs() < 1e-5);

        spinner.on_pointer_up(1);
        assert!(spinner.motion().touch_active);

        spinner.on_pointer_up(0);
        assert!(!spinner.motion().touch_active);
    }

    #[test]
    fn test_pixel_ratio_keeps_midlines_aligned() {
        for ratio in [PixelRatio(1.0), PixelRatio(1.5), PixelRatio(2.0)] {
            let (width, height) = ratio.surface_size(400, 300);
            let (x, y) = ratio.surface_pos(200, 150);
            assert_eq!(x, (width / 2) as f32);
            assert_eq!(y, (height / 2) as f32);
        }
        assert_eq!(PixelRatio(2.0).surface_size(-5, 10), (0, 20));
    }
}
