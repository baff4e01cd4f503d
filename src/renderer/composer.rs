//! Per-frame transform composition
//!
//! Reads the motion state, builds projection × view × rotation and hands
//! one draw per shape to a [`DrawSink`]. No GPU types appear here so the
//! whole matrix pipeline can be exercised in tests.

use glam::Mat4;

use super::shapes::{SHAPES, Shape};
use super::transform::{rotation_matrix, view_matrix, viewport_projection};
use crate::motion::MotionState;

/// One shape draw for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    /// Index into [`SHAPES`]
    pub shape_index: usize,
    pub color_index: usize,
    pub mvp: Mat4,
    /// Angular velocity at draw time, for velocity-dependent shading
    pub velocity: f32,
}

/// Receives draw calls from [`FrameComposer::render_frame`]
pub trait DrawSink {
    fn draw(&mut self, shape_index: usize, shape: &Shape, mvp: &Mat4, velocity: f32);
}

/// Collects draw calls for later submission
impl DrawSink for Vec<DrawCall> {
    fn draw(&mut self, shape_index: usize, shape: &Shape, mvp: &Mat4, velocity: f32) {
        self.push(DrawCall {
            shape_index,
            color_index: shape.color_index,
            mvp: *mvp,
            velocity,
        });
    }
}

/// Builds the frame transform and issues the draws
#[derive(Debug, Clone, Default)]
pub struct FrameComposer {
    /// Cached until the viewport changes; `None` before the first resize
    projection: Option<Mat4>,
    viewport: (u32, u32),
}

impl FrameComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projection(&self) -> Option<Mat4> {
        self.projection
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Recompute the projection for a new surface size. Zero-sized
    /// surfaces keep the previous projection.
    pub fn on_viewport_resize(&mut self, width: u32, height: u32) {
        match viewport_projection(width, height) {
            Some(projection) => {
                self.projection = Some(projection);
                self.viewport = (width, height);
                log::info!("Viewport resized to {}x{}", width, height);
            }
            None => log::warn!("Ignoring zero-sized viewport {}x{}", width, height),
        }
    }

    /// Advance the motion state one frame and draw every shape.
    ///
    /// Returns the final transform, or `None` (without touching `motion`)
    /// if no viewport has been set yet.
    pub fn render_frame(
        &mut self,
        motion: &mut MotionState,
        sink: &mut impl DrawSink,
    ) -> Option<Mat4> {
        let projection = self.projection?;
        let base = projection * view_matrix();

        if !motion.touch_active {
            motion.tick();
        }

        let mvp = base * rotation_matrix(motion.angle);
        for (index, shape) in SHAPES.iter().enumerate() {
            sink.draw(index, shape, &mvp, motion.angular_velocity);
        }
        Some(mvp)
    }
}
