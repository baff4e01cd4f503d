//! Trispin - two triangles you can spin with a drag
//!
//! Core modules:
//! - `motion`: Rotation state, pointer velocity tracking, drag handling
//! - `renderer`: Frame composition and the WebGPU backend
//! - `app`: Host bridge tying pointer input and frame ticks together
//! - `settings`: User preferences

pub mod app;
pub mod motion;
pub mod renderer;
pub mod settings;

pub use app::{PixelRatio, Spinner};
pub use motion::{MotionState, PointerEvent, PointerId, SpinDirection};
pub use renderer::{DrawCall, DrawSink, FrameComposer};
pub use settings::{PresentModePreference, Settings};

/// Tuning constants
pub mod consts {
    /// Degrees of rotation per unit of drag (empirical sensitivity)
    pub const TOUCH_SCALE_FACTOR: f32 = 180.0 / 320.0 / 3.0;
    /// Per-frame multiplier applied to angular velocity while spinning freely
    pub const VELOCITY_DECAY: f32 = 0.995;
    /// Pointer velocity (units/s) is divided by this to get degrees per frame
    pub const VELOCITY_SCALE: f32 = 1000.0;
    /// Default multiplier for a user-triggered kick
    pub const DEFAULT_BOOST: f32 = 1.3;

    /// Projection frustum
    pub const NEAR_PLANE: f32 = 3.0;
    pub const FAR_PLANE: f32 = 7.0;

    /// Camera sits on the -z axis looking at the origin
    pub const CAMERA_EYE: [f32; 3] = [0.0, 0.0, -3.0];
    pub const CAMERA_UP: [f32; 3] = [0.0, 1.0, 0.0];
}
