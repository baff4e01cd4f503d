//! Rotation state and pointer handling
//!
//! Everything here is plain numeric state with no rendering or platform
//! dependencies:
//! - `state`: angle, angular velocity, spin direction, touch gate
//! - `tracker`: pointer velocity estimation from timestamped samples
//! - `gesture`: pointer events to motion updates

pub mod gesture;
pub mod state;
pub mod tracker;

pub use gesture::{PointerEvent, PointerId, TouchController};
pub use state::{MotionState, SpinDirection};
pub use tracker::VelocityTracker;
