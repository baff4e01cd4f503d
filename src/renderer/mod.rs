//! Rendering
//!
//! `composer` and `transform` are pure matrix code; `pipeline` is the
//! WebGPU backend that consumes the composed draw calls.

pub mod composer;
pub mod pipeline;
pub mod shapes;
pub mod transform;
pub mod vertex;

pub use composer::{DrawCall, DrawSink, FrameComposer};
pub use pipeline::{RenderError, RenderState};
pub use shapes::{SHAPES, Shape};
