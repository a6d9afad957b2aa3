//! Frames and the diffing renderer that draws them

mod frame;
mod renderer;

pub use frame::Frame;
pub use renderer::{RenderStats, Renderer};
