//! Frame compositing for live and recorded input.

pub mod compositor;
pub mod fps;
pub mod video;
