//! Rendering: backend-agnostic draw lists, the CPU rasterizer and batch rendering.

/// Frame readback type and backend trait.
pub mod backend;
/// `vello_cpu` backend.
pub mod cpu;
/// Sequence rendering, optionally parallel.
pub mod pipeline;
/// Draw operations.
pub mod plan;
