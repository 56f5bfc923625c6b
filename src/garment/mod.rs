//! Garment catalog, colors and the procedural style renderers.

pub mod catalog;
pub mod color;
/// Shared decoration layers (texture, shading, trims, flowers).
pub mod detail;
/// Closed outline paths per silhouette.
pub mod silhouette;
/// Style dispatch.
pub mod style;
