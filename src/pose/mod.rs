//! Body keypoints and the anatomical frame derived from them.

/// Per-frame anchors and measurements shared by all garment styles.
pub mod anatomy;
/// The 33-slot landmark vocabulary.
pub mod landmark;
/// Recorded keypoint streams.
pub mod sequence;
/// Debug skeleton overlay.
pub mod skeleton;
