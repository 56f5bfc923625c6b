//! Pose-driven garment overlay.
//!
//! Each camera frame comes with 33 body landmarks from an external pose estimator. The crate turns
//! them into an anatomical frame, draws a procedurally shaded garment fitted to it and composites
//! the result over the video:
//!
//! - Build a [`Catalog`] and a [`Compositor`]
//! - [`Compositor::start`], then feed frames to [`Compositor::on_frame`]
//! - Read the surface back with [`Compositor::frame`] or [`Compositor::snapshot_png`]
//!
//! Recorded sequences render offline through [`render_sequence`].
#![forbid(unsafe_code)]

pub mod compose;
pub mod config;
pub mod foundation;
pub mod garment;
pub mod pose;
pub mod render;

pub use crate::compose::compositor::{Compositor, CompositorState, FrameOutcome, SkipReason};
pub use crate::compose::video::VideoFrame;
pub use crate::config::{RenderConfig, TryOnConfig};
pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{TryOnError, TryOnResult};
pub use crate::foundation::math::{RandomSource, SplitMix64};
pub use crate::garment::catalog::{Catalog, GarmentDescriptor, GarmentStyle};
pub use crate::garment::color::{Rgb8, adjust_color};
pub use crate::garment::style::{StyleKind, render_garment};
pub use crate::pose::anatomy::{AnatomicalFrame, AnatomyBuilder, Proportions};
pub use crate::pose::landmark::{Landmark, LandmarkFrame, PoseLandmark};
pub use crate::pose::sequence::PoseSequence;
pub use crate::render::backend::FrameRGBA;
pub use crate::render::pipeline::{
    FrameSink, RenderStats, RenderThreading, RenderedFrame, SequenceJob, render_sequence,
    render_sequence_into,
};
