//! Per-frame compositing: video, optional skeleton, garment.

use std::time::Instant;

use crate::compose::fps::{self, FpsMeter};
use crate::compose::video::VideoFrame;
use crate::config::RenderConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{TryOnError, TryOnResult};
use crate::foundation::math::{RandomSource, SplitMix64};
use crate::garment::catalog::{Catalog, GarmentDescriptor};
use crate::garment::style::{StyleKind, render_garment};
use crate::pose::anatomy::AnatomyBuilder;
use crate::pose::landmark::{LandmarkFrame, PoseLandmark};
use crate::pose::skeleton::skeleton_overlay;
use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};

/// Lifecycle of a compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositorState {
    /// Not started; frames are ignored.
    Idle,
    /// Started; every frame is composited.
    Rendering,
}

/// Why a frame carries no garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The compositor has not been started; nothing was drawn.
    Idle,
    /// No person was detected in this frame.
    NoLandmarks,
    /// No garment is selected.
    NoGarment,
    /// A shoulder or hip is untracked.
    MissingAnchor(PoseLandmark),
}

/// Result of one [`Compositor::on_frame`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn(StyleKind),
    Skipped(SkipReason),
}

impl FrameOutcome {
    pub fn garment_drawn(self) -> bool {
        matches!(self, Self::Drawn(_))
    }
}

/// Draws each incoming camera frame with the selected garment fitted to the tracked pose.
///
/// Holds no per-frame geometry between calls: only the selected garment, the catalog it came from
/// and the last composited surface (for snapshots) survive a frame.
pub struct Compositor<R: RandomSource = SplitMix64> {
    backend: Box<dyn RenderBackend>,
    anatomy: AnatomyBuilder,
    rng: R,
    state: CompositorState,
    catalog: Option<Catalog>,
    garment: Option<GarmentDescriptor>,
    last_frame: Option<FrameRGBA>,
    fps: FpsMeter,
}

impl Compositor<SplitMix64> {
    /// CPU compositor with a clock-seeded random source.
    pub fn new(canvas: Canvas, anatomy: AnatomyBuilder) -> Self {
        Self::with_rng(canvas, anatomy, SplitMix64::from_clock())
    }
}

impl<R: RandomSource> Compositor<R> {
    /// CPU compositor drawing decorations from `rng`.
    pub fn with_rng(canvas: Canvas, anatomy: AnatomyBuilder, rng: R) -> Self {
        let backend = create_backend(BackendKind::Cpu, canvas, &RenderSettings::default());
        Self::with_backend(backend, anatomy, rng)
    }

    pub fn with_backend(backend: Box<dyn RenderBackend>, anatomy: AnatomyBuilder, rng: R) -> Self {
        Self {
            backend,
            anatomy,
            rng,
            state: CompositorState::Idle,
            catalog: None,
            garment: None,
            last_frame: None,
            fps: FpsMeter::new(Instant::now()),
        }
    }

    /// Replace the decoration random source.
    pub fn set_rng(&mut self, rng: R) {
        self.rng = rng;
    }

    pub fn state(&self) -> CompositorState {
        self.state
    }

    pub fn canvas(&self) -> Canvas {
        self.backend.canvas()
    }

    /// Enter the rendering state with `catalog`, selecting its default garment.
    pub fn start(&mut self, catalog: &Catalog) {
        self.garment = catalog.default_garment().cloned();
        self.catalog = Some(catalog.clone());
        self.state = CompositorState::Rendering;
        self.fps = FpsMeter::new(Instant::now());
        tracing::debug!(
            garment = self.garment.as_ref().map(|g| g.id),
            "compositor started"
        );
    }

    /// Return to idle. The selection is kept for the next start.
    pub fn stop(&mut self) {
        self.state = CompositorState::Idle;
    }

    /// Select garment `id` from the started catalog.
    pub fn select_garment(&mut self, id: u32) -> TryOnResult<&GarmentDescriptor> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| TryOnError::validation("compositor has not been started"))?;
        let garment = catalog
            .get(id)
            .ok_or_else(|| TryOnError::validation(format!("unknown garment id {id}")))?;
        Ok(self.garment.insert(garment.clone()))
    }

    /// Wear `garment` directly, bypassing the catalog lookup.
    pub fn wear(&mut self, garment: GarmentDescriptor) {
        self.garment = Some(garment);
    }

    /// Drop the current garment; frames keep showing video (and skeleton).
    pub fn clear_garment(&mut self) {
        self.garment = None;
    }

    pub fn garment(&self) -> Option<&GarmentDescriptor> {
        self.garment.as_ref()
    }

    /// Composite one camera frame.
    ///
    /// Untracked bodies and missing anchors only skip the garment; the video (and skeleton, when
    /// enabled) is still drawn. Errors are reserved for backend failures.
    #[tracing::instrument(level = "trace", skip_all, fields(tracked = landmarks.is_some()))]
    pub fn on_frame(
        &mut self,
        video: &VideoFrame,
        landmarks: Option<&LandmarkFrame>,
        config: &RenderConfig,
    ) -> TryOnResult<FrameOutcome> {
        if self.state == CompositorState::Idle {
            return Ok(FrameOutcome::Skipped(SkipReason::Idle));
        }
        let started = Instant::now();
        let canvas = self.backend.canvas();

        self.backend.begin_frame();
        self.backend.draw_image(video.as_image())?;

        let outcome = match landmarks {
            None => FrameOutcome::Skipped(SkipReason::NoLandmarks),
            Some(frame) => {
                if config.show_skeleton {
                    self.backend.draw_list(&skeleton_overlay(frame, canvas))?;
                }
                self.draw_garment(frame, canvas, config)?
            }
        };

        self.last_frame = Some(self.backend.finish_frame()?);
        fps::check_frame_time(started.elapsed());
        self.fps.tick(Instant::now());
        Ok(outcome)
    }

    fn draw_garment(
        &mut self,
        frame: &LandmarkFrame,
        canvas: Canvas,
        config: &RenderConfig,
    ) -> TryOnResult<FrameOutcome> {
        let Some(garment) = &self.garment else {
            return Ok(FrameOutcome::Skipped(SkipReason::NoGarment));
        };
        let anatomy = match self
            .anatomy
            .build(frame, canvas, f64::from(config.scale()))
        {
            Ok(a) => a,
            Err(TryOnError::MissingAnchor(slot)) => {
                tracing::debug!(?slot, "anchor missing, garment skipped");
                return Ok(FrameOutcome::Skipped(SkipReason::MissingAnchor(slot)));
            }
            Err(e) => return Err(e),
        };
        let kind = garment.style.kind();
        let list = render_garment(&anatomy, garment, &mut self.rng);
        self.backend.draw_list(&list)?;
        Ok(FrameOutcome::Drawn(kind))
    }

    /// Last composited surface.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.last_frame.as_ref()
    }

    /// Last published frames-per-second value.
    pub fn fps(&self) -> Option<u32> {
        self.fps.fps()
    }

    /// Encode the last composited surface as PNG.
    pub fn snapshot_png(&self) -> TryOnResult<Vec<u8>> {
        self.last_frame
            .as_ref()
            .ok_or_else(|| TryOnError::validation("no frame has been composited yet"))?
            .to_png()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
