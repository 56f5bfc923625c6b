//! Offline rendering of recorded pose sequences.

use rayon::prelude::*;

use crate::compose::compositor::{Compositor, FrameOutcome};
use crate::compose::video::VideoFrame;
use crate::config::RenderConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{TryOnError, TryOnResult};
use crate::foundation::math::{SplitMix64, frame_seed};
use crate::garment::catalog::{Catalog, GarmentDescriptor};
use crate::pose::anatomy::AnatomyBuilder;
use crate::pose::sequence::PoseSequence;
use crate::render::backend::FrameRGBA;

/// Everything needed to render a pose sequence.
#[derive(Clone, Copy, Debug)]
pub struct SequenceJob<'a> {
    pub sequence: &'a PoseSequence,
    /// Painted under every frame.
    pub background: &'a VideoFrame,
    pub catalog: &'a Catalog,
    /// Garment id; the catalog default when `None`.
    pub garment: Option<u32>,
    pub anatomy: AnatomyBuilder,
    pub render: RenderConfig,
    /// Base seed; frame `i` draws its decorations from a stream derived from `(seed, i)`.
    pub seed: u64,
}

#[derive(Clone, Debug)]
/// Threading and chunking controls for sequence rendering.
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Frames rendered per batch before they are handed to the sink.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// One composited frame of a sequence.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    pub index: usize,
    pub frame: FrameRGBA,
    pub outcome: FrameOutcome,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Frames in the sequence.
    pub frames_total: u64,
    /// Frames with a garment drawn.
    pub frames_drawn: u64,
    /// Frames where the garment was skipped.
    pub frames_skipped: u64,
}

/// Consumer of rendered frames, called in sequence order.
pub trait FrameSink {
    fn push(&mut self, frame: RenderedFrame) -> TryOnResult<()>;
}

/// Sink that keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub frames: Vec<RenderedFrame>,
}

impl FrameSink for InMemorySink {
    fn push(&mut self, frame: RenderedFrame) -> TryOnResult<()> {
        self.frames.push(frame);
        Ok(())
    }
}

/// Render every frame of `job` and collect them in memory.
pub fn render_sequence(
    job: &SequenceJob<'_>,
    threading: &RenderThreading,
) -> TryOnResult<(Vec<RenderedFrame>, RenderStats)> {
    let mut sink = InMemorySink::default();
    let stats = render_sequence_into(job, threading, &mut sink)?;
    Ok((sink.frames, stats))
}

/// Render every frame of `job` into `sink`.
///
/// Output is identical for sequential and parallel runs with the same seed.
#[tracing::instrument(skip_all, fields(frames = job.sequence.len(), parallel = threading.parallel))]
pub fn render_sequence_into(
    job: &SequenceJob<'_>,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> TryOnResult<RenderStats> {
    let canvas = job.sequence.canvas()?;
    let garment = resolve_garment(job)?;
    let mut stats = RenderStats::default();

    if !threading.parallel {
        let mut compositor = worker_compositor(job, canvas, &garment);
        for index in 0..job.sequence.len() {
            let frame = render_one(&mut compositor, job, index)?;
            record(&mut stats, &frame);
            sink.push(frame)?;
        }
        return Ok(stats);
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = threading.chunk_size.max(1);
    let mut chunk_start = 0;
    while chunk_start < job.sequence.len() {
        let chunk_end = (chunk_start + chunk_size).min(job.sequence.len());
        let rendered = pool.install(|| {
            (chunk_start..chunk_end)
                .into_par_iter()
                .map_init(
                    || worker_compositor(job, canvas, &garment),
                    |compositor, index| render_one(compositor, job, index),
                )
                .collect::<Vec<_>>()
        });
        for item in rendered {
            let frame = item?;
            record(&mut stats, &frame);
            sink.push(frame)?;
        }
        chunk_start = chunk_end;
    }
    tracing::debug!(?stats, "sequence rendered");
    Ok(stats)
}

fn resolve_garment(job: &SequenceJob<'_>) -> TryOnResult<GarmentDescriptor> {
    let garment = match job.garment {
        Some(id) => job.catalog.get(id),
        None => job.catalog.default_garment(),
    };
    garment.cloned().ok_or_else(|| {
        TryOnError::validation(format!(
            "garment {:?} is not in the catalog",
            job.garment
        ))
    })
}

fn worker_compositor(
    job: &SequenceJob<'_>,
    canvas: Canvas,
    garment: &GarmentDescriptor,
) -> Compositor<SplitMix64> {
    let mut c = Compositor::with_rng(canvas, job.anatomy, SplitMix64::new(job.seed));
    c.start(job.catalog);
    c.wear(garment.clone());
    c
}

fn render_one(
    compositor: &mut Compositor<SplitMix64>,
    job: &SequenceJob<'_>,
    index: usize,
) -> TryOnResult<RenderedFrame> {
    compositor.set_rng(SplitMix64::new(frame_seed(job.seed, index as u64)));
    let landmarks = job.sequence.frames[index].as_ref();
    let outcome = compositor.on_frame(job.background, landmarks, &job.render)?;
    let frame = compositor
        .frame()
        .cloned()
        .ok_or_else(|| TryOnError::render("compositor produced no frame"))?;
    Ok(RenderedFrame {
        index,
        frame,
        outcome,
    })
}

fn record(stats: &mut RenderStats, frame: &RenderedFrame) {
    stats.frames_total += 1;
    if frame.outcome.garment_drawn() {
        stats.frames_drawn += 1;
    } else {
        stats.frames_skipped += 1;
    }
}

fn build_thread_pool(threads: Option<usize>) -> TryOnResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TryOnError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TryOnError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
