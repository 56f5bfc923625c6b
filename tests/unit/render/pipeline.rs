use super::*;
use crate::foundation::core::Rgba8;
use crate::pose::landmark::{Landmark, LandmarkFrame, PoseLandmark};

fn pose(shift: f32) -> LandmarkFrame {
    LandmarkFrame::empty()
        .with(PoseLandmark::LeftShoulder, Landmark::new(0.3 + shift, 0.3))
        .with(PoseLandmark::RightShoulder, Landmark::new(0.7 + shift, 0.3))
        .with(PoseLandmark::LeftHip, Landmark::new(0.35 + shift, 0.6))
        .with(PoseLandmark::RightHip, Landmark::new(0.65 + shift, 0.6))
}

fn sequence() -> PoseSequence {
    let mut missing = pose(0.0);
    missing.set(PoseLandmark::RightHip, None);
    PoseSequence::new(
        Canvas::new(320, 240).unwrap(),
        vec![
            Some(pose(0.0)),
            None,
            Some(pose(0.05)),
            Some(missing),
            Some(pose(-0.05)),
        ],
    )
}

fn run(garment: u32, seed: u64, threading: RenderThreading) -> TryOnResult<(Vec<RenderedFrame>, RenderStats)> {
    let seq = sequence();
    let background = VideoFrame::solid(32, 24, Rgba8::new(40, 40, 40, 255)).unwrap();
    let catalog = Catalog::builtin();
    let job = SequenceJob {
        sequence: &seq,
        background: &background,
        catalog: &catalog,
        garment: Some(garment),
        anatomy: AnatomyBuilder::default(),
        render: RenderConfig::default(),
        seed,
    };
    render_sequence(&job, &threading)
}

#[test]
fn sequential_run_reports_every_frame_in_order() {
    let (frames, stats) = run(5, 1, RenderThreading::default()).unwrap();
    assert_eq!(frames.len(), 5);
    assert!(frames.iter().enumerate().all(|(i, f)| f.index == i));
    assert_eq!(
        stats,
        RenderStats {
            frames_total: 5,
            frames_drawn: 3,
            frames_skipped: 2,
        }
    );
    assert!(frames.iter().all(|f| (f.frame.width, f.frame.height) == (320, 240)));
}

#[test]
fn parallel_matches_sequential() {
    let (seq_frames, seq_stats) = run(5, 9, RenderThreading::default()).unwrap();
    let threading = RenderThreading {
        parallel: true,
        chunk_size: 2,
        threads: Some(2),
    };
    let (par_frames, par_stats) = run(5, 9, threading).unwrap();
    assert_eq!(seq_stats, par_stats);
    for (a, b) in seq_frames.iter().zip(&par_frames) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.frame, b.frame);
    }
}

#[test]
fn seed_changes_random_decorations() {
    let (a, _) = run(5, 1, RenderThreading::default()).unwrap();
    let (b, _) = run(5, 2, RenderThreading::default()).unwrap();
    assert_ne!(a[0].frame, b[0].frame);
    // no person, no decorations
    assert_eq!(a[1].frame, b[1].frame);
}

#[test]
fn unknown_garment_is_rejected() {
    let err = run(99, 0, RenderThreading::default()).unwrap_err();
    assert!(matches!(err, TryOnError::Validation(_)));
}

#[test]
fn zero_threads_is_rejected() {
    let threading = RenderThreading {
        parallel: true,
        chunk_size: 4,
        threads: Some(0),
    };
    assert!(matches!(run(1, 0, threading), Err(TryOnError::Validation(_))));
}
