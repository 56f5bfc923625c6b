use super::*;
use kurbo::Shape;

use crate::foundation::core::Canvas;
use crate::pose::anatomy::AnatomyBuilder;
use crate::pose::landmark::{Landmark, LandmarkFrame, PoseLandmark};

fn frame_at(scale: f64) -> AnatomicalFrame {
    let f = LandmarkFrame::empty()
        .with(PoseLandmark::LeftShoulder, Landmark::new(0.3, 0.3))
        .with(PoseLandmark::RightShoulder, Landmark::new(0.7, 0.3))
        .with(PoseLandmark::LeftHip, Landmark::new(0.35, 0.6))
        .with(PoseLandmark::RightHip, Landmark::new(0.65, 0.6));
    AnatomyBuilder::default()
        .build(&f, Canvas::new(1280, 720).unwrap(), scale)
        .unwrap()
}

#[test]
fn every_silhouette_is_closed() {
    for scale in [0.5, 1.0, 2.0] {
        let a = frame_at(scale);
        for (name, path) in [
            ("elegant", elegant_gown_path(&a)),
            ("casual", casual_dress_path(&a)),
            ("party", party_dress_path(&a)),
        ] {
            assert!(is_closed(&path, 1e-9), "{name} at scale {scale} is not closed");
        }
    }
}

#[test]
fn casual_width_tracks_dress_width() {
    let a = frame_at(1.0);
    let bbox = casual_dress_path(&a).bounding_box();
    let expected = a.shoulder_width * 1.4;
    assert!(
        (bbox.width() - expected).abs() <= expected * 0.05,
        "bbox width {} vs {expected}",
        bbox.width()
    );
    assert!(bbox.max_y() <= a.hem_y + 1e-6);
    assert!(bbox.min_y() < a.shoulder_center.y);
}

#[test]
fn gown_reaches_below_its_hem_line() {
    let a = frame_at(1.0);
    let bbox = elegant_gown_path(&a).bounding_box();
    assert!(bbox.max_y() > a.hem_y);
    assert!((bbox.center().x - a.hip_center.x).abs() < a.dress_width * 0.1);
}

#[test]
fn party_hem_spans_the_dress_width() {
    let a = frame_at(1.0);
    let hem = party_hem(&a);
    assert!((hem.p0.x - hem.p2.x - a.dress_width).abs() < 1e-9);
    assert!(party_dress_path(&a).bounding_box().width() >= a.dress_width);
}

#[test]
fn open_paths_are_not_closed() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((10.0, 0.0));
    assert!(!is_closed(&p, 1e-6));
    p.close_path();
    assert!(!is_closed(&p, 1e-6));
    assert!(!is_closed(&BezPath::new(), 1e-6));
}
