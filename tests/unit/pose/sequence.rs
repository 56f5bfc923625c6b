use super::*;
use crate::pose::landmark::{LANDMARK_COUNT, Landmark, PoseLandmark};

fn slots_json(n: usize) -> serde_json::Value {
    let mut slots = vec![serde_json::Value::Null; n];
    if n > 11 {
        slots[11] = serde_json::json!({ "x": 0.3, "y": 0.3, "visibility": 0.9 });
    }
    serde_json::Value::Array(slots)
}

#[test]
fn parses_frames_and_gaps() {
    let json = serde_json::json!({
        "width": 640,
        "height": 480,
        "frames": [slots_json(LANDMARK_COUNT), null]
    });
    let seq = PoseSequence::from_reader(json.to_string().as_bytes()).unwrap();
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.canvas().unwrap(), Canvas::new(640, 480).unwrap());
    let first = seq.frames[0].as_ref().unwrap();
    assert_eq!(
        first.get(PoseLandmark::LeftShoulder),
        Some(&Landmark::with_visibility(0.3, 0.3, 0.9))
    );
    assert!(seq.frames[1].is_none());
}

#[test]
fn wrong_slot_count_is_rejected() {
    let json = serde_json::json!({ "width": 64, "height": 64, "frames": [slots_json(32)] });
    let err = PoseSequence::from_reader(json.to_string().as_bytes()).unwrap_err();
    assert!(matches!(err, TryOnError::Serde(ref m) if m.contains("33")), "{err}");
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let json = serde_json::json!({ "width": 0, "height": 64, "frames": [] });
    assert!(matches!(
        PoseSequence::from_reader(json.to_string().as_bytes()),
        Err(TryOnError::Validation(_))
    ));
}

#[test]
fn json_round_trip() {
    let frame = LandmarkFrame::empty().with(PoseLandmark::Nose, Landmark::new(0.5, 0.1));
    let seq = PoseSequence::new(Canvas::new(10, 20).unwrap(), vec![Some(frame), None]);
    let back = PoseSequence::from_reader(seq.to_json().unwrap().as_bytes()).unwrap();
    assert_eq!(back, seq);
    assert!(!back.is_empty());
}
