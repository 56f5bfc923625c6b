use crate::foundation::core::{Canvas, Rgba8};
use crate::pose::landmark::{LandmarkFrame, PoseLandmark};
use crate::render::plan::DrawList;

/// Bone connections drawn by the skeleton debug overlay.
pub const SKELETON_BONES: [(PoseLandmark, PoseLandmark); 12] = [
    // shoulders
    (PoseLandmark::LeftShoulder, PoseLandmark::RightShoulder),
    // arms
    (PoseLandmark::LeftShoulder, PoseLandmark::LeftElbow),
    (PoseLandmark::LeftElbow, PoseLandmark::LeftWrist),
    (PoseLandmark::RightShoulder, PoseLandmark::RightElbow),
    (PoseLandmark::RightElbow, PoseLandmark::RightWrist),
    // torso
    (PoseLandmark::LeftShoulder, PoseLandmark::LeftHip),
    (PoseLandmark::RightShoulder, PoseLandmark::RightHip),
    (PoseLandmark::LeftHip, PoseLandmark::RightHip),
    // legs
    (PoseLandmark::LeftHip, PoseLandmark::LeftKnee),
    (PoseLandmark::LeftKnee, PoseLandmark::LeftAnkle),
    (PoseLandmark::RightHip, PoseLandmark::RightKnee),
    (PoseLandmark::RightKnee, PoseLandmark::RightAnkle),
];

const BONE_COLOR: Rgba8 = Rgba8::new(0, 255, 0, 128);
const JOINT_COLOR: Rgba8 = Rgba8::new(255, 0, 0, 153);
const JOINT_RADIUS: f64 = 4.0;

/// Debug overlay: every bone whose two ends are tracked, then a dot on every tracked joint.
///
/// Visibility is ignored so low-confidence points stay inspectable.
pub fn skeleton_overlay(frame: &LandmarkFrame, canvas: Canvas) -> DrawList {
    let mut list = DrawList::new();
    for (from, to) in SKELETON_BONES {
        if let (Some(a), Some(b)) = (frame.get(from), frame.get(to)) {
            list.stroke_line(a.to_pixel(canvas), b.to_pixel(canvas), BONE_COLOR, 2.0, 1.0);
        }
    }
    for (_, landmark) in frame.iter() {
        list.fill_circle(landmark.to_pixel(canvas), JOINT_RADIUS, JOINT_COLOR, 1.0);
    }
    list
}

#[cfg(test)]
#[path = "../../tests/unit/pose/skeleton.rs"]
mod tests;
