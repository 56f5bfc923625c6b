use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{TryOnError, TryOnResult};

/// Number of slots in a [`LandmarkFrame`].
pub const LANDMARK_COUNT: usize = 33;

/// Fixed anatomical vocabulary of the 33-point body model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// All landmarks in index order.
    pub const ALL: [Self; LANDMARK_COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Slot index of this landmark.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Landmark for slot `index`, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// One tracked body point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized X coordinate (0.0 to 1.0 across the frame width).
    pub x: f32,
    /// Normalized Y coordinate (0.0 to 1.0 down the frame height).
    pub y: f32,
    /// Detector confidence that the point is visible (0.0 to 1.0).
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

fn full_visibility() -> f32 {
    1.0
}

impl Landmark {
    /// Fully visible landmark at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            visibility: 1.0,
        }
    }

    /// Landmark with an explicit visibility score.
    pub fn with_visibility(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    /// Whether the point is usable: finite coordinates and visibility at or above `threshold`.
    pub fn is_usable(&self, threshold: f32) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.visibility >= threshold
    }

    /// Pixel-space position on `canvas`.
    pub fn to_pixel(&self, canvas: Canvas) -> Point {
        Point::new(
            f64::from(self.x) * canvas.width_f64(),
            f64::from(self.y) * canvas.height_f64(),
        )
    }
}

/// Fixed-length per-frame set of landmarks; `None` marks an untracked slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<Landmark>>", into = "Vec<Option<Landmark>>")]
pub struct LandmarkFrame {
    slots: [Option<Landmark>; LANDMARK_COUNT],
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self::empty()
    }
}

impl LandmarkFrame {
    /// Frame with every slot untracked.
    pub fn empty() -> Self {
        Self {
            slots: [None; LANDMARK_COUNT],
        }
    }

    /// Landmark in `slot`, if tracked.
    pub fn get(&self, slot: PoseLandmark) -> Option<&Landmark> {
        self.slots[slot.index()].as_ref()
    }

    /// Landmark in `slot` when usable at `threshold`.
    pub fn usable(&self, slot: PoseLandmark, threshold: f32) -> Option<&Landmark> {
        self.get(slot).filter(|l| l.is_usable(threshold))
    }

    /// Replace a slot.
    pub fn set(&mut self, slot: PoseLandmark, landmark: Option<Landmark>) {
        self.slots[slot.index()] = landmark;
    }

    /// Builder-style [`LandmarkFrame::set`] for a tracked point.
    pub fn with(mut self, slot: PoseLandmark, landmark: Landmark) -> Self {
        self.set(slot, Some(landmark));
        self
    }

    /// Tracked landmarks with their slot.
    pub fn iter(&self) -> impl Iterator<Item = (PoseLandmark, &Landmark)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, l)| Some((PoseLandmark::ALL[i], l.as_ref()?)))
    }
}

impl TryFrom<Vec<Option<Landmark>>> for LandmarkFrame {
    type Error = TryOnError;

    fn try_from(v: Vec<Option<Landmark>>) -> TryOnResult<Self> {
        let len = v.len();
        let slots: [Option<Landmark>; LANDMARK_COUNT] = v.try_into().map_err(|_| {
            TryOnError::validation(format!(
                "landmark frame must have {LANDMARK_COUNT} slots, got {len}"
            ))
        })?;
        Ok(Self { slots })
    }
}

impl From<LandmarkFrame> for Vec<Option<Landmark>> {
    fn from(f: LandmarkFrame) -> Self {
        f.slots.to_vec()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/landmark.rs"]
mod tests;
