//! Pixel-space anatomical reference frame derived from one landmark frame.
//!
//! Every garment style is laid out relative to the anchors and measurements computed here. The
//! proportion constants are aesthetic tunables; see [`Proportions`].

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Point, Vec2};
use crate::foundation::error::{TryOnError, TryOnResult};
use crate::pose::landmark::{LandmarkFrame, PoseLandmark};

/// Landmarks below this visibility are treated as absent.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Shoulder width and body height never collapse below this many pixels.
const MIN_EXTENT_PX: f64 = 1.0;

/// Empirically tuned body-to-garment ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proportions {
    /// Missing elbow: distance below its shoulder, in body heights.
    pub elbow_drop: f64,
    /// Missing wrist: distance below its elbow, in body heights.
    pub wrist_drop: f64,
    /// Missing nose: distance above the shoulder center, in body heights.
    pub nose_rise: f64,
    /// Missing eye: distance above the nose, in body heights.
    pub eye_rise: f64,
    /// Missing eye: sideways offset from the nose, in shoulder widths.
    pub eye_spread: f64,
    /// Waist line below the shoulder center, in body heights.
    pub waist_ratio: f64,
    /// Dress width per (scaled) shoulder width.
    pub width_ratio: f64,
    /// Dress length per (scaled) body height.
    pub length_ratio: f64,
    /// Hem line below the hip center, in dress lengths.
    pub hem_ratio: f64,
}

impl Default for Proportions {
    fn default() -> Self {
        Self {
            elbow_drop: 0.3,
            wrist_drop: 0.3,
            nose_rise: 0.5,
            eye_rise: 0.05,
            eye_spread: 0.08,
            waist_ratio: 0.6,
            width_ratio: 1.4,
            length_ratio: 2.2,
            hem_ratio: 0.6,
        }
    }
}

/// Derived per-frame geometry shared by all garment styles. Rebuilt every render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnatomicalFrame {
    pub left_shoulder: Point,
    pub right_shoulder: Point,
    pub left_hip: Point,
    pub right_hip: Point,
    pub shoulder_center: Point,
    pub hip_center: Point,
    pub left_elbow: Point,
    pub right_elbow: Point,
    pub left_wrist: Point,
    pub right_wrist: Point,
    pub nose: Point,
    pub left_eye: Point,
    pub right_eye: Point,
    /// Unit vector pointing from the shoulder line towards the hips.
    pub body_down: Vec2,
    /// Horizontal shoulder distance in pixels.
    pub shoulder_width: f64,
    /// Vertical shoulder-center to hip-center distance in pixels.
    pub body_height: f64,
    pub waist_y: f64,
    pub dress_width: f64,
    pub dress_length: f64,
    pub hem_y: f64,
}

/// Builds [`AnatomicalFrame`]s from raw landmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnatomyBuilder {
    pub proportions: Proportions,
    pub visibility_threshold: f32,
}

impl Default for AnatomyBuilder {
    fn default() -> Self {
        Self {
            proportions: Proportions::default(),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl AnatomyBuilder {
    /// Derive the anatomical frame for `frame` drawn on `canvas` at garment `scale`.
    ///
    /// Fails with [`TryOnError::MissingAnchor`] when a shoulder or hip is unusable; optional
    /// joints are extrapolated instead.
    pub fn build(
        &self,
        frame: &LandmarkFrame,
        canvas: Canvas,
        scale: f64,
    ) -> TryOnResult<AnatomicalFrame> {
        let p = &self.proportions;
        let anchor = |slot: PoseLandmark| -> TryOnResult<Point> {
            frame
                .usable(slot, self.visibility_threshold)
                .map(|l| l.to_pixel(canvas))
                .ok_or(TryOnError::MissingAnchor(slot))
        };
        let left_shoulder = anchor(PoseLandmark::LeftShoulder)?;
        let right_shoulder = anchor(PoseLandmark::RightShoulder)?;
        let left_hip = anchor(PoseLandmark::LeftHip)?;
        let right_hip = anchor(PoseLandmark::RightHip)?;

        let shoulder_center = left_shoulder.midpoint(right_shoulder);
        let hip_center = left_hip.midpoint(right_hip);

        let shoulder_width = (right_shoulder.x - left_shoulder.x).abs().max(MIN_EXTENT_PX);
        let body_height = (hip_center.y - shoulder_center.y).abs().max(MIN_EXTENT_PX);

        let body_down = unit_or(hip_center - shoulder_center, Vec2::new(0.0, 1.0));
        let across = unit_or(right_shoulder - left_shoulder, Vec2::new(1.0, 0.0));

        let optional = |slot: PoseLandmark| -> Option<Point> {
            frame
                .usable(slot, self.visibility_threshold)
                .map(|l| l.to_pixel(canvas))
        };
        let below = |from: Point, ratio: f64| from + body_down * (ratio * body_height);

        let left_elbow = optional(PoseLandmark::LeftElbow)
            .unwrap_or_else(|| below(left_shoulder, p.elbow_drop));
        let right_elbow = optional(PoseLandmark::RightElbow)
            .unwrap_or_else(|| below(right_shoulder, p.elbow_drop));
        let left_wrist =
            optional(PoseLandmark::LeftWrist).unwrap_or_else(|| below(left_elbow, p.wrist_drop));
        let right_wrist =
            optional(PoseLandmark::RightWrist).unwrap_or_else(|| below(right_elbow, p.wrist_drop));

        let nose =
            optional(PoseLandmark::Nose).unwrap_or_else(|| below(shoulder_center, -p.nose_rise));
        let eye_side = across * (p.eye_spread * shoulder_width);
        let left_eye = optional(PoseLandmark::LeftEye)
            .unwrap_or_else(|| below(nose, -p.eye_rise) - eye_side);
        let right_eye = optional(PoseLandmark::RightEye)
            .unwrap_or_else(|| below(nose, -p.eye_rise) + eye_side);

        let scale = if scale.is_finite() { scale } else { 1.0 };
        let dress_width = shoulder_width * scale * p.width_ratio;
        let dress_length = body_height * scale * p.length_ratio;

        Ok(AnatomicalFrame {
            left_shoulder,
            right_shoulder,
            left_hip,
            right_hip,
            shoulder_center,
            hip_center,
            left_elbow,
            right_elbow,
            left_wrist,
            right_wrist,
            nose,
            left_eye,
            right_eye,
            body_down,
            shoulder_width,
            body_height,
            waist_y: shoulder_center.y + p.waist_ratio * body_height,
            dress_width,
            dress_length,
            hem_y: hip_center.y + p.hem_ratio * dress_length,
        })
    }
}

fn unit_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let len = v.hypot();
    if len.is_finite() && len > f64::EPSILON {
        v / len
    } else {
        fallback
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/anatomy.rs"]
mod tests;
