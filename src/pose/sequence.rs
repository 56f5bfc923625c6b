use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Canvas;
use crate::foundation::error::{TryOnError, TryOnResult};
use crate::pose::landmark::LandmarkFrame;

/// Recorded keypoint stream for offline playback.
///
/// `frames[i]` is `None` when the detector found no person in frame `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoseSequence {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<Option<LandmarkFrame>>,
}

impl PoseSequence {
    pub fn new(canvas: Canvas, frames: Vec<Option<LandmarkFrame>>) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            frames,
        }
    }

    pub fn from_reader(reader: impl Read) -> TryOnResult<Self> {
        let seq: Self = serde_json::from_reader(reader)
            .map_err(|e| TryOnError::serde(format!("pose sequence json: {e}")))?;
        seq.canvas()?;
        Ok(seq)
    }

    pub fn from_path(path: &Path) -> TryOnResult<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open pose sequence '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Surface the keypoints were normalized against.
    pub fn canvas(&self) -> TryOnResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn to_json(&self) -> TryOnResult<String> {
        serde_json::to_string(self).map_err(|e| TryOnError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pose/sequence.rs"]
mod tests;
