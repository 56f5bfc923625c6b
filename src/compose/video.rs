use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{TryOnError, TryOnResult};
use crate::foundation::math::Fnv1a64;
use crate::render::backend::ImageRef;

/// One raw camera frame as straight-alpha RGBA8.
///
/// Frames are immutable once built; `key` fingerprints the pixels so a backend can keep a repeated
/// background uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
    key: u64,
}

impl VideoFrame {
    /// Wrap a tightly packed RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> TryOnResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if data.len() != canvas.rgba_len() {
            return Err(TryOnError::validation(format!(
                "video frame {width}x{height} needs {} bytes, got {}",
                canvas.rgba_len(),
                data.len()
            )));
        }
        let mut h = Fnv1a64::new_default();
        h.write_u64(u64::from(width));
        h.write_u64(u64::from(height));
        h.write_bytes(&data);
        Ok(Self {
            width,
            height,
            data,
            key: h.finish(),
        })
    }

    /// A frame filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> TryOnResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let data = [color.r, color.g, color.b, color.a].repeat(canvas.rgba_len() / 4);
        Self::from_rgba(width, height, data)
    }

    /// Decode any image format the `image` crate understands.
    pub fn from_encoded(bytes: &[u8]) -> TryOnResult<Self> {
        let rgba = image::load_from_memory(bytes)
            .context("decode video frame image")?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn from_path(path: &Path) -> TryOnResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read video frame '{}'", path.display()))?;
        Self::from_encoded(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> TryOnResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn as_image(&self) -> ImageRef<'_> {
        ImageRef {
            key: self.key,
            width: self.width,
            height: self.height,
            rgba8: &self.data,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/video.rs"]
mod tests;
