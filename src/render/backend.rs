use std::io::Cursor;

use crate::foundation::core::Canvas;
use crate::foundation::error::{TryOnError, TryOnResult};
use crate::render::plan::DrawList;

/// A rendered frame as RGBA8 pixels.
///
/// Backends produce **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Copy of the pixels with straight (non-premultiplied) alpha.
    pub fn to_straight(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_in_place(&mut out);
        }
        out
    }

    /// Encode as a lossless PNG.
    pub fn to_png(&self) -> TryOnResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight())
            .ok_or_else(|| TryOnError::render("frame buffer size does not match dimensions"))?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| TryOnError::render(format!("png encode failed: {e}")))?;
        Ok(out.into_inner())
    }
}

/// Borrowed straight-alpha RGBA8 image handed to a backend for painting.
///
/// `key` identifies the pixel content; backends may reuse an uploaded image while it repeats.
#[derive(Clone, Copy, Debug)]
pub struct ImageRef<'a> {
    pub key: u64,
    pub width: u32,
    pub height: u32,
    pub rgba8: &'a [u8],
}

/// A rasterizer for one fixed-size output surface.
///
/// A frame is `begin_frame`, any number of `draw_image` / `draw_list` calls in paint order, then
/// `finish_frame`.
pub trait RenderBackend {
    fn canvas(&self) -> Canvas;

    /// Start a new frame, discarding anything drawn since the last one.
    fn begin_frame(&mut self);

    /// Paint `image` stretched over the whole surface.
    fn draw_image(&mut self, image: ImageRef<'_>) -> TryOnResult<()>;

    fn draw_list(&mut self, list: &DrawList) -> TryOnResult<()>;

    /// Rasterize everything drawn since `begin_frame` and read the surface back.
    fn finish_frame(&mut self) -> TryOnResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSettings {
    /// If set, backends clear the surface to this straight RGBA8 color before drawing.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Create a rendering backend for `canvas`.
pub fn create_backend(
    kind: BackendKind,
    canvas: Canvas,
    settings: &RenderSettings,
) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new(
            canvas,
            settings.clone(),
        )),
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
