use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{TryOnError, TryOnResult};
use crate::render::backend::{
    FrameRGBA, ImageRef, RenderBackend, RenderSettings, premultiply_rgba8_in_place,
};
use crate::render::plan::{Brush, DrawList, DrawOp, GradientStop};

/// CPU raster backend powered by `vello_cpu`.
///
/// Owns one output pixmap and reuses its render context across frames.
pub struct CpuBackend {
    canvas: Canvas,
    settings: RenderSettings,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    image_cache: Option<CachedImage>,
}

struct CachedImage {
    key: u64,
    paint: vello_cpu::Image,
    w: f64,
    h: f64,
}

impl CpuBackend {
    pub fn new(canvas: Canvas, settings: RenderSettings) -> Self {
        // `Canvas` guarantees both sides fit in u16.
        let (w, h) = (canvas.width as u16, canvas.height as u16);
        Self {
            canvas,
            settings,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            image_cache: None,
        }
    }

    fn image_paint_for(&mut self, image: ImageRef<'_>) -> TryOnResult<&CachedImage> {
        let hit = self
            .image_cache
            .as_ref()
            .is_some_and(|c| c.key == image.key);
        if !hit {
            let mut premul = image.rgba8.to_vec();
            premultiply_rgba8_in_place(&mut premul);
            let pixmap = pixmap_from_premul_bytes(&premul, image.width, image.height)?;
            self.image_cache = Some(CachedImage {
                key: image.key,
                paint: vello_cpu::Image {
                    image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                    sampler: vello_cpu::peniko::ImageSampler::default(),
                },
                w: f64::from(image.width),
                h: f64::from(image.height),
            });
        }
        self.image_cache
            .as_ref()
            .ok_or_else(|| TryOnError::render("image cache is empty after upload"))
    }
}

impl RenderBackend for CpuBackend {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn begin_frame(&mut self) {
        self.ctx.reset();
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            set_identity(&mut self.ctx);
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            self.ctx.fill_rect(&rect_to_cpu(self.canvas.rect()));
        }
    }

    fn draw_image(&mut self, image: ImageRef<'_>) -> TryOnResult<()> {
        if image.width == 0 || image.height == 0 {
            return Err(TryOnError::render("cannot paint an empty image"));
        }
        let target = self.canvas.rect();
        let (paint, iw, ih) = {
            let cached = self.image_paint_for(image)?;
            (cached.paint.clone(), cached.w, cached.h)
        };

        let fit = Affine::scale_non_uniform(target.width() / iw, target.height() / ih);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(fit));
        self.ctx.set_paint(paint);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        Ok(())
    }

    fn draw_list(&mut self, list: &DrawList) -> TryOnResult<()> {
        for op in list.ops() {
            draw_op(&mut self.ctx, op);
        }
        Ok(())
    }

    fn finish_frame(&mut self) -> TryOnResult<FrameRGBA> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn set_identity(ctx: &mut vello_cpu::RenderContext) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Run `f` inside an opacity layer. Only gradient fills need one; solid paints carry their
/// opacity in the color alpha.
fn with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    opacity: f32,
    f: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    if opacity <= 0.0 {
        return;
    }
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    f(ctx);
    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    set_identity(ctx);
    match op {
        DrawOp::FillPath {
            path,
            brush,
            opacity,
        } => {
            let opacity = clamp_opacity(*opacity);
            if opacity <= 0.0 {
                return;
            }
            let cpu_path = bezpath_to_cpu(path);
            match brush {
                Brush::Solid(c) => {
                    ctx.set_paint(color_to_cpu(c.fade(opacity)));
                    ctx.fill_path(&cpu_path);
                }
                _ => {
                    set_brush(ctx, brush);
                    with_opacity(ctx, opacity, |ctx| ctx.fill_path(&cpu_path));
                }
            }
        }
        DrawOp::StrokePath {
            path,
            color,
            width,
            opacity,
        } => {
            let opacity = clamp_opacity(*opacity);
            if opacity <= 0.0 {
                return;
            }
            ctx.set_paint(color_to_cpu(color.fade(opacity)));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.stroke_path(&bezpath_to_cpu(path));
        }
        DrawOp::FillRect {
            rect,
            brush,
            opacity,
        } => {
            let opacity = clamp_opacity(*opacity);
            if opacity <= 0.0 {
                return;
            }
            let cpu_rect = rect_to_cpu(*rect);
            match brush {
                Brush::Solid(c) => {
                    ctx.set_paint(color_to_cpu(c.fade(opacity)));
                    ctx.fill_rect(&cpu_rect);
                }
                _ => {
                    set_brush(ctx, brush);
                    with_opacity(ctx, opacity, |ctx| ctx.fill_rect(&cpu_rect));
                }
            }
        }
    }
}

fn set_brush(ctx: &mut vello_cpu::RenderContext, brush: &Brush) {
    match brush {
        Brush::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
        Brush::Linear { start, end, stops } => {
            let stops = stops_to_cpu(stops);
            let g = vello_cpu::peniko::Gradient::new_linear(point_to_cpu(*start), point_to_cpu(*end))
                .with_stops(stops.as_slice());
            ctx.set_paint(g);
        }
        Brush::Radial {
            center,
            radius,
            stops,
        } => {
            let stops = stops_to_cpu(stops);
            let g = vello_cpu::peniko::Gradient::new_radial(point_to_cpu(*center), *radius as f32)
                .with_stops(stops.as_slice());
            ctx.set_paint(g);
        }
    }
}

fn stops_to_cpu(stops: &[GradientStop]) -> Vec<(f32, vello_cpu::peniko::Color)> {
    stops
        .iter()
        .map(|s| (s.offset.clamp(0.0, 1.0), color_to_cpu(s.color)))
        .collect()
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> TryOnResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| TryOnError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| TryOnError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(TryOnError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
