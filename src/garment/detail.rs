//! Shared decoration layers drawn on top of a garment fill.
//!
//! Helpers only append to a [`DrawList`]; none of them reads back what is already there.

use kurbo::{Ellipse, ParamCurve, QuadBez, Shape};

use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Vec2};
use crate::foundation::math::RandomSource;
use crate::garment::color::Rgb8;
use crate::pose::anatomy::AnatomicalFrame;
use crate::render::plan::{Brush, DrawList, GradientStop, SHAPE_TOLERANCE};

/// Thin vertical weave lines across the garment body.
pub fn fabric_texture(list: &mut DrawList, x: f64, top_y: f64, width: f64, height: f64, base: Rgb8) {
    let color = base.adjust(0.9).opaque();
    for i in 0..10 {
        let lx = x - width * 0.3 + f64::from(i) * width * 0.06;
        list.stroke_line(
            Point::new(lx, top_y),
            Point::new(lx, top_y + height),
            color,
            0.5,
            0.1,
        );
    }
}

/// Darkening band on the left flank and a lightening band on the right.
pub fn depth_shading(
    list: &mut DrawList,
    center_x: f64,
    top_y: f64,
    waist_y: f64,
    hem_y: f64,
    width: f64,
) {
    let band_h = hem_y - top_y;
    let shadow = Brush::Linear {
        start: Point::new(center_x - width * 0.4, waist_y),
        end: Point::new(center_x - width * 0.2, waist_y),
        stops: vec![
            GradientStop::new(0.0, Rgba8::with_alpha_f32(0, 0, 0, 0.3)),
            GradientStop::new(1.0, Rgba8::new(0, 0, 0, 0)),
        ],
    };
    list.fill_rect(
        Rect::new(
            center_x - width * 0.4,
            top_y,
            center_x - width * 0.2,
            top_y + band_h,
        ),
        shadow,
        0.4,
    );

    let highlight = Brush::Linear {
        start: Point::new(center_x + width * 0.2, waist_y),
        end: Point::new(center_x + width * 0.4, waist_y),
        stops: vec![
            GradientStop::new(0.0, Rgba8::new(255, 255, 255, 0)),
            GradientStop::new(1.0, Rgba8::with_alpha_f32(255, 255, 255, 0.2)),
        ],
    };
    list.fill_rect(
        Rect::new(
            center_x + width * 0.2,
            top_y,
            center_x + width * 0.4,
            top_y + band_h,
        ),
        highlight,
        0.4,
    );
}

/// Center jewel on the waist line flanked by two symmetric pairs.
pub fn embellishments(list: &mut DrawList, center_x: f64, waist_y: f64, base: Rgb8) {
    let color = base.adjust(1.5).opaque();
    list.fill_circle(Point::new(center_x, waist_y), 8.0, color, 0.7);
    for i in 1..=2 {
        let dx = f64::from(i) * 25.0;
        list.fill_circle(Point::new(center_x - dx, waist_y), 5.0, color, 0.7);
        list.fill_circle(Point::new(center_x + dx, waist_y), 5.0, color, 0.7);
    }
}

/// Twenty white glints scattered over the dress; positions are redrawn every call.
pub fn sparkles(
    list: &mut DrawList,
    origin: Point,
    width: f64,
    height: f64,
    rng: &mut dyn RandomSource,
) {
    let color = Rgba8::with_alpha_f32(255, 255, 255, 0.8);
    for _ in 0..20 {
        let x = origin.x + (rng.next_f64() - 0.5) * width * 0.8;
        let y = origin.y + rng.next_f64() * height;
        let radius = rng.next_f64() * 3.0 + 1.0;
        let opacity = (rng.next_f64() * 0.5 + 0.3) as f32;
        list.fill_circle(Point::new(x, y), radius, color, opacity);
    }
}

/// Two patch pockets drawn as lower half circles either side of `center_x`.
pub fn pockets(list: &mut DrawList, center_x: f64, y: f64, size: f64, base: Rgb8) {
    let color = base.adjust(0.6).opaque();
    for side in [-1.0, 1.0] {
        let arc = kurbo::Arc {
            center: Point::new(center_x + side * size * 1.5, y),
            radii: Vec2::new(size, size),
            start_angle: 0.0,
            sweep_angle: std::f64::consts::PI,
            x_rotation: 0.0,
        };
        list.stroke_path(arc.to_path(SHAPE_TOLERANCE), color, 2.0, 0.5);
    }
}

/// Five buttons evenly spaced between `start_y` and `end_y`, each with two holes.
pub fn buttons(list: &mut DrawList, center_x: f64, start_y: f64, end_y: f64, base: Rgb8) {
    const COUNT: u32 = 5;
    let face = base.adjust(1.3).opaque();
    let hole = base.adjust(0.8).opaque();
    let spacing = (end_y - start_y) / f64::from(COUNT + 1);
    for i in 1..=COUNT {
        let y = start_y + spacing * f64::from(i);
        list.fill_circle(Point::new(center_x, y), 4.0, face, 0.6);
        list.fill_circle(Point::new(center_x - 1.0, y), 1.0, hole, 0.6);
        list.fill_circle(Point::new(center_x + 1.0, y), 1.0, hole, 0.6);
    }
}

/// Three scalloped trims following `hem`, each lifted a little above the previous one.
pub fn hem_ruffles(list: &mut DrawList, hem: QuadBez, base: Rgb8) {
    const SCALLOPS: u32 = 12;
    const LAYER_LIFT: f64 = 8.0;
    const SCALLOP_DEPTH: f64 = 6.0;

    for layer in 0..3 {
        let lift = Vec2::new(0.0, -LAYER_LIFT * f64::from(layer));
        let color = base.adjust(0.7 + 0.15 * f64::from(layer)).opaque();
        let mut path = BezPath::new();
        path.move_to(hem.eval(0.0) + lift);
        for i in 0..SCALLOPS {
            let t0 = f64::from(i) / f64::from(SCALLOPS);
            let t1 = f64::from(i + 1) / f64::from(SCALLOPS);
            let mid = hem.eval((t0 + t1) * 0.5) + lift + Vec2::new(0.0, SCALLOP_DEPTH);
            path.quad_to(mid, hem.eval(t1) + lift);
        }
        list.stroke_path(path, color, 1.5, 0.5);
    }
}

/// Layer opacity of the floral print.
pub const FLOWER_OPACITY: f32 = 0.4;

/// Flower motifs of the floral print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowerGlyph {
    Blossom,
    Hibiscus,
    Daisy,
    Sunflower,
    Tulip,
}

struct Petals {
    count: u32,
    /// Petal length as a fraction of the glyph size.
    length: f64,
    /// Petal width as a fraction of its length.
    aspect: f64,
    color: Rgba8,
    center: Rgba8,
    center_radius: f64,
    /// Angular span petals fan across; a full turn for radial flowers.
    fan: f64,
}

impl FlowerGlyph {
    pub const ALL: [Self; 5] = [
        Self::Blossom,
        Self::Hibiscus,
        Self::Daisy,
        Self::Sunflower,
        Self::Tulip,
    ];

    fn petals(self) -> Petals {
        use std::f64::consts::TAU;
        match self {
            Self::Blossom => Petals {
                count: 5,
                length: 0.45,
                aspect: 0.7,
                color: Rgba8::new(255, 183, 197, 255),
                center: Rgba8::new(255, 105, 180, 255),
                center_radius: 0.1,
                fan: TAU,
            },
            Self::Hibiscus => Petals {
                count: 5,
                length: 0.5,
                aspect: 0.9,
                color: Rgba8::new(230, 40, 80, 255),
                center: Rgba8::new(255, 215, 0, 255),
                center_radius: 0.08,
                fan: TAU,
            },
            Self::Daisy => Petals {
                count: 12,
                length: 0.45,
                aspect: 0.3,
                color: Rgba8::WHITE,
                center: Rgba8::new(255, 200, 0, 255),
                center_radius: 0.12,
                fan: TAU,
            },
            Self::Sunflower => Petals {
                count: 14,
                length: 0.5,
                aspect: 0.35,
                color: Rgba8::new(255, 200, 0, 255),
                center: Rgba8::new(120, 72, 0, 255),
                center_radius: 0.2,
                fan: TAU,
            },
            Self::Tulip => Petals {
                count: 3,
                length: 0.5,
                aspect: 0.55,
                color: Rgba8::new(255, 90, 80, 255),
                center: Rgba8::new(60, 140, 60, 255),
                center_radius: 0.06,
                fan: std::f64::consts::FRAC_PI_2,
            },
        }
    }

    /// Append this glyph centered on `center`, fitting inside a `size`-wide square.
    pub fn draw(self, list: &mut DrawList, center: Point, size: f64, opacity: f32) {
        let p = self.petals();
        let len = size * p.length;
        let radii = Vec2::new(len * 0.5, len * p.aspect * 0.5);
        let full_turn = p.fan >= std::f64::consts::TAU;
        // radial flowers spread evenly; fanned ones open upwards
        let step = if full_turn {
            p.fan / f64::from(p.count)
        } else {
            p.fan / f64::from(p.count.saturating_sub(1).max(1))
        };
        let first = if full_turn {
            0.0
        } else {
            -std::f64::consts::FRAC_PI_2 - p.fan * 0.5
        };

        for i in 0..p.count {
            let angle = first + step * f64::from(i);
            let dir = Vec2::from_angle(angle);
            let petal = Ellipse::new(center + dir * (len * 0.5), radii, angle);
            list.fill_path(
                petal.to_path(SHAPE_TOLERANCE),
                Brush::Solid(p.color),
                opacity,
            );
        }
        list.fill_circle(center, size * p.center_radius, p.center, opacity);
    }
}

/// Scatter fifteen random flowers between the shoulder line and the hem.
pub fn flower_overlay(list: &mut DrawList, a: &AnatomicalFrame, rng: &mut dyn RandomSource) {
    let sc = a.shoulder_center;
    for _ in 0..15 {
        let x = sc.x + (rng.next_f64() - 0.5) * a.dress_width * 0.6;
        let y = sc.y + rng.next_f64() * (a.hem_y - sc.y);
        let glyph = FlowerGlyph::ALL[rng.next_index(FlowerGlyph::ALL.len())];
        let size = 20.0 + rng.next_f64() * 15.0;
        glyph.draw(list, Point::new(x, y), size, FLOWER_OPACITY);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/garment/detail.rs"]
mod tests;
