//! Backend-agnostic draw operations.
//!
//! Every operation carries its own paint parameters (brush, stroke width, layer opacity), so the
//! result of a draw never depends on state left behind by a previous one.

use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect, Rgba8};

/// Curve flattening tolerance for circles and arcs, in pixels.
pub const SHAPE_TOLERANCE: f64 = 0.1;

/// Color stop of a gradient brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba8,
}

impl GradientStop {
    pub fn new(offset: f32, color: Rgba8) -> Self {
        Self { offset, color }
    }
}

/// How a fill is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Solid(Rgba8),
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
    },
}

/// One draw operation.
///
/// `opacity` is a group opacity applied on top of the brush's own alpha.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillPath {
        path: BezPath,
        brush: Brush,
        opacity: f32,
    },
    StrokePath {
        path: BezPath,
        color: Rgba8,
        width: f64,
        opacity: f32,
    },
    FillRect {
        rect: Rect,
        brush: Brush,
        opacity: f32,
    },
}

/// Ordered list of draw operations; later entries paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn fill_path(&mut self, path: BezPath, brush: Brush, opacity: f32) {
        self.push(DrawOp::FillPath {
            path,
            brush,
            opacity,
        });
    }

    pub fn stroke_path(&mut self, path: BezPath, color: Rgba8, width: f64, opacity: f32) {
        self.push(DrawOp::StrokePath {
            path,
            color,
            width,
            opacity,
        });
    }

    pub fn fill_rect(&mut self, rect: Rect, brush: Brush, opacity: f32) {
        self.push(DrawOp::FillRect {
            rect,
            brush,
            opacity,
        });
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8, opacity: f32) {
        let path = kurbo::Circle::new(center, radius).to_path(SHAPE_TOLERANCE);
        self.fill_path(path, Brush::Solid(color), opacity);
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, color: Rgba8, width: f64, opacity: f32) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke_path(path, color, width, opacity);
    }
}
