//! Closed garment outlines, one builder per silhouette.
//!
//! Paths are pure functions of the anatomical frame. Each walks neckline, right strap or sleeve,
//! right side seam, hem, then the mirrored left side, returns to its first point and closes.
//! Fixed pixel offsets (necklines, armholes, hem lift) are part of the reference look and do not
//! scale with the body.

use std::f64::consts::PI;

use kurbo::{PathEl, QuadBez};

use crate::foundation::core::{BezPath, Point, Vec2};
use crate::pose::anatomy::AnatomicalFrame;
use crate::render::plan::SHAPE_TOLERANCE;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Fitted bodice with a sweetheart neckline and a flared floor-length skirt.
pub fn elegant_gown_path(a: &AnatomicalFrame) -> BezPath {
    let w = a.dress_width;
    let (sc, hc) = (a.shoulder_center, a.hip_center);
    let (ls, rs) = (a.left_shoulder, a.right_shoulder);
    let skirt_y = hc.y + a.dress_length * 0.3;

    let start = pt(ls.x + w * 0.1, sc.y - 10.0);
    let mut p = BezPath::new();
    p.move_to(start);
    // sweetheart neckline
    p.quad_to(pt(sc.x - w * 0.15, sc.y + 20.0), pt(sc.x, sc.y + 15.0));
    p.quad_to(pt(sc.x + w * 0.15, sc.y + 20.0), pt(rs.x - w * 0.1, sc.y - 10.0));
    // right strap and armhole
    p.line_to(pt(rs.x - w * 0.05, rs.y));
    p.quad_to(pt(rs.x + w * 0.05, rs.y + 30.0), pt(rs.x, rs.y + 60.0));
    // right seam, flaring below the waist
    p.line_to(pt(hc.x + w * 0.25, a.waist_y));
    p.line_to(pt(hc.x + w * 0.45, skirt_y));
    p.line_to(pt(hc.x + w * 0.55, a.hem_y - 50.0));
    // hem
    p.quad_to(pt(hc.x + w * 0.3, a.hem_y), pt(hc.x, a.hem_y + 10.0));
    p.quad_to(pt(hc.x - w * 0.3, a.hem_y), pt(hc.x - w * 0.55, a.hem_y - 50.0));
    // left seam
    p.line_to(pt(hc.x - w * 0.45, skirt_y));
    p.line_to(pt(hc.x - w * 0.25, a.waist_y));
    p.line_to(pt(ls.x, ls.y + 60.0));
    // left armhole and strap
    p.quad_to(pt(ls.x - w * 0.05, ls.y + 30.0), pt(ls.x + w * 0.05, ls.y));
    p.line_to(start);
    p.close_path();
    p
}

/// Round-neck A-line day dress with short sleeves that follow the elbows.
pub fn casual_dress_path(a: &AnatomicalFrame) -> BezPath {
    let w = a.dress_width;
    let (sc, hc) = (a.shoulder_center, a.hip_center);
    let (ls, rs) = (a.left_shoulder, a.right_shoulder);
    let (le, re) = (a.left_elbow, a.right_elbow);
    let neck_r = w * 0.18;

    let start = pt(sc.x - neck_r, sc.y);
    let mut p = BezPath::new();
    p.move_to(start);
    // round neckline over the top of the shoulder center
    let neckline = kurbo::Arc {
        center: sc,
        radii: Vec2::new(neck_r, neck_r),
        start_angle: PI,
        sweep_angle: PI,
        x_rotation: 0.0,
    };
    p.extend(neckline.append_iter(SHAPE_TOLERANCE));
    // right sleeve
    p.line_to(pt(rs.x + w * 0.05, rs.y));
    p.quad_to(pt(re.x + 15.0, re.y - 10.0), pt(rs.x + w * 0.08, rs.y + 50.0));
    p.line_to(pt(rs.x, rs.y + 60.0));
    // right seam, A-line out to the hem corner
    p.line_to(pt(hc.x + w * 0.35, a.waist_y));
    p.line_to(pt(hc.x + w * 0.5, a.hem_y - 30.0));
    // hem
    p.quad_to(pt(hc.x, a.hem_y), pt(hc.x - w * 0.5, a.hem_y - 30.0));
    // left seam
    p.line_to(pt(hc.x - w * 0.35, a.waist_y));
    p.line_to(pt(ls.x, ls.y + 60.0));
    // left sleeve
    p.line_to(pt(ls.x - w * 0.08, ls.y + 50.0));
    p.quad_to(pt(le.x - 15.0, le.y - 10.0), pt(ls.x - w * 0.05, ls.y));
    p.line_to(start);
    p.close_path();
    p
}

/// Strapless party dress with a fitted bodice and a stepped, layered skirt.
pub fn party_dress_path(a: &AnatomicalFrame) -> BezPath {
    let w = a.dress_width;
    let hc = a.hip_center;
    let (ls, rs) = (a.left_shoulder, a.right_shoulder);
    let tier = |i: u32| (0.35 + 0.08 * f64::from(i), hc.y + 15.0 * f64::from(i));

    let start = pt(ls.x + w * 0.15, ls.y + 10.0);
    let mut p = BezPath::new();
    p.move_to(start);
    // straight bust line
    p.line_to(pt(rs.x - w * 0.15, rs.y + 10.0));
    p.line_to(pt(rs.x - w * 0.1, rs.y + 30.0));
    // fitted bodice
    p.line_to(pt(hc.x + w * 0.22, a.waist_y));
    // skirt tiers, right
    for i in 0..3 {
        let (dx, y) = tier(i);
        p.line_to(pt(hc.x + w * dx, y));
    }
    p.line_to(pt(hc.x + w * 0.5, a.hem_y - 40.0));
    let hem = party_hem(a);
    p.quad_to(hem.p1, hem.p2);
    // skirt tiers, left
    for i in (0..3).rev() {
        let (dx, y) = tier(i);
        p.line_to(pt(hc.x - w * dx, y));
    }
    p.line_to(pt(hc.x - w * 0.22, a.waist_y));
    p.line_to(pt(ls.x + w * 0.1, ls.y + 30.0));
    p.line_to(start);
    p.close_path();
    p
}

/// Hem curve of the party dress, right corner to left corner.
pub fn party_hem(a: &AnatomicalFrame) -> QuadBez {
    let w = a.dress_width;
    let hc = a.hip_center;
    QuadBez::new(
        pt(hc.x + w * 0.5, a.hem_y - 40.0),
        pt(hc.x, a.hem_y + 5.0),
        pt(hc.x - w * 0.5, a.hem_y - 40.0),
    )
}

/// Whether `path` is a single closed contour whose last drawn point returns to its first.
pub fn is_closed(path: &BezPath, tolerance: f64) -> bool {
    let els = path.elements();
    let (Some(PathEl::MoveTo(first)), Some(PathEl::ClosePath)) = (els.first(), els.last()) else {
        return false;
    };
    let end = match els.get(els.len().wrapping_sub(2)) {
        Some(PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p)) => *p,
        _ => return false,
    };
    let moves = els
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count();
    moves == 1 && first.distance(end) <= tolerance
}

#[cfg(test)]
#[path = "../../tests/unit/garment/silhouette.rs"]
mod tests;
