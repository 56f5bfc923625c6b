//! Style dispatch and the per-style render procedures.

use crate::foundation::core::{Point, Rect};
use crate::foundation::math::RandomSource;
use crate::garment::catalog::{GarmentDescriptor, GarmentStyle};
use crate::garment::color::Rgb8;
use crate::garment::{detail, silhouette};
use crate::pose::anatomy::AnatomicalFrame;
use crate::render::plan::{Brush, DrawList, GradientStop};

/// Closed set of garment renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    ElegantGown,
    CasualDress,
    PartyDress,
    FloralDress,
}

/// Known style tags and their renderers. Anything not listed renders as [`StyleKind::CasualDress`].
pub const STYLE_TABLE: [(&str, StyleKind); 5] = [
    ("elegant", StyleKind::ElegantGown),
    ("formal", StyleKind::ElegantGown),
    ("casual", StyleKind::CasualDress),
    ("party", StyleKind::PartyDress),
    ("floral", StyleKind::FloralDress),
];

impl StyleKind {
    /// Resolve a style tag, falling back to the casual dress for unknown tags.
    pub fn resolve(style: &GarmentStyle) -> Self {
        let tag = style.as_str();
        match STYLE_TABLE.iter().find(|(name, _)| *name == tag) {
            Some((_, kind)) => *kind,
            None => {
                tracing::debug!(style = tag, "unknown garment style, drawing casual dress");
                Self::CasualDress
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ElegantGown => "elegant_gown",
            Self::CasualDress => "casual_dress",
            Self::PartyDress => "party_dress",
            Self::FloralDress => "floral_dress",
        }
    }
}

impl GarmentStyle {
    /// Renderer used for this style tag.
    pub fn kind(&self) -> StyleKind {
        StyleKind::resolve(self)
    }
}

/// Build the full layer stack for `garment` on the body described by `anatomy`.
///
/// The result is a pure function of its inputs and the values drawn from `rng`.
pub fn render_garment(
    anatomy: &AnatomicalFrame,
    garment: &GarmentDescriptor,
    rng: &mut dyn RandomSource,
) -> DrawList {
    let mut list = DrawList::new();
    let base = garment.base_color();
    match garment.style.kind() {
        StyleKind::ElegantGown => {
            elegant_gown(&mut list, anatomy, base, garment.has_floral_pattern());
        }
        StyleKind::CasualDress => casual_dress(&mut list, anatomy, base),
        StyleKind::PartyDress => party_dress(&mut list, anatomy, base, rng),
        StyleKind::FloralDress => {
            casual_dress(&mut list, anatomy, base);
            detail::flower_overlay(&mut list, anatomy, rng);
        }
    }
    list
}

fn vertical_gradient(a: &AnatomicalFrame, base: Rgb8, stops: &[(f32, f64)]) -> Brush {
    Brush::Linear {
        start: a.shoulder_center,
        end: Point::new(a.hip_center.x, a.hem_y),
        stops: stops
            .iter()
            .map(|&(offset, factor)| GradientStop::new(offset, base.adjust(factor).opaque()))
            .collect(),
    }
}

fn elegant_gown(list: &mut DrawList, a: &AnatomicalFrame, base: Rgb8, floral: bool) {
    let w = a.dress_width;
    let path = silhouette::elegant_gown_path(a);
    let fill = vertical_gradient(a, base, &[(0.0, 1.3), (0.3, 1.1), (0.6, 1.0), (1.0, 0.6)]);
    list.fill_path(path.clone(), fill, 0.85);
    list.stroke_path(path, base.adjust(0.4).opaque(), 2.0, 0.6);

    // waist seam
    list.stroke_line(
        Point::new(a.hip_center.x - w * 0.25, a.waist_y),
        Point::new(a.hip_center.x + w * 0.25, a.waist_y),
        base.adjust(0.5).opaque(),
        4.0,
        1.0,
    );

    let sc = a.shoulder_center;
    detail::fabric_texture(list, sc.x, sc.y, w, a.dress_length, base);
    detail::depth_shading(list, sc.x, sc.y, a.waist_y, a.hem_y, w);
    if !floral {
        detail::embellishments(list, sc.x, a.waist_y, base);
    }
}

fn casual_dress(list: &mut DrawList, a: &AnatomicalFrame, base: Rgb8) {
    let w = a.dress_width;
    let path = silhouette::casual_dress_path(a);
    let fill = vertical_gradient(a, base, &[(0.0, 1.2), (0.5, 1.0), (1.0, 0.7)]);
    list.fill_path(path.clone(), fill, 0.8);
    list.stroke_path(path, base.adjust(0.5).opaque(), 2.0, 0.5);

    detail::pockets(list, a.hip_center.x, a.waist_y + 20.0, w * 0.12, base);
    let sc = a.shoulder_center;
    detail::buttons(list, sc.x, sc.y + 30.0, a.waist_y, base);
}

fn party_dress(list: &mut DrawList, a: &AnatomicalFrame, base: Rgb8, rng: &mut dyn RandomSource) {
    let w = a.dress_width;
    let path = silhouette::party_dress_path(a);
    let fill = Brush::Radial {
        center: Point::new(a.shoulder_center.x, a.waist_y),
        radius: w,
        stops: [(0.0, 1.4), (0.5, 1.0), (1.0, 0.8)]
            .into_iter()
            .map(|(offset, factor)| GradientStop::new(offset, base.adjust(factor).opaque()))
            .collect(),
    };
    list.fill_path(path.clone(), fill, 0.85);
    list.stroke_path(path, base.adjust(0.5).opaque(), 2.0, 0.5);

    detail::sparkles(list, a.shoulder_center, w, a.dress_length, rng);
    detail::hem_ruffles(list, silhouette::party_hem(a), base);

    // waist band
    list.fill_rect(
        Rect::new(
            a.hip_center.x - w * 0.25,
            a.waist_y - 5.0,
            a.hip_center.x + w * 0.25,
            a.waist_y + 5.0,
        ),
        Brush::Solid(base.adjust(1.5).opaque()),
        0.6,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/garment/style.rs"]
mod tests;
