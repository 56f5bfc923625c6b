use super::*;
use kurbo::Shape;

use crate::foundation::core::Canvas;
use crate::foundation::math::SplitMix64;
use crate::garment::catalog::Catalog;
use crate::pose::anatomy::AnatomyBuilder;
use crate::pose::landmark::{Landmark, LandmarkFrame, PoseLandmark};
use crate::render::plan::DrawOp;

fn anatomy() -> AnatomicalFrame {
    let f = LandmarkFrame::empty()
        .with(PoseLandmark::LeftShoulder, Landmark::new(0.3, 0.3))
        .with(PoseLandmark::RightShoulder, Landmark::new(0.7, 0.3))
        .with(PoseLandmark::LeftHip, Landmark::new(0.35, 0.6))
        .with(PoseLandmark::RightHip, Landmark::new(0.65, 0.6));
    AnatomyBuilder::default()
        .build(&f, Canvas::new(1280, 720).unwrap(), 1.0)
        .unwrap()
}

fn render(garment: &GarmentDescriptor, seed: u64) -> DrawList {
    render_garment(&anatomy(), garment, &mut SplitMix64::new(seed))
}

#[test]
fn lookup_table_maps_known_tags() {
    assert_eq!(GarmentStyle::Elegant.kind(), StyleKind::ElegantGown);
    assert_eq!(GarmentStyle::Formal.kind(), StyleKind::ElegantGown);
    assert_eq!(GarmentStyle::Casual.kind(), StyleKind::CasualDress);
    assert_eq!(GarmentStyle::Party.kind(), StyleKind::PartyDress);
    assert_eq!(GarmentStyle::Floral.kind(), StyleKind::FloralDress);
    for (tag, kind) in STYLE_TABLE {
        assert_eq!(GarmentStyle::from(tag).kind(), kind);
    }
}

#[test]
fn unknown_tags_fall_back_to_casual() {
    for tag in ["summer", "gothic", ""] {
        assert_eq!(GarmentStyle::from(tag).kind(), StyleKind::CasualDress);
    }
}

#[test]
fn unknown_style_draws_exactly_the_casual_dress() {
    let casual = GarmentDescriptor::new(1, "a", "#FFDD44", "casual");
    let gothic = GarmentDescriptor::new(2, "b", "#FFDD44", "gothic");
    assert_eq!(render(&casual, 3), render(&gothic, 3));
}

#[test]
fn every_builtin_garment_starts_with_a_closed_silhouette_fill() {
    for garment in Catalog::builtin().garments() {
        let list = render(garment, 11);
        let Some(DrawOp::FillPath { path, opacity, .. }) = list.ops().first() else {
            panic!("{} has no base fill", garment.name);
        };
        assert!(silhouette::is_closed(path, 1e-9), "{}", garment.name);
        let expected = match garment.style.kind() {
            StyleKind::CasualDress | StyleKind::FloralDress => 0.8,
            StyleKind::ElegantGown | StyleKind::PartyDress => 0.85,
        };
        assert_eq!(*opacity, expected, "{}", garment.name);
    }
}

#[test]
fn elegant_gown_layers() {
    let gown = GarmentDescriptor::new(1, "Red Dress", "#FF4444", "elegant");
    let list = render(&gown, 0);
    // fill, outline, seam, 10 texture lines, 2 shading bands, 5 jewels
    assert_eq!(list.len(), 1 + 1 + 1 + 10 + 2 + 5);
    let DrawOp::FillPath { brush, .. } = &list.ops()[0] else {
        panic!("expected fill");
    };
    let Brush::Linear { stops, .. } = brush else {
        panic!("expected linear gradient");
    };
    let base = Rgb8::new(0xFF, 0x44, 0x44);
    assert_eq!(stops.len(), 4);
    assert_eq!(stops[0].color, base.adjust(1.3).opaque());
    assert_eq!(stops[3].color, base.adjust(0.6).opaque());

    let floral = gown.clone().with_pattern("floral");
    assert_eq!(render(&floral, 0).len(), list.len() - 5);
}

#[test]
fn casual_dress_layers() {
    let dress = GarmentDescriptor::new(3, "Green Dress", "#44FF44", "casual");
    // fill, outline, 2 pockets, 5 buttons with 2 holes each
    assert_eq!(render(&dress, 0).len(), 2 + 2 + 15);
}

#[test]
fn party_dress_is_radial_with_sparkles_and_band() {
    let dress = GarmentDescriptor::new(5, "Pink Dress", "#FF44AA", "party");
    let list = render(&dress, 5);
    // fill, outline, 20 sparkles, 3 ruffles, waist band
    assert_eq!(list.len(), 2 + 20 + 3 + 1);
    assert!(matches!(
        &list.ops()[0],
        DrawOp::FillPath {
            brush: Brush::Radial { .. },
            ..
        }
    ));
    assert!(matches!(
        list.ops().last(),
        Some(DrawOp::FillRect { opacity, .. }) if *opacity == 0.6
    ));
    assert_ne!(list, render(&dress, 6));
}

#[test]
fn floral_dress_is_casual_plus_flowers() {
    let casual = GarmentDescriptor::new(1, "a", "#FF88AA", "casual");
    let floral = GarmentDescriptor::new(8, "b", "#FF88AA", "floral");
    let base = render(&casual, 9);
    let list = render(&floral, 9);
    assert!(list.len() > base.len());
    assert_eq!(&list.ops()[..base.len()], base.ops());

    let a = anatomy();
    for op in &list.ops()[base.len()..] {
        let DrawOp::FillPath { path, opacity, .. } = op else {
            panic!("flowers are fills");
        };
        assert_eq!(*opacity, detail::FLOWER_OPACITY);
        let c = path.bounding_box().center();
        assert!((c.x - a.shoulder_center.x).abs() <= a.dress_width * 0.3 + 20.0);
        assert!(c.y >= a.shoulder_center.y - 20.0 && c.y <= a.hem_y + 20.0);
    }
}
