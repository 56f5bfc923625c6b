use super::*;

fn parse(v: serde_json::Value) -> TryOnResult<TryOnConfig> {
    TryOnConfig::from_reader(v.to_string().as_bytes())
}

#[test]
fn scale_is_clamped() {
    let mut cfg = RenderConfig::default();
    assert_eq!(cfg.scale(), 1.0);
    cfg.set_scale(3.0);
    assert_eq!(cfg.scale(), 2.0);
    cfg.set_scale(0.1);
    assert_eq!(cfg.scale(), 0.5);
    cfg.set_scale(f32::NAN);
    assert_eq!(cfg.scale(), 1.0);
    cfg.set_scale(1.25);
    assert_eq!(cfg.scale(), 1.25);
}

#[test]
fn skeleton_is_hidden_until_requested() {
    assert!(!RenderConfig::default().show_skeleton);
    let cfg = parse(serde_json::json!({})).unwrap();
    assert!(!cfg.render.show_skeleton);
    let cfg = parse(serde_json::json!({ "render": { "show_skeleton": true } })).unwrap();
    assert!(cfg.render.show_skeleton);
}

#[test]
fn skeleton_toggle_flips() {
    let mut cfg = RenderConfig::default().with_skeleton(true);
    cfg.toggle_skeleton();
    assert!(!cfg.show_skeleton);
}

#[test]
fn empty_json_is_the_default_config() {
    let cfg = parse(serde_json::json!({})).unwrap();
    assert_eq!(cfg, TryOnConfig::default());
    assert_eq!(cfg.catalog().unwrap(), Catalog::builtin());
    assert_eq!(cfg.anatomy_builder(), AnatomyBuilder::default());
}

#[test]
fn deserialized_scale_is_clamped() {
    let cfg = parse(serde_json::json!({ "render": { "garment_scale": 9.0 } })).unwrap();
    assert_eq!(cfg.render.scale(), 2.0);
}

#[test]
fn partial_proportions_keep_other_defaults() {
    let cfg = parse(serde_json::json!({ "proportions": { "width_ratio": 1.6 } })).unwrap();
    assert_eq!(cfg.proportions.width_ratio, 1.6);
    assert_eq!(cfg.proportions.length_ratio, 2.2);
}

#[test]
fn custom_catalog_and_default_garment() {
    let cfg = parse(serde_json::json!({
        "catalog": [
            { "id": 10, "name": "Teal", "color": "#008080", "style": "casual" },
            { "id": 11, "name": "Gold", "color": "#FFD700", "style": "party" }
        ],
        "default_garment": 11
    }))
    .unwrap();
    let catalog = cfg.catalog().unwrap();
    assert_eq!(catalog.garments().len(), 2);
    assert_eq!(catalog.get(11).unwrap().name, "Gold");
}

#[test]
fn invalid_configs_are_rejected() {
    let bad = [
        serde_json::json!({ "visibility_threshold": 1.5 }),
        serde_json::json!({ "default_garment": 99 }),
        serde_json::json!({ "catalog": [] }),
        serde_json::json!({ "proportions": { "length_ratio": 0.0 } }),
    ];
    for v in bad {
        assert!(
            matches!(parse(v.clone()), Err(TryOnError::Validation(_))),
            "{v}"
        );
    }
    assert!(matches!(
        parse(serde_json::json!({ "unknown": true })),
        Err(TryOnError::Serde(_))
    ));
}
