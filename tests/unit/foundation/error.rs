use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TryOnError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TryOnError::render("x").to_string().contains("render error:"));
    assert!(
        TryOnError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        TryOnError::MissingAnchor(PoseLandmark::LeftShoulder)
            .to_string()
            .contains("LeftShoulder")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TryOnError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
