use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PanoError::unsupported("x")
            .to_string()
            .contains("unsupported configuration:")
    );
    assert!(
        PanoError::invalid_param("x")
            .to_string()
            .contains("invalid parameter spec:")
    );
    assert!(
        PanoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PanoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PanoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
