use super::*;

#[test]
fn parse_errors_are_serde_errors() {
    let err = MediaDescriptor::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, PanoError::Serde(_)));
    let err = FxConfig::from_json_str("[]").unwrap_err();
    assert!(matches!(err, PanoError::Serde(_)));
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = FxConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn image_without_source_fails_validation_but_grid_passes() {
    let d = MediaDescriptor::from_json_str(r#"{ "uid": "a", "type": "image" }"#).unwrap();
    assert!(d.validate().is_err());

    let d = MediaDescriptor::from_json_str(r#"{ "uid": "g", "type": "grid" }"#).unwrap();
    d.validate().unwrap();
}

#[test]
fn negative_volume_is_rejected() {
    let d = MediaDescriptor::from_json_str(
        r#"{ "uid": "v", "type": "video", "source": { "url": "v.mp4" }, "options": { "volume": -1 } }"#,
    )
    .unwrap();
    assert!(d.validate().is_err());
}

#[test]
fn duplicate_set_uids_validate_but_duplicate_effect_uids_do_not() {
    let c = FxConfig::from_json_str(
        r#"{ "uid": "fx", "fxSets": [ { "uid": "s", "set": [] }, { "uid": "s", "set": [] } ] }"#,
    )
    .unwrap();
    c.validate().unwrap();

    let c = FxConfig::from_json_str(
        r#"{ "uid": "fx", "fxSets": [ { "uid": "s", "set": [
            { "uid": "e", "type": "Blur" }, { "uid": "e", "type": "Bloom" } ] } ] }"#,
    )
    .unwrap();
    assert!(c.validate().is_err());
}
