use serde_json::json;

use super::*;

#[test]
fn media_type_accepts_lowercase_capitalized_and_unknown() {
    let t: MediaType = serde_json::from_value(json!("video")).unwrap();
    assert_eq!(t, MediaType::Video);
    let t: MediaType = serde_json::from_value(json!("Grid")).unwrap();
    assert_eq!(t, MediaType::Grid);
    let t: MediaType = serde_json::from_value(json!("hologram")).unwrap();
    assert_eq!(t, MediaType::Undefined);
}

#[test]
fn media_format_keeps_unknown_tags() {
    let f: MediaFormat = serde_json::from_value(json!("Equirectangular")).unwrap();
    assert_eq!(f, MediaFormat::Equirectangular);
    assert!(f.is_image_compatible());

    let f: MediaFormat = serde_json::from_value(json!("fisheye")).unwrap();
    assert_eq!(f, MediaFormat::Other("fisheye".to_owned()));
    assert!(!f.is_image_compatible());
    assert_eq!(serde_json::to_value(&f).unwrap(), json!("fisheye"));
}

#[test]
fn url_spec_playability() {
    assert!(UrlSpec::One("a.mp4".into()).is_playable());
    assert!(!UrlSpec::One(String::new()).is_playable());
    assert!(UrlSpec::Many(vec!["a".into()]).is_playable());
    assert!(!UrlSpec::Many(vec![]).is_playable());
}

#[test]
fn descriptor_parses_camel_case_options() {
    let d: MediaDescriptor = serde_json::from_value(json!({
        "uid": "m0",
        "type": "video",
        "source": { "url": ["a.mp4", "b.mp4"], "streaming": "DASH" },
        "options": { "volume": 0.5, "loop": false, "startTime": 3.0, "autoPlay": true }
    }))
    .unwrap();

    assert_eq!(d.media_type, MediaType::Video);
    let src = d.source.as_ref().unwrap();
    assert!(src.is_dash());
    assert_eq!(
        src.url,
        Some(UrlSpec::Many(vec!["a.mp4".into(), "b.mp4".into()]))
    );
    assert_eq!(d.options.volume_or_default(), 0.5);
    assert!(!d.options.loop_or_default());
    assert_eq!(d.options.start_time_or_default(), 3.0);
    assert_eq!(d.options.auto_play, Some(true));
    assert_eq!(d.options.auto_pause, None);
}

#[test]
fn option_defaults() {
    let o = MediaOptions::default();
    assert_eq!(o.volume_or_default(), 1.0);
    assert!(o.loop_or_default());
    assert_eq!(o.start_time_or_default(), 0.0);
}

#[test]
fn fx_config_parses_sets() {
    let c: FxConfig = serde_json::from_value(json!({
        "uid": "fx",
        "fxSets": [
            { "uid": "low", "set": [ { "uid": "e0", "type": "Bloom", "params": { "strength": 2 } } ] }
        ]
    }))
    .unwrap();
    assert_eq!(c.fx_sets.len(), 1);
    assert_eq!(c.fx_sets[0].set[0].effect_type, "Bloom");
    assert_eq!(c.fx_sets[0].set[0].params["strength"], json!(2));
}
