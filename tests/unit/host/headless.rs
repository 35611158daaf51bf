use super::*;

#[test]
fn backend_hands_out_distinct_display_objects() {
    let backend = HeadlessBackend::new();
    let url = UrlSpec::One("a.jpg".into());
    let a = backend
        .create_image(&ImageRequest {
            uid: "a",
            url: &url,
            format: &MediaFormat::Flat,
        })
        .unwrap();
    let b = backend
        .create_video(&VideoRequest {
            uid: "b",
            variant: VideoVariant::Streaming,
        })
        .unwrap();
    assert_ne!(a.display_object(), b.display_object());
    assert_eq!(backend.created().len(), 2);
}

#[test]
fn auto_firing_video_fires_inside_load() {
    let backend = HeadlessBackend::auto_firing();
    let mut v = backend
        .create_video(&VideoRequest {
            uid: "v",
            variant: VideoVariant::Progressive { ambisonic: false },
        })
        .unwrap();
    assert!(!v.on_metadata_loaded().is_fired());
    v.load(&UrlSpec::One("v.mp4".into()));
    assert!(v.on_metadata_loaded().is_fired());

    let rec = backend.last_created().unwrap();
    assert_eq!(rec.calls(), vec![SourceCall::Load(UrlSpec::One("v.mp4".into()))]);
}

#[test]
fn recording_effect_surface_toggle() {
    let mut fx = RecordingEffect::new("Bloom");
    fx.uniforms_mut()
        .unwrap()
        .set_uniform("strength", UniformValue::Number(2.0));
    assert_eq!(fx.uniform("strength"), Some(&UniformValue::Number(2.0)));

    let mut opaque = RecordingEffect::opaque("Invert");
    assert!(opaque.uniforms_mut().is_none());

    let boxed: Box<dyn ShaderEffect> = Box::new(fx);
    assert_eq!(as_recording(boxed.as_ref()).unwrap().name, "Bloom");
}

#[test]
fn static_oracles() {
    let dev = StaticDevice::new(["desktop"]);
    assert!(dev.supports("desktop"));
    assert!(!dev.supports("mobile"));

    let scene = StaticScene {
        sound_targets: ["m0".to_owned()].into(),
        ambisonic: true,
    };
    assert!(scene.has_sound_target("m0"));
    assert!(scene.is_ambisonic());

    assert_eq!(
        StaticVisibility(VisibilityState::Hidden).visibility_state(),
        VisibilityState::Hidden
    );
}
