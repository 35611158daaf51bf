use super::*;
use crate::host::headless::{RecordingEffect, as_recording};

#[test]
fn lookup_is_exact_and_replace_returns_previous() {
    let mut reg = EffectRegistry::new();
    assert!(reg.is_empty());
    assert!(
        reg.register("Bloom", || Box::new(RecordingEffect::new("Bloom")))
            .is_none()
    );
    assert!(reg.has_effect("Bloom"));
    assert!(!reg.has_effect("bloom"));

    let old = reg.register("Bloom", || Box::new(RecordingEffect::new("Bloom2")));
    assert!(old.is_some());
    assert_eq!(reg.len(), 1);

    let ctor = reg.effect_constructor("Bloom").unwrap();
    let fx = ctor();
    assert_eq!(as_recording(fx.as_ref()).unwrap().name, "Bloom2");
}

#[test]
fn names_are_sorted() {
    let reg = EffectRegistry::new()
        .with("Vignette", || Box::new(RecordingEffect::new("Vignette")))
        .with("Bloom", || Box::new(RecordingEffect::new("Bloom")));
    assert_eq!(reg.names().collect::<Vec<_>>(), vec!["Bloom", "Vignette"]);
    assert!(reg.effect_constructor("Grain").is_none());
}
