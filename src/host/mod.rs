//! Collaborator contracts supplied by the embedding player.
//!
//! The resolver and compiler never touch an engine directly. Everything they construct or query
//! goes through the traits in this module, which keeps both components testable against the
//! in-memory doubles in [`headless`].

use std::any::Any;
use std::rc::Rc;

use crate::effects::value::UniformValue;
use crate::foundation::error::PanoResult;
use crate::foundation::signal::ReadinessSignal;
use crate::scene::model::{MediaFormat, UrlSpec};

pub mod headless;

/// Opaque handle to the engine display object a playable source owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayObjectId(pub u64);

/// Engine wrapper around a still image.
pub trait ImageSource {
    fn display_object(&self) -> DisplayObjectId;
    /// One-shot signal fired once the image is decoded and displayable.
    fn on_load_complete(&self) -> ReadinessSignal;
    fn destroy(&mut self);
}

/// Engine wrapper around a video element.
pub trait VideoSource {
    fn display_object(&self) -> DisplayObjectId;
    /// Begin loading a url or an ordered list of candidate urls.
    fn load(&mut self, url: &UrlSpec);
    /// One-shot signal fired once duration and dimensions are known.
    fn on_metadata_loaded(&self) -> ReadinessSignal;
    fn set_volume(&mut self, volume: f64);
    fn set_loop(&mut self, looping: bool);
    fn set_current_time(&mut self, seconds: f64);
    fn set_auto_pause(&mut self, auto_pause: Option<bool>);
    fn set_auto_resume(&mut self, auto_resume: Option<bool>);
    fn play(&mut self);
    fn destroy(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRequest<'a> {
    pub uid: &'a str,
    pub url: &'a UrlSpec,
    pub format: &'a MediaFormat,
}

/// Which video wrapper to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoVariant {
    /// Adaptive DASH streaming.
    Streaming,
    /// Plain progressive download; `ambisonic` routes audio through the spatial mixer.
    Progressive { ambisonic: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoRequest<'a> {
    pub uid: &'a str,
    pub variant: VideoVariant,
}

/// Factory for playable sources.
pub trait MediaBackend {
    fn create_image(&self, req: &ImageRequest<'_>) -> PanoResult<Box<dyn ImageSource>>;
    fn create_video(&self, req: &VideoRequest<'_>) -> PanoResult<Box<dyn VideoSource>>;
}

pub trait DeviceCapability {
    /// Whether the current device satisfies a level's device requirement tag.
    fn supports(&self, device: &str) -> bool;
}

pub trait SceneAudio {
    fn has_sound_target(&self, uid: &str) -> bool;
    fn is_ambisonic(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisibilityState {
    #[default]
    Visible,
    Hidden,
}

pub trait PageVisibility {
    fn visibility_state(&self) -> VisibilityState;
}

/// Collaborators a [`crate::MediaResolver`] needs, bundled per viewer.
#[derive(Clone)]
pub struct ViewerContext {
    pub backend: Rc<dyn MediaBackend>,
    pub device: Rc<dyn DeviceCapability>,
    pub scene: Rc<dyn SceneAudio>,
    pub visibility: Rc<dyn PageVisibility>,
}

impl ViewerContext {
    pub fn new(
        backend: Rc<dyn MediaBackend>,
        device: Rc<dyn DeviceCapability>,
        scene: Rc<dyn SceneAudio>,
        visibility: Rc<dyn PageVisibility>,
    ) -> Self {
        Self {
            backend,
            device,
            scene,
            visibility,
        }
    }
}

/// Named parameter slots of an engine effect.
pub trait UniformSurface {
    fn set_uniform(&mut self, name: &str, value: UniformValue);
}

/// Engine-native post-processing effect object.
pub trait ShaderEffect: Any {
    /// The bindable parameter surface, if this effect exposes one.
    fn uniforms_mut(&mut self) -> Option<&mut dyn UniformSurface>;
}

/// Builds a fresh effect instance.
pub type EffectConstructor = Rc<dyn Fn() -> Box<dyn ShaderEffect>>;

/// Host lookup of effect constructors by type name.
pub trait EffectCatalog {
    fn has_effect(&self, name: &str) -> bool;
    fn effect_constructor(&self, name: &str) -> Option<EffectConstructor>;
}
