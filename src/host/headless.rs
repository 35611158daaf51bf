//! In-memory collaborators that record every call.
//!
//! Used by the `panoview` dry-run commands and by tests. Sources created by [`HeadlessBackend`]
//! never load anything on their own; their signals fire either when the caller fires them through
//! [`CreatedSource::signal`] or immediately when the backend is built with auto-fire enabled.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::effects::value::UniformValue;
use crate::foundation::error::PanoResult;
use crate::foundation::signal::ReadinessSignal;
use crate::host::{
    DeviceCapability, DisplayObjectId, ImageRequest, ImageSource, MediaBackend, PageVisibility,
    SceneAudio, ShaderEffect, UniformSurface, VideoRequest, VideoSource, VideoVariant,
    VisibilityState,
};
use crate::scene::model::{MediaFormat, UrlSpec};

/// A call observed on a headless source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCall {
    Load(UrlSpec),
    Volume(f64),
    Loop(bool),
    CurrentTime(f64),
    AutoPause(Option<bool>),
    AutoResume(Option<bool>),
    Play,
    Destroy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreatedKind {
    Image { url: UrlSpec, format: MediaFormat },
    Video { variant: VideoVariant },
}

/// Record of a source handed out by [`HeadlessBackend`].
#[derive(Debug, Clone)]
pub struct CreatedSource {
    pub uid: String,
    pub kind: CreatedKind,
    pub display: DisplayObjectId,
    /// The image's load-complete or the video's metadata-loaded signal.
    pub signal: ReadinessSignal,
    calls: Rc<RefCell<Vec<SourceCall>>>,
}

impl CreatedSource {
    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.borrow().clone()
    }

    pub fn is_destroyed(&self) -> bool {
        self.calls.borrow().contains(&SourceCall::Destroy)
    }
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    auto_fire: bool,
    next_display: Cell<u64>,
    created: RefCell<Vec<CreatedSource>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Images report loaded as soon as they are created; videos report metadata inside `load`.
    pub fn auto_firing() -> Self {
        Self {
            auto_fire: true,
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<CreatedSource> {
        self.created.borrow().clone()
    }

    pub fn last_created(&self) -> Option<CreatedSource> {
        self.created.borrow().last().cloned()
    }

    fn record(&self, uid: &str, kind: CreatedKind) -> CreatedSource {
        let id = self.next_display.get() + 1;
        self.next_display.set(id);
        let rec = CreatedSource {
            uid: uid.to_owned(),
            kind,
            display: DisplayObjectId(id),
            signal: ReadinessSignal::new(),
            calls: Rc::new(RefCell::new(Vec::new())),
        };
        self.created.borrow_mut().push(rec.clone());
        rec
    }
}

impl MediaBackend for HeadlessBackend {
    fn create_image(&self, req: &ImageRequest<'_>) -> PanoResult<Box<dyn ImageSource>> {
        let rec = self.record(
            req.uid,
            CreatedKind::Image {
                url: req.url.clone(),
                format: req.format.clone(),
            },
        );
        if self.auto_fire {
            rec.signal.fire();
        }
        Ok(Box::new(HeadlessImage {
            display: rec.display,
            signal: rec.signal,
            calls: rec.calls,
        }))
    }

    fn create_video(&self, req: &VideoRequest<'_>) -> PanoResult<Box<dyn VideoSource>> {
        let rec = self.record(
            req.uid,
            CreatedKind::Video {
                variant: req.variant,
            },
        );
        Ok(Box::new(HeadlessVideo {
            display: rec.display,
            signal: rec.signal,
            calls: rec.calls,
            fire_on_load: self.auto_fire,
        }))
    }
}

struct HeadlessImage {
    display: DisplayObjectId,
    signal: ReadinessSignal,
    calls: Rc<RefCell<Vec<SourceCall>>>,
}

impl ImageSource for HeadlessImage {
    fn display_object(&self) -> DisplayObjectId {
        self.display
    }

    fn on_load_complete(&self) -> ReadinessSignal {
        self.signal.clone()
    }

    fn destroy(&mut self) {
        self.signal.release();
        self.calls.borrow_mut().push(SourceCall::Destroy);
    }
}

struct HeadlessVideo {
    display: DisplayObjectId,
    signal: ReadinessSignal,
    calls: Rc<RefCell<Vec<SourceCall>>>,
    fire_on_load: bool,
}

impl HeadlessVideo {
    fn push(&self, call: SourceCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl VideoSource for HeadlessVideo {
    fn display_object(&self) -> DisplayObjectId {
        self.display
    }

    fn load(&mut self, url: &UrlSpec) {
        self.push(SourceCall::Load(url.clone()));
        if self.fire_on_load && !self.signal.is_fired() {
            self.signal.fire();
        }
    }

    fn on_metadata_loaded(&self) -> ReadinessSignal {
        self.signal.clone()
    }

    fn set_volume(&mut self, volume: f64) {
        self.push(SourceCall::Volume(volume));
    }

    fn set_loop(&mut self, looping: bool) {
        self.push(SourceCall::Loop(looping));
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.push(SourceCall::CurrentTime(seconds));
    }

    fn set_auto_pause(&mut self, auto_pause: Option<bool>) {
        self.push(SourceCall::AutoPause(auto_pause));
    }

    fn set_auto_resume(&mut self, auto_resume: Option<bool>) {
        self.push(SourceCall::AutoResume(auto_resume));
    }

    fn play(&mut self) {
        self.push(SourceCall::Play);
    }

    fn destroy(&mut self) {
        self.signal.release();
        self.push(SourceCall::Destroy);
    }
}

/// Device oracle backed by a fixed set of supported tags.
#[derive(Debug, Clone, Default)]
pub struct StaticDevice {
    supported: BTreeSet<String>,
}

impl StaticDevice {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl DeviceCapability for StaticDevice {
    fn supports(&self, device: &str) -> bool {
        self.supported.contains(device)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    pub sound_targets: BTreeSet<String>,
    pub ambisonic: bool,
}

impl SceneAudio for StaticScene {
    fn has_sound_target(&self, uid: &str) -> bool {
        self.sound_targets.contains(uid)
    }

    fn is_ambisonic(&self) -> bool {
        self.ambisonic
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticVisibility(pub VisibilityState);

impl PageVisibility for StaticVisibility {
    fn visibility_state(&self) -> VisibilityState {
        self.0
    }
}

/// Effect that stores every uniform bound onto it.
#[derive(Debug, Clone, Default)]
pub struct RecordingEffect {
    pub name: String,
    bindable: bool,
    uniforms: BTreeMap<String, UniformValue>,
}

impl RecordingEffect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindable: true,
            uniforms: BTreeMap::new(),
        }
    }

    /// An effect without a parameter surface.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            bindable: false,
            ..Self::new(name)
        }
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    pub fn uniforms(&self) -> &BTreeMap<String, UniformValue> {
        &self.uniforms
    }
}

impl UniformSurface for RecordingEffect {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms.insert(name.to_owned(), value);
    }
}

impl ShaderEffect for RecordingEffect {
    fn uniforms_mut(&mut self) -> Option<&mut dyn UniformSurface> {
        if self.bindable {
            Some(self as &mut dyn UniformSurface)
        } else {
            None
        }
    }
}

/// Downcast helper for effects handed back inside pipeline stages.
pub fn as_recording(effect: &dyn ShaderEffect) -> Option<&RecordingEffect> {
    let any: &dyn Any = effect;
    any.downcast_ref::<RecordingEffect>()
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
