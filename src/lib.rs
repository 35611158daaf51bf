//! Panoview resolves scene media and compiles post-processing effect pipelines for 360/VR
//! players.
//!
//! Two independent components sit between a JSON scene description and the host engine:
//!
//! - [`MediaResolver`] turns a [`MediaDescriptor`] into a playable image or video source and
//!   reports readiness exactly once through a memoized [`ReadinessSignal`].
//! - [`EffectPipelineCompiler`] turns ordered [`EffectDescriptor`] lists into parameter-bound
//!   [`PipelineStage`]s using an explicit [`EffectCatalog`].
//!
//! Engine objects are reached only through the traits in [`host`].
#![forbid(unsafe_code)]

mod effects;
mod foundation;
mod media;
mod scene;

pub mod host;

pub use crate::effects::catalog::EffectRegistry;
pub use crate::effects::compiler::{EffectPipelineCompiler, PipelineStage};
pub use crate::effects::value::{
    Color, ParamSpec, StructuredKind, UniformValue, Vec2, Vec3, parse_param_spec,
};
pub use crate::foundation::error::{PanoError, PanoResult};
pub use crate::foundation::signal::ReadinessSignal;
pub use crate::host::{
    DeviceCapability, DisplayObjectId, EffectCatalog, EffectConstructor, ImageSource, MediaBackend,
    PageVisibility, SceneAudio, ShaderEffect, UniformSurface, VideoSource, VideoVariant,
    ViewerContext, VisibilityState,
};
pub use crate::media::resolver::{MediaResolver, ResolutionState};
pub use crate::media::source::PlayableSource;
pub use crate::scene::model::{
    DASH_PROTOCOL, EffectDescriptor, EffectSet, FxConfig, MediaDescriptor, MediaFormat,
    MediaLevel, MediaOptions, MediaSource, MediaType, UrlSpec,
};
