use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Streaming protocol tag that selects the adaptive (DASH) video variant.
pub const DASH_PROTOCOL: &str = "dash";

/// Declared media category of a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Still panorama or flat picture.
    #[serde(alias = "Image")]
    Image,
    /// Progressive or streamed video.
    #[serde(alias = "Video")]
    Video,
    /// Procedural grid; no asset to load.
    #[serde(alias = "Grid")]
    Grid,
    /// No usable media. Unknown tags also land here.
    #[default]
    #[serde(other)]
    Undefined,
}

/// Projection of the media onto the viewing surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaFormat {
    Equirectangular,
    Cube,
    Flat,
    /// Any other projection tag, kept verbatim.
    Other(String),
}

impl MediaFormat {
    /// Formats an image source can be built for.
    pub fn is_image_compatible(&self) -> bool {
        matches!(self, Self::Equirectangular | Self::Cube | Self::Flat)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Equirectangular => "equirectangular",
            Self::Cube => "cube",
            Self::Flat => "flat",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for MediaFormat {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "equirectangular" | "equirect" => Self::Equirectangular,
            "cube" | "cubemap" => Self::Cube,
            "flat" | "rectangular" => Self::Flat,
            _ => Self::Other(s),
        }
    }
}

impl From<MediaFormat> for String {
    fn from(f: MediaFormat) -> Self {
        match f {
            MediaFormat::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single url or an ordered list of candidate urls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlSpec {
    One(String),
    Many(Vec<String>),
}

impl UrlSpec {
    /// `true` for a non-empty string or a non-empty list.
    pub fn is_playable(&self) -> bool {
        match self {
            Self::One(s) => !s.is_empty(),
            Self::Many(v) => !v.is_empty(),
        }
    }

    /// First candidate url, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s.as_str()),
            Self::Many(v) => v.first().map(String::as_str),
        }
    }
}

/// One resolution level of a multi-level source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaLevel {
    /// Device requirement tag; a level without one is playable everywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<UrlSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<MediaLevel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<MediaFormat>,
    /// Streaming protocol tag, compared case-insensitively against [`DASH_PROTOCOL`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<String>,
}

impl MediaSource {
    pub fn is_dash(&self) -> bool {
        self.streaming
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(DASH_PROTOCOL))
    }
}

/// Playback hints applied once video metadata is available.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
    /// Start offset in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_play: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_pause: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_resume: Option<bool>,
}

impl MediaOptions {
    pub const DEFAULT_VOLUME: f64 = 1.0;
    pub const DEFAULT_LOOP: bool = true;
    pub const DEFAULT_START_TIME: f64 = 0.0;

    pub fn volume_or_default(&self) -> f64 {
        self.volume.unwrap_or(Self::DEFAULT_VOLUME)
    }

    pub fn loop_or_default(&self) -> bool {
        self.looping.unwrap_or(Self::DEFAULT_LOOP)
    }

    pub fn start_time_or_default(&self) -> f64 {
        self.start_time.unwrap_or(Self::DEFAULT_START_TIME)
    }
}

/// Author-supplied description of a scene's media.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub uid: String,
    #[serde(rename = "type", default)]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<MediaSource>,
    #[serde(default)]
    pub options: MediaOptions,
}

/// One declared post-processing effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    pub uid: String,
    /// Name key into the host effect catalog.
    #[serde(rename = "type")]
    pub effect_type: String,
    /// Parameter name to raw value or `{type, args}` structured spec.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

/// A named, ordered group of effect descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSet {
    pub uid: String,
    #[serde(default)]
    pub set: Vec<EffectDescriptor>,
}

/// Configuration-level collection of effect sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxConfig {
    pub uid: String,
    #[serde(default)]
    pub fx_sets: Vec<EffectSet>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
