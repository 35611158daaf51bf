use std::fmt;

use crate::host::{DisplayObjectId, ImageSource, VideoSource};

/// Runtime wrapper around the concrete asset a resolver produced.
pub enum PlayableSource {
    Image(Box<dyn ImageSource>),
    Video(Box<dyn VideoSource>),
}

impl PlayableSource {
    pub fn display_object(&self) -> DisplayObjectId {
        match self {
            Self::Image(i) => i.display_object(),
            Self::Video(v) => v.display_object(),
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video(_))
    }

    /// Cascade teardown to the engine object.
    pub fn destroy(&mut self) {
        match self {
            Self::Image(i) => i.destroy(),
            Self::Video(v) => v.destroy(),
        }
    }
}

impl fmt::Debug for PlayableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Image(_) => "Image",
            Self::Video(_) => "Video",
        };
        f.debug_struct("PlayableSource")
            .field("kind", &kind)
            .field("display_object", &self.display_object())
            .finish()
    }
}
