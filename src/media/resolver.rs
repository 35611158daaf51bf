use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::foundation::error::{PanoError, PanoResult};
use crate::foundation::signal::ReadinessSignal;
use crate::host::{
    DeviceCapability, DisplayObjectId, ImageRequest, PageVisibility, VideoRequest, VideoSource,
    VideoVariant, ViewerContext, VisibilityState,
};
use crate::media::source::PlayableSource;
use crate::scene::model::{
    MediaDescriptor, MediaFormat, MediaLevel, MediaOptions, MediaSource, MediaType, UrlSpec,
};

/// Where a resolver stands relative to its readiness signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    /// Waiting on the playable source to report.
    Pending,
    /// The readiness signal has fired.
    Loaded,
    /// Nothing playable was declared; the signal will never fire.
    Unresolved,
}

type SourceSlot = Rc<RefCell<Option<PlayableSource>>>;

/// Resolves one [`MediaDescriptor`] into a playable source and reports readiness once.
///
/// Classification runs synchronously in [`MediaResolver::new`]. Grids and absent descriptors are
/// ready immediately; images become ready when the engine image finishes loading; videos become
/// ready after their metadata arrives and playback options have been applied.
pub struct MediaResolver {
    config: Option<MediaDescriptor>,
    media_type: MediaType,
    source: SourceSlot,
    ready: ReadinessSignal,
    unresolved: bool,
}

impl MediaResolver {
    /// Classify `descriptor` and start loading its source.
    ///
    /// Fails only for image descriptors without a url or with a projection no image source
    /// supports; in both cases no source is constructed.
    #[tracing::instrument(skip_all)]
    pub fn new(ctx: &ViewerContext, descriptor: Option<MediaDescriptor>) -> PanoResult<Self> {
        let mut this = Self {
            config: None,
            media_type: MediaType::Undefined,
            source: Rc::new(RefCell::new(None)),
            ready: ReadinessSignal::new(),
            unresolved: false,
        };

        let Some(mut desc) = descriptor else {
            tracing::debug!("no media descriptor, ready as undefined");
            this.ready.fire();
            return Ok(this);
        };

        this.media_type = desc.media_type;
        if let Some(src) = desc.source.as_mut() {
            src.format.get_or_insert(MediaFormat::Flat);
        }

        match (desc.media_type, desc.source.as_ref()) {
            (MediaType::Grid, _) => {
                tracing::debug!(uid = %desc.uid, "grid media needs no asset");
                this.ready.fire();
            }
            (_, None) => {
                tracing::debug!(uid = %desc.uid, "media has no source, leaving unresolved");
                this.unresolved = true;
            }
            (MediaType::Image, Some(src)) => this.resolve_image(ctx, &desc.uid, src)?,
            (MediaType::Video, Some(src)) => {
                this.resolve_video(ctx, &desc.uid, src, &desc.options)?
            }
            (MediaType::Undefined, Some(_)) => {
                tracing::debug!(uid = %desc.uid, "undefined media type, leaving unresolved");
                this.unresolved = true;
            }
        }

        this.config = Some(desc);
        Ok(this)
    }

    fn resolve_image(
        &mut self,
        ctx: &ViewerContext,
        uid: &str,
        src: &MediaSource,
    ) -> PanoResult<()> {
        let Some(url) = src.url.as_ref() else {
            return Err(PanoError::unsupported(
                "multi-resolution image not implemented",
            ));
        };
        let flat = MediaFormat::Flat;
        let format = src.format.as_ref().unwrap_or(&flat);
        if !format.is_image_compatible() {
            return Err(PanoError::unsupported(format!(
                "format '{format}' not supported for image '{uid}'"
            )));
        }

        let image = ctx.backend.create_image(&ImageRequest { uid, url, format })?;
        let loaded = image.on_load_complete();
        *self.source.borrow_mut() = Some(PlayableSource::Image(image));

        let slot = Rc::downgrade(&self.source);
        let ready = self.ready.clone();
        let uid = uid.to_owned();
        loaded.subscribe(move || {
            if !slot_is_live(&slot) {
                return;
            }
            tracing::debug!(%uid, "image loaded");
            ready.fire();
        });
        Ok(())
    }

    fn resolve_video(
        &mut self,
        ctx: &ViewerContext,
        uid: &str,
        src: &MediaSource,
        options: &MediaOptions,
    ) -> PanoResult<()> {
        let url = match &src.levels {
            Some(levels) => UrlSpec::Many(supported_level_urls(levels, ctx.device.as_ref())),
            None => src.url.clone().unwrap_or(UrlSpec::Many(Vec::new())),
        };
        if !url.is_playable() {
            tracing::debug!(%uid, "video has no playable url, leaving unresolved");
            self.unresolved = true;
            return Ok(());
        }

        let variant = if src.is_dash() {
            VideoVariant::Streaming
        } else {
            VideoVariant::Progressive {
                ambisonic: ctx.scene.has_sound_target(uid) && ctx.scene.is_ambisonic(),
            }
        };

        let mut video = ctx.backend.create_video(&VideoRequest { uid, variant })?;
        let metadata = video.on_metadata_loaded();
        video.load(&url);
        *self.source.borrow_mut() = Some(PlayableSource::Video(video));

        // Subscribing after the slot is filled: a source that reports synchronously from `load`
        // is picked up through the memoized signal without a live borrow.
        let slot = Rc::downgrade(&self.source);
        let ready = self.ready.clone();
        let options = options.clone();
        let visibility = Rc::clone(&ctx.visibility);
        let uid = uid.to_owned();
        metadata.subscribe(move || {
            let Some(slot) = slot.upgrade() else {
                return;
            };
            {
                let mut guard = slot.borrow_mut();
                let Some(PlayableSource::Video(video)) = guard.as_mut() else {
                    return;
                };
                apply_options(video.as_mut(), &options, visibility.as_ref());
            }
            tracing::debug!(%uid, "video metadata loaded");
            ready.fire();
        });
        Ok(())
    }

    /// The descriptor as resolved, with the default format filled in.
    pub fn config(&self) -> Option<&MediaDescriptor> {
        self.config.as_ref()
    }

    /// Uid of the resolved descriptor, if one was given.
    pub fn uid(&self) -> Option<&str> {
        self.config.as_ref().map(|d| d.uid.as_str())
    }

    /// Declared media type; `Undefined` when no descriptor was given.
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Display object of the owned source; `None` before construction succeeded or after
    /// [`MediaResolver::destroy`].
    pub fn display_object(&self) -> Option<DisplayObjectId> {
        self.source.borrow().as_ref().map(PlayableSource::display_object)
    }

    /// Whether a playable source is currently owned.
    pub fn has_source(&self) -> bool {
        self.source.borrow().is_some()
    }

    /// Whether the readiness signal has fired.
    pub fn loaded(&self) -> bool {
        self.ready.is_fired()
    }

    /// Current [`ResolutionState`], derived from the signal and the unresolved flag.
    pub fn state(&self) -> ResolutionState {
        if self.ready.is_fired() {
            ResolutionState::Loaded
        } else if self.unresolved {
            ResolutionState::Unresolved
        } else {
            ResolutionState::Pending
        }
    }

    /// Readiness signal; subscribe to be told when the media can be displayed.
    pub fn on_load_complete(&self) -> &ReadinessSignal {
        &self.ready
    }

    /// Release the owned source and drop any readiness waiters. Later calls do nothing; dropping
    /// the resolver calls this too.
    pub fn destroy(&mut self) {
        let taken = self.source.borrow_mut().take();
        if let Some(mut src) = taken {
            tracing::debug!(uid = ?self.uid(), "destroying playable source");
            src.destroy();
        }
        self.ready.release();
    }
}

impl Drop for MediaResolver {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for MediaResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaResolver")
            .field("uid", &self.uid())
            .field("media_type", &self.media_type)
            .field("state", &self.state())
            .field("display_object", &self.display_object())
            .finish()
    }
}

fn slot_is_live(slot: &Weak<RefCell<Option<PlayableSource>>>) -> bool {
    slot.upgrade()
        .is_some_and(|s| s.try_borrow().map(|g| g.is_some()).unwrap_or(true))
}

/// Urls of the levels the device supports, in declaration order.
pub(crate) fn supported_level_urls(
    levels: &[MediaLevel],
    device: &dyn DeviceCapability,
) -> Vec<String> {
    levels
        .iter()
        .filter(|l| l.device.as_deref().is_none_or(|d| device.supports(d)))
        .map(|l| l.url.clone())
        .collect()
}

fn apply_options(video: &mut dyn VideoSource, options: &MediaOptions, page: &dyn PageVisibility) {
    video.set_volume(options.volume_or_default());
    video.set_loop(options.loop_or_default());
    video.set_current_time(options.start_time_or_default());
    video.set_auto_pause(options.auto_pause);
    video.set_auto_resume(options.auto_resume);
    if options.auto_play == Some(true) && page.visibility_state() == VisibilityState::Visible {
        video.play();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/resolver.rs"]
mod tests;
