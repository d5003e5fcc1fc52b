use tracing::{debug, info};

use crate::engines::{FullscreenApi, FullscreenPlatform, FullscreenTransition};

/// Binary fullscreen state, bridged to the platform fullscreen capability.
///
/// The state is flipped as soon as the platform API is called, without waiting for the
/// platform to confirm. Platform change notifications, given to `on_platform_change`, then
/// correct any drift (a request silently rejected, or fullscreen exited with the Escape key).
pub(crate) struct FullscreenController {
    is_fullscreen: bool,

    /// APIs to try, in order, when entering or exiting fullscreen.
    apis: Vec<FullscreenApi>,
}

impl FullscreenController {
    /// `is_fullscreen` is the state the platform is currently in.
    pub(crate) fn new(apis: Vec<FullscreenApi>, is_fullscreen: bool) -> Self {
        Self {
            is_fullscreen,
            apis,
        }
    }

    pub(crate) fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Enter fullscreen through the first available platform API.
    ///
    /// Returns `Ok(false)` without calling the platform if already in fullscreen.
    pub(crate) fn enter<P: FullscreenPlatform + ?Sized>(
        &mut self,
        platform: &mut P,
    ) -> Result<bool, FullscreenError> {
        if self.is_fullscreen {
            return Ok(false);
        }
        let api = self.resolve(platform, FullscreenTransition::Enter)?;
        debug!("Fullscreen: entering through {:?}", api);
        platform.request_fullscreen(api);
        self.is_fullscreen = true;
        Ok(true)
    }

    /// Exit fullscreen through the first available platform API.
    ///
    /// Returns `Ok(false)` without calling the platform if not in fullscreen.
    pub(crate) fn exit<P: FullscreenPlatform + ?Sized>(
        &mut self,
        platform: &mut P,
    ) -> Result<bool, FullscreenError> {
        if !self.is_fullscreen {
            return Ok(false);
        }
        let api = self.resolve(platform, FullscreenTransition::Exit)?;
        debug!("Fullscreen: exiting through {:?}", api);
        platform.exit_fullscreen(api);
        self.is_fullscreen = false;
        Ok(true)
    }

    pub(crate) fn toggle<P: FullscreenPlatform + ?Sized>(
        &mut self,
        platform: &mut P,
    ) -> Result<bool, FullscreenError> {
        if self.is_fullscreen {
            self.exit(platform)
        } else {
            self.enter(platform)
        }
    }

    /// Align the state with the one the platform reports.
    ///
    /// Returns `true` if the state had drifted.
    pub(crate) fn on_platform_change(&mut self, is_fullscreen: bool) -> bool {
        if self.is_fullscreen == is_fullscreen {
            return false;
        }
        info!("Fullscreen: platform reported is_fullscreen={is_fullscreen}, reconciling");
        self.is_fullscreen = is_fullscreen;
        true
    }

    fn resolve<P: FullscreenPlatform + ?Sized>(
        &self,
        platform: &P,
        transition: FullscreenTransition,
    ) -> Result<FullscreenApi, FullscreenError> {
        self.apis
            .iter()
            .copied()
            .find(|api| platform.is_available(*api, transition))
            .ok_or(FullscreenError::NoAvailableApi(transition))
    }
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub(crate) enum FullscreenError {
    #[error("No fullscreen API available on this platform for transition {0:?}")]
    NoAvailableApi(FullscreenTransition),
}
