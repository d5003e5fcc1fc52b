use tracing::debug;

use super::{CommandError, PlaybackRate};
use crate::engines::MediaEngine;

/// Keeps the playback rate applied on the media engine equal to the one selected by the user,
/// without ever writing a rate the engine already has.
pub(crate) struct PlaybackRateController {
    selected: PlaybackRate,
}

impl PlaybackRateController {
    pub(crate) fn new() -> Self {
        Self {
            selected: PlaybackRate::default(),
        }
    }

    pub(crate) fn selected(&self) -> PlaybackRate {
        self.selected
    }

    /// Select the rate whose value is `rate` and apply it to the engine.
    ///
    /// Returns `true` if the engine had to be updated. A `rate` which is not exactly one of
    /// the allowed `PlaybackRate` is rejected, not rounded.
    pub(crate) fn set_rate<E: MediaEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        rate: f64,
    ) -> Result<bool, CommandError> {
        let rate = PlaybackRate::from_value(rate).ok_or(CommandError::UnsupportedRate(rate))?;
        self.selected = rate;
        Ok(self.sync(engine))
    }

    /// Write the selected rate to the engine if it currently has another one.
    pub(crate) fn sync<E: MediaEngine + ?Sized>(&self, engine: &mut E) -> bool {
        let wanted = self.selected.value();
        if engine.playback_rate() == wanted {
            return false;
        }
        debug!("PlaybackRate: applying {wanted}");
        engine.set_playback_rate(wanted);
        true
    }
}
