//! Playback controllers of a session: state reconciliation, progress tracking and the
//! translation of user intents into media engine and platform commands.

mod fullscreen;
mod progress;
mod rate;
mod seek;
mod state_machine;

pub(crate) use fullscreen::{FullscreenController, FullscreenError};
pub(crate) use progress::{ProgressModel, ProgressSnapshot};
pub(crate) use rate::PlaybackRateController;
pub(crate) use seek::{pointer_fraction, seek_to_fraction};
pub use state_machine::PlaybackState;
pub(crate) use state_machine::PlaybackStateMachine;

/// Speeds at which the media can be played, in the order they are presented to the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackRate {
    Half,
    #[default]
    Normal,
    OneAndHalf,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 4] = [
        PlaybackRate::Half,
        PlaybackRate::Normal,
        PlaybackRate::OneAndHalf,
        PlaybackRate::Double,
    ];

    /// Value of that rate as set on the media element, `1.` being normal speed.
    pub fn value(self) -> f64 {
        match self {
            PlaybackRate::Half => 0.5,
            PlaybackRate::Normal => 1.,
            PlaybackRate::OneAndHalf => 1.5,
            PlaybackRate::Double => 2.,
        }
    }

    /// Returns the `PlaybackRate` corresponding exactly to `value`, or `None` if `value` is
    /// not one of the allowed rates.
    pub fn from_value(value: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.value() == value)
    }
}

use thiserror::Error;

/// Errors resulting from a user command that cannot be honored.
///
/// Those mostly arise from normal UI rounding and are never fatal: the command is just not
/// performed.
#[derive(Error, Debug, PartialEq)]
pub(crate) enum CommandError {
    #[error("Seek position {0} is outside of the [0, 1] range")]
    SeekOutOfBounds(f64),
    #[error("Cannot seek from a progress bar with no width")]
    EmptySeekBar,
    #[error("Cannot seek while the media duration is unknown")]
    UnknownDuration,
    #[error("Playback rate {0} is not one of the allowed rates")]
    UnsupportedRate(f64),
}
