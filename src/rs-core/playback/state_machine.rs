use serde::Serialize;
use tracing::debug;

use crate::engines::MediaEvent;

/// Canonical playback state exposed to the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Playback never started on this session.
    #[default]
    Idle,
    /// The media engine stalled, waiting for data.
    Waiting,
    Playing,
    Paused,
}

/// Reconciles the events emitted by the media engine into a single `PlaybackState`.
///
/// The state is only ever driven by engine events: user play/pause commands are sent to the
/// engine and their effect is observed through the event that follows, so an engine refusing
/// to play (e.g. autoplay rejection) never leaves us displaying a wrong state.
pub(crate) struct PlaybackStateMachine {
    state: PlaybackState,

    /// State active right before the last stall, restored if the engine signals it can play
    /// again without actually resuming.
    before_stall: PlaybackState,
}

impl PlaybackStateMachine {
    pub(crate) fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
            before_stall: PlaybackState::Idle,
        }
    }

    pub(crate) fn state(&self) -> PlaybackState {
        self.state
    }

    pub(crate) fn is_waiting(&self) -> bool {
        self.state == PlaybackState::Waiting
    }

    /// Returns `true` if a play/pause toggle should pause: either we're playing, or we stalled
    /// while playing.
    pub(crate) fn wants_pause(&self) -> bool {
        match self.state {
            PlaybackState::Playing => true,
            PlaybackState::Waiting => self.before_stall == PlaybackState::Playing,
            PlaybackState::Idle | PlaybackState::Paused => false,
        }
    }

    /// Apply a media event, returning the new state if it changed.
    pub(crate) fn on_event(&mut self, event: MediaEvent) -> Option<PlaybackState> {
        let next = match event {
            MediaEvent::Waiting => {
                if self.state != PlaybackState::Waiting {
                    self.before_stall = self.state;
                }
                PlaybackState::Waiting
            }
            MediaEvent::Play | MediaEvent::Playing => PlaybackState::Playing,
            MediaEvent::Pause => PlaybackState::Paused,

            // Some engines never send "playing" after a short stall: the playhead moving is
            // enough to know playback resumed.
            MediaEvent::TimeUpdate if self.state == PlaybackState::Waiting => {
                PlaybackState::Playing
            }
            MediaEvent::CanPlay if self.state == PlaybackState::Waiting => self.before_stall,
            MediaEvent::TimeUpdate | MediaEvent::CanPlay | MediaEvent::Progress => self.state,
        };
        if next == self.state {
            return None;
        }
        debug!("PlaybackState: {:?} -> {:?} on {:?}", self.state, next, event);
        self.state = next;
        Some(next)
    }
}
