//! A playback session: the lifetime of one media source, from its acquisition to its release.

use tracing::{debug, info, warn};

use crate::{
    dispatcher::{MediaObservation, PlayerConfiguration},
    engines::{
        FullscreenPlatform, MediaEngine, MediaEvent, RecognitionId, SpeechRecognizer,
        SubscriptionId,
    },
    playback::{
        pointer_fraction, seek_to_fraction, CommandError, FullscreenController, FullscreenError,
        PlaybackRateController, PlaybackStateMachine, ProgressModel,
    },
    transcript::{SpeechErrorReason, TranscriptError, TranscriptSession},
    utils::time_format::format_elapsed,
    watch_time::{WatchTimeMilestones, WatchTimeReport},
};

mod view;

pub use view::PlaybackViewState;
pub(crate) use view::{ViewStateChange, ViewStateTracker};

/// Every per-session component, alongside the engines they command.
///
/// A `PlaybackSession` is only created through `SessionLifecycle::acquire`, which also makes
/// sure it is released before being discarded.
pub(crate) struct PlaybackSession<E: MediaEngine, S: SpeechRecognizer, F: FullscreenPlatform> {
    source: String,

    media: E,
    speech: S,
    platform: F,

    /// Registration of our listeners on the media engine. `None` once released.
    subscription: Option<SubscriptionId>,

    playback: PlaybackStateMachine,
    progress: ProgressModel,
    rate: PlaybackRateController,
    fullscreen: FullscreenController,
    transcript: TranscriptSession,
    watch_time: WatchTimeMilestones,
}

impl<E: MediaEngine, S: SpeechRecognizer, F: FullscreenPlatform> PlaybackSession<E, S, F> {
    fn acquire(
        source: String,
        mut media: E,
        speech: S,
        platform: F,
        config: &PlayerConfiguration,
    ) -> Self {
        info!("Session: binding source {source}");
        media.attach_source(&source);
        let subscription = media.subscribe();
        let rate = PlaybackRateController::new();
        rate.sync(&mut media);
        let fullscreen =
            FullscreenController::new(config.fullscreen_apis.clone(), platform.is_fullscreen());
        Self {
            watch_time: WatchTimeMilestones::new(source.clone(), config.watch_time_interval_sec),
            source,
            media,
            speech,
            platform,
            subscription: Some(subscription),
            playback: PlaybackStateMachine::new(),
            progress: ProgressModel::new(),
            rate,
            fullscreen,
            transcript: TranscriptSession::new(config.continuous_transcript),
        }
    }

    /// Apply an event emitted by the media engine.
    ///
    /// Returns the watch-time report this event triggered, if any.
    fn on_media_event(
        &mut self,
        event: MediaEvent,
        observation: &MediaObservation,
    ) -> Option<WatchTimeReport> {
        match event {
            MediaEvent::Progress => {
                self.progress.on_progress(observation);
            }
            MediaEvent::TimeUpdate => {
                self.progress.on_time_update(observation);
            }
            _ => {}
        }
        self.playback.on_event(event);
        match event {
            MediaEvent::TimeUpdate if self.progress.is_duration_known() => self
                .watch_time
                .on_time_update(&self.progress.snapshot(), self.progress.has_ended()),
            MediaEvent::Pause if self.progress.is_duration_known() => {
                self.watch_time.on_pause(&self.progress.snapshot())
            }
            _ => None,
        }
    }

    pub(crate) fn play(&mut self) {
        self.media.play();
    }

    pub(crate) fn pause(&mut self) {
        self.media.pause();
    }

    /// Ask the engine to pause if playing (or stalled while playing), to play otherwise.
    ///
    /// The `PlaybackState` only changes once the engine reacts.
    pub(crate) fn toggle_play_pause(&mut self) {
        if self.playback.wants_pause() {
            self.media.pause();
        } else {
            self.media.play();
        }
    }

    pub(crate) fn seek_to_fraction(&mut self, fraction: f64) -> Result<f64, CommandError> {
        seek_to_fraction(&mut self.media, fraction)
    }

    /// Seek to the position corresponding to a click at `client_x` on a progress bar starting
    /// at `bar_left` and `bar_width` wide.
    pub(crate) fn seek_to_pointer(
        &mut self,
        client_x: f64,
        bar_left: f64,
        bar_width: f64,
    ) -> Result<f64, CommandError> {
        let fraction =
            pointer_fraction(client_x, bar_left, bar_width).ok_or(CommandError::EmptySeekBar)?;
        self.seek_to_fraction(fraction)
    }

    pub(crate) fn set_playback_rate(&mut self, rate: f64) -> Result<bool, CommandError> {
        self.rate.set_rate(&mut self.media, rate)
    }

    pub(crate) fn enter_fullscreen(&mut self) -> Result<bool, FullscreenError> {
        self.fullscreen.enter(&mut self.platform)
    }

    pub(crate) fn exit_fullscreen(&mut self) -> Result<bool, FullscreenError> {
        self.fullscreen.exit(&mut self.platform)
    }

    pub(crate) fn toggle_fullscreen(&mut self) -> Result<bool, FullscreenError> {
        self.fullscreen.toggle(&mut self.platform)
    }

    pub(crate) fn on_fullscreen_change(&mut self, is_fullscreen: bool) -> bool {
        self.fullscreen.on_platform_change(is_fullscreen)
    }

    pub(crate) fn start_transcript(&mut self) -> Result<bool, TranscriptError> {
        self.transcript.start(&mut self.speech)
    }

    pub(crate) fn stop_transcript(&mut self) -> bool {
        self.transcript.stop(&mut self.speech)
    }

    pub(crate) fn on_speech_result(
        &mut self,
        id: RecognitionId,
        text: &str,
        is_final: bool,
    ) -> bool {
        self.transcript.on_result(&mut self.speech, id, text, is_final)
    }

    pub(crate) fn on_speech_end(&mut self, id: RecognitionId) -> bool {
        self.transcript.on_end(id)
    }

    pub(crate) fn on_speech_error(&mut self, id: RecognitionId, reason: SpeechErrorReason) -> bool {
        self.transcript.on_error(id, reason)
    }

    pub(crate) fn view_state(&self) -> PlaybackViewState {
        let progress = self.progress.snapshot();
        PlaybackViewState {
            state: self.playback.state(),
            is_waiting: self.playback.is_waiting(),
            elapsed_sec: progress.elapsed_sec,
            duration_sec: progress.duration_sec,
            buffered_fraction: progress.buffered_fraction,
            played_fraction: self.progress.played_fraction(),
            time_label: format_elapsed(progress.elapsed_sec, progress.duration_sec),
            rate: self.rate.selected().value(),
            is_fullscreen: self.fullscreen.is_fullscreen(),
            transcript: self.transcript.text().to_owned(),
            transcript_active: self.transcript.is_active(),
            transcript_status: self.transcript.status().clone(),
        }
    }

    /// Detach our media listeners, then stop speech recognition.
    fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            debug!("Session: removing media listeners ({subscription})");
            self.media.unsubscribe(subscription);
        }
        self.transcript.stop(&mut self.speech);
    }

    /// Detach everything and discard the session, returning its last state.
    fn release(mut self) -> PlaybackViewState {
        info!("Session: releasing source {}", self.source);
        self.detach();
        self.view_state()
    }
}

impl<E: MediaEngine, S: SpeechRecognizer, F: FullscreenPlatform> Drop
    for PlaybackSession<E, S, F>
{
    fn drop(&mut self) {
        if self.subscription.is_some() {
            warn!("Session: discarded without being released, detaching it now");
            self.detach();
        }
    }
}

/// Owns the current `PlaybackSession`, if one, and routes engine events to it.
///
/// Events are tagged with the `SubscriptionId` or `RecognitionId` they were emitted for, so
/// an event emitted for a released session never reaches the session that replaced it.
pub(crate) struct SessionLifecycle<E: MediaEngine, S: SpeechRecognizer, F: FullscreenPlatform> {
    current: Option<PlaybackSession<E, S, F>>,
}

impl<E: MediaEngine, S: SpeechRecognizer, F: FullscreenPlatform> SessionLifecycle<E, S, F> {
    pub(crate) fn new() -> Self {
        Self { current: None }
    }

    /// Release the current session if one, then create a new session for `source`.
    ///
    /// The returned error only tells why the transcript could not be started: the session is
    /// acquired in every case.
    pub(crate) fn acquire(
        &mut self,
        source: String,
        media: E,
        speech: S,
        platform: F,
        config: &PlayerConfiguration,
    ) -> Option<TranscriptError> {
        self.release();
        let mut session = PlaybackSession::acquire(source, media, speech, platform, config);
        let transcript_error = if config.auto_start_transcript {
            session.start_transcript().err()
        } else {
            None
        };
        self.current = Some(session);
        transcript_error
    }

    /// Release the current session, returning its last state.
    ///
    /// Listeners are all detached and recognition stopped before this returns.
    pub(crate) fn release(&mut self) -> Option<PlaybackViewState> {
        self.current.take().map(|session| session.release())
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut PlaybackSession<E, S, F>> {
        self.current.as_mut()
    }

    /// Route a media event to the session that subscribed with `subscription`.
    pub(crate) fn on_media_event(
        &mut self,
        subscription: SubscriptionId,
        event: MediaEvent,
        observation: &MediaObservation,
    ) -> Option<WatchTimeReport> {
        match self.current.as_mut() {
            Some(session) if session.subscription == Some(subscription) => {
                session.on_media_event(event, observation)
            }
            _ => {
                debug!("Session: no session for subscription {subscription}, dropping {event:?}");
                None
            }
        }
    }

    pub(crate) fn view_state(&self) -> Option<PlaybackViewState> {
        self.current.as_ref().map(|session| session.view_state())
    }
}
