use tracing::{debug, error, info};

use super::{Dispatcher, MediaObservation};
use crate::{
    bindings::{
        jsAnnounceViewState, jsAnnounceWatchTimeOutcome, jsSendError, ErrorCode,
        JsFullscreenPlatform, JsMediaEngine, JsSpeechRecognizer, WatchTimeOutcomeCode,
    },
    engines::{MediaEvent, RecognitionId, SubscriptionId},
    playback::{CommandError, FullscreenError},
    session::{PlaybackSession, ViewStateChange},
    transcript::{SpeechErrorReason, TranscriptError},
    watch_time::{WatchTimeOutcome, WatchTimeReport},
};

type JsPlaybackSession = PlaybackSession<JsMediaEngine, JsSpeechRecognizer, JsFullscreenPlatform>;

impl Dispatcher {
    /// Release the current content if one, then acquire a session for the given one.
    pub(super) fn load_content_core(&mut self, content_url: String) {
        info!("Core: loading content {content_url}");
        let transcript_error = self.sessions.acquire(
            content_url,
            JsMediaEngine,
            JsSpeechRecognizer,
            JsFullscreenPlatform,
            &self.configuration,
        );
        if let Some(err) = transcript_error {
            Dispatcher::report_transcript_error(&err);
        }
        self.announce_view_state_if_changed();
    }

    /// Completely stop playback of the current content if one and free all its associated
    /// resources.
    pub(super) fn stop_current_content(&mut self) {
        if let Some(last_state) = self.sessions.release() {
            info!(
                "Core: content stopped at {}/{}",
                last_state.elapsed_sec, last_state.duration_sec
            );
        }
        self.announce_view_state_if_changed();
    }

    /// Run `f` on the current session, then announce the view state if it changed.
    ///
    /// Returns `None` without calling `f` if no content is loaded.
    pub(super) fn with_session<T>(
        &mut self,
        f: impl FnOnce(&mut JsPlaybackSession) -> T,
    ) -> Option<T> {
        let res = match self.sessions.current_mut() {
            Some(session) => f(session),
            None => {
                debug!("Core: no content loaded, ignoring command");
                return None;
            }
        };
        self.announce_view_state_if_changed();
        Some(res)
    }

    /// Invalid commands are not errors worth reporting: they are logged and dropped.
    pub(super) fn on_command_result<T>(res: Option<Result<T, CommandError>>) -> bool {
        match res {
            Some(Ok(_)) => true,
            Some(Err(err)) => {
                debug!("Core: command dropped: {err}");
                false
            }
            None => false,
        }
    }

    pub(super) fn report_fullscreen_error(err: &FullscreenError) {
        debug!("Core: fullscreen command failed: {err}");
        jsSendError(ErrorCode::FullscreenUnavailable, Some(&err.to_string()));
    }

    pub(super) fn report_transcript_error(err: &TranscriptError) {
        match err {
            TranscriptError::Unavailable => {
                jsSendError(ErrorCode::SpeechRecognitionUnavailable, Some(&err.to_string()))
            }
        }
    }

    pub(super) fn on_media_event_core(
        &mut self,
        subscription_id: SubscriptionId,
        event: MediaEvent,
        observation: &MediaObservation,
    ) {
        let report = self
            .sessions
            .on_media_event(subscription_id, event, observation);
        if let Some(report) = report {
            self.send_watch_time(&report);
        }
        self.announce_view_state_if_changed();
    }

    pub(super) fn on_speech_error_core(
        &mut self,
        recognition_id: RecognitionId,
        reason: SpeechErrorReason,
    ) {
        let message = reason.to_string();
        let handled = self
            .with_session(|session| session.on_speech_error(recognition_id, reason))
            .unwrap_or(false);
        if handled {
            jsSendError(ErrorCode::SpeechRecognitionError, Some(&message));
        }
    }

    fn send_watch_time(&mut self, report: &WatchTimeReport) {
        self.watch_time_requester.send(&mut self.transport, report);
    }

    pub(super) fn announce_watch_time_outcome(outcome: Option<WatchTimeOutcome>) {
        match outcome {
            Some(WatchTimeOutcome::Success) => {
                jsAnnounceWatchTimeOutcome(WatchTimeOutcomeCode::Success, None)
            }
            Some(WatchTimeOutcome::AlreadyExists) => {
                jsAnnounceWatchTimeOutcome(WatchTimeOutcomeCode::AlreadyExists, None)
            }
            Some(WatchTimeOutcome::Failure(message)) => {
                jsAnnounceWatchTimeOutcome(WatchTimeOutcomeCode::Failure, Some(&message))
            }
            None => {}
        }
    }

    /// Communicate the `PlaybackViewState` to the JavaScript-side if it changed since the last
    /// time it was, or that there's none anymore if the content was stopped.
    pub(super) fn announce_view_state_if_changed(&mut self) {
        match self.view_tracker.update(self.sessions.view_state()) {
            Some(ViewStateChange::Updated(view_state)) => match view_state.to_json() {
                Ok(json) => jsAnnounceViewState(Some(&json)),
                Err(err) => error!("Core: could not serialize view state: {err}"),
            },
            Some(ViewStateChange::Cleared) => jsAnnounceViewState(None),
            None => {}
        }
    }
}
