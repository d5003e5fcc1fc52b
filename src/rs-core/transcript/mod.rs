use serde::Serialize;
use tracing::{debug, info, warn};

use crate::engines::{RecognitionId, SpeechRecognizer};

/// Where the `TranscriptSession` is in its lifecycle.
///
/// Serialized as `{ "kind": "failed", "reason": "no-speech" }`, `reason` being only present
/// for `failed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "lowercase")]
pub enum TranscriptStatus {
    /// Recognition never started.
    Idle,
    /// The speech recognition engine is running.
    Listening,
    /// The engine stopped by itself, for example after the first utterance.
    Ended,
    /// Recognition was stopped through `stop`.
    Stopped,
    /// The engine reported an error. An explicit `start` is needed to listen again.
    Failed(SpeechErrorReason),
    /// No speech recognition engine on this platform. The feature stays disabled for the
    /// session.
    Unavailable,
}

/// Manages the speech recognition engine bound to a session and exposes its latest
/// transcript.
///
/// Each result overwrites the previous transcript. Without continuous capture, the engine
/// stops by itself after the first utterance and is not restarted.
pub(crate) struct TranscriptSession {
    text: String,
    status: TranscriptStatus,

    /// Identifier of the current recognition run. `None` when not listening.
    current_run: Option<RecognitionId>,

    continuous: bool,
}

impl TranscriptSession {
    pub(crate) fn new(continuous: bool) -> Self {
        Self {
            text: String::new(),
            status: TranscriptStatus::Idle,
            current_run: None,
            continuous,
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn status(&self) -> &TranscriptStatus {
        &self.status
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current_run.is_some()
    }

    /// Start listening.
    ///
    /// Returns `Ok(true)` if the engine was started, `Ok(false)` if it was already running or
    /// if the feature has been disabled for the session. An `Unavailable` error is only
    /// returned the first time the engine is found missing.
    pub(crate) fn start<S: SpeechRecognizer + ?Sized>(
        &mut self,
        recognizer: &mut S,
    ) -> Result<bool, TranscriptError> {
        if self.status == TranscriptStatus::Unavailable || self.current_run.is_some() {
            return Ok(false);
        }
        if !recognizer.is_available() {
            warn!("Transcript: speech recognition not supported on this platform");
            self.status = TranscriptStatus::Unavailable;
            return Err(TranscriptError::Unavailable);
        }
        let id = recognizer.start(self.continuous);
        info!("Transcript: recognition {id} started (continuous: {})", self.continuous);
        self.current_run = Some(id);
        self.status = TranscriptStatus::Listening;
        Ok(true)
    }

    /// Stop listening. Does nothing if not listening.
    ///
    /// Returns `true` if a stop was requested to the engine.
    pub(crate) fn stop<S: SpeechRecognizer + ?Sized>(&mut self, recognizer: &mut S) -> bool {
        match self.current_run.take() {
            Some(id) => {
                debug!("Transcript: stopping recognition {id}");
                recognizer.stop(id);
                self.status = TranscriptStatus::Stopped;
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the transcript was updated.
    ///
    /// Without continuous capture, a final result ends the run: it is stopped on the engine
    /// so no later event of it is ever delivered.
    pub(crate) fn on_result<S: SpeechRecognizer + ?Sized>(
        &mut self,
        recognizer: &mut S,
        id: RecognitionId,
        text: &str,
        is_final: bool,
    ) -> bool {
        if !self.is_current(id) {
            debug!("Transcript: ignoring result from recognition {id}");
            return false;
        }
        debug!("Transcript: result received (final: {is_final})");
        self.text.clear();
        self.text.push_str(text);
        if is_final && !self.continuous {
            debug!("Transcript: recognition {id} got its utterance, stopping it");
            recognizer.stop(id);
            self.current_run = None;
            self.status = TranscriptStatus::Ended;
        }
        true
    }

    /// The engine stopped by itself. Returns `true` if it concerned the current run.
    pub(crate) fn on_end(&mut self, id: RecognitionId) -> bool {
        if !self.is_current(id) {
            return false;
        }
        debug!("Transcript: recognition {id} ended");
        self.current_run = None;
        self.status = TranscriptStatus::Ended;
        true
    }

    /// The engine failed. The transcript keeps its last value.
    ///
    /// Returns `true` if it concerned the current run.
    pub(crate) fn on_error(&mut self, id: RecognitionId, reason: SpeechErrorReason) -> bool {
        if !self.is_current(id) {
            return false;
        }
        warn!("Transcript: recognition {id} failed: {reason}");
        self.current_run = None;
        self.status = TranscriptStatus::Failed(reason);
        true
    }

    fn is_current(&self, id: RecognitionId) -> bool {
        self.current_run == Some(id)
    }
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum TranscriptError {
    #[error("Speech recognition is not supported on this platform")]
    Unavailable,
}

/// Reasons given by the speech recognition engine when it fails.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeechErrorReason {
    #[error("no speech was detected")]
    NoSpeech,
    #[error("recognition was aborted")]
    Aborted,
    #[error("audio capture failed")]
    AudioCapture,
    #[error("network communication failed")]
    Network,
    #[error("permission to capture audio was denied")]
    NotAllowed,
    #[error("the recognition service is not allowed")]
    ServiceNotAllowed,
    #[error("the language is not supported")]
    LanguageNotSupported,
    #[error("{0}")]
    #[serde(untagged)]
    Other(String),
}

impl From<&str> for SpeechErrorReason {
    /// Parse the `error` attribute of a speech recognition error event.
    fn from(reason: &str) -> Self {
        match reason {
            "no-speech" => SpeechErrorReason::NoSpeech,
            "aborted" => SpeechErrorReason::Aborted,
            "audio-capture" => SpeechErrorReason::AudioCapture,
            "network" => SpeechErrorReason::Network,
            "not-allowed" => SpeechErrorReason::NotAllowed,
            "service-not-allowed" => SpeechErrorReason::ServiceNotAllowed,
            "language-not-supported" => SpeechErrorReason::LanguageNotSupported,
            other => SpeechErrorReason::Other(other.to_owned()),
        }
    }
}
