use crate::{
    engines::{FullscreenApi, FullscreenTransition, RecognitionId, RequestId, SubscriptionId},
    wasm_bindgen,
};

/// # js_functions
///
/// This file lists all JavaScript functions that are callable from Rust as well as
/// struct and enumeration used by those functions.

#[wasm_bindgen]
extern "C" {
    // Log the given text in the JavaScript console, with the log level given.
    pub fn jsLog(log_level: LogLevel, log: &str);

    // Bind the media element linked to this `Dispatcher` to the given source URL.
    pub fn jsAttachSource(url: &str);

    // Register listeners for every media event the `Dispatcher` cares about on the media
    // element.
    //
    // Each event caught by those listeners will be given to the `on_media_event` method of
    // the `Dispatcher`, tagged with the `SubscriptionId` returned here.
    pub fn jsStartObservingMedia() -> SubscriptionId;

    // Remove all listeners registered by the `jsStartObservingMedia` call which returned
    // that `SubscriptionId`.
    //
    // Events already caught but not yet delivered for it must be dropped by the
    // JavaScript-side.
    pub fn jsStopObservingMedia(id: SubscriptionId);

    // Ask the media element to play.
    //
    // Whether it actually did will only be known through the "play" or "playing" media
    // events which may follow.
    pub fn jsPlay();

    // Ask the media element to pause.
    pub fn jsPause();

    // Seek to the given position in seconds on the media element.
    pub fn jsSeek(position: f64);

    pub fn jsGetPlaybackRate() -> f64;

    pub fn jsSetPlaybackRate(playbackRate: f64);

    // Returns the duration of the media element in seconds, which may be `NaN` until it is
    // known.
    pub fn jsGetDuration() -> f64;

    pub fn jsIsSpeechRecognitionAvailable() -> bool;

    // Start a speech recognition run.
    //
    // Results, errors and the end of that run will be communicated through respectively
    // the `on_speech_result`, `on_speech_error` and `on_speech_end` methods of this
    // `Dispatcher`, tagged with the returned `RecognitionId`.
    //
    // When not `continuous`, `jsStopSpeechRecognition` is called for that run as soon as
    // its final result is received.
    pub fn jsStartSpeechRecognition(continuous: bool) -> RecognitionId;

    // Stop the speech recognition run linked to that `RecognitionId`.
    //
    // After calling this function, you won't get any event linked to that run ever again.
    pub fn jsStopSpeechRecognition(id: RecognitionId);

    // Returns `true` if the given fullscreen API is exposed by the platform for the wanted
    // transition.
    pub fn jsIsFullscreenApiAvailable(api: FullscreenApi, transition: FullscreenTransition)
        -> bool;

    // Returns `true` if the document is currently displayed in fullscreen, whatever the API
    // used to enter it.
    pub fn jsIsFullscreen() -> bool;

    pub fn jsRequestFullscreen(api: FullscreenApi);

    pub fn jsExitFullscreen(api: FullscreenApi);

    // POST the given JSON `body` to `url`.
    //
    // If and when it receives a response, its status and body will be given to the
    // `on_watch_time_response` method of this `Dispatcher`. If it fails before that, the
    // `on_watch_time_failure` method will be called instead.
    pub fn jsPostWatchTime(url: &str, body: &str) -> RequestId;

    // Communicate a new `PlaybackViewState`, serialized as JSON.
    //
    // `None` means that the content was stopped: no content is loaded anymore, the
    // last communicated `PlaybackViewState` should not be displayed.
    pub fn jsAnnounceViewState(view_state: Option<&str>);

    pub fn jsAnnounceWatchTimeOutcome(outcome: WatchTimeOutcomeCode, message: Option<&str>);

    pub fn jsSendError(code: ErrorCode, message: Option<&str>);
}

/// Levels with which a log can be emitted.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum LogLevel {
    /// Log level reserved for very important errors and highly unexpected events.
    Error = 0,

    /// Log level reserved for less important errors and unexpected events.
    Warn = 1,

    /// Log level reserved for important events
    Info = 2,

    /// Log level used when debugging. Small-ish yet impactful events should be logged with it.
    Debug = 3,
}

/// Errors sent through `jsSendError`. None of them are fatal.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// The configuration given to `configure` could not be parsed or was invalid. The
    /// previous configuration is kept.
    ConfigurationError,

    /// The platform has no speech recognition engine. The transcript stays disabled for
    /// the current content.
    SpeechRecognitionUnavailable,

    /// The speech recognition engine reported an error.
    SpeechRecognitionError,

    /// None of the configured fullscreen APIs is exposed by the platform.
    FullscreenUnavailable,
}

/// Outcome of a watch-time request, sent through `jsAnnounceWatchTimeOutcome`.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchTimeOutcomeCode {
    Success,
    /// The backend already had an entry for that report.
    AlreadyExists,
    Failure,
}
