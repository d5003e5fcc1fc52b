//! Capability sets of the external engines a playback session relies on.
//!
//! None of them is accessed as an ambient global: each session receives its own
//! implementations, the JavaScript-backed ones living in `bindings::js_engines`.

use serde::Deserialize;

use crate::wasm_bindgen;

/// Identify one registration of the session's listeners on the media element.
///
/// Every media event is tagged by the JavaScript-side with the `SubscriptionId` of the
/// registration that caught it.
pub type SubscriptionId = u32;

/// Identify one run of the speech recognition engine, from its start to its end.
pub type RecognitionId = u32;

/// Identify a pending watch-time request.
pub type RequestId = u32;

/// Events the media element may emit and the session listens to.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    /// The HTMLMediaElement's "progress" event: buffered ranges may have changed.
    Progress,
    /// The HTMLMediaElement's "timeupdate" event: the playhead moved.
    TimeUpdate,
    /// The HTMLMediaElement's "waiting" event: playback stalled for lack of data.
    Waiting,
    /// The HTMLMediaElement's "play" event.
    Play,
    /// The HTMLMediaElement's "playing" event: playback (re)started after a stall or a play.
    Playing,
    /// The HTMLMediaElement's "pause" event.
    Pause,
    /// The HTMLMediaElement's "canplay" event: enough data is there to start playing.
    CanPlay,
}

/// Transport controls and telemetry of the media element bound to a session.
///
/// Commands are fire-and-forget: their effect is only known once the corresponding
/// `MediaEvent` is received.
pub trait MediaEngine {
    /// Bind the media element to the given source.
    fn attach_source(&mut self, source: &str);

    /// Start forwarding media events, tagged with the returned `SubscriptionId`.
    fn subscribe(&mut self) -> SubscriptionId;

    /// Detach every listener registered under that `SubscriptionId`.
    ///
    /// No event tagged with it may be emitted once this returns.
    fn unsubscribe(&mut self, id: SubscriptionId);

    fn play(&mut self);

    fn pause(&mut self);

    /// Move the playhead to the given absolute position, in seconds.
    fn seek(&mut self, position: f64);

    /// Duration of the media in seconds, `NaN` or `0.` when not known yet.
    fn duration(&self) -> f64;

    /// Playback rate currently applied on the media element.
    fn playback_rate(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);
}

/// Speech recognition engine listening to the ambient audio.
pub trait SpeechRecognizer {
    /// `false` when the platform does not provide speech recognition at all.
    fn is_available(&self) -> bool;

    /// Start recognizing. Without `continuous`, the engine stops by itself after the first
    /// utterance.
    fn start(&mut self, continuous: bool) -> RecognitionId;

    /// Request the run identified by `id` to stop.
    fn stop(&mut self, id: RecognitionId);
}

/// Names under which a platform may expose its fullscreen API.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FullscreenApi {
    /// `requestFullscreen` / `exitFullscreen`
    Standard,
    /// `webkitRequestFullscreen` / `webkitExitFullscreen`
    Webkit,
    /// `mozRequestFullScreen` / `mozCancelFullScreen`
    Moz,
    /// `msRequestFullscreen` / `msExitFullscreen`
    Ms,
}

impl FullscreenApi {
    /// Default resolution order: the standard name first, then vendor prefixes.
    pub(crate) const DEFAULT_PRIORITY: [FullscreenApi; 4] = [
        FullscreenApi::Standard,
        FullscreenApi::Webkit,
        FullscreenApi::Moz,
        FullscreenApi::Ms,
    ];
}

/// Direction of a fullscreen transition.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenTransition {
    Enter,
    Exit,
}

/// Platform fullscreen capability.
pub trait FullscreenPlatform {
    /// `true` if the platform exposes `api` for the given transition.
    fn is_available(&self, api: FullscreenApi, transition: FullscreenTransition) -> bool;

    /// `true` if the document is currently displayed in fullscreen.
    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&mut self, api: FullscreenApi);

    fn exit_fullscreen(&mut self, api: FullscreenApi);
}

/// HTTP transport used to send watch-time reports.
///
/// The outcome is communicated later, through the `on_watch_time_response` and
/// `on_watch_time_failure` `Dispatcher` methods.
pub trait WatchTimeTransport {
    /// POST the JSON `body` to `url`.
    fn post(&mut self, url: &str, body: &str) -> RequestId;
}
