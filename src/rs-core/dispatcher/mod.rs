use crate::{
    bindings::{JsFullscreenPlatform, JsMediaEngine, JsSpeechRecognizer, JsWatchTimeTransport},
    session::{SessionLifecycle, ViewStateTracker},
    wasm_bindgen,
    watch_time::WatchTimeRequester,
};

mod api;
mod configuration;
mod core;
mod event_listeners;

pub(crate) use configuration::PlayerConfiguration;
pub use event_listeners::MediaObservation;

/// The `Dispatcher` is the player Interface exported to the JavaScript-side, providing an API
/// to load a content on the media element linked to it and to control its playback.
#[wasm_bindgen]
pub struct Dispatcher {
    /// Configuration used for the next loaded content.
    configuration: PlayerConfiguration,

    /// The `PlaybackSession` of the currently loaded content, if one.
    sessions: SessionLifecycle<JsMediaEngine, JsSpeechRecognizer, JsFullscreenPlatform>,

    /// Sends the watch-time reports emitted by the current session.
    ///
    /// It outlives sessions so its single pending request is shared by all of them.
    watch_time_requester: WatchTimeRequester,
    transport: JsWatchTimeTransport,

    /// Tracks what was last communicated through `jsAnnounceViewState`.
    view_tracker: ViewStateTracker,
}
