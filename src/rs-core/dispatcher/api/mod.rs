use tracing::{debug, warn};

use crate::{
    bindings::{jsSendError, ErrorCode, JsWatchTimeTransport},
    playback::PlaybackRate,
    session::{SessionLifecycle, ViewStateTracker},
    wasm_bindgen,
    watch_time::WatchTimeRequester,
    Logger, LoggerLevel,
};

use super::{Dispatcher, PlayerConfiguration};

/// Methods exposed to the JavaScript-side.
///
/// Note that these are not the only methods callable by JavaScript. There's
/// also "event_listeners" which as its name point at, should be called when particular
/// events happen. Such "event_listeners" are defined in its own file.
#[wasm_bindgen]
impl Dispatcher {
    /// Create a new `Dispatcher` allowing to load a content on the HTMLMediaElement that should be
    /// linked to it on the JavaScript-side.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Logger::init();
        let configuration = PlayerConfiguration::default();
        Dispatcher {
            watch_time_requester: WatchTimeRequester::new(
                configuration.watch_time_endpoint.clone(),
            ),
            configuration,
            sessions: SessionLifecycle::new(),
            transport: JsWatchTimeTransport,
            view_tracker: ViewStateTracker::new(),
        }
    }

    /// Replace the current configuration by the one given, in JSON.
    ///
    /// On error, the previous configuration is kept and the error is reported through
    /// `jsSendError`.
    pub fn configure(&mut self, config: &str) {
        match PlayerConfiguration::from_json(config) {
            Ok(config) => {
                debug!("API: new configuration: {:?}", config);
                self.watch_time_requester
                    .set_endpoint(config.watch_time_endpoint.clone());
                self.configuration = config;
            }
            Err(err) => {
                warn!("API: rejected configuration: {err}");
                jsSendError(ErrorCode::ConfigurationError, Some(&err.to_string()));
            }
        }
    }

    pub fn set_log_level(&mut self, level: LoggerLevel) {
        Logger::set_logger_level(level);
    }

    /// Release the current content if one, then load the one at `content_url`.
    pub fn load_content(&mut self, content_url: String) {
        self.load_content_core(content_url);
    }

    /// Stop the currently loaded content.
    pub fn stop(&mut self) {
        self.stop_current_content();
    }

    pub fn play(&mut self) {
        self.with_session(|session| session.play());
    }

    pub fn pause(&mut self) {
        self.with_session(|session| session.pause());
    }

    pub fn toggle_play_pause(&mut self) {
        self.with_session(|session| session.toggle_play_pause());
    }

    /// Seek to the given fraction, in `[0, 1]`, of the content's duration.
    ///
    /// Returns `false` if the seek was not performed.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> bool {
        let res = self.with_session(|session| session.seek_to_fraction(fraction));
        Dispatcher::on_command_result(res)
    }

    /// Seek to the position corresponding to a click on the progress bar.
    ///
    /// # Arguments
    ///
    /// * `client_x` - Horizontal coordinate of the pointer.
    ///
    /// * `bar_left` - Horizontal coordinate of the left edge of the progress bar, in the same
    ///   referential than `client_x`.
    ///
    /// * `bar_width` - Width of the progress bar.
    ///
    /// Returns `false` if the seek was not performed.
    pub fn seek_to_pointer(&mut self, client_x: f64, bar_left: f64, bar_width: f64) -> bool {
        let res =
            self.with_session(|session| session.seek_to_pointer(client_x, bar_left, bar_width));
        Dispatcher::on_command_result(res)
    }

    /// Returns `false` if `rate` is not one of the rates listed by `playback_rates`.
    pub fn set_playback_rate(&mut self, rate: f64) -> bool {
        let res = self.with_session(|session| session.set_playback_rate(rate));
        Dispatcher::on_command_result(res)
    }

    /// Playback rates accepted by `set_playback_rate`, in increasing order.
    pub fn playback_rates() -> Vec<f64> {
        PlaybackRate::ALL.iter().map(|rate| rate.value()).collect()
    }

    pub fn enter_fullscreen(&mut self) {
        if let Some(Err(err)) = self.with_session(|session| session.enter_fullscreen()) {
            Dispatcher::report_fullscreen_error(&err);
        }
    }

    pub fn exit_fullscreen(&mut self) {
        if let Some(Err(err)) = self.with_session(|session| session.exit_fullscreen()) {
            Dispatcher::report_fullscreen_error(&err);
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if let Some(Err(err)) = self.with_session(|session| session.toggle_fullscreen()) {
            Dispatcher::report_fullscreen_error(&err);
        }
    }

    /// Start speech recognition on the current content.
    ///
    /// The transcript is communicated as part of the view state.
    pub fn start_transcript(&mut self) {
        if let Some(Err(err)) = self.with_session(|session| session.start_transcript()) {
            Dispatcher::report_transcript_error(&err);
        }
    }

    pub fn stop_transcript(&mut self) {
        self.with_session(|session| session.stop_transcript());
    }

    /// Current `PlaybackViewState`, serialized as JSON. `None` if no content is loaded.
    pub fn view_state(&self) -> Option<String> {
        self.sessions
            .view_state()
            .and_then(|view_state| view_state.to_json().ok())
    }

    /// Returns `true` while a watch-time request is pending.
    pub fn is_reporting_watch_time(&self) -> bool {
        self.watch_time_requester.is_requesting()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
