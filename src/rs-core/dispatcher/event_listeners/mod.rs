use crate::{
    dispatcher::Dispatcher,
    engines::{MediaEvent, RecognitionId, RequestId, SubscriptionId},
    transcript::SpeechErrorReason,
    utils::time_ranges::BufferedRanges,
    wasm_bindgen,
};

/// Methods triggered on JavaScript events by the JavaScript code.
#[wasm_bindgen]
impl Dispatcher {
    /// The JS code should call this method each time a media event is caught by the
    /// listeners registered through `jsStartObservingMedia`.
    ///
    /// # Arguments
    ///
    /// * `subscription_id` - The identifier returned by `jsStartObservingMedia` for the
    ///   registration which caught that event. Events of a registration since removed
    ///   through `jsStopObservingMedia` are ignored.
    ///
    /// * `event` - The media event caught.
    ///
    /// * `observation` - The media element's properties at the time of the event.
    pub fn on_media_event(
        &mut self,
        subscription_id: SubscriptionId,
        event: MediaEvent,
        observation: MediaObservation,
    ) {
        self.on_media_event_core(subscription_id, event, &observation);
    }

    /// The JS code should call this method each time the speech recognition run started
    /// with `jsStartSpeechRecognition` produced a result.
    ///
    /// # Arguments
    ///
    /// * `recognition_id` - The identifier returned by `jsStartSpeechRecognition`.
    ///
    /// * `transcript` - Text of the most likely alternative of the latest result.
    ///
    /// * `is_final` - If `true`, the engine will not revise that result anymore.
    pub fn on_speech_result(
        &mut self,
        recognition_id: RecognitionId,
        transcript: String,
        is_final: bool,
    ) {
        self.with_session(|session| {
            session.on_speech_result(recognition_id, &transcript, is_final)
        });
    }

    /// The JS code should call this method when a speech recognition run failed.
    ///
    /// # Arguments
    ///
    /// * `recognition_id` - The identifier returned by `jsStartSpeechRecognition`.
    ///
    /// * `error` - The `error` code of the recognition error event, e.g. `"no-speech"`.
    pub fn on_speech_error(&mut self, recognition_id: RecognitionId, error: String) {
        self.on_speech_error_core(recognition_id, SpeechErrorReason::from(error.as_str()));
    }

    /// The JS code should call this method when a speech recognition run ended by itself.
    pub fn on_speech_end(&mut self, recognition_id: RecognitionId) {
        self.with_session(|session| session.on_speech_end(recognition_id));
    }

    /// The JS code should call this method each time the document enters or exits
    /// fullscreen, whatever the reason.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        self.with_session(|session| session.on_fullscreen_change(is_fullscreen));
    }

    /// The JS code should call this method once a request started with `jsPostWatchTime`
    /// received a response.
    ///
    /// # Arguments
    ///
    /// * `request_id` - The identifier returned by `jsPostWatchTime`.
    ///
    /// * `status` - The HTTP status of the response.
    ///
    /// * `body` - The body of the response, as text.
    pub fn on_watch_time_response(&mut self, request_id: RequestId, status: u16, body: String) {
        let outcome = self
            .watch_time_requester
            .on_response(request_id, status, &body);
        Dispatcher::announce_watch_time_outcome(outcome);
    }

    /// The JS code should call this method if a request started with `jsPostWatchTime` failed
    /// without a response.
    pub fn on_watch_time_failure(&mut self, request_id: RequestId, message: String) {
        let outcome = self.watch_time_requester.on_failure(request_id, &message);
        Dispatcher::announce_watch_time_outcome(outcome);
    }
}

/// Properties of the media element at the time a media event was caught.
#[wasm_bindgen]
pub struct MediaObservation {
    current_time: f64,
    duration: f64,
    buffered: BufferedRanges,
}

#[wasm_bindgen]
impl MediaObservation {
    /// # Arguments
    ///
    /// * `current_time` - The media element's `currentTime`, in seconds.
    ///
    /// * `duration` - The media element's `duration`, in seconds. May be `NaN`.
    ///
    /// * `buffered` - The media element's `buffered` ranges, flattened as
    ///   `[start1, end1, start2, end2, ...]`.
    #[wasm_bindgen(constructor)]
    pub fn new(current_time: f64, duration: f64, buffered: &[f64]) -> Self {
        Self {
            current_time,
            duration,
            buffered: BufferedRanges::from_flat(buffered),
        }
    }
}

impl MediaObservation {
    #[inline(always)]
    pub(crate) fn current_time(&self) -> f64 {
        self.current_time
    }

    #[inline(always)]
    pub(crate) fn duration(&self) -> f64 {
        self.duration
    }

    #[inline(always)]
    pub(crate) fn buffered(&self) -> &BufferedRanges {
        &self.buffered
    }
}
