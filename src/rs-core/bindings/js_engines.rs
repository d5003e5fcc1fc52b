//! Implementations of the engine capabilities on top of the JavaScript functions.

use super::js_functions::*;
use crate::engines::{
    FullscreenApi, FullscreenPlatform, FullscreenTransition, MediaEngine, RecognitionId,
    RequestId, SpeechRecognizer, SubscriptionId, WatchTimeTransport,
};

/// The media element linked to the `Dispatcher`.
pub struct JsMediaEngine;

impl MediaEngine for JsMediaEngine {
    fn attach_source(&mut self, source: &str) {
        jsAttachSource(source);
    }

    fn subscribe(&mut self) -> SubscriptionId {
        jsStartObservingMedia()
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        jsStopObservingMedia(id);
    }

    fn play(&mut self) {
        jsPlay();
    }

    fn pause(&mut self) {
        jsPause();
    }

    fn seek(&mut self, position: f64) {
        jsSeek(position);
    }

    fn duration(&self) -> f64 {
        jsGetDuration()
    }

    fn playback_rate(&self) -> f64 {
        jsGetPlaybackRate()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        jsSetPlaybackRate(rate);
    }
}

pub struct JsSpeechRecognizer;

impl SpeechRecognizer for JsSpeechRecognizer {
    fn is_available(&self) -> bool {
        jsIsSpeechRecognitionAvailable()
    }

    fn start(&mut self, continuous: bool) -> RecognitionId {
        jsStartSpeechRecognition(continuous)
    }

    fn stop(&mut self, id: RecognitionId) {
        jsStopSpeechRecognition(id);
    }
}

pub struct JsFullscreenPlatform;

impl FullscreenPlatform for JsFullscreenPlatform {
    fn is_available(&self, api: FullscreenApi, transition: FullscreenTransition) -> bool {
        jsIsFullscreenApiAvailable(api, transition)
    }

    fn is_fullscreen(&self) -> bool {
        jsIsFullscreen()
    }

    fn request_fullscreen(&mut self, api: FullscreenApi) {
        jsRequestFullscreen(api);
    }

    fn exit_fullscreen(&mut self, api: FullscreenApi) {
        jsExitFullscreen(api);
    }
}

pub struct JsWatchTimeTransport;

impl WatchTimeTransport for JsWatchTimeTransport {
    fn post(&mut self, url: &str, body: &str) -> RequestId {
        jsPostWatchTime(url, body)
    }
}
