//! Recording fakes of the engine capabilities, shared by unit tests.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::engines::{
    FullscreenApi, FullscreenPlatform, FullscreenTransition, MediaEngine, RecognitionId,
    RequestId, SpeechRecognizer, SubscriptionId, WatchTimeTransport,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum MediaCall {
    AttachSource(String),
    Subscribe(SubscriptionId),
    Unsubscribe(SubscriptionId),
    Play,
    Pause,
    Seek(f64),
    SetPlaybackRate(f64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SpeechCall {
    Start(RecognitionId, bool),
    Stop(RecognitionId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FullscreenCall {
    Request(FullscreenApi),
    Exit(FullscreenApi),
}

/// Any call made on a fake engine, in the order they were made across all engines.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Media(MediaCall),
    Speech(SpeechCall),
    Fullscreen(FullscreenCall),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

/// Creates fake engines all recording into the same call log.
pub(crate) struct FakeEngines {
    log: CallLog,
    next_subscription: Rc<Cell<SubscriptionId>>,
    /// Fullscreen state of the platform, shared by every fake fullscreen platform.
    is_fullscreen: Rc<Cell<bool>>,
}

impl FakeEngines {
    pub(crate) fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            next_subscription: Rc::new(Cell::new(1)),
            is_fullscreen: Rc::new(Cell::new(false)),
        }
    }

    /// A media engine with an unknown duration, playing at rate `1`.
    pub(crate) fn media(&self) -> FakeMediaEngine {
        FakeMediaEngine {
            log: Rc::clone(&self.log),
            next_subscription: Rc::clone(&self.next_subscription),
            state: Rc::new(RefCell::new(FakeMediaState {
                duration: f64::NAN,
                playback_rate: 1.,
            })),
        }
    }

    pub(crate) fn speech(&self, available: bool) -> FakeSpeechRecognizer {
        FakeSpeechRecognizer {
            log: Rc::clone(&self.log),
            available,
            next_id: 1,
        }
    }

    /// A fullscreen platform only exposing `available` APIs.
    pub(crate) fn fullscreen(&self, available: &[FullscreenApi]) -> FakeFullscreenPlatform {
        FakeFullscreenPlatform {
            log: Rc::clone(&self.log),
            available: available.to_vec(),
            is_fullscreen: Rc::clone(&self.is_fullscreen),
        }
    }

    /// Change the platform fullscreen state without going through a fake platform, e.g. the
    /// user pressing Escape.
    pub(crate) fn set_fullscreen(&self, is_fullscreen: bool) {
        self.is_fullscreen.set(is_fullscreen);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub(crate) fn media_calls(&self) -> Vec<MediaCall> {
        self.log
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Media(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn speech_calls(&self) -> Vec<SpeechCall> {
        self.log
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Speech(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn fullscreen_calls(&self) -> Vec<FullscreenCall> {
        self.log
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Fullscreen(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }
}

struct FakeMediaState {
    duration: f64,
    playback_rate: f64,
}

/// Clones share the same state, so a test can keep a handle on an engine given to a session.
#[derive(Clone)]
pub(crate) struct FakeMediaEngine {
    log: CallLog,
    next_subscription: Rc<Cell<SubscriptionId>>,
    state: Rc<RefCell<FakeMediaState>>,
}

impl FakeMediaEngine {
    pub(crate) fn set_duration(&self, duration: f64) {
        self.state.borrow_mut().duration = duration;
    }

    fn record(&self, call: MediaCall) {
        self.log.borrow_mut().push(Call::Media(call));
    }
}

impl MediaEngine for FakeMediaEngine {
    fn attach_source(&mut self, url: &str) {
        self.record(MediaCall::AttachSource(url.to_owned()));
    }

    fn subscribe(&mut self) -> SubscriptionId {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.record(MediaCall::Subscribe(id));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.record(MediaCall::Unsubscribe(id));
    }

    fn play(&mut self) {
        self.record(MediaCall::Play);
    }

    fn pause(&mut self) {
        self.record(MediaCall::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.record(MediaCall::Seek(position));
    }

    fn duration(&self) -> f64 {
        self.state.borrow().duration
    }

    fn playback_rate(&self) -> f64 {
        self.state.borrow().playback_rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.state.borrow_mut().playback_rate = rate;
        self.record(MediaCall::SetPlaybackRate(rate));
    }
}

pub(crate) struct FakeSpeechRecognizer {
    log: CallLog,
    available: bool,
    next_id: RecognitionId,
}

impl SpeechRecognizer for FakeSpeechRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn start(&mut self, continuous: bool) -> RecognitionId {
        let id = self.next_id;
        self.next_id += 1;
        self.log
            .borrow_mut()
            .push(Call::Speech(SpeechCall::Start(id, continuous)));
        id
    }

    fn stop(&mut self, id: RecognitionId) {
        self.log.borrow_mut().push(Call::Speech(SpeechCall::Stop(id)));
    }
}

pub(crate) struct FakeFullscreenPlatform {
    log: CallLog,
    available: Vec<FullscreenApi>,
    is_fullscreen: Rc<Cell<bool>>,
}

impl FullscreenPlatform for FakeFullscreenPlatform {
    fn is_available(&self, api: FullscreenApi, _transition: FullscreenTransition) -> bool {
        self.available.contains(&api)
    }

    fn is_fullscreen(&self) -> bool {
        self.is_fullscreen.get()
    }

    fn request_fullscreen(&mut self, api: FullscreenApi) {
        self.is_fullscreen.set(true);
        self.log
            .borrow_mut()
            .push(Call::Fullscreen(FullscreenCall::Request(api)));
    }

    fn exit_fullscreen(&mut self, api: FullscreenApi) {
        self.is_fullscreen.set(false);
        self.log
            .borrow_mut()
            .push(Call::Fullscreen(FullscreenCall::Exit(api)));
    }
}

/// Records every POST, answering with increasing request ids starting at `1`.
pub(crate) struct FakeTransport {
    pub(crate) posts: Vec<(String, String)>,
    next_id: RequestId,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self {
            posts: Vec::new(),
            next_id: 1,
        }
    }
}

impl WatchTimeTransport for FakeTransport {
    fn post(&mut self, url: &str, body: &str) -> RequestId {
        self.posts.push((url.to_owned(), body.to_owned()));
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
