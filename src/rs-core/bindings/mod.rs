mod js_engines;
mod js_functions;

pub use js_engines::{JsFullscreenPlatform, JsMediaEngine, JsSpeechRecognizer, JsWatchTimeTransport};
pub use js_functions::*;
