use wasm_bindgen::prelude::*;

mod bindings;
pub mod dispatcher;
mod engines;
mod playback;
mod session;
mod transcript;
mod utils;
mod watch_time;

#[cfg(test)]
mod test_utils;

pub use utils::logger::{Logger, LoggerLevel};
