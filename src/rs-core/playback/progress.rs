use crate::dispatcher::MediaObservation;

/// Duration assumed until the media engine reports the real one.
const UNKNOWN_DURATION: f64 = 1.;

/// Distance to the end of the media, in seconds, under which playback is considered ended.
const END_TOLERANCE: f64 = 0.05;

/// Point-in-time copy of the progress of a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ProgressSnapshot {
    pub(crate) elapsed_sec: f64,
    pub(crate) duration_sec: f64,
    pub(crate) buffered_fraction: f64,
}

/// Tracks elapsed time, duration and buffered fraction of the media of a session.
///
/// Every ratio derived from it is computed on demand.
pub(crate) struct ProgressModel {
    elapsed_sec: f64,
    duration_sec: f64,
    duration_known: bool,

    /// Never decreases for the lifetime of a `ProgressModel`, which is tied to a single
    /// source.
    buffered_fraction: f64,
}

fn is_known_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.
}

impl ProgressModel {
    pub(crate) fn new() -> Self {
        Self {
            elapsed_sec: 0.,
            duration_sec: UNKNOWN_DURATION,
            duration_known: false,
            buffered_fraction: 0.,
        }
    }

    /// Update the buffered fraction on a "progress" event.
    ///
    /// Returns `true` if it changed. Without a known duration or buffered data, nothing is
    /// updated.
    pub(crate) fn on_progress(&mut self, observation: &MediaObservation) -> bool {
        let duration = observation.duration();
        if !is_known_duration(duration) {
            return false;
        }
        let buffered_end = match observation.buffered().last_end() {
            Some(end) => end,
            None => return false,
        };
        let fraction = (buffered_end / duration).clamp(0., 1.);
        if fraction <= self.buffered_fraction {
            return false;
        }
        self.buffered_fraction = fraction;
        true
    }

    /// Update elapsed time and duration on a "timeupdate" event.
    ///
    /// Returns `true` if any of them changed.
    pub(crate) fn on_time_update(&mut self, observation: &MediaObservation) -> bool {
        let prev = self.snapshot();
        let duration = observation.duration();
        if is_known_duration(duration) {
            self.duration_sec = duration;
            self.duration_known = true;
        }
        let current_time = observation.current_time();
        let mut elapsed = if current_time.is_finite() && current_time > 0. {
            current_time
        } else {
            0.
        };
        if self.duration_known {
            elapsed = elapsed.min(self.duration_sec);
        }
        self.elapsed_sec = elapsed;
        prev != self.snapshot()
    }

    pub(crate) fn is_duration_known(&self) -> bool {
        self.duration_known
    }

    /// Fraction of the media already played, in `[0, 1]`. `0.` while the duration is unknown.
    pub(crate) fn played_fraction(&self) -> f64 {
        if !self.duration_known {
            return 0.;
        }
        (self.elapsed_sec / self.duration_sec).clamp(0., 1.)
    }

    /// Returns `true` once the playhead reached the end of a media whose duration is known.
    pub(crate) fn has_ended(&self) -> bool {
        self.duration_known && self.elapsed_sec >= self.duration_sec - END_TOLERANCE
    }

    pub(crate) fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            elapsed_sec: self.elapsed_sec,
            duration_sec: self.duration_sec,
            buffered_fraction: self.buffered_fraction,
        }
    }
}
