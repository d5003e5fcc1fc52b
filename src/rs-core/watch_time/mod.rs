//! Watch-time reports: which progress milestones are worth reporting, and what is sent.
//!
//! The session only emits `WatchTimeReport`s. Sending them, deduplicating concurrent requests
//! and interpreting the server's answer is the job of the `WatchTimeRequester`.

use serde::Serialize;
use tracing::debug;

use crate::playback::ProgressSnapshot;

mod requester;

pub(crate) use requester::{WatchTimeOutcome, WatchTimeRequester};

/// Why a `WatchTimeReport` was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ReportReason {
    /// The playhead crossed a new reporting interval.
    Interval,
    /// Playback paused after progressing since the last report.
    Paused,
    /// The playhead reached the end of the media.
    Ended,
}

/// Raw progress numbers relayed to the watch-time reporting backend.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WatchTimeReport {
    pub(crate) source: String,
    pub(crate) watched_sec: f64,
    pub(crate) duration_sec: f64,
    pub(crate) progress: f64,
    pub(crate) reason: ReportReason,
}

impl WatchTimeReport {
    pub(crate) fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Decides when the progress of a session is worth a `WatchTimeReport`.
pub(crate) struct WatchTimeMilestones {
    source: String,

    /// Length of a reporting interval, in seconds. Interval reports are disabled if not
    /// strictly positive.
    interval_sec: f64,

    /// Index of the last interval reported.
    last_interval: u64,

    /// Elapsed time at the last report, in seconds.
    last_reported_sec: f64,

    ended_reported: bool,
}

impl WatchTimeMilestones {
    pub(crate) fn new(source: String, interval_sec: f64) -> Self {
        Self {
            source,
            interval_sec,
            last_interval: 0,
            last_reported_sec: 0.,
            ended_reported: false,
        }
    }

    /// To call after each "timeupdate" once the media duration is known.
    pub(crate) fn on_time_update(
        &mut self,
        progress: &ProgressSnapshot,
        has_ended: bool,
    ) -> Option<WatchTimeReport> {
        if has_ended {
            if self.ended_reported {
                return None;
            }
            self.ended_reported = true;
            return Some(self.report(progress, ReportReason::Ended));
        }
        self.ended_reported = false;

        if !self.interval_sec.is_finite() || self.interval_sec <= 0. {
            return None;
        }
        let interval = (progress.elapsed_sec / self.interval_sec).floor() as u64;
        if interval <= self.last_interval {
            return None;
        }
        self.last_interval = interval;
        Some(self.report(progress, ReportReason::Interval))
    }

    /// To call when playback pauses.
    pub(crate) fn on_pause(&mut self, progress: &ProgressSnapshot) -> Option<WatchTimeReport> {
        if progress.elapsed_sec <= self.last_reported_sec || self.ended_reported {
            return None;
        }
        Some(self.report(progress, ReportReason::Paused))
    }

    fn report(&mut self, progress: &ProgressSnapshot, reason: ReportReason) -> WatchTimeReport {
        debug!(
            "WatchTime: milestone {:?} at {}/{}",
            reason, progress.elapsed_sec, progress.duration_sec
        );
        self.last_reported_sec = progress.elapsed_sec;
        WatchTimeReport {
            source: self.source.clone(),
            watched_sec: progress.elapsed_sec,
            duration_sec: progress.duration_sec,
            progress: (progress.elapsed_sec / progress.duration_sec).clamp(0., 1.),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(elapsed_sec: f64, duration_sec: f64) -> ProgressSnapshot {
        ProgressSnapshot {
            elapsed_sec,
            duration_sec,
            buffered_fraction: 0.,
        }
    }

    #[test]
    fn test_interval_reports() {
        let mut milestones = WatchTimeMilestones::new("lesson.mp4".to_owned(), 30.);
        assert!(milestones.on_time_update(&at(10., 120.), false).is_none());
        assert!(milestones.on_time_update(&at(29.9, 120.), false).is_none());

        let report = milestones.on_time_update(&at(30.2, 120.), false).unwrap();
        assert_eq!(report.reason, ReportReason::Interval);
        assert_eq!(report.watched_sec, 30.2);
        assert_eq!(report.source, "lesson.mp4");
        assert!(milestones.on_time_update(&at(45., 120.), false).is_none());

        // jumping over several intervals only reports once
        let report = milestones.on_time_update(&at(100., 120.), false).unwrap();
        assert_eq!(report.reason, ReportReason::Interval);
        assert!(milestones.on_time_update(&at(101., 120.), false).is_none());
    }

    #[test]
    fn test_ended_reported_once() {
        let mut milestones = WatchTimeMilestones::new("a".to_owned(), 0.);
        let report = milestones.on_time_update(&at(120., 120.), true).unwrap();
        assert_eq!(report.reason, ReportReason::Ended);
        assert_eq!(report.progress, 1.);
        assert!(milestones.on_time_update(&at(120., 120.), true).is_none());
        assert!(milestones.on_pause(&at(120., 120.)).is_none());
    }

    #[test]
    fn test_pause_reports_only_after_progress() {
        let mut milestones = WatchTimeMilestones::new("a".to_owned(), 30.);
        assert!(milestones.on_pause(&at(0., 120.)).is_none());
        let report = milestones.on_pause(&at(12., 120.)).unwrap();
        assert_eq!(report.reason, ReportReason::Paused);
        assert!(milestones.on_pause(&at(12., 120.)).is_none());
    }

    #[test]
    fn test_disabled_interval() {
        let mut milestones = WatchTimeMilestones::new("a".to_owned(), 0.);
        assert!(milestones.on_time_update(&at(60., 120.), false).is_none());
        let mut milestones = WatchTimeMilestones::new("a".to_owned(), f64::NAN);
        assert!(milestones.on_time_update(&at(60., 120.), false).is_none());
    }

    #[test]
    fn test_report_json() {
        let report = WatchTimeReport {
            source: "lesson.mp4".to_owned(),
            watched_sec: 65.,
            duration_sec: 120.,
            progress: 0.5,
            reason: ReportReason::Paused,
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["source"], "lesson.mp4");
        assert_eq!(value["watchedSec"], 65.);
        assert_eq!(value["durationSec"], 120.);
        assert_eq!(value["reason"], "paused");
    }
}
