use serde::Serialize;

use crate::{playback::PlaybackState, transcript::TranscriptStatus};

/// Everything the presentation layer needs to render a session, as one snapshot.
///
/// It is never stored: each snapshot is recomputed from the session's components.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackViewState {
    pub state: PlaybackState,
    /// `true` while the engine is stalled, to display a spinner.
    pub is_waiting: bool,
    pub elapsed_sec: f64,
    pub duration_sec: f64,
    pub buffered_fraction: f64,
    pub played_fraction: f64,
    /// `"m:ss / m:ss"` label of elapsed over total time.
    pub time_label: String,
    pub rate: f64,
    pub is_fullscreen: bool,
    pub transcript: String,
    pub transcript_active: bool,
    pub transcript_status: TranscriptStatus,
}

impl PlaybackViewState {
    pub(crate) fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// What should be communicated to the presentation layer after a view state update.
#[derive(Debug, PartialEq)]
pub(crate) enum ViewStateChange {
    Updated(PlaybackViewState),
    /// The content was stopped: there's nothing to render anymore.
    Cleared,
}

/// Remembers the last announced view state, to only announce actual changes.
pub(crate) struct ViewStateTracker {
    last: Option<PlaybackViewState>,
}

impl ViewStateTracker {
    pub(crate) fn new() -> Self {
        Self { last: None }
    }

    /// Compare `current`, `None` if no content is loaded, to the last announced view state.
    pub(crate) fn update(
        &mut self,
        current: Option<PlaybackViewState>,
    ) -> Option<ViewStateChange> {
        if current == self.last {
            return None;
        }
        let change = match current.as_ref() {
            Some(view_state) => ViewStateChange::Updated(view_state.clone()),
            None => ViewStateChange::Cleared,
        };
        self.last = current;
        Some(change)
    }
}
