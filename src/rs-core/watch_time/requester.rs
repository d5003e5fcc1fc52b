use serde::Deserialize;
use tracing::{debug, error, info, warn};

use super::WatchTimeReport;
use crate::engines::{RequestId, WatchTimeTransport};

/// Status code put in a response body by the reporting backend when the watch-time entry
/// already exists.
const ALREADY_EXISTS_STATUS: u16 = 412;

/// What became of a watch-time request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum WatchTimeOutcome {
    Success,
    /// The backend already had that entry.
    AlreadyExists,
    Failure(String),
}

/// Body wrapper returned by the reporting backend.
#[derive(Deserialize)]
struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    status_code: Option<u16>,
}

/// Sends `WatchTimeReport`s to the reporting backend, one at a time.
///
/// A report emitted while a request is still pending is dropped: the next milestone will carry
/// more recent numbers anyway.
pub(crate) struct WatchTimeRequester {
    /// URL reports are POSTed to. Reporting is disabled when `None`.
    endpoint: Option<String>,

    /// Request currently pending, if one.
    in_flight: Option<RequestId>,
}

impl WatchTimeRequester {
    pub(crate) fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint,
            in_flight: None,
        }
    }

    pub(crate) fn set_endpoint(&mut self, endpoint: Option<String>) {
        self.endpoint = endpoint;
    }

    pub(crate) fn is_requesting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Send `report` unless another request is pending.
    ///
    /// Returns `true` if a request was started.
    pub(crate) fn send<T: WatchTimeTransport + ?Sized>(
        &mut self,
        transport: &mut T,
        report: &WatchTimeReport,
    ) -> bool {
        let endpoint = match self.endpoint.as_deref() {
            Some(endpoint) => endpoint,
            None => return false,
        };
        if let Some(pending) = self.in_flight {
            debug!("WatchTime: request {pending} still pending, dropping report");
            return false;
        }
        let body = match report.to_json() {
            Ok(body) => body,
            Err(err) => {
                error!("WatchTime: could not serialize report: {err}");
                return false;
            }
        };
        let request_id = transport.post(endpoint, &body);
        debug!("WatchTime: request {request_id} started");
        self.in_flight = Some(request_id);
        true
    }

    /// To call when the HTTP request `request_id` received a response.
    ///
    /// Returns `None` if `request_id` is not the pending request.
    pub(crate) fn on_response(
        &mut self,
        request_id: RequestId,
        status: u16,
        body: &str,
    ) -> Option<WatchTimeOutcome> {
        self.finish(request_id)?;
        let outcome = classify_response(status, body);
        match &outcome {
            WatchTimeOutcome::Failure(reason) => warn!("WatchTime: request failed: {reason}"),
            _ => info!("WatchTime: request {request_id} finished: {:?}", outcome),
        }
        Some(outcome)
    }

    /// To call when the HTTP request `request_id` failed before receiving a response.
    ///
    /// Returns `None` if `request_id` is not the pending request.
    pub(crate) fn on_failure(
        &mut self,
        request_id: RequestId,
        message: &str,
    ) -> Option<WatchTimeOutcome> {
        self.finish(request_id)?;
        warn!("WatchTime: request {request_id} failed: {message}");
        Some(WatchTimeOutcome::Failure(message.to_owned()))
    }

    fn finish(&mut self, request_id: RequestId) -> Option<()> {
        if self.in_flight != Some(request_id) {
            warn!("WatchTime: unknown request {request_id} finished");
            return None;
        }
        self.in_flight = None;
        Some(())
    }
}

/// Interpret the answer of the reporting backend.
///
/// The backend may answer with a successful HTTP status while indicating in its body that the
/// entry already existed.
fn classify_response(status: u16, body: &str) -> WatchTimeOutcome {
    if !(200..300).contains(&status) {
        return WatchTimeOutcome::Failure(format!("HTTP status {status}"));
    }
    let body_status = serde_json::from_str::<ResponseEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.status_code);
    if body_status == Some(ALREADY_EXISTS_STATUS) {
        WatchTimeOutcome::AlreadyExists
    } else {
        WatchTimeOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_utils::FakeTransport, watch_time::ReportReason};

    fn report() -> WatchTimeReport {
        WatchTimeReport {
            source: "lesson.mp4".to_owned(),
            watched_sec: 30.,
            duration_sec: 120.,
            progress: 0.25,
            reason: ReportReason::Interval,
        }
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut transport = FakeTransport::new();
        let mut requester = WatchTimeRequester::new(Some("http://backend/progress".to_owned()));
        assert!(requester.send(&mut transport, &report()));
        assert!(requester.is_requesting());
        assert!(!requester.send(&mut transport, &report()));
        assert_eq!(transport.posts.len(), 1);
        assert_eq!(transport.posts[0].0, "http://backend/progress");

        assert_eq!(
            requester.on_response(1, 200, r#"{"statusCode":200,"data":{}}"#),
            Some(WatchTimeOutcome::Success)
        );
        assert!(!requester.is_requesting());
        assert!(requester.send(&mut transport, &report()));
        assert_eq!(transport.posts.len(), 2);
    }

    #[test]
    fn test_no_endpoint() {
        let mut transport = FakeTransport::new();
        let mut requester = WatchTimeRequester::new(None);
        assert!(!requester.send(&mut transport, &report()));
        assert!(transport.posts.is_empty());

        requester.set_endpoint(Some("http://backend".to_owned()));
        assert!(requester.send(&mut transport, &report()));
    }

    #[test]
    fn test_already_exists() {
        let mut transport = FakeTransport::new();
        let mut requester = WatchTimeRequester::new(Some("http://backend".to_owned()));
        requester.send(&mut transport, &report());
        assert_eq!(
            requester.on_response(1, 200, r#"{"statusCode":412}"#),
            Some(WatchTimeOutcome::AlreadyExists)
        );
    }

    #[test]
    fn test_failures_clear_in_flight() {
        let mut transport = FakeTransport::new();
        let mut requester = WatchTimeRequester::new(Some("http://backend".to_owned()));
        requester.send(&mut transport, &report());
        assert_eq!(
            requester.on_response(1, 500, ""),
            Some(WatchTimeOutcome::Failure("HTTP status 500".to_owned()))
        );
        assert!(!requester.is_requesting());

        requester.send(&mut transport, &report());
        assert_eq!(
            requester.on_failure(2, "Network Error"),
            Some(WatchTimeOutcome::Failure("Network Error".to_owned()))
        );
        assert!(!requester.is_requesting());
    }

    #[test]
    fn test_unknown_request() {
        let mut transport = FakeTransport::new();
        let mut requester = WatchTimeRequester::new(Some("http://backend".to_owned()));
        requester.send(&mut transport, &report());
        assert_eq!(requester.on_response(7, 200, ""), None);
        assert!(requester.is_requesting());
    }

    #[test]
    fn test_classify_unparsable_body() {
        assert_eq!(classify_response(201, "not json"), WatchTimeOutcome::Success);
        assert_eq!(
            classify_response(404, r#"{"statusCode":412}"#),
            WatchTimeOutcome::Failure("HTTP status 404".to_owned())
        );
    }
}
