//! Scriptable transport for testing the client without a network
//!
//! Outcomes are queued up front and handed out one per call. Every request
//! is captured for assertion. Non-2xx responses fail the way `HttpTransport`
//! fails them: 404 is `NotFound`, anything else is `ServerError`. A gated transport holds its stream outcome
//! until [`FakeTransport::open_gate`] is called, which lets tests cancel a
//! stream while the exchange is still in flight.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use courier::{NetworkError, RawResponse, RequestDescriptor, StatusMetadata, TransportService};
use courier_transport::OutcomeStream;
use tokio::sync::Notify;

enum Outcome {
    Respond { status: u16, body: Option<Bytes> },
    Fail(NetworkError),
    EndStream,
}

/// A fake [`TransportService`].
#[derive(Default)]
pub struct FakeTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    sent: Mutex<Vec<RequestDescriptor>>,
    calls: AtomicUsize,
    gate: Option<Notify>,
    abandoned: Arc<AtomicBool>,
}

impl FakeTransport {
    /// Create a transport with no scripted outcomes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose streams wait for [`open_gate`](Self::open_gate)
    pub fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::default()
        }
    }

    /// Queue a response with a status code and body
    pub fn respond(self, status: u16, body: &'static [u8]) -> Self {
        self.push(Outcome::Respond {
            status,
            body: Some(Bytes::from_static(body)),
        })
    }

    /// Queue a response without a body
    pub fn respond_empty(self, status: u16) -> Self {
        self.push(Outcome::Respond { status, body: None })
    }

    /// Queue a transport failure
    pub fn fail(self, error: NetworkError) -> Self {
        self.push(Outcome::Fail(error))
    }

    /// Queue a stream that completes without producing an outcome
    pub fn end_stream(self) -> Self {
        self.push(Outcome::EndStream)
    }

    fn push(self, outcome: Outcome) -> Self {
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .push_back(outcome);
        self
    }

    /// Release gated streams
    pub fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_waiters();
            gate.notify_one();
        }
    }

    /// Number of exchanges started
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far
    pub fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().expect("sent lock").clone()
    }

    /// Whether a stream was dropped before producing its outcome
    pub fn abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }

    fn next_outcome(&self, request: RequestDescriptor) -> Option<courier_transport::Result<RawResponse>> {
        self.sent.lock().expect("sent lock").push(request.clone());
        let outcome = self
            .outcomes
            .lock()
            .expect("outcomes lock")
            .pop_front()
            .unwrap_or_else(|| Outcome::Fail(NetworkError::generic("no scripted outcome")));

        match outcome {
            Outcome::Respond { status: 404, .. } => Some(Err(NetworkError::NotFound)),
            Outcome::Respond { status, body } if !(200..300).contains(&status) => {
                Some(Err(NetworkError::ServerError {
                    body,
                    status_code: status,
                }))
            }
            Outcome::Respond { status, body } => Some(Ok(RawResponse::new(
                request,
                StatusMetadata::new(status).with_header("content-type", "application/json"),
                body,
            ))),
            Outcome::Fail(error) => Some(Err(error)),
            Outcome::EndStream => None,
        }
    }
}

#[async_trait]
impl TransportService for FakeTransport {
    async fn execute(&self, request: RequestDescriptor) -> courier_transport::Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.next_outcome(request)
            .unwrap_or(Err(NetworkError::Cancelled))
    }

    fn execute_stream(self: Arc<Self>, request: RequestDescriptor) -> OutcomeStream {
        let guard = AbandonGuard(Some(Arc::clone(&self.abandoned)));
        Box::pin(futures::stream::unfold(
            Some((self, request, guard)),
            |state| async move {
                let (transport, request, mut guard) = state?;
                transport.calls.fetch_add(1, Ordering::SeqCst);
                if let Some(gate) = &transport.gate {
                    gate.notified().await;
                }
                let outcome = transport.next_outcome(request);
                guard.disarm();
                Some((outcome?, None))
            },
        ))
    }
}

/// Sets its flag when dropped while still armed
struct AbandonGuard(Option<Arc<AtomicBool>>);

impl AbandonGuard {
    fn disarm(&mut self) {
        self.0 = None;
    }
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        if let Some(flag) = &self.0 {
            flag.store(true, Ordering::SeqCst);
        }
    }
}
