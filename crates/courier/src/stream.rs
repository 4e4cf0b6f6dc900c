//! One-shot response streams
//!
//! A [`ResponseStream`] yields exactly one `Result` and then ends. Dropping
//! it, or calling [`ResponseStream::cancel`], before that item arrives stops
//! the pipeline: the transport stream is dropped, no decode runs and nothing
//! is emitted afterwards.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use courier_transport::NetworkError;
use courier_transport::observability::StreamContext;
use futures::Stream;
use futures::stream::FusedStream;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::{ClientError, Result};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

enum State<T> {
    /// Driven by whoever polls the stream
    Inline(BoxFuture<Result<T>>),
    /// Spawned on the delivery runtime at first poll
    Deferred(BoxFuture<Result<T>>, Handle),
    Spawned(JoinHandle<Result<T>>),
    Done,
}

/// A stream that produces a single pipeline result.
#[must_use = "streams do nothing unless polled"]
pub struct ResponseStream<T> {
    state: State<T>,
    context: StreamContext,
}

impl<T: Send + 'static> ResponseStream<T> {
    pub(crate) fn new(
        future: impl Future<Output = Result<T>> + Send + 'static,
        delivery: Option<Handle>,
        request_id: Option<Uuid>,
    ) -> Self {
        let future: BoxFuture<Result<T>> = Box::pin(future);
        let state = match delivery {
            Some(handle) => State::Deferred(future, handle),
            None => State::Inline(future),
        };
        let context = StreamContext::new(request_id);
        context.log_started();
        Self { state, context }
    }

    /// Stop the stream. Nothing is emitted after this returns.
    ///
    /// Work already spawned on the delivery runtime is aborted.
    pub fn cancel(&mut self) {
        if matches!(self.state, State::Done) {
            return;
        }
        if let State::Spawned(handle) = std::mem::replace(&mut self.state, State::Done) {
            handle.abort();
        }
        self.context.log_cancelled();
    }
}

impl<T: Send + 'static> Stream for ResponseStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if matches!(this.state, State::Deferred(..)) {
            if let State::Deferred(future, handle) = std::mem::replace(&mut this.state, State::Done)
            {
                this.state = State::Spawned(handle.spawn(future));
            }
        }

        let result = match &mut this.state {
            State::Inline(future) => ready!(future.as_mut().poll(cx)),
            State::Spawned(handle) => match ready!(Pin::new(handle).poll(cx)) {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => Err(ClientError::NetworkFailure(NetworkError::Cancelled)),
                Err(e) => Err(ClientError::generic(e)),
            },
            State::Deferred(..) | State::Done => return Poll::Ready(None),
        };

        this.state = State::Done;
        this.context.log_delivered(result.is_ok());
        Poll::Ready(Some(result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Done => (0, Some(0)),
            _ => (0, Some(1)),
        }
    }
}

impl<T: Send + 'static> FusedStream for ResponseStream<T> {
    fn is_terminated(&self) -> bool {
        matches!(self.state, State::Done)
    }
}

impl<T> Drop for ResponseStream<T> {
    fn drop(&mut self) {
        if let State::Spawned(handle) = &self.state {
            handle.abort();
        }
    }
}

impl<T> std::fmt::Debug for ResponseStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            State::Inline(_) => "inline",
            State::Deferred(..) => "deferred",
            State::Spawned(_) => "spawned",
            State::Done => "done",
        };
        f.debug_struct("ResponseStream")
            .field("state", &state)
            .finish()
    }
}
