//! Scripted transport for tests.
//!
//! [`ScriptedTransport`] replays queued outcomes in order and records every
//! request with its `tokio::time::Instant`, so retry delays can be checked
//! on a paused clock.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;
use url::Url;

use super::{HttpResponse, RequestEnvelope, Transport};
use crate::error::TransportError;

/// A request seen by [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Absolute URL including the query string.
    pub url: Url,
    /// `Authorization` header value.
    pub authorization: String,
    /// When the request was sent.
    pub at: Instant,
}

enum Scripted {
    Response(HttpResponse),
    Error(TransportError),
}

/// Transport double that replays a script.
///
/// Once the queue is empty, the fallback response (if any) is returned
/// forever; without one, sends fail with [`TransportError::Connect`].
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Option<HttpResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that always returns `response`.
    pub fn always(response: HttpResponse) -> Self {
        Self {
            fallback: Some(response),
            ..Self::default()
        }
    }

    /// Queues a response.
    #[must_use]
    pub fn then(self, response: HttpResponse) -> Self {
        self.push(Scripted::Response(response));
        self
    }

    /// Queues a JSON response.
    #[must_use]
    pub fn then_json(self, status: u16, body: &Value) -> Self {
        self.then(HttpResponse::json(status, body))
    }

    /// Queues a transport failure.
    #[must_use]
    pub fn then_error(self, error: TransportError) -> Self {
        self.push(Scripted::Error(error));
        self
    }

    /// Returns the number of requests sent.
    pub fn calls(&self) -> usize {
        self.lock_requests().len()
    }

    /// Returns every request sent so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock_requests().clone()
    }

    /// Returns the URL of the last request.
    pub fn last_url(&self) -> Option<Url> {
        self.lock_requests().last().map(|r| r.url.clone())
    }

    fn push(&self, item: Scripted) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(item);
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &RequestEnvelope) -> Result<HttpResponse, TransportError> {
        self.lock_requests().push(RecordedRequest {
            url: request.url().clone(),
            authorization: request.authorization(),
            at: Instant::now(),
        });

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Error(error)) => Err(error),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| TransportError::Connect("script exhausted".to_string())),
        }
    }
}
