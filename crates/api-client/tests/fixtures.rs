// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Scripted transports and recording observers for retry tests

use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use api_client::{
    HttpRequest, HttpResponse, HttpTransport, RetryEvent, RetryObserver, TransportError,
};
use tokio_util::sync::CancellationToken;
use url::Url;

/// One scripted outcome of a transport call
#[derive(Debug, Clone)]
pub enum Step {
    Status(u16),
    NetworkError,
}

impl Step {
    fn resolve(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        match self {
            Step::Status(status) => Ok(HttpResponse::new(*status, format!("status {status}"))),
            Step::NetworkError => Err(TransportError::Network {
                target: request.url.to_string(),
                message: "connection reset by peer".to_string(),
            }),
        }
    }
}

/// Transport that replays a script, then repeats `fallback` forever
#[derive(Debug)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Step>>,
    fallback: Step,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Step>, fallback: Step) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(step: Step) -> Self {
        Self::new([], step)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(
        &self,
        request: &HttpRequest,
        _cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        step.resolve(request)
    }
}

/// Observer that keeps every event it sees
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<RetryEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<RetryEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl RetryObserver for RecordingObserver {
    fn on_retry(&self, event: &RetryEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn protein_request() -> HttpRequest {
    HttpRequest::get(Url::parse("https://rest.uniprot.org/uniprotkb/P04637.json").unwrap())
        .header("Accept", "application/json")
}
