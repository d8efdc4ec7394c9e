// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `RetryTransport`
//!
//! Time is paused so backoff sleeps advance instantly and the elapsed virtual
//! time equals the sum of the scheduled delays.

use std::{sync::Arc, time::Duration};

use api_client::{HttpTransport, RetryCause, RetryConfig, RetryTransport, TransportError};
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;

mod fixtures;
use fixtures::*;

const BASE_DELAY: Duration = Duration::from_millis(1000);

fn retrying(
    transport: ScriptedTransport,
    observer: &Arc<RecordingObserver>,
) -> RetryTransport<ScriptedTransport> {
    RetryTransport::new(
        transport,
        RetryConfig {
            max_retries: 3,
            base_delay: BASE_DELAY,
        },
    )
    .with_observer(observer.clone())
}

/// Test that a transient failure on attempts 1 and 2 is recovered on attempt 3
#[tokio::test(start_paused = true)]
async fn recovers_after_transient_statuses() {
    let observer = Arc::new(RecordingObserver::default());
    let transport = retrying(
        ScriptedTransport::new([Step::Status(503), Step::Status(503)], Step::Status(200)),
        &observer,
    );

    let started = Instant::now();
    let response = assert_ok!(
        transport
            .send(&protein_request(), &CancellationToken::new())
            .await
    );

    assert_eq!(response.status, 200);
    assert_eq!(transport.inner().calls(), 3);

    let delays: Vec<_> = observer.events().iter().map(|event| event.delay).collect();
    assert_eq!(delays, vec![BASE_DELAY, BASE_DELAY * 2]);
    assert_eq!(started.elapsed(), BASE_DELAY * 3);
}

/// Test that the final failing response is returned once the budget is spent
#[tokio::test(start_paused = true)]
async fn returns_last_response_when_statuses_exhaust_budget() {
    let observer = Arc::new(RecordingObserver::default());
    let transport = retrying(ScriptedTransport::always(Step::Status(503)), &observer);

    let started = Instant::now();
    let response = assert_ok!(
        transport
            .send(&protein_request(), &CancellationToken::new())
            .await
    );

    assert_eq!(response.status, 503);
    assert_eq!(response.body_text(), "status 503");
    assert_eq!(transport.inner().calls(), 4);

    let events = observer.events();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events.iter().map(|event| event.attempt).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(
        events
            .iter()
            .all(|event| event.cause == RetryCause::Status(503) && event.max_retries == 3)
    );
    assert_eq!(started.elapsed(), BASE_DELAY * 7);
}

/// Test that network failures past the budget surface as an exhausted-retries error
#[tokio::test(start_paused = true)]
async fn network_errors_exhaust_into_error() {
    let observer = Arc::new(RecordingObserver::default());
    let transport = retrying(ScriptedTransport::always(Step::NetworkError), &observer);

    let error = assert_err!(
        transport
            .send(&protein_request(), &CancellationToken::new())
            .await
    );

    assert_eq!(
        error,
        TransportError::RetriesExhausted {
            target: "https://rest.uniprot.org/uniprotkb/P04637.json".to_string(),
            retries: 3,
            message: "request to https://rest.uniprot.org/uniprotkb/P04637.json failed: \
                      connection reset by peer"
                .to_string(),
        }
    );
    assert_eq!(transport.inner().calls(), 4);
    assert!(
        observer
            .events()
            .iter()
            .all(|event| event.cause.kind() == "network")
    );
}

/// Test that a network failure followed by success is recovered
#[tokio::test(start_paused = true)]
async fn recovers_after_network_error() {
    let observer = Arc::new(RecordingObserver::default());
    let transport = retrying(
        ScriptedTransport::new([Step::NetworkError], Step::Status(200)),
        &observer,
    );

    let response = assert_ok!(
        transport
            .send(&protein_request(), &CancellationToken::new())
            .await
    );

    assert_eq!(response.status, 200);
    assert_eq!(transport.inner().calls(), 2);
    assert_eq!(observer.events().len(), 1);
}

/// Test that a final status falls through unchanged without retrying
#[tokio::test(start_paused = true)]
async fn final_statuses_are_not_retried() {
    for status in [400, 401, 404, 501] {
        let observer = Arc::new(RecordingObserver::default());
        let transport = retrying(ScriptedTransport::always(Step::Status(status)), &observer);

        let started = Instant::now();
        let response = assert_ok!(
            transport
                .send(&protein_request(), &CancellationToken::new())
                .await
        );

        assert_eq!(response.status, status);
        assert_eq!(transport.inner().calls(), 1, "status {status}");
        assert!(observer.events().is_empty());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}

/// Test that a zero budget issues exactly one attempt
#[tokio::test(start_paused = true)]
async fn zero_budget_makes_single_attempt() {
    let transport = RetryTransport::new(
        ScriptedTransport::always(Step::NetworkError),
        RetryConfig {
            max_retries: 0,
            base_delay: BASE_DELAY,
        },
    );

    let error = assert_err!(
        transport
            .send(&protein_request(), &CancellationToken::new())
            .await
    );

    assert!(matches!(
        error,
        TransportError::RetriesExhausted { retries: 0, .. }
    ));
    assert_eq!(transport.inner().calls(), 1);
}

/// Test that cancelling during a backoff wait aborts without another attempt
#[tokio::test(start_paused = true)]
async fn cancellation_interrupts_backoff() {
    let observer = Arc::new(RecordingObserver::default());
    let transport = retrying(ScriptedTransport::always(Step::Status(503)), &observer);
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let error = assert_err!(transport.send(&protein_request(), &cancel).await);

    assert_eq!(error, TransportError::Cancelled);
    assert_eq!(transport.inner().calls(), 1);
    assert_eq!(started.elapsed(), Duration::from_millis(500));
}

/// Test that an already cancelled token prevents any attempt
#[tokio::test(start_paused = true)]
async fn cancelled_token_skips_all_attempts() {
    let observer = Arc::new(RecordingObserver::default());
    let transport = retrying(ScriptedTransport::always(Step::Status(200)), &observer);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let error = assert_err!(transport.send(&protein_request(), &cancel).await);

    assert_eq!(error, TransportError::Cancelled);
    assert_eq!(transport.inner().calls(), 0);
}
