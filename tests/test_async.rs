//! Async wrapper tests. Run with `--features async`.
//!
//! The blocking client must be built off the async worker threads, so every
//! SDK here goes through `AsyncBookingSdk::from_builder`.

#![cfg(feature = "async")]

mod common;

use booking_dashboard_sdk::{AsyncBookingSdk, BookingSdk};
use common::StubServer;

async fn connect(server: &StubServer, token: Option<&str>) -> AsyncBookingSdk {
    let mut builder = BookingSdk::builder().base_url(&server.base_url);
    if let Some(token) = token {
        builder = builder.token(token);
    }
    AsyncBookingSdk::from_builder(builder).await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn snapshot_joins_concurrent_fetches() {
    let server = StubServer::start();
    let sdk = connect(&server, Some(common::TOKEN)).await;

    let snapshot = sdk.snapshot().await.unwrap();
    assert_eq!(snapshot.reservations.len(), 5);
    assert_eq!(snapshot.payments.len(), 3);
    assert_eq!(snapshot.customers.len(), 3);
    assert_eq!(snapshot.services.len(), 2);
    assert_eq!(snapshot.dashboard().active_count, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn login_then_run() {
    let server = StubServer::start();
    let sdk = connect(&server, None).await;
    assert!(!sdk.is_authenticated());

    sdk.login(common::USERNAME, common::PASSWORD, false).await.unwrap();
    assert!(sdk.is_authenticated());

    let upcoming = sdk.run(|s| s.reservations().upcoming(Some(3))).await.unwrap();
    assert_eq!(upcoming.len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failures_propagate() {
    let server = StubServer::start();
    let sdk = connect(&server, None).await;
    assert!(sdk.snapshot().await.unwrap_err().requires_login());
}
