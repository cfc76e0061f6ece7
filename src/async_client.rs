//! Async wrapper around [`BookingSdk`] for use in Tokio runtimes.
//!
//! Every blocking SDK call runs on Tokio's blocking pool via
//! [`tokio::task::spawn_blocking`]. [`snapshot`](AsyncBookingSdk::snapshot)
//! issues its four fetches as separate blocking tasks and joins them with
//! `tokio::try_join!`.
//!
//! # Example
//!
//! ```no_run
//! use booking_dashboard_sdk::{AsyncBookingSdk, BookingSdk};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncBookingSdk::from_builder(BookingSdk::builder().token("jwt"))
//!         .await
//!         .unwrap();
//!
//!     let upcoming = sdk.run(|s| s.reservations().upcoming(None)).await.unwrap();
//!     let stats = sdk.snapshot().await.unwrap().dashboard();
//! }
//! ```

use std::sync::Arc;

use chrono::Utc;

use crate::error::{BookingError, Result};
use crate::snapshot::Snapshot;
use crate::BookingSdk;

/// Async wrapper around [`BookingSdk`].
///
/// Cloning is cheap; clones share one SDK and one session.
#[derive(Clone)]
pub struct AsyncBookingSdk {
    inner: Arc<BookingSdk>,
}

impl AsyncBookingSdk {
    pub fn new(sdk: BookingSdk) -> Self {
        Self {
            inner: Arc::new(sdk),
        }
    }

    /// Build the underlying SDK on the blocking pool. Prefer this over
    /// [`new`](Self::new) inside a runtime: the blocking HTTP client cannot
    /// be constructed on an async worker thread.
    pub async fn from_builder(builder: crate::BookingSdkBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || builder.build().map(Self::new))
            .await
            .map_err(join_error)?
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&BookingSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(join_error)?
    }

    pub async fn login(&self, username: &str, password: &str, remember_me: bool) -> Result<()> {
        let username = username.to_string();
        let password = password.to_string();
        self.run(move |s| s.auth().login(&username, &password, remember_me))
            .await
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }

    /// Fetch the four snapshot collections as concurrent blocking tasks.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (reservations, payments, customers, services) = tokio::try_join!(
            self.run(|s| s.snapshot_loader().reservations()),
            self.run(|s| s.snapshot_loader().payments()),
            self.run(|s| s.snapshot_loader().customers()),
            self.run(|s| s.snapshot_loader().services()),
        )?;
        Ok(Snapshot {
            reservations,
            payments,
            customers,
            services,
            fetched_at: Utc::now(),
        })
    }
}

fn join_error(e: tokio::task::JoinError) -> BookingError {
    BookingError::InvalidArgument(format!("Task join error: {e}"))
}
