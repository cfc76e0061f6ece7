//! Client SDK for a reservation-management backend, with a pure aggregation
//! layer for dashboard figures.
//!
//! The SDK talks to the backend's REST API over a blocking `reqwest` client,
//! keeps the staff login token in a single [`Session`], and normalizes every
//! response into closed domain types. The [`aggregate`] module turns fetched
//! collections into counts, ratios, joins, rankings, time windows, revenue,
//! and finance summaries.
//!
//! # Quick start
//!
//! ```no_run
//! use booking_dashboard_sdk::BookingSdk;
//! use booking_dashboard_sdk::pagination::PageRequest;
//!
//! let sdk = BookingSdk::builder()
//!     .base_url("http://localhost:8080/api")
//!     .build()
//!     .unwrap();
//! sdk.auth().login("admin", "admin", false).unwrap();
//!
//! // One page of reservations
//! let page = sdk.reservations().list(PageRequest::new().size(20)).unwrap();
//!
//! // Everything the dashboard shows
//! let stats = sdk.snapshot().unwrap().dashboard();
//! println!("{} upcoming, avg payment {}", stats.active_count, stats.revenue.average_payment);
//! ```

pub mod aggregate;
pub mod api;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod pagination;
pub mod session;
pub mod snapshot;

#[cfg(feature = "async")]
pub use async_client::AsyncBookingSdk;
pub use error::{BookingError, Result};
pub use http::ApiClient;
pub use session::Session;
pub use snapshot::{PageLoad, Snapshot, SnapshotLoader, ViewHandle};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

// ---------------------------------------------------------------------------
// BookingSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`BookingSdk`] instance.
///
/// Use [`BookingSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](BookingSdkBuilder::build) to create the SDK.
#[derive(Debug, Clone)]
pub struct BookingSdkBuilder {
    base_url: String,
    timeout: Duration,
    session_file: Option<PathBuf>,
    persist_session: bool,
    token: Option<String>,
}

impl Default for BookingSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            session_file: None,
            persist_session: false,
            token: None,
        }
    }
}

impl BookingSdkBuilder {
    /// Start from `BOOKING_API_URL` and `BOOKING_API_TOKEN` when they are set.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Ok(url) = std::env::var(config::BASE_URL_ENV) {
            if !url.trim().is_empty() {
                builder.base_url = url.trim().to_string();
            }
        }
        if let Ok(token) = std::env::var(config::TOKEN_ENV) {
            if !token.trim().is_empty() {
                builder.token = Some(token.trim().to_string());
            }
        }
        builder
    }

    /// API root including the `/api` prefix. Defaults to
    /// `http://localhost:8080/api`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Persist the login token in this file so it survives restarts.
    pub fn session_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.session_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Persist the login token in the platform config directory
    /// (e.g. `~/.config/booking-dashboard-sdk/session.token` on Linux).
    pub fn persist_session(mut self, persist: bool) -> Self {
        self.persist_session = persist;
        self
    }

    /// Start already logged in with a previously issued token.
    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn build(self) -> Result<BookingSdk> {
        let session_file = self
            .session_file
            .or_else(|| self.persist_session.then(config::default_session_file));
        let session = match session_file {
            Some(path) => Session::persistent(path)?,
            None => Session::in_memory(),
        };
        if let Some(token) = self.token.as_deref() {
            session.establish(token)?;
        }
        let client = ApiClient::new(&self.base_url, self.timeout, Arc::new(session))?;
        debug!(base_url = client.base_url(), "sdk ready");
        Ok(BookingSdk { client })
    }
}

// ---------------------------------------------------------------------------
// BookingSdk
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Owns the [`ApiClient`] (and through it the [`Session`]) and hands out
/// per-entity fetchers as lightweight borrowing wrappers.
pub struct BookingSdk {
    client: ApiClient,
}

impl BookingSdk {
    pub fn builder() -> BookingSdkBuilder {
        BookingSdkBuilder::default()
    }

    // -- Fetchers -----------------------------------------------------------

    pub fn reservations(&self) -> api::ReservationApi<'_> {
        api::ReservationApi::new(&self.client)
    }

    pub fn customers(&self) -> api::CustomerApi<'_> {
        api::CustomerApi::new(&self.client)
    }

    pub fn payments(&self) -> api::PaymentApi<'_> {
        api::PaymentApi::new(&self.client)
    }

    /// Offered services.
    pub fn services(&self) -> api::ServiceApi<'_> {
        api::ServiceApi::new(&self.client)
    }

    /// Finance entries and documents.
    pub fn finance(&self) -> api::FinanceApi<'_> {
        api::FinanceApi::new(&self.client)
    }

    /// Staff calendar appointments.
    pub fn appointments(&self) -> api::AppointmentApi<'_> {
        api::AppointmentApi::new(&self.client)
    }

    pub fn auth(&self) -> api::AuthApi<'_> {
        api::AuthApi::new(&self.client)
    }

    // -- Snapshots ----------------------------------------------------------

    pub fn snapshot_loader(&self) -> SnapshotLoader<'_> {
        SnapshotLoader::new(&self.client)
    }

    /// Fetch reservations, payments, customers, and services concurrently.
    pub fn snapshot(&self) -> Result<Snapshot> {
        self.snapshot_loader().load()
    }

    // -- Session ------------------------------------------------------------

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    pub fn logout(&self) {
        self.auth().logout();
    }

    /// The underlying HTTP client, for endpoints without a fetcher.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Consume the SDK. The session file, if any, is left in place.
    pub fn close(self) {
        drop(self);
    }
}

impl fmt::Display for BookingSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self
            .client
            .session()
            .file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "memory".to_string());
        write!(
            f,
            "BookingSdk(base_url={}, session={}, authenticated={})",
            self.client.base_url(),
            session,
            self.is_authenticated()
        )
    }
}
