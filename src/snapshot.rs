//! Concurrent fetch of everything the dashboard needs, with fan-in.
//!
//! [`SnapshotLoader`] issues the reservation, payment, customer, and service
//! fetches at once on scoped threads and waits for all of them before
//! returning. Any failure fails the whole snapshot. A [`ViewHandle`] lets the
//! consuming view say it has gone away; a snapshot that finishes after that
//! is discarded instead of delivered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::{dashboard_stats, DashboardStats};
use crate::config::{self, DEFAULT_TOP_N, SNAPSHOT_PAGE_SIZE};
use crate::error::{BookingError, Result};
use crate::http::ApiClient;
use crate::models::{
    Customer, CustomerDto, OfferedService, OfferedServiceDto, Payment, PaymentDto, Reservation,
    ReservationDto,
};
use crate::pagination::PageRequest;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One consistent set of entity collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub reservations: Vec<Reservation>,
    pub payments: Vec<Payment>,
    pub customers: Vec<Customer>,
    pub services: Vec<OfferedService>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            reservations: Vec::new(),
            payments: Vec::new(),
            customers: Vec::new(),
            services: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Dashboard figures as of the moment this snapshot was fetched.
    pub fn dashboard(&self) -> DashboardStats {
        dashboard_stats(self, &self.fetched_at, DEFAULT_TOP_N)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// ViewHandle
// ---------------------------------------------------------------------------

/// Liveness flag of the view waiting on a snapshot. Clones share the flag.
#[derive(Debug, Clone)]
pub struct ViewHandle {
    mounted: Arc<AtomicBool>,
}

impl ViewHandle {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

impl Default for ViewHandle {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// SnapshotLoader
// ---------------------------------------------------------------------------

pub struct SnapshotLoader<'a> {
    client: &'a ApiClient,
    page_size: u32,
}

impl<'a> SnapshotLoader<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            page_size: SNAPSHOT_PAGE_SIZE,
        }
    }

    /// Page size used while walking each collection.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size.clamp(1, PageRequest::MAX_SIZE);
        self
    }

    /// Fetch all four collections concurrently and wait for every one.
    pub fn load(&self) -> Result<Snapshot> {
        let (reservations, payments, customers, services) = thread::scope(|s| {
            let reservations = s.spawn(|| self.reservations());
            let payments = s.spawn(|| self.payments());
            let customers = s.spawn(|| self.customers());
            let services = s.spawn(|| self.services());
            (
                join(reservations),
                join(payments),
                join(customers),
                join(services),
            )
        });

        let snapshot = Snapshot {
            reservations: reservations?,
            payments: payments?,
            customers: customers?,
            services: services?,
            fetched_at: Utc::now(),
        };
        debug!(
            reservations = snapshot.reservations.len(),
            payments = snapshot.payments.len(),
            customers = snapshot.customers.len(),
            services = snapshot.services.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Every reservation, across all pages.
    pub fn reservations(&self) -> Result<Vec<Reservation>> {
        self.fetch_all("reservations", ReservationDto::normalize)
    }

    pub fn payments(&self) -> Result<Vec<Payment>> {
        self.fetch_all("payments", PaymentDto::normalize)
    }

    pub fn customers(&self) -> Result<Vec<Customer>> {
        self.fetch_all("customers", CustomerDto::normalize)
    }

    pub fn services(&self) -> Result<Vec<OfferedService>> {
        self.fetch_all("services", OfferedServiceDto::normalize)
    }

    /// Like [`load`](Self::load), but yields `Ok(None)` if `view` is no
    /// longer mounted when the fetch completes (successfully or not).
    pub fn load_for(&self, view: &ViewHandle) -> Result<Option<Snapshot>> {
        if !view.is_mounted() {
            return Ok(None);
        }
        let result = self.load();
        if !view.is_mounted() {
            warn!(failed = result.is_err(), "view unmounted before snapshot resolved; discarding");
            return Ok(None);
        }
        result.map(Some)
    }

    /// Walk every page of one collection.
    fn fetch_all<D, T, F>(&self, endpoint: &str, normalize: F) -> Result<Vec<T>>
    where
        D: DeserializeOwned,
        F: Fn(D) -> T,
    {
        let path = config::endpoint(endpoint);
        let mut out = Vec::new();
        let mut page = 0u32;
        loop {
            let query = PageRequest::new().page(page).size(self.page_size).to_query();
            let batch = self.client.get_page::<D>(&path, &query)?;
            let fetched = batch.len();
            let total = batch.has_reported_total().then_some(batch.total);
            out.extend(batch.items.into_iter().map(&normalize));
            if fetched == 0 || fetched < self.page_size as usize {
                break;
            }
            if total.is_some_and(|t| out.len() as u64 >= t) {
                break;
            }
            page += 1;
        }
        Ok(out)
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

// ---------------------------------------------------------------------------
// PageLoad
// ---------------------------------------------------------------------------

/// Data for one page plus a dismissible error message.
///
/// On failure the data falls back to its empty default so the page still
/// renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLoad<T> {
    pub data: T,
    pub error: Option<String>,
    /// The failure was a rejected session; the caller should route to login.
    pub login_required: bool,
}

impl<T: Default> PageLoad<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self {
                data,
                error: None,
                login_required: false,
            },
            Err(e) => Self::failed(&e),
        }
    }

    pub fn failed(error: &BookingError) -> Self {
        Self {
            data: T::default(),
            error: Some(error.to_string()),
            login_required: error.requires_login(),
        }
    }
}

impl<T> PageLoad<T> {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_handle_clones_share_state() {
        let view = ViewHandle::new();
        let other = view.clone();
        assert!(other.is_mounted());
        view.unmount();
        assert!(!other.is_mounted());
    }

    #[test]
    fn page_load_falls_back_to_empty() {
        let mut load: PageLoad<Vec<i64>> =
            PageLoad::from_result(Err(BookingError::NotFound("customers/4".into())));
        assert!(load.data.is_empty());
        assert!(load.has_error());
        assert!(!load.login_required);
        load.dismiss_error();
        assert!(!load.has_error());
    }

    #[test]
    fn page_load_flags_login() {
        let load: PageLoad<Snapshot> = PageLoad::from_result(Err(BookingError::Unauthorized));
        assert!(load.login_required);
        assert!(load.data.reservations.is_empty());
    }

    #[test]
    fn unmounted_view_skips_fetch() {
        let client = ApiClient::new(
            "http://127.0.0.1:9",
            std::time::Duration::from_secs(1),
            Arc::new(crate::session::Session::in_memory()),
        )
        .unwrap();
        let view = ViewHandle::new();
        view.unmount();
        assert!(SnapshotLoader::new(&client).load_for(&view).unwrap().is_none());
    }

    #[test]
    fn empty_snapshot_dashboard_is_zero() {
        let stats = Snapshot::empty().dashboard();
        assert_eq!(stats.reservation_counts.total(), 0);
        assert!(stats.upcoming.is_empty());
    }
}
