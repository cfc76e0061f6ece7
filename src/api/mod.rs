//! Per-entity REST fetchers.
//!
//! Each fetcher borrows the SDK's [`ApiClient`](crate::http::ApiClient) and
//! returns normalized domain values. List calls return a
//! [`Page`](crate::pagination::Page) whose total comes from the
//! `x-total-count` header. Create and update payloads are validated before
//! anything is sent.

pub mod appointments;
pub mod auth;
pub mod customers;
pub mod finance;
pub mod payments;
pub mod reservations;
pub mod services;

pub use appointments::AppointmentApi;
pub use auth::{Account, AuthApi, LoginRequest};
pub use customers::CustomerApi;
pub use finance::FinanceApi;
pub use payments::PaymentApi;
pub use reservations::ReservationApi;
pub use services::ServiceApi;

/// `{collection}/{id}`.
pub(crate) fn item_path(collection: &str, id: i64) -> String {
    format!("{}/{}", collection, id)
}
