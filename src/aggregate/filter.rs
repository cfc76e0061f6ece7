//! Reservation filter criteria, customer search, and date ordering.

use std::borrow::Borrow;
use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::models::{Customer, Reservation, ReservationStatus};
use crate::pagination::SortDirection;

/// Criteria shared by the reservation list endpoint and client-side filtering.
/// Unset fields match everything; `start` and `end` are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
    pub customer_id: Option<i64>,
    pub business_id: Option<i64>,
    pub status: Option<ReservationStatus>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ReservationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(mut self, id: i64) -> Self {
        self.customer_id = Some(id);
        self
    }

    pub fn business(mut self, id: i64) -> Self {
        self.business_id = Some(id);
        self
    }

    pub fn status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Inclusive date range.
    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, reservation: &Reservation) -> bool {
        if let Some(id) = self.customer_id {
            if reservation.customer_id != Some(id) {
                return false;
            }
        }
        if let Some(id) = self.business_id {
            if reservation.business_id() != Some(id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if reservation.status != Some(status) {
                return false;
            }
        }
        if self.start.is_some() || self.end.is_some() {
            let Some(date) = reservation.date else {
                return false;
            };
            if self.start.is_some_and(|start| date < start) {
                return false;
            }
            if self.end.is_some_and(|end| date > end) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, reservations: &'a [Reservation]) -> Vec<&'a Reservation> {
        reservations.iter().filter(|r| self.matches(r)).collect()
    }

    /// Query parameters understood by `GET /reservations`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(id) = self.customer_id {
            out.push(("customerId".to_string(), id.to_string()));
        }
        if let Some(id) = self.business_id {
            out.push(("businessId".to_string(), id.to_string()));
        }
        if let Some(status) = self.status {
            out.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(start) = self.start {
            out.push(("start".to_string(), start.to_rfc3339_opts(SecondsFormat::AutoSi, true)));
        }
        if let Some(end) = self.end {
            out.push(("end".to_string(), end.to_rfc3339_opts(SecondsFormat::AutoSi, true)));
        }
        out
    }
}

/// Case-insensitive substring search over name, email, and phone. A blank
/// term returns every customer.
pub fn search_customers<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return customers.iter().collect();
    }
    customers
        .iter()
        .filter(|c| {
            [c.full_name(), c.email.clone(), c.phone.clone()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sort in place by date in `direction`; undated entries always sort last.
pub fn sort_by_date<R: Borrow<Reservation>>(items: &mut [R], direction: SortDirection) {
    items.sort_by(|a, b| {
        match (a.borrow().date, b.borrow().date) {
            (Some(x), Some(y)) => match direction {
                SortDirection::Asc => x.cmp(&y),
                SortDirection::Desc => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
