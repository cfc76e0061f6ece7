//! One-pass composition of every dashboard figure over a snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::join::{customer_index, customer_label, resolve_customer};
use super::ranking::{top_payment_methods, top_services, RankedGroup, UNKNOWN_SERVICE};
use super::revenue::{revenue_by_method, revenue_summary, MethodRevenue, RevenueSummary};
use super::tally::{tally_payments, tally_reservations, PaymentStatusCounts, ReservationStatusCounts};
use super::upcoming::{next_upcoming, split_upcoming};
use crate::models::{Reservation, ReservationStatus};
use crate::snapshot::Snapshot;

/// Count and rounded percentage of one reservation status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusShare {
    pub status: ReservationStatus,
    pub label: String,
    pub count: usize,
    pub percent: u32,
}

/// A reservation flattened for a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRow {
    pub id: i64,
    pub date: Option<DateTime<Utc>>,
    pub customer_label: String,
    pub service_name: String,
    pub status_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub reservation_counts: ReservationStatusCounts,
    pub status_breakdown: Vec<StatusShare>,
    pub payment_counts: PaymentStatusCounts,
    pub active_count: usize,
    pub historical_count: usize,
    pub customer_count: usize,
    pub service_count: usize,
    pub revenue: RevenueSummary,
    pub revenue_by_method: Vec<MethodRevenue>,
    pub top_services: Vec<RankedGroup>,
    pub top_payment_methods: Vec<RankedGroup>,
    /// Next pending or confirmed reservations, soonest first.
    pub upcoming: Vec<ReservationRow>,
    /// Most recent past (or undated) reservations.
    pub recent: Vec<ReservationRow>,
}

/// Compute the dashboard for `snapshot` as of `now`, keeping `top_n` entries
/// in every ranked or listed section.
pub fn dashboard_stats(snapshot: &Snapshot, now: &DateTime<Utc>, top_n: usize) -> DashboardStats {
    let reservations = &snapshot.reservations;
    let counts = tally_reservations(reservations);
    let split = split_upcoming(reservations, now);
    let by_id = customer_index(&snapshot.customers);

    let row = |r: &Reservation| ReservationRow {
        id: r.id,
        date: r.date,
        customer_label: customer_label(resolve_customer(r, &by_id)),
        service_name: r.service_name().unwrap_or(UNKNOWN_SERVICE).to_string(),
        status_label: r.status.map(|s| s.label()).unwrap_or("Unknown").to_string(),
    };

    DashboardStats {
        reservation_counts: counts,
        status_breakdown: ReservationStatus::ALL
            .iter()
            .map(|&status| StatusShare {
                status,
                label: status.label().to_string(),
                count: counts.get(status),
                percent: counts.percentage(status),
            })
            .collect(),
        payment_counts: tally_payments(&snapshot.payments),
        active_count: split.active_count(),
        historical_count: split.historical_count(),
        customer_count: snapshot.customers.len(),
        service_count: snapshot.services.len(),
        revenue: revenue_summary(&snapshot.payments),
        revenue_by_method: revenue_by_method(&snapshot.payments),
        top_services: top_services(reservations, top_n),
        top_payment_methods: top_payment_methods(&snapshot.payments, top_n),
        upcoming: next_upcoming(reservations, now, top_n)
            .into_iter()
            .map(|r| row(r))
            .collect(),
        recent: split.historical.iter().take(top_n).map(|r| row(r)).collect(),
    }
}
