//! Per-status counts and percentage shares.

use serde::{Deserialize, Serialize};

use crate::models::{Payment, PaymentStatus, Reservation, ReservationStatus};

/// `count / total * 100` rounded to the nearest integer; `0` when `total` is `0`.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

/// Reservation counts grouped by status.
///
/// Entries with no recognized status land in `unrecognized`, so the sum of
/// all fields always equals the size of the tallied collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatusCounts {
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub completed: usize,
    pub unrecognized: usize,
}

impl ReservationStatusCounts {
    pub fn record(&mut self, status: Option<ReservationStatus>) {
        match status {
            Some(ReservationStatus::Pending) => self.pending += 1,
            Some(ReservationStatus::Confirmed) => self.confirmed += 1,
            Some(ReservationStatus::Cancelled) => self.cancelled += 1,
            Some(ReservationStatus::Completed) => self.completed += 1,
            None => self.unrecognized += 1,
        }
    }

    /// Add `n` to a status bucket (used when the backend reports counts).
    pub fn add(&mut self, status: Option<ReservationStatus>, n: usize) {
        match status {
            Some(ReservationStatus::Pending) => self.pending += n,
            Some(ReservationStatus::Confirmed) => self.confirmed += n,
            Some(ReservationStatus::Cancelled) => self.cancelled += n,
            Some(ReservationStatus::Completed) => self.completed += n,
            None => self.unrecognized += n,
        }
    }

    pub fn get(&self, status: ReservationStatus) -> usize {
        match status {
            ReservationStatus::Pending => self.pending,
            ReservationStatus::Confirmed => self.confirmed,
            ReservationStatus::Cancelled => self.cancelled,
            ReservationStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.confirmed + self.cancelled + self.completed + self.unrecognized
    }

    /// Share of `status` in the whole tally, including unrecognized entries.
    pub fn percentage(&self, status: ReservationStatus) -> u32 {
        percentage(self.get(status), self.total())
    }
}

pub fn tally_reservations(reservations: &[Reservation]) -> ReservationStatusCounts {
    let mut counts = ReservationStatusCounts::default();
    for r in reservations {
        counts.record(r.status);
    }
    counts
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// Payment counts grouped by status, with the same unrecognized bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusCounts {
    pub pending: usize,
    pub paid: usize,
    pub failed: usize,
    pub refunded: usize,
    pub unrecognized: usize,
}

impl PaymentStatusCounts {
    pub fn record(&mut self, status: Option<PaymentStatus>) {
        match status {
            Some(PaymentStatus::Pending) => self.pending += 1,
            Some(PaymentStatus::Paid) => self.paid += 1,
            Some(PaymentStatus::Failed) => self.failed += 1,
            Some(PaymentStatus::Refunded) => self.refunded += 1,
            None => self.unrecognized += 1,
        }
    }

    pub fn get(&self, status: PaymentStatus) -> usize {
        match status {
            PaymentStatus::Pending => self.pending,
            PaymentStatus::Paid => self.paid,
            PaymentStatus::Failed => self.failed,
            PaymentStatus::Refunded => self.refunded,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.paid + self.failed + self.refunded + self.unrecognized
    }

    pub fn percentage(&self, status: PaymentStatus) -> u32 {
        percentage(self.get(status), self.total())
    }
}

pub fn tally_payments(payments: &[Payment]) -> PaymentStatusCounts {
    let mut counts = PaymentStatusCounts::default();
    for p in payments {
        counts.record(p.status);
    }
    counts
}
