//! Foreign-key joins between reservations and customers.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Customer, Reservation, ReservationStatus};

/// Label shown for a reservation whose customer cannot be resolved.
pub const UNKNOWN_CUSTOMER: &str = "Unknown customer";

/// Display label for an optional customer, never empty.
pub fn customer_label(customer: Option<&Customer>) -> String {
    customer
        .and_then(Customer::display_name)
        .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string())
}

/// A reservation paired with its resolved customer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinedReservation<'a> {
    pub reservation: &'a Reservation,
    pub customer: Option<&'a Customer>,
}

impl JoinedReservation<'_> {
    pub fn customer_label(&self) -> String {
        customer_label(self.customer)
    }
}

/// Resolve each reservation's customer by `customer_id` against `customers`.
///
/// Output order follows `reservations`. If `customers` holds duplicate ids
/// the first one wins. A reservation whose id has no match falls back to
/// the customer embedded in the reservation itself, then to nothing.
pub fn join_customers<'a>(
    reservations: &'a [Reservation],
    customers: &'a [Customer],
) -> Vec<JoinedReservation<'a>> {
    let by_id = customer_index(customers);
    reservations
        .iter()
        .map(|r| JoinedReservation {
            reservation: r,
            customer: resolve_customer(r, &by_id),
        })
        .collect()
}

/// Lookup table by customer id; the first of any duplicate ids wins.
pub(crate) fn customer_index(customers: &[Customer]) -> HashMap<i64, &Customer> {
    let mut by_id: HashMap<i64, &Customer> = HashMap::with_capacity(customers.len());
    for c in customers {
        by_id.entry(c.id).or_insert(c);
    }
    by_id
}

pub(crate) fn resolve_customer<'a>(
    reservation: &'a Reservation,
    by_id: &HashMap<i64, &'a Customer>,
) -> Option<&'a Customer> {
    reservation
        .customer_id
        .and_then(|id| by_id.get(&id).copied())
        .or_else(|| {
            reservation
                .customer
                .as_ref()
                .filter(|c| c.display_name().is_some())
        })
}

/// Group reservations by customer id (one-to-many), ordered by id.
///
/// Reservations without a customer reference are left out.
pub fn reservations_by_customer(reservations: &[Reservation]) -> BTreeMap<i64, Vec<&Reservation>> {
    let mut out: BTreeMap<i64, Vec<&Reservation>> = BTreeMap::new();
    for r in reservations {
        if let Some(id) = r.customer_id {
            out.entry(id).or_default().push(r);
        }
    }
    out
}

/// Reservation history of one customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReservationSummary {
    pub customer_id: i64,
    pub customer_full_name: String,
    pub total_reservations: usize,
    pub upcoming_reservations: usize,
    pub pending_reservations: usize,
    pub confirmed_reservations: usize,
    pub completed_reservations: usize,
    pub cancelled_reservations: usize,
    pub last_reservation_date: Option<DateTime<Utc>>,
    pub next_reservation_date: Option<DateTime<Utc>>,
}

/// Summarize the reservations of `customer_id` as of `now`.
///
/// `last_reservation_date` is the latest dated reservation overall;
/// `next_reservation_date` is the earliest one strictly after `now`.
pub fn customer_summary(
    customer_id: i64,
    customers: &[Customer],
    reservations: &[Reservation],
    now: DateTime<Utc>,
) -> CustomerReservationSummary {
    let customer = customers.iter().find(|c| c.id == customer_id);
    let mut summary = CustomerReservationSummary {
        customer_id,
        customer_full_name: customer_label(customer),
        ..Default::default()
    };

    for r in reservations.iter().filter(|r| r.customer_id == Some(customer_id)) {
        summary.total_reservations += 1;
        match r.status {
            Some(ReservationStatus::Pending) => summary.pending_reservations += 1,
            Some(ReservationStatus::Confirmed) => summary.confirmed_reservations += 1,
            Some(ReservationStatus::Completed) => summary.completed_reservations += 1,
            Some(ReservationStatus::Cancelled) => summary.cancelled_reservations += 1,
            None => {}
        }
        if let Some(date) = r.date {
            if date > now {
                summary.upcoming_reservations += 1;
                if summary.next_reservation_date.map_or(true, |next| date < next) {
                    summary.next_reservation_date = Some(date);
                }
            }
            if summary.last_reservation_date.map_or(true, |last| date > last) {
                summary.last_reservation_date = Some(date);
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerDto, ReservationDto};
    use chrono::{Duration, TimeZone};

    fn customer(id: i64, first: &str, last: &str) -> Customer {
        CustomerDto {
            id: Some(id),
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            ..Default::default()
        }
        .normalize()
    }

    fn reservation(id: i64, customer_id: Option<i64>) -> Reservation {
        ReservationDto {
            id: Some(id),
            customer: customer_id.map(|cid| CustomerDto {
                id: Some(cid),
                ..Default::default()
            }),
            ..Default::default()
        }
        .normalize()
    }

    #[test]
    fn join_resolves_and_falls_back() {
        let customers = vec![customer(1, "Ada", "Lovelace"), customer(2, "Alan", "Turing")];
        let reservations = vec![
            reservation(10, Some(1)),
            reservation(11, Some(99)),
            reservation(12, None),
            reservation(13, Some(1)),
        ];
        let joined = join_customers(&reservations, &customers);
        assert_eq!(joined.len(), 4);
        assert_eq!(joined[0].customer_label(), "Ada Lovelace");
        assert_eq!(joined[1].customer_label(), UNKNOWN_CUSTOMER);
        assert_eq!(joined[2].customer_label(), UNKNOWN_CUSTOMER);
        assert_eq!(joined[3].customer.map(|c| c.id), Some(1));
    }

    #[test]
    fn join_uses_embedded_customer_when_unmatched() {
        let mut r = reservation(1, Some(5));
        r.customer = Some(customer(5, "Embedded", "Guest"));
        let joined = join_customers(std::slice::from_ref(&r), &[]);
        assert_eq!(joined[0].customer_label(), "Embedded Guest");
    }

    #[test]
    fn join_first_duplicate_wins() {
        let customers = vec![customer(1, "First", ""), customer(1, "Second", "")];
        let reservations = vec![reservation(1, Some(1))];
        assert_eq!(join_customers(&reservations, &customers)[0].customer_label(), "First");
    }

    #[test]
    fn group_by_customer_is_one_to_many() {
        let reservations = vec![
            reservation(1, Some(2)),
            reservation(2, Some(1)),
            reservation(3, Some(2)),
            reservation(4, None),
        ];
        let groups = reservations_by_customer(&reservations);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&2].iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(groups[&1].len(), 1);
    }

    #[test]
    fn summary_counts_and_dates() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let customers = vec![customer(1, "Ada", "Lovelace")];
        let mut past = reservation(1, Some(1));
        past.date = Some(now - Duration::days(3));
        past.status = Some(ReservationStatus::Completed);
        let mut soon = reservation(2, Some(1));
        soon.date = Some(now + Duration::days(1));
        soon.status = Some(ReservationStatus::Confirmed);
        let mut later = reservation(3, Some(1));
        later.date = Some(now + Duration::days(10));
        later.status = Some(ReservationStatus::Pending);
        let other = reservation(4, Some(2));

        let s = customer_summary(1, &customers, &[past, later.clone(), soon.clone(), other], now);
        assert_eq!(s.customer_full_name, "Ada Lovelace");
        assert_eq!(s.total_reservations, 3);
        assert_eq!(s.upcoming_reservations, 2);
        assert_eq!(s.completed_reservations, 1);
        assert_eq!(s.next_reservation_date, soon.date);
        assert_eq!(s.last_reservation_date, later.date);
    }

    #[test]
    fn summary_for_unknown_customer_is_empty() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let s = customer_summary(42, &[], &[], now);
        assert_eq!(s.customer_full_name, UNKNOWN_CUSTOMER);
        assert_eq!(s.total_reservations, 0);
        assert!(s.next_reservation_date.is_none());
    }
}
