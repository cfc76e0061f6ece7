//! Reservation report over a filter, computed locally or decoded from the
//! backend's `/reservations/report` response.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::ReservationFilter;
use super::tally::ReservationStatusCounts;
use crate::models::{parse_timestamp, Reservation, ReservationStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationReport {
    pub total_reservations: usize,
    pub distinct_customers: usize,
    pub distinct_businesses: usize,
    /// After now and still pending or confirmed.
    pub upcoming_reservations: usize,
    pub status_counts: ReservationStatusCounts,
    pub range_start: Option<DateTime<Utc>>,
    pub range_end: Option<DateTime<Utc>>,
}

/// Build the report for the reservations matching `filter`.
pub fn reservation_report(
    reservations: &[Reservation],
    filter: &ReservationFilter,
    now: &DateTime<Utc>,
) -> ReservationReport {
    let mut report = ReservationReport {
        range_start: filter.start,
        range_end: filter.end,
        ..ReservationReport::default()
    };
    let mut customers = HashSet::new();
    let mut businesses = HashSet::new();

    for r in reservations.iter().filter(|r| filter.matches(r)) {
        report.total_reservations += 1;
        report.status_counts.record(r.status);
        if let Some(id) = r.customer_id {
            customers.insert(id);
        }
        if let Some(id) = r.business_id() {
            businesses.insert(id);
        }
        if r.is_after(now) && r.status.is_some_and(|s| s.is_active()) {
            report.upcoming_reservations += 1;
        }
    }
    report.distinct_customers = customers.len();
    report.distinct_businesses = businesses.len();
    report
}

/// Wire shape of `GET /reservations/report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationReportDto {
    pub total_reservations: Option<u64>,
    pub distinct_customers: Option<u64>,
    pub distinct_businesses: Option<u64>,
    pub upcoming_reservations: Option<u64>,
    #[serde(default)]
    pub status_counts: BTreeMap<String, u64>,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
}

impl ReservationReportDto {
    pub fn normalize(self) -> ReservationReport {
        let mut status_counts = ReservationStatusCounts::default();
        for (key, n) in &self.status_counts {
            status_counts.add(ReservationStatus::parse(key), to_count(Some(*n)));
        }
        ReservationReport {
            total_reservations: to_count(self.total_reservations),
            distinct_customers: to_count(self.distinct_customers),
            distinct_businesses: to_count(self.distinct_businesses),
            upcoming_reservations: to_count(self.upcoming_reservations),
            status_counts,
            range_start: parse_timestamp(self.range_start.as_deref()),
            range_end: parse_timestamp(self.range_end.as_deref()),
        }
    }
}

fn to_count(n: Option<u64>) -> usize {
    n.and_then(|n| usize::try_from(n).ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationDto;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn res(customer: i64, business: i64, hours: i64, status: &str) -> Reservation {
        serde_json::from_value::<ReservationDto>(serde_json::json!({
            "id": 1,
            "status": status,
            "date": (now() + Duration::hours(hours)).to_rfc3339(),
            "customer": {"id": customer},
            "business": {"id": business},
        }))
        .unwrap()
        .normalize()
    }

    #[test]
    fn local_report_counts_distincts_and_upcoming() {
        let rs = vec![
            res(1, 10, 5, "PENDING"),
            res(1, 10, 6, "CANCELLED"),
            res(2, 11, -5, "COMPLETED"),
            res(3, 10, 30, "CONFIRMED"),
            res(4, 12, 2, "bogus"),
        ];
        let report = reservation_report(&rs, &ReservationFilter::new(), &now());
        assert_eq!(report.total_reservations, 5);
        assert_eq!(report.distinct_customers, 4);
        assert_eq!(report.distinct_businesses, 3);
        assert_eq!(report.upcoming_reservations, 2);
        assert_eq!(report.status_counts.unrecognized, 1);
        assert_eq!(report.status_counts.total(), 5);
    }

    #[test]
    fn local_report_respects_filter_and_echoes_range() {
        let rs = vec![res(1, 10, 5, "PENDING"), res(2, 11, 5, "PENDING")];
        let filter = ReservationFilter::new()
            .business(11)
            .between(now(), now() + Duration::days(1));
        let report = reservation_report(&rs, &filter, &now());
        assert_eq!(report.total_reservations, 1);
        assert_eq!(report.range_start, Some(now()));
        assert_eq!(report.range_end, Some(now() + Duration::days(1)));
    }

    #[test]
    fn backend_report_normalizes() {
        let dto: ReservationReportDto = serde_json::from_value(serde_json::json!({
            "totalReservations": 12,
            "distinctCustomers": 4,
            "distinctBusinesses": 2,
            "upcomingReservations": 3,
            "statusCounts": {"PENDING": 5, "CONFIRMED": 4, "COMPLETED": 3},
            "rangeStart": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let report = dto.normalize();
        assert_eq!(report.total_reservations, 12);
        assert_eq!(report.status_counts.pending, 5);
        assert_eq!(report.status_counts.total(), 12);
        assert!(report.range_start.is_some());
        assert!(report.range_end.is_none());
    }
}
