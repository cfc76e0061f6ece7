//! Upcoming versus historical reservations.

use chrono::{DateTime, Utc};

use crate::models::Reservation;

/// Reservations partitioned around a reference time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpcomingSplit<'a> {
    /// Dated strictly after now, soonest first.
    pub upcoming: Vec<&'a Reservation>,
    /// Everything else, most recent first; undated entries last.
    pub historical: Vec<&'a Reservation>,
}

impl UpcomingSplit<'_> {
    pub fn active_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn historical_count(&self) -> usize {
        self.historical.len()
    }
}

pub fn split_upcoming<'a>(reservations: &'a [Reservation], now: &DateTime<Utc>) -> UpcomingSplit<'a> {
    let (mut upcoming, mut historical): (Vec<&Reservation>, Vec<&Reservation>) =
        reservations.iter().partition(|r| r.is_after(now));
    upcoming.sort_by_key(|r| r.date);
    // Option orders None first, so reversing puts undated last.
    historical.sort_by(|a, b| b.date.cmp(&a.date));
    UpcomingSplit { upcoming, historical }
}

/// The next `size` upcoming reservations that are still pending or confirmed.
pub fn next_upcoming<'a>(
    reservations: &'a [Reservation],
    now: &DateTime<Utc>,
    size: usize,
) -> Vec<&'a Reservation> {
    let mut next: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.is_after(now) && r.status.map(|s| s.is_active()).unwrap_or(false))
        .collect();
    next.sort_by_key(|r| r.date);
    next.truncate(size);
    next
}
