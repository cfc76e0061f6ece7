//! Calendar time windows (today, this week, this month, custom).
//!
//! Windows are computed from a reference `now` in now's own time zone and
//! compared by calendar date, both ends inclusive. Weeks run Monday to
//! Sunday.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use serde::Serialize;

use crate::models::{Appointment, FinanceEntry, Reservation};

/// Period selector of a dashboard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    ThisWeek,
    ThisMonth,
    /// Inclusive range; reversed bounds are swapped.
    Custom { start: NaiveDate, end: NaiveDate },
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Resolve `period` against `now`.
    pub fn for_period<Tz: TimeZone>(period: Period, now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        match period {
            Period::Today => Self::new(today, today),
            Period::ThisWeek => {
                let back = u64::from(today.weekday().num_days_from_monday());
                let monday = today.checked_sub_days(Days::new(back)).unwrap_or(today);
                let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(today);
                Self::new(monday, sunday)
            }
            Period::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first
                    .checked_add_months(chrono::Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(today);
                Self::new(first, last)
            }
            Period::Custom { start, end } => Self::new(start, end),
        }
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Something with an optional position on the calendar.
pub trait Dated {
    /// Calendar date as seen in `tz`; `None` when undated.
    fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate>;
}

impl Dated for Reservation {
    fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.date.map(|d| d.with_timezone(tz).date_naive())
    }
}

impl Dated for Appointment {
    fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.date.map(|d| d.with_timezone(tz).date_naive())
    }
}

impl Dated for FinanceEntry {
    fn local_date<Tz: TimeZone>(&self, _tz: &Tz) -> Option<NaiveDate> {
        self.date
    }
}

/// Keep the items whose date falls inside `period` relative to `now`.
/// Undated items are dropped.
pub fn filter_by_period<'a, T: Dated, Tz: TimeZone>(
    items: &'a [T],
    period: Period,
    now: &DateTime<Tz>,
) -> Vec<&'a T> {
    let window = TimeWindow::for_period(period, now);
    let tz = now.timezone();
    items
        .iter()
        .filter(|item| {
            item.local_date(&tz)
                .map(|d| window.contains_date(d))
                .unwrap_or(false)
        })
        .collect()
}
