//! Entity types exchanged with the reservation backend.
//!
//! Each entity comes in two shapes: a `*Dto` mirroring the wire JSON with
//! every field optional, and a normalized domain type produced by that
//! DTO's `normalize()`. All default substitution happens in `normalize()`;
//! the aggregation layer only ever sees domain types.

pub mod appointment;
pub mod business;
pub mod customer;
pub mod enums;
pub mod finance;
pub mod forms;
pub mod payment;
pub mod reservation;
pub mod service;

pub use appointment::*;
pub use business::*;
pub use customer::*;
pub use enums::*;
pub use finance::*;
pub use forms::*;
pub use payment::*;
pub use reservation::*;
pub use service::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 with any offset, and offset-less `YYYY-MM-DDTHH:MM:SS`
/// taken as UTC. Anything else is `None`.
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
                .map(|naive| naive.and_utc())
                .ok()
        })
}

/// Parse a calendar date (`YYYY-MM-DD`), also accepting a full timestamp.
pub(crate) fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let trimmed = raw?.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(Some(trimmed)).map(|dt| dt.date_naive()))
}

/// Trimmed text with the empty string as default.
pub(crate) fn text(raw: Option<String>) -> String {
    raw.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Trimmed text where blank means absent.
pub(crate) fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
