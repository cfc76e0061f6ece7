use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Response header carrying the total element count of a paginated list.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Environment variable overriding the API base URL in [`crate::BookingSdkBuilder::from_env`].
pub const BASE_URL_ENV: &str = "BOOKING_API_URL";
/// Environment variable carrying a pre-issued bearer token.
pub const TOKEN_ENV: &str = "BOOKING_API_TOKEN";

/// Page size used when a snapshot pulls whole collections.
pub const SNAPSHOT_PAGE_SIZE: u32 = 500;
/// Default size of the upcoming reservations list.
pub const UPCOMING_DEFAULT_SIZE: usize = 5;
/// Default number of groups kept by top-N rankings on the dashboard.
pub const DEFAULT_TOP_N: usize = 5;

pub fn endpoints() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        // Entity collections
        ("reservations", "reservations"),
        ("customers", "customers"),
        ("payments", "payments"),
        ("services", "offered-services"),
        ("finance_entries", "finance-entries"),
        ("finance_documents", "finance-documents"),
        ("appointments", "appointments"),
        ("appointment_types", "appointment-types"),
        // Reservation extras
        ("reservations_upcoming", "reservations/upcoming"),
        ("reservations_report", "reservations/report"),
        ("reservations_mine", "reservations/my"),
        ("public_reservations", "public/reservations"),
        // Account
        ("authenticate", "authenticate"),
        ("account", "account"),
    ])
}

/// Look up an endpoint path by logical name.
///
/// Unknown names fall back to the name itself, so callers can address
/// endpoints this table does not list yet.
pub fn endpoint(name: &str) -> String {
    endpoints()
        .get(name)
        .map(|p| p.to_string())
        .unwrap_or_else(|| name.to_string())
}

pub fn default_session_file() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        dir.join("booking-dashboard-sdk").join("session.token")
    } else {
        PathBuf::from(".booking-dashboard-session")
    }
}
