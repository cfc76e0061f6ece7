//! Create/update payloads, validated client-side before they are sent.
//!
//! Length limits follow the backend's column constraints so a payload that
//! passes here is not rejected for size on the server.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use validator::{Validate, ValidationError};

use super::{AppointmentStatus, FinanceEntryType, ReservationStatus, MAX_APPOINTMENT_MINUTES};

/// `{"id": ..}` reference to an existing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: i64,
}

impl From<i64> for EntityRef {
    fn from(id: i64) -> Self {
        Self { id }
    }
}

/// Body of an update: the payload with its `id` merged in.
#[derive(Debug, Serialize)]
pub(crate) struct WithId<'a, T: Serialize> {
    pub id: i64,
    #[serde(flatten)]
    pub body: &'a T,
}

fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some(Cow::Borrowed("must not be negative"));
        return Err(err);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub date: DateTime<Utc>,
    pub status: ReservationStatus,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<EntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<EntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<EntityRef>,
}

impl NewReservation {
    /// A pending reservation at `date` with no references.
    pub fn pending(date: DateTime<Utc>) -> Self {
        Self {
            date,
            status: ReservationStatus::Pending,
            notes: None,
            service: None,
            customer: None,
            business: None,
        }
    }
}

/// Unauthenticated booking submitted by a guest on the public page.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuestReservationRequest {
    #[validate(length(max = 80, message = "must be at most 80 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 80, message = "must be at most 80 characters"))]
    pub last_name: Option<String>,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 191, message = "must be at most 191 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = 40, message = "must be at most 40 characters"))]
    pub phone: Option<String>,
    pub reservation_date: DateTime<Utc>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
    pub offered_service_id: Option<i64>,
    pub business_id: Option<i64>,
}

/// Body of `PUT /reservations/{id}/approve`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ReservationApproval {
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    #[validate(length(min = 1, max = 80, message = "is required (max 80 characters)"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 80, message = "is required (max 80 characters)"))]
    pub last_name: String,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 191, message = "must be at most 191 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = 40, message = "must be at most 40 characters"))]
    pub phone: Option<String>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Finance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFinanceEntry {
    pub entry_date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: FinanceEntryType,
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<EntityRef>,
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    #[validate(length(min = 1, max = 100, message = "is required (max 100 characters)"))]
    pub title: String,
    pub description: Option<String>,
    pub appointment_date: DateTime<Utc>,
    #[validate(range(min = 1, max = MAX_APPOINTMENT_MINUTES, message = "must be between 1 and 1440 minutes"))]
    pub duration: u32,
    pub status: AppointmentStatus,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<EntityRef>,
    pub participants: Vec<EntityRef>,
}

impl NewAppointment {
    /// A planned appointment with no type and no participants.
    pub fn planned(title: &str, date: DateTime<Utc>, duration: u32) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            appointment_date: date,
            duration,
            status: AppointmentStatus::Planned,
            appointment_type: None,
            participants: Vec::new(),
        }
    }
}

/// Body of `PUT /appointments/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct AppointmentStatusChange {
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn guest() -> GuestReservationRequest {
        GuestReservationRequest {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: Some("+44 20 0000".into()),
            reservation_date: Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap(),
            notes: None,
            offered_service_id: Some(1),
            business_id: None,
        }
    }

    #[test]
    fn guest_request_valid() {
        assert!(guest().validate().is_ok());
    }

    #[test]
    fn guest_request_rejects_long_name_and_bad_email() {
        let mut g = guest();
        g.first_name = Some("x".repeat(81));
        g.email = Some("not-an-email".into());
        let errors = g.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("last_name"));
    }

    #[test]
    fn finance_entry_rejects_negative_amount() {
        let entry = NewFinanceEntry {
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            entry_type: FinanceEntryType::Expense,
            amount: Decimal::new(-1, 0),
            description: Some("x".repeat(501)),
            document: None,
        };
        let errors = entry.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("amount"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn new_customer_requires_names() {
        let c = NewCustomer {
            first_name: String::new(),
            last_name: "Doe".into(),
            email: None,
            phone: None,
            notes: None,
        };
        assert!(c.validate().unwrap_err().field_errors().contains_key("first_name"));
    }

    #[test]
    fn new_reservation_serializes_refs() {
        let mut r = NewReservation::pending(Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap());
        r.customer = Some(EntityRef::from(4));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["customer"]["id"], 4);
        assert!(json.get("service").is_none());
    }

    #[test]
    fn new_appointment_checks_title_and_duration() {
        let date = Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();
        assert!(NewAppointment::planned("Sync", date, 30).validate().is_ok());

        let bad = NewAppointment::planned("", date, 0);
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("duration"));
        assert!(NewAppointment::planned("Long", date, 1441).validate().is_err());
    }

    #[test]
    fn new_appointment_wire_shape() {
        let date = Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();
        let mut a = NewAppointment::planned("Sync", date, 30);
        a.appointment_type = Some(EntityRef::from(2));
        a.participants.push(EntityRef::from(5));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["status"], "PLANNED");
        assert_eq!(json["type"]["id"], 2);
        assert_eq!(json["participants"][0]["id"], 5);
        assert!(json.get("appointmentDate").is_some());
    }

    #[test]
    fn with_id_flattens_body() {
        let r = NewReservation::pending(Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap());
        let json = serde_json::to_value(WithId { id: 12, body: &r }).unwrap();
        assert_eq!(json["id"], 12);
        assert_eq!(json["status"], "PENDING");
    }
}
