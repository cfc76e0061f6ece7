use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    optional_text, parse_timestamp, Business, BusinessDto, Customer, CustomerDto, OfferedService,
    OfferedServiceDto, ReservationStatus,
};

// ---------------------------------------------------------------------------
// ReservationDto (wire shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: Option<i64>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub service: Option<OfferedServiceDto>,
    pub customer: Option<CustomerDto>,
    pub business: Option<BusinessDto>,
    pub user_id: Option<i64>,
    pub user_login: Option<String>,
}

impl ReservationDto {
    pub fn normalize(self) -> Reservation {
        let customer = self.customer.map(CustomerDto::normalize);
        Reservation {
            id: self.id.unwrap_or_default(),
            date: parse_timestamp(self.date.as_deref()),
            status: self.status.as_deref().and_then(ReservationStatus::parse),
            notes: optional_text(self.notes),
            customer_id: customer.as_ref().map(|c| c.id).filter(|id| *id != 0),
            customer,
            service: self.service.map(OfferedServiceDto::normalize),
            business: self.business.map(BusinessDto::normalize),
            owner_login: optional_text(self.user_login),
        }
    }
}

// ---------------------------------------------------------------------------
// Reservation (normalized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    /// `None` when the backend sent no (or an unparseable) date.
    pub date: Option<DateTime<Utc>>,
    /// `None` when the backend sent no (or an unknown) status.
    pub status: Option<ReservationStatus>,
    pub notes: Option<String>,
    /// Foreign key used for joins against a customer collection.
    pub customer_id: Option<i64>,
    /// Customer as embedded by the backend, if any.
    pub customer: Option<Customer>,
    pub service: Option<OfferedService>,
    pub business: Option<Business>,
    pub owner_login: Option<String>,
}

impl Reservation {
    pub fn service_name(&self) -> Option<&str> {
        self.service
            .as_ref()
            .map(|s| s.name.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn business_id(&self) -> Option<i64> {
        self.business.as_ref().map(|b| b.id).filter(|id| *id != 0)
    }

    /// Strictly after `now`; undated reservations are never upcoming.
    pub fn is_after(&self, now: &DateTime<Utc>) -> bool {
        self.date.map(|d| d > *now).unwrap_or(false)
    }
}
