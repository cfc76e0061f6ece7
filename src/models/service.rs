use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{optional_text, text, Business, BusinessDto};

// ---------------------------------------------------------------------------
// OfferedServiceDto (wire shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferedServiceDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Minutes.
    pub duration: Option<i64>,
    pub price: Option<Decimal>,
    pub business: Option<BusinessDto>,
}

impl OfferedServiceDto {
    pub fn normalize(self) -> OfferedService {
        OfferedService {
            id: self.id.unwrap_or_default(),
            name: text(self.name),
            description: optional_text(self.description),
            duration_minutes: self.duration.filter(|d| *d >= 0),
            price: self.price.filter(|p| !p.is_sign_negative()),
            business: self.business.map(BusinessDto::normalize),
        }
    }
}

// ---------------------------------------------------------------------------
// OfferedService (normalized)
// ---------------------------------------------------------------------------

/// A bookable service (haircut, room night, class slot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferedService {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i64>,
    pub price: Option<Decimal>,
    pub business: Option<Business>,
}
