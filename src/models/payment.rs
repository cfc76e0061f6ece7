use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{optional_text, Business, BusinessDto, CustomerDto, PaymentMethod, PaymentStatus};

// ---------------------------------------------------------------------------
// PaymentDto (wire shape)
// ---------------------------------------------------------------------------

/// Reservation reference as embedded in a payment (id only is relevant).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRefDto {
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: Option<i64>,
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub status: Option<String>,
    pub transaction_id: Option<String>,
    pub reservation: Option<ReservationRefDto>,
    pub customer: Option<CustomerDto>,
    pub business: Option<BusinessDto>,
}

impl PaymentDto {
    pub fn normalize(self) -> Payment {
        Payment {
            id: self.id.unwrap_or_default(),
            // Amounts are non-negative; anything else counts as zero.
            amount: self
                .amount
                .filter(|a| !a.is_sign_negative())
                .unwrap_or(Decimal::ZERO),
            method: self.method.as_deref().and_then(PaymentMethod::parse),
            status: self.status.as_deref().and_then(PaymentStatus::parse),
            transaction_id: optional_text(self.transaction_id),
            reservation_id: self.reservation.and_then(|r| r.id),
            customer_id: self.customer.and_then(|c| c.id),
            business: self.business.map(BusinessDto::normalize),
        }
    }
}

// ---------------------------------------------------------------------------
// Payment (normalized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub amount: Decimal,
    pub method: Option<PaymentMethod>,
    pub status: Option<PaymentStatus>,
    pub transaction_id: Option<String>,
    pub reservation_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub business: Option<Business>,
}

impl Payment {
    pub fn method_label(&self) -> &'static str {
        self.method.map(|m| m.label()).unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_reads_references() {
        let dto: PaymentDto = serde_json::from_value(serde_json::json!({
            "id": 4,
            "amount": "120.50",
            "method": "CASH",
            "status": "PAID",
            "reservation": { "id": 8 },
            "customer": { "id": 3 }
        }))
        .unwrap();
        let p = dto.normalize();
        assert_eq!(p.amount, Decimal::new(12050, 2));
        assert_eq!(p.method, Some(PaymentMethod::Cash));
        assert_eq!(p.status, Some(PaymentStatus::Paid));
        assert_eq!(p.reservation_id, Some(8));
        assert_eq!(p.customer_id, Some(3));
        assert_eq!(p.method_label(), "Cash");
    }

    #[test]
    fn normalize_defaults_missing_and_negative_amounts() {
        let p = PaymentDto::default().normalize();
        assert_eq!(p.amount, Decimal::ZERO);
        assert_eq!(p.method_label(), "Unknown");

        let negative = PaymentDto {
            amount: Some(Decimal::new(-500, 2)),
            ..Default::default()
        }
        .normalize();
        assert_eq!(negative.amount, Decimal::ZERO);
    }
}
