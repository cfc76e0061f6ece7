use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Normalize a wire discriminant: trim, uppercase, `-`/space to `_`.
fn wire_key(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Completed => "COMPLETED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Completed => "Completed",
        }
    }

    /// Statuses that still count toward upcoming work.
    pub fn is_active(&self) -> bool {
        match self {
            ReservationStatus::Pending | ReservationStatus::Confirmed => true,
            ReservationStatus::Cancelled | ReservationStatus::Completed => false,
        }
    }

    /// Lenient parse used by normalization; `None` for anything unknown.
    pub fn parse(s: &str) -> Option<Self> {
        match wire_key(s).as_str() {
            "PENDING" => Some(ReservationStatus::Pending),
            "CONFIRMED" => Some(ReservationStatus::Confirmed),
            "CANCELLED" | "CANCELED" => Some(ReservationStatus::Cancelled),
            "COMPLETED" => Some(ReservationStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| BookingError::InvalidArgument(format!("unknown reservation status: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match wire_key(s).as_str() {
            "PENDING" => Some(PaymentStatus::Pending),
            "PAID" => Some(PaymentStatus::Paid),
            "FAILED" => Some(PaymentStatus::Failed),
            "REFUNDED" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| BookingError::InvalidArgument(format!("unknown payment status: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// PaymentMethod
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Cash,
    ApplePay,
    GooglePay,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Cash,
        PaymentMethod::ApplePay,
        PaymentMethod::GooglePay,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::ApplePay => "APPLE_PAY",
            PaymentMethod::GooglePay => "GOOGLE_PAY",
            PaymentMethod::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::DebitCard => "Debit card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::ApplePay => "Apple Pay",
            PaymentMethod::GooglePay => "Google Pay",
            PaymentMethod::Other => "Other",
        }
    }

    /// Mobile-wallet variants.
    pub fn is_wallet(&self) -> bool {
        match self {
            PaymentMethod::ApplePay | PaymentMethod::GooglePay => true,
            PaymentMethod::CreditCard
            | PaymentMethod::DebitCard
            | PaymentMethod::Cash
            | PaymentMethod::Other => false,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match wire_key(s).as_str() {
            "CREDIT_CARD" => Some(PaymentMethod::CreditCard),
            "DEBIT_CARD" => Some(PaymentMethod::DebitCard),
            "CASH" => Some(PaymentMethod::Cash),
            "APPLE_PAY" => Some(PaymentMethod::ApplePay),
            "GOOGLE_PAY" => Some(PaymentMethod::GooglePay),
            "OTHER" => Some(PaymentMethod::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AppointmentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Planned,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Planned,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Planned => "PLANNED",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Planned => "Planned",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Completed => "Completed",
        }
    }

    /// Calendar colour the admin UI uses for this status.
    pub fn color(&self) -> &'static str {
        match self {
            AppointmentStatus::Planned => "blue",
            AppointmentStatus::Confirmed => "green",
            AppointmentStatus::Cancelled => "red",
            AppointmentStatus::Completed => "purple",
        }
    }

    /// Still on the calendar as something to attend.
    pub fn is_open(&self) -> bool {
        match self {
            AppointmentStatus::Planned | AppointmentStatus::Confirmed => true,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed => false,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match wire_key(s).as_str() {
            "PLANNED" => Some(AppointmentStatus::Planned),
            "CONFIRMED" => Some(AppointmentStatus::Confirmed),
            "CANCELLED" | "CANCELED" => Some(AppointmentStatus::Cancelled),
            "COMPLETED" => Some(AppointmentStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| BookingError::InvalidArgument(format!("unknown appointment status: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// FinanceEntryType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinanceEntryType {
    Income,
    Expense,
}

impl FinanceEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinanceEntryType::Income => "INCOME",
            FinanceEntryType::Expense => "EXPENSE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match wire_key(s).as_str() {
            "INCOME" => Some(FinanceEntryType::Income),
            "EXPENSE" => Some(FinanceEntryType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for FinanceEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BusinessType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessType {
    Restaurant,
    Cafe,
    Gym,
    Doctor,
    Hairdresser,
    Event,
    Other,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Restaurant => "RESTAURANT",
            BusinessType::Cafe => "CAFE",
            BusinessType::Gym => "GYM",
            BusinessType::Doctor => "DOCTOR",
            BusinessType::Hairdresser => "HAIRDRESSER",
            BusinessType::Event => "EVENT",
            BusinessType::Other => "OTHER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match wire_key(s).as_str() {
            "RESTAURANT" => Some(BusinessType::Restaurant),
            "CAFE" => Some(BusinessType::Cafe),
            "GYM" => Some(BusinessType::Gym),
            "DOCTOR" => Some(BusinessType::Doctor),
            "HAIRDRESSER" => Some(BusinessType::Hairdresser),
            "EVENT" => Some(BusinessType::Event),
            "OTHER" => Some(BusinessType::Other),
            _ => None,
        }
    }
}
