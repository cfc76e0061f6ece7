use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{optional_text, parse_date, parse_timestamp, text, FinanceEntryType};

// ---------------------------------------------------------------------------
// FinanceDocument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceDocumentDto {
    pub id: Option<i64>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<i64>,
    pub uploaded_at: Option<String>,
}

impl FinanceDocumentDto {
    pub fn normalize(self) -> FinanceDocument {
        FinanceDocument {
            id: self.id.unwrap_or_default(),
            file_name: text(self.file_name),
            content_type: text(self.content_type),
            size: self.size.filter(|s| *s >= 0).unwrap_or_default(),
            uploaded_at: parse_timestamp(self.uploaded_at.as_deref()),
        }
    }
}

/// Metadata of a receipt or invoice attached to a finance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceDocument {
    pub id: i64,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub uploaded_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// FinanceEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceEntryDto {
    pub id: Option<i64>,
    pub entry_date: Option<String>,
    #[serde(rename = "type")]
    pub type_field: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub document: Option<FinanceDocumentDto>,
}

impl FinanceEntryDto {
    pub fn normalize(self) -> FinanceEntry {
        FinanceEntry {
            id: self.id.unwrap_or_default(),
            date: parse_date(self.entry_date.as_deref()),
            entry_type: self.type_field.as_deref().and_then(FinanceEntryType::parse),
            amount: self.amount.map(|a| a.abs()).unwrap_or(Decimal::ZERO),
            description: optional_text(self.description),
            document: self.document.map(FinanceDocumentDto::normalize),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceEntry {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub entry_type: Option<FinanceEntryType>,
    /// Magnitude; the sign comes from `entry_type`.
    pub amount: Decimal,
    pub description: Option<String>,
    pub document: Option<FinanceDocument>,
}

impl FinanceEntry {
    /// Amount signed by type: income positive, expense negative, untyped zero.
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            Some(FinanceEntryType::Income) => self.amount,
            Some(FinanceEntryType::Expense) => -self.amount,
            None => Decimal::ZERO,
        }
    }
}
