//! Revenue totals over payments.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Payment, PaymentMethod, PaymentStatus};

/// Amount sums per payment status plus the average paid transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub paid_total: Decimal,
    pub pending_total: Decimal,
    pub failed_total: Decimal,
    pub refunded_total: Decimal,
    /// Sum over payments with no recognized status.
    pub unrecognized_total: Decimal,
    pub paid_count: usize,
    pub payment_count: usize,
    /// `paid_total / paid_count`, two decimal places; zero with no paid payments.
    pub average_payment: Decimal,
}

impl RevenueSummary {
    /// Paid minus refunded.
    pub fn net_revenue(&self) -> Decimal {
        self.paid_total - self.refunded_total
    }
}

pub fn revenue_summary(payments: &[Payment]) -> RevenueSummary {
    let mut summary = RevenueSummary {
        payment_count: payments.len(),
        ..RevenueSummary::default()
    };
    for payment in payments {
        match payment.status {
            Some(PaymentStatus::Paid) => {
                summary.paid_total += payment.amount;
                summary.paid_count += 1;
            }
            Some(PaymentStatus::Pending) => summary.pending_total += payment.amount,
            Some(PaymentStatus::Failed) => summary.failed_total += payment.amount,
            Some(PaymentStatus::Refunded) => summary.refunded_total += payment.amount,
            None => summary.unrecognized_total += payment.amount,
        }
    }
    if summary.paid_count > 0 {
        summary.average_payment =
            (summary.paid_total / Decimal::from(summary.paid_count)).round_dp(2);
    }
    summary
}

/// Paid revenue collected through one payment method.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRevenue {
    /// `None` for payments without a recognized method.
    pub method: Option<PaymentMethod>,
    pub label: String,
    pub total: Decimal,
    pub count: usize,
}

/// Paid revenue per method, largest total first. Methods with no paid
/// payments are omitted; equal totals keep `PaymentMethod::ALL` order with
/// the unknown bucket last.
pub fn revenue_by_method(payments: &[Payment]) -> Vec<MethodRevenue> {
    let mut buckets: Vec<MethodRevenue> = PaymentMethod::ALL
        .iter()
        .map(|m| Some(*m))
        .chain(std::iter::once(None))
        .map(|method| MethodRevenue {
            method,
            label: method.map(|m| m.label()).unwrap_or("Unknown").to_string(),
            total: Decimal::ZERO,
            count: 0,
        })
        .collect();

    for payment in payments.iter().filter(|p| p.status == Some(PaymentStatus::Paid)) {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.method == payment.method) {
            bucket.total += payment.amount;
            bucket.count += 1;
        }
    }

    buckets.retain(|b| b.count > 0);
    buckets.sort_by(|a, b| b.total.cmp(&a.total));
    buckets
}
