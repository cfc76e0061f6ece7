//! Income/expense totals and month buckets over finance entries.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{FinanceEntry, FinanceEntryType};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub income_total: Decimal,
    pub expense_total: Decimal,
    /// Income minus expense.
    pub net_balance: Decimal,
    pub entry_count: usize,
    /// Expense as a whole-number percentage of income; 0 when there is no income.
    pub expense_ratio: u32,
}

pub fn finance_summary(entries: &[FinanceEntry]) -> FinanceSummary {
    let mut summary = FinanceSummary {
        entry_count: entries.len(),
        ..FinanceSummary::default()
    };
    for entry in entries {
        match entry.entry_type {
            Some(FinanceEntryType::Income) => summary.income_total += entry.amount,
            Some(FinanceEntryType::Expense) => summary.expense_total += entry.amount,
            None => {}
        }
    }
    summary.net_balance = summary.income_total - summary.expense_total;
    summary.expense_ratio = ratio(summary.expense_total, summary.income_total);
    summary
}

fn ratio(part: Decimal, whole: Decimal) -> u32 {
    if whole <= Decimal::ZERO {
        return 0;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .or_else(|| {
            part.checked_div(whole)
                .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        })
        .and_then(|pct| pct.round().to_u32())
        .unwrap_or(0)
}

/// One calendar month of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFinance {
    /// `YYYY-MM`.
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Month buckets in chronological order. Undated entries are skipped.
pub fn finance_by_month(entries: &[FinanceEntry]) -> Vec<MonthlyFinance> {
    let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for entry in entries {
        let Some(date) = entry.date else { continue };
        let bucket = months
            .entry((date.year(), date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match entry.entry_type {
            Some(FinanceEntryType::Income) => bucket.0 += entry.amount,
            Some(FinanceEntryType::Expense) => bucket.1 += entry.amount,
            None => {}
        }
    }
    months
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyFinance {
            month: format!("{:04}-{:02}", year, month),
            income,
            expense,
            net: income - expense,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FinanceEntryDto;

    fn entry(date: &str, kind: &str, amount: i64) -> FinanceEntry {
        FinanceEntryDto {
            id: Some(1),
            entry_date: Some(date.to_string()),
            type_field: Some(kind.to_string()),
            amount: Some(Decimal::from(amount)),
            ..FinanceEntryDto::default()
        }
        .normalize()
    }

    #[test]
    fn summary_totals_and_ratio() {
        let entries = vec![
            entry("2024-01-05", "INCOME", 1000),
            entry("2024-01-20", "EXPENSE", 250),
            entry("2024-02-01", "INCOME", 200),
            entry("2024-02-03", "EXPENSE", 150),
        ];
        let s = finance_summary(&entries);
        assert_eq!(s.income_total, Decimal::from(1200));
        assert_eq!(s.expense_total, Decimal::from(400));
        assert_eq!(s.net_balance, Decimal::from(800));
        assert_eq!(s.entry_count, 4);
        assert_eq!(s.expense_ratio, 33);
    }

    #[test]
    fn ratio_is_zero_without_income() {
        let s = finance_summary(&[entry("2024-01-05", "EXPENSE", 90)]);
        assert_eq!(s.expense_ratio, 0);
        assert_eq!(s.net_balance, Decimal::from(-90));
    }

    #[test]
    fn ratio_survives_extreme_amounts() {
        assert_eq!(ratio(Decimal::MAX, Decimal::ONE), 0);
        assert_eq!(ratio(Decimal::MAX / Decimal::TWO, Decimal::MAX), 50);

        let mut huge = entry("2024-01-05", "EXPENSE", 0);
        huge.amount = Decimal::MAX;
        let s = finance_summary(&[entry("2024-01-01", "INCOME", 10), huge]);
        assert_eq!(s.expense_ratio, 0);
    }

    #[test]
    fn months_are_chronological() {
        let entries = vec![
            entry("2024-02-01", "INCOME", 200),
            entry("2023-12-31", "EXPENSE", 10),
            entry("2024-02-28", "EXPENSE", 50),
        ];
        let months = finance_by_month(&entries);
        let keys: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, ["2023-12", "2024-02"]);
        assert_eq!(months[1].net, Decimal::from(150));
    }
}
