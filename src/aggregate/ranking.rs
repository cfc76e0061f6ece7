//! Top-N rankings by distinct customers per group.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{Payment, Reservation};

pub const UNKNOWN_SERVICE: &str = "Unknown service";

/// One ranked group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedGroup {
    pub key: String,
    /// Distinct customer ids seen in this group.
    pub customers: usize,
    /// All items in this group, with or without a customer.
    pub items: usize,
}

/// Group `items` by `key`, count distinct customers per group, and keep the
/// `n` largest groups.
///
/// Sorting is stable, so groups with equal counts keep the order in which
/// their key first appeared. Items without a customer still count toward
/// `items` but not toward `customers`.
pub fn top_n_by_distinct_customers<T, K, C>(items: &[T], key: K, customer: C, n: usize) -> Vec<RankedGroup>
where
    K: Fn(&T) -> String,
    C: Fn(&T) -> Option<i64>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, HashSet<i64>, usize)> = Vec::new();

    for item in items {
        let k = key(item);
        let slot = match index.get(&k) {
            Some(&slot) => slot,
            None => {
                groups.push((k.clone(), HashSet::new(), 0));
                index.insert(k, groups.len() - 1);
                groups.len() - 1
            }
        };
        let group = &mut groups[slot];
        group.2 += 1;
        if let Some(id) = customer(item) {
            group.1.insert(id);
        }
    }

    let mut ranked: Vec<RankedGroup> = groups
        .into_iter()
        .map(|(key, customers, items)| RankedGroup {
            key,
            customers: customers.len(),
            items,
        })
        .collect();
    ranked.sort_by(|a, b| b.customers.cmp(&a.customers));
    ranked.truncate(n);
    ranked
}

/// Services ranked by how many distinct customers booked them.
pub fn top_services(reservations: &[Reservation], n: usize) -> Vec<RankedGroup> {
    top_n_by_distinct_customers(
        reservations,
        |r| r.service_name().unwrap_or(UNKNOWN_SERVICE).to_string(),
        |r| r.customer_id,
        n,
    )
}

/// Payment methods ranked by how many distinct customers used them.
pub fn top_payment_methods(payments: &[Payment], n: usize) -> Vec<RankedGroup> {
    top_n_by_distinct_customers(payments, |p| p.method_label().to_string(), |p| p.customer_id, n)
}
