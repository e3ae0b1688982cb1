//! Ordering-parameter resolution.
//!
//! [`resolve_order`] is a pure function so the fallback chain can be tested
//! without a query target: either the request parameter yields at least one
//! usable `(key, direction)` pair, or the static default order is used
//! verbatim. The two sources are never merged field-by-field.

use sea_orm::sea_query::Order;

/// A client-facing sort key and what it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orderable {
    pub key: String,
    pub target: OrderTarget,
}

/// Where a sort key lands: a literal column, or a registered order handler
/// for computed/aggregated sorts. Handler targets are keyed by the sort key
/// they were registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderTarget {
    Column(String),
    Handler(String),
}

/// Resolve the effective ordering.
///
/// `raw` is the sort parameter value, a comma-separated list of `field` or
/// `field:direction` segments. Segments naming unknown fields are dropped;
/// the direction must be exactly `asc` or `desc` (anything else reads as
/// `asc`). When the parameter is absent, empty, or every segment was
/// dropped, `default_order` applies unchanged.
#[must_use]
pub fn resolve_order(
    raw: Option<&str>,
    orderables: &[Orderable],
    default_order: &[(String, Order)],
) -> Vec<(String, Order)> {
    let mut resolved = Vec::new();
    if let Some(raw) = raw.filter(|value| !value.is_empty()) {
        for segment in raw.split(',') {
            let segment = segment.trim();
            let (field, direction) = match segment.split_once(':') {
                Some((field, direction)) => (field, parse_direction(direction)),
                None => (segment, Order::Asc),
            };
            if field.is_empty() || !orderables.iter().any(|orderable| orderable.key == field) {
                tracing::debug!(segment, "dropping unsortable order segment");
                continue;
            }
            resolved.push((field.to_owned(), direction));
        }
    }
    if resolved.is_empty() {
        resolved.extend(default_order.iter().cloned());
    }
    resolved
}

fn parse_direction(raw: &str) -> Order {
    if raw == "desc" { Order::Desc } else { Order::Asc }
}
