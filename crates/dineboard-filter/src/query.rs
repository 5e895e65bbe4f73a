//! Order list queries: filtering and sorting for list views
//!
//! Every criterion is optional; an empty query returns the input unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use dineboard_core::{Order, OrderStatus, Zone};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort key for order lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Placement instant; orders without one go last
    #[default]
    OrderPlaced,
    Total,
    ItemCount,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Filter and sort criteria for an order list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub table: Option<String>,
    pub search: Option<String>,
    /// Inclusive lower bound on the effective date
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the effective date
    pub to: Option<NaiveDate>,
    pub min_total: Option<f64>,
    pub max_total: Option<f64>,
    pub sort_by: Option<SortKey>,
    pub direction: SortDirection,
    pub limit: Option<usize>,
}

impl OrderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn min_total(mut self, min: f64) -> Self {
        self.min_total = Some(min);
        self
    }

    pub fn max_total(mut self, max: f64) -> Self {
        self.max_total = Some(max);
        self
    }

    pub fn sort_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_by = Some(key);
        self.direction = direction;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Does a single order pass every filter criterion?
    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|s| s != order.status) {
            return false;
        }

        match self.table.as_deref().map(str::trim) {
            Some(table) if !table.is_empty() && order.table_number.as_deref() != Some(table) => return false,
            _ => {}
        }

        if self.from.is_some() || self.to.is_some() {
            let Some(date) = order.effective_date() else {
                return false;
            };
            if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
                return false;
            }
        }

        if self.min_total.is_some_and(|min| order.total < min)
            || self.max_total.is_some_and(|max| order.total > max)
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => matches_search(order, &needle.to_lowercase()),
            _ => true,
        }
    }

    /// Apply filters, sort and limit. Sorting is stable.
    pub fn apply<'a>(&self, orders: &'a [Order], zone: &Zone) -> Vec<&'a Order> {
        let mut selected: Vec<&Order> = orders.iter().filter(|o| self.matches(o)).collect();

        if let Some(key) = self.sort_by {
            match key {
                SortKey::OrderPlaced => {
                    let mut keyed: Vec<(Option<DateTime<Utc>>, &Order)> = selected
                        .into_iter()
                        .map(|o| (o.placed_moment().and_then(|m| zone.resolve(m)), o))
                        .collect();
                    keyed.sort_by(|(a, _), (b, _)| {
                        nones_last(a.as_ref(), b.as_ref(), self.direction, |x: &DateTime<Utc>, y| x.cmp(y))
                    });
                    selected = keyed.into_iter().map(|(_, o)| o).collect();
                }
                SortKey::Total => selected.sort_by(|a, b| directed(a.total.total_cmp(&b.total), self.direction)),
                SortKey::ItemCount => {
                    selected.sort_by(|a, b| directed(a.item_count().cmp(&b.item_count()), self.direction))
                }
                SortKey::Table => selected.sort_by(|a, b| {
                    nones_last(a.table_number.as_deref(), b.table_number.as_deref(), self.direction, compare_tables)
                }),
            }
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

fn matches_search(order: &Order, needle: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(needle);

    hit(order.id.as_str())
        || order.table_number.as_deref().is_some_and(hit)
        || order.items.iter().any(|item| {
            item.menu_name.as_deref().is_some_and(hit) || item.menu_category.as_deref().is_some_and(hit)
        })
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Missing values sort last in either direction.
fn nones_last<T: ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    direction: SortDirection,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(cmp(a, b), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Numeric table labels compare numerically, everything else as text.
fn compare_tables(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
