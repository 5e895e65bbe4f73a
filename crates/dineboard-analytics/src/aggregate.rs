//! Order analytics aggregation
//!
//! Reduces a (time-filtered) order set into an [`AnalyticsResult`] in a
//! single pass over the completed orders. Only completed orders contribute;
//! when there are none the result is zeroed but still reports the input
//! count.

use crate::profile::AnalyticsProfile;
use crate::result::{AnalyticsResult, TopDish, NO_PEAK_HOUR};
use crate::series::{local_hour, peak_hour};
use dineboard_core::{MenuCatalogEntry, Order, Zone};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Running mean that reads as 0 when empty
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        ratio(self.sum, self.count)
    }
}

fn ratio(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Accumulator threaded through the fold over completed orders
#[derive(Debug, Default)]
struct Accumulator<'a> {
    orders: usize,
    revenue: f64,
    response: Mean,
    wait: Mean,
    category_orders: BTreeMap<String, u64>,
    category_revenue: BTreeMap<String, f64>,
    menu_orders: BTreeMap<String, u64>,
    hours: [u32; 24],
    tables: HashSet<&'a str>,
}

impl<'a> Accumulator<'a> {
    fn absorb(&mut self, order: &'a Order, profile: &AnalyticsProfile, zone: &Zone) {
        self.orders += 1;
        self.revenue += order.total;

        if let Some(minutes) = order.response_minutes(zone) {
            self.response.push(minutes);
        }
        if let Some(minutes) = order.wait_minutes(zone) {
            self.wait.push(minutes);
        }

        for item in &order.items {
            let category = item.category_or(&profile.fallback_category);
            let quantity = item.quantity as u64;
            *self.category_orders.entry(category.to_string()).or_insert(0) += quantity;
            *self.category_revenue.entry(category.to_string()).or_insert(0.0) += item.line_total();
            if let Some(name) = item.menu_name.as_deref() {
                *self.menu_orders.entry(name.to_string()).or_insert(0) += quantity;
            }
        }

        if let Some(hour) = local_hour(order, zone) {
            self.hours[hour] += 1;
        }

        if let Some(table) = order.table_number.as_deref().filter(|t| !t.is_empty()) {
            self.tables.insert(table);
        }
    }

    fn finish(self, catalog: &[MenuCatalogEntry], profile: &AnalyticsProfile) -> AnalyticsResult {
        let top_selling_dishes = rank_dishes(&self.menu_orders, catalog, profile);

        AnalyticsResult {
            total_orders: self.orders,
            total_revenue: self.revenue,
            avg_order_value: ratio(self.revenue, self.orders),
            avg_response_time: self.response.value(),
            avg_wait_time: self.wait.value(),
            peak_hour: peak_hour(&self.hours).unwrap_or_else(|| NO_PEAK_HOUR.to_string()),
            unique_customers: self.tables.len(),
            category_wise_orders: self.category_orders,
            revenue_by_category: self.category_revenue,
            menu_wise_orders: self.menu_orders,
            top_selling_dishes,
        }
    }
}

/// Rank dishes by quantity sold, enriched from the menu catalog. Ties keep
/// alphabetical order.
fn rank_dishes(
    menu_orders: &BTreeMap<String, u64>,
    catalog: &[MenuCatalogEntry],
    profile: &AnalyticsProfile,
) -> Vec<TopDish> {
    let mut by_name: HashMap<&str, &MenuCatalogEntry> = HashMap::new();
    for entry in catalog {
        by_name.entry(entry.menu_name.as_str()).or_insert(entry);
    }

    let mut dishes: Vec<TopDish> = menu_orders
        .iter()
        .map(|(dish, &count)| {
            let entry = by_name.get(dish.as_str());
            let category = match entry {
                Some(e) => e
                    .menu_category
                    .clone()
                    .unwrap_or_else(|| profile.catalog_fallback_category.clone()),
                None => profile.fallback_category.clone(),
            };
            let price = entry.and_then(|e| e.price).unwrap_or(0.0);
            TopDish {
                dish: dish.clone(),
                count,
                category,
                revenue: count as f64 * price,
            }
        })
        .collect();

    dishes.sort_by(|a, b| b.count.cmp(&a.count));
    dishes.truncate(profile.top_dishes_limit);
    dishes
}

/// Reduces order sets into analytics results
#[derive(Debug, Clone, Default)]
pub struct OrderAnalyticsAggregator {
    profile: AnalyticsProfile,
    zone: Zone,
}

impl OrderAnalyticsAggregator {
    pub fn new(profile: AnalyticsProfile, zone: Zone) -> Self {
        Self { profile, zone }
    }

    pub fn profile(&self) -> &AnalyticsProfile {
        &self.profile
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Aggregate the given orders. Never fails; missing fields have already
    /// been defaulted at normalization.
    pub fn aggregate<'a, I>(&self, orders: I, catalog: &[MenuCatalogEntry]) -> AnalyticsResult
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut seen = 0usize;
        let completed: Vec<&Order> = orders
            .into_iter()
            .inspect(|_| seen += 1)
            .filter(|o| o.is_completed())
            .collect();

        if completed.is_empty() {
            debug!(orders = seen, "no completed orders to aggregate");
            return AnalyticsResult::empty(seen);
        }

        let result = completed
            .into_iter()
            .fold(Accumulator::default(), |mut acc, order| {
                acc.absorb(order, &self.profile, &self.zone);
                acc
            })
            .finish(catalog, &self.profile);

        debug!(
            orders = seen,
            completed = result.total_orders,
            revenue = result.total_revenue,
            dishes = result.menu_wise_orders.len(),
            "aggregated orders"
        );
        result
    }
}

/// Aggregate with the standard profile in the host time zone.
pub fn aggregate<'a, I>(orders: I, catalog: &[MenuCatalogEntry]) -> AnalyticsResult
where
    I: IntoIterator<Item = &'a Order>,
{
    OrderAnalyticsAggregator::default().aggregate(orders, catalog)
}
