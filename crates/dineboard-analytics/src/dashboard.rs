//! Dashboard: window filter → aggregation → chart series, on demand
//!
//! The upstream order collection is live; callers rebuild the report on every
//! change. Identical filtered snapshots are served from the content-keyed
//! cache.

use crate::aggregate::OrderAnalyticsAggregator;
use crate::cache::AnalyticsCache;
use crate::kitchen::KitchenSummary;
use crate::profile::AnalyticsProfile;
use crate::result::AnalyticsResult;
use crate::series::{daily_trend, hourly_distribution, DailyPoint};
use dineboard_core::{
    normalize_catalog, normalize_collection, Clock, DineboardError, MenuCatalogEntry, Order, SystemClock,
};
use dineboard_filter::{Period, TimeWindowFilter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Everything a dashboard screen shows for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub period: Period,
    pub reference_date: String,
    pub analytics: AnalyticsResult,
    pub kitchen: KitchenSummary,
    /// Completed orders per local hour
    pub hourly: [u32; 24],
    pub trend: Vec<DailyPoint>,
}

pub struct Dashboard {
    profile: AnalyticsProfile,
    window: TimeWindowFilter,
    aggregator: OrderAnalyticsAggregator,
    cache: Mutex<AnalyticsCache>,
}

impl Dashboard {
    pub fn new(profile: AnalyticsProfile, clock: Arc<dyn Clock>) -> Result<Self, DineboardError> {
        let zone = profile.zone()?;
        Ok(Self {
            window: TimeWindowFilter::new(zone, clock),
            aggregator: OrderAnalyticsAggregator::new(profile.clone(), zone),
            cache: Mutex::new(AnalyticsCache::new(profile.cache_capacity)),
            profile,
        })
    }

    /// Wall clock
    pub fn system(profile: AnalyticsProfile) -> Result<Self, DineboardError> {
        Self::new(profile, Arc::new(SystemClock))
    }

    pub fn profile(&self) -> &AnalyticsProfile {
        &self.profile
    }

    /// Filter to the period, then aggregate (memoized).
    pub fn analytics(
        &self,
        orders: &[Order],
        catalog: &[MenuCatalogEntry],
        period: Period,
        reference_date: &str,
    ) -> AnalyticsResult {
        let selected = self.window.filter_by_period(orders, period, reference_date);
        self.aggregate_cached(&selected, catalog)
    }

    /// Full report for one period.
    pub fn build(
        &self,
        orders: &[Order],
        catalog: &[MenuCatalogEntry],
        period: Period,
        reference_date: &str,
    ) -> DashboardReport {
        let selected = self.window.filter_by_period(orders, period, reference_date);
        let zone = self.window.zone();

        let report = DashboardReport {
            period,
            reference_date: reference_date.to_string(),
            analytics: self.aggregate_cached(&selected, catalog),
            kitchen: KitchenSummary::from_orders(selected.iter().copied()),
            hourly: hourly_distribution(selected.iter().copied(), zone),
            trend: daily_trend(selected.iter().copied()),
        };

        debug!(
            period = %period,
            orders = orders.len(),
            selected = selected.len(),
            completed = report.kitchen.completed,
            "built dashboard report"
        );
        report
    }

    /// Build from raw documents: an orders snapshot (array or id-keyed
    /// object), raw menu documents and a period literal.
    pub fn build_raw(
        &self,
        orders: &Value,
        menu: &[Value],
        period: &str,
        reference_date: &str,
    ) -> Result<DashboardReport, DineboardError> {
        let period: Period = period.parse()?;
        let orders = normalize_collection(orders)?;
        let catalog = normalize_catalog(menu);
        Ok(self.build(&orders, &catalog, period, reference_date))
    }

    fn aggregate_cached(&self, selected: &[&Order], catalog: &[MenuCatalogEntry]) -> AnalyticsResult {
        if self.profile.cache_capacity == 0 {
            return self.aggregator.aggregate(selected.iter().copied(), catalog);
        }

        let key = AnalyticsCache::key(selected, catalog, &(&self.profile, format!("{:?}", self.window.zone())));
        if let (Some(key), Ok(mut cache)) = (key.as_deref(), self.cache.lock()) {
            if let Some(hit) = cache.get(key) {
                return hit;
            }
        }

        let result = self.aggregator.aggregate(selected.iter().copied(), catalog);
        if let (Some(key), Ok(mut cache)) = (key, self.cache.lock()) {
            cache.insert(key, result.clone());
        }
        result
    }

    /// (hits, misses) of the analytics cache
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache
            .lock()
            .map(|cache| (cache.hits(), cache.misses()))
            .unwrap_or((0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dineboard_core::{FixedClock, LineItem, OrderStatus, Timestamp};

    fn dashboard(profile: AnalyticsProfile) -> Dashboard {
        let now = Utc.with_ymd_and_hms(2024, 8, 14, 12, 0, 0).unwrap();
        Dashboard::new(
            AnalyticsProfile {
                utc_offset_minutes: Some(0),
                ..profile
            },
            Arc::new(FixedClock(now)),
        )
        .unwrap()
    }

    fn order(id: &str, status: OrderStatus, placed: &str, total: f64) -> Order {
        let mut o = Order::new(id);
        o.status = status;
        o.total = total;
        o.items.push(LineItem::new("Pizza", 1, total).with_category("Main"));
        o.timestamps.order_placed = Some(Timestamp::from_text(placed));
        o
    }

    fn sample() -> Vec<Order> {
        vec![
            order("1", OrderStatus::Completed, "2024-08-14T09:00:00Z", 10.0),
            order("2", OrderStatus::Completed, "2024-08-12T19:00:00Z", 20.0),
            order("3", OrderStatus::Preparing, "2024-08-14T09:30:00Z", 5.0),
            order("4", OrderStatus::Completed, "2024-07-01T12:00:00Z", 40.0),
        ]
    }

    #[test]
    fn test_daily_report() {
        let report = dashboard(AnalyticsProfile::standard()).build(&sample(), &[], Period::Daily, "2024-08-14");
        assert_eq!(report.analytics.total_orders, 1);
        assert_eq!(report.kitchen.preparing, 1);
        assert_eq!(report.kitchen.completed, 1);
        assert_eq!(report.hourly[9], 1);
        assert_eq!(report.trend.len(), 1);
    }

    #[test]
    fn test_weekly_and_total_reports() {
        let board = dashboard(AnalyticsProfile::standard());
        let orders = sample();
        let weekly = board.build(&orders, &[], Period::Weekly, "1999-01-01");
        assert_eq!(weekly.analytics.total_orders, 2);
        assert_eq!(weekly.analytics.total_revenue, 30.0);

        let total = board.build(&orders, &[], Period::Total, "");
        assert_eq!(total.analytics.total_orders, 3);
        assert!(total.analytics.total_orders >= weekly.analytics.total_orders);
        assert_eq!(total.trend.len(), 3);
    }

    fn cached() -> AnalyticsProfile {
        AnalyticsProfile {
            cache_capacity: 8,
            ..AnalyticsProfile::standard()
        }
    }

    #[test]
    fn test_cache_serves_identical_snapshots() {
        let board = dashboard(cached());
        let orders = sample();
        let first = board.analytics(&orders, &[], Period::Total, "");
        let second = board.analytics(&orders.clone(), &[], Period::Total, "");
        assert_eq!(first, second);
        assert_eq!(board.cache_stats(), (1, 1));
    }

    #[test]
    fn test_cached_and_uncached_results_agree() {
        let orders = sample();
        let catalog = vec![MenuCatalogEntry::new("Pizza", Some(10.0)).with_category("Main")];
        let plain = dashboard(AnalyticsProfile::standard());
        let memo = dashboard(cached());

        for period in Period::ALL {
            let expected = plain.analytics(&orders, &catalog, period, "2024-08-14");
            assert_eq!(memo.analytics(&orders, &catalog, period, "2024-08-14"), expected);
            assert_eq!(memo.analytics(&orders, &catalog, period, "2024-08-14"), expected);
        }
        assert_eq!(plain.cache_stats(), (0, 0));
    }

    #[test]
    fn test_changed_snapshot_misses() {
        let board = dashboard(cached());
        let mut orders = sample();
        board.analytics(&orders, &[], Period::Total, "");
        orders[0].items[0].quantity = 3;
        let changed = board.analytics(&orders, &[], Period::Total, "");
        assert_eq!(changed.menu_wise_orders["Pizza"], 5);
        assert_eq!(board.cache_stats(), (0, 2));
    }

    #[test]
    fn test_cache_disabled() {
        let board = dashboard(AnalyticsProfile {
            cache_capacity: 0,
            ..AnalyticsProfile::standard()
        });
        let orders = sample();
        board.analytics(&orders, &[], Period::Total, "");
        board.analytics(&orders, &[], Period::Total, "");
        assert_eq!(board.cache_stats(), (0, 0));
    }

    #[test]
    fn test_build_raw_rejects_unknown_period() {
        let board = dashboard(AnalyticsProfile::standard());
        let err = board
            .build_raw(&serde_json::json!([]), &[], "yearly", "2024-08-14")
            .unwrap_err();
        assert_eq!(err, DineboardError::InvalidPeriod("yearly".to_string()));
    }
}
