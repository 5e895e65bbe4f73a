//! Analytics output types
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Peak hour label when no completed order carries a usable timestamp
pub const NO_PEAK_HOUR: &str = "N/A";

/// One entry of the top-selling dishes ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDish {
    pub dish: String,
    pub count: u64,
    pub category: String,
    pub revenue: f64,
}

/// Summary statistics over a set of orders. Built fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub avg_order_value: f64,
    /// Minutes from placement to kitchen start
    pub avg_response_time: f64,
    /// Minutes from kitchen start to ready
    pub avg_wait_time: f64,
    /// `"H:00"` or `"N/A"`
    pub peak_hour: String,
    pub unique_customers: usize,
    pub category_wise_orders: BTreeMap<String, u64>,
    pub revenue_by_category: BTreeMap<String, f64>,
    pub menu_wise_orders: BTreeMap<String, u64>,
    pub top_selling_dishes: Vec<TopDish>,
}

impl AnalyticsResult {
    /// Zeroed result that still reports how many orders were seen.
    pub fn empty(total_orders: usize) -> Self {
        Self {
            total_orders,
            total_revenue: 0.0,
            avg_order_value: 0.0,
            avg_response_time: 0.0,
            avg_wait_time: 0.0,
            peak_hour: NO_PEAK_HOUR.to_string(),
            unique_customers: 0,
            category_wise_orders: BTreeMap::new(),
            revenue_by_category: BTreeMap::new(),
            menu_wise_orders: BTreeMap::new(),
            top_selling_dishes: Vec::new(),
        }
    }

    /// Sum of the per-category revenue breakdown
    pub fn category_revenue_sum(&self) -> f64 {
        self.revenue_by_category.values().sum()
    }
}

impl Default for AnalyticsResult {
    fn default() -> Self {
        Self::empty(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_with_dashboard_field_names() {
        let value = serde_json::to_value(AnalyticsResult::empty(3)).unwrap();
        assert_eq!(value["totalOrders"], json!(3));
        assert_eq!(value["peakHour"], json!("N/A"));
        assert_eq!(value["categoryWiseOrders"], json!({}));
        assert_eq!(value["topSellingDishes"], json!([]));
    }
}
