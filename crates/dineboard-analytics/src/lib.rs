//! Dineboard Analytics: order aggregation and dashboard reports
//!
//! Turns an order snapshot into the numbers a restaurant dashboard shows:
//! revenue, average ticket, kitchen response and wait times, category and
//! dish breakdowns, the busiest hour and how many tables were served.
//!
//! # Architecture
//!
//! ```text
//! raw documents → normalize → TimeWindowFilter → OrderAnalyticsAggregator → AnalyticsResult
//!                                   │                                          │
//!                                   ├──► KitchenSummary                        │
//!                                   ├──► hourly_distribution / daily_trend     │
//!                                   └──────────────────────────────────────────┴──► DashboardReport
//! ```
//!
//! # Example
//!
//! ```
//! use dineboard_analytics::aggregate;
//! use dineboard_core::normalize_orders;
//! use serde_json::json;
//!
//! let orders = normalize_orders(&[
//!     json!({
//!         "status": "completed",
//!         "items": [{ "menuName": "Pizza", "menuCategory": "Main", "quantity": 2, "finalPrice": 100 }],
//!         "pricing": { "total": 200 },
//!         "tableNumber": 3
//!     }),
//!     json!({ "status": "preparing", "pricing": { "total": 80 } }),
//! ]);
//!
//! let result = aggregate(&orders, &[]);
//! assert_eq!(result.total_orders, 1);
//! assert_eq!(result.total_revenue, 200.0);
//! assert_eq!(result.category_wise_orders["Main"], 2);
//! assert_eq!(result.unique_customers, 1);
//! ```

pub mod aggregate;
pub mod cache;
pub mod dashboard;
pub mod kitchen;
pub mod profile;
pub mod result;
pub mod series;

pub use aggregate::{aggregate, OrderAnalyticsAggregator};
pub use cache::AnalyticsCache;
pub use dashboard::{Dashboard, DashboardReport};
pub use kitchen::KitchenSummary;
pub use profile::AnalyticsProfile;
pub use result::{AnalyticsResult, TopDish, NO_PEAK_HOUR};
pub use series::{daily_trend, hourly_distribution, peak_hour, DailyPoint};
