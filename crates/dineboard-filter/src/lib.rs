//! Dineboard Filter: reporting windows and list queries
//!
//! Two ways of narrowing an order snapshot:
//!
//! ```text
//! orders ──► TimeWindowFilter (daily / weekly / monthly / total) ──► analytics
//!        └─► OrderQuery (status, table, search, ranges, sort, limit) ──► list views
//! ```
//!
//! # Example
//!
//! ```
//! use dineboard_core::normalize_order;
//! use dineboard_filter::{filter_by_period, Period};
//! use serde_json::json;
//!
//! let orders = vec![
//!     normalize_order(&json!({ "timestamps": { "orderPlaced": "2024-08-11T23:59:59" } })),
//!     normalize_order(&json!({ "timestamps": { "orderPlaced": "2024-08-12T00:00:01" } })),
//! ];
//!
//! let daily = filter_by_period(&orders, Period::Daily, "2024-08-11");
//! assert_eq!(daily.len(), 1);
//! ```

pub mod period;
pub mod query;
pub mod window;

pub use period::Period;
pub use query::{OrderQuery, SortDirection, SortKey};
pub use window::{filter_by_period, DateRange, TimeWindowFilter};
