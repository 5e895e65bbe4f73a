//! Dineboard Core: order model, normalization and time handling
//!
//! Order documents come from a schemaless realtime store. Every field may be
//! missing or carry the wrong JSON type, so this crate maps each raw document
//! into a strict [`Order`] exactly once, at the boundary. Everything
//! downstream (window filtering, analytics, list queries) works on the strict
//! model and never has to re-check optional fields.
//!
//! # Example
//!
//! ```
//! use dineboard_core::{normalize_order, OrderStatus};
//! use serde_json::json;
//!
//! let order = normalize_order(&json!({
//!     "id": "A-1",
//!     "kitchen": { "status": "completed" },
//!     "items": [{ "menuName": "Pizza", "quantity": 2, "finalPrice": 100 }],
//!     "pricing": { "total": 200 },
//!     "timestamps": { "orderPlaced": "2024-08-11T12:00:00Z" }
//! }));
//!
//! assert_eq!(order.status, OrderStatus::Completed);
//! assert_eq!(order.items[0].quantity, 2);
//! assert_eq!(order.effective_date_str(), Some("2024-08-11"));
//! ```

pub mod clock;
pub mod error;
pub mod normalize;
pub mod order;
pub mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock, Zone};
pub use error::DineboardError;
pub use normalize::{
    normalize_catalog, normalize_collection, normalize_order, normalize_orders, parse_orders,
};
pub use order::{LineItem, MenuCatalogEntry, Order, OrderStatus, Timestamps};
pub use timestamp::{Moment, Timestamp};

/// Dineboard engine version
pub const DINEBOARD_VERSION: &str = "1.0.0";
