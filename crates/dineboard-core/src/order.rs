//! Data Model: Order, LineItem, MenuCatalogEntry
use crate::clock::Zone;
use crate::error::DineboardError;
use crate::normalize::normalize_order;
use crate::timestamp::{Moment, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kitchen status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Received,
    Preparing,
    Ready,
    Completed,
    Rejected,
    /// Any status string outside the known lifecycle
    Unknown,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Received,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Rejected,
        OrderStatus::Unknown,
    ];

    /// Case-insensitive parse; unrecognised text maps to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "received" => OrderStatus::Received,
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "completed" => OrderStatus::Completed,
            "rejected" => OrderStatus::Rejected,
            _ => OrderStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Unknown => "unknown",
        }
    }

    /// Still on the kitchen board
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Received | OrderStatus::Preparing | OrderStatus::Ready
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_category: Option<String>,
    /// Always at least 1
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(menu_name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            menu_name: Some(menu_name.into()),
            menu_category: None,
            quantity: quantity.max(1),
            unit_price,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.menu_category = Some(category.into());
        self
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    /// Category, or the given fallback bucket
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.menu_category.as_deref().unwrap_or(fallback)
    }
}

/// Kitchen-stage timestamps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_placed: Option<Timestamp>,
    /// Date-only override for the effective date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparing_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_time: Option<Timestamp>,
}

/// Strict order value object. Built by [`crate::normalize_order`] with every
/// default already applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    pub items: Vec<LineItem>,
    /// `pricing.total`
    pub total: f64,
    pub timestamps: Timestamps,
}

impl Order {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Parse a single raw order document and normalize it.
    pub fn from_json_str(json: &str) -> Result<Self, DineboardError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(DineboardError::ParseError("expected an order object".to_string()));
        }
        Ok(normalize_order(&value))
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// Total quantity across all line items
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// `YYYY-MM-DD` string used for period matching: `orderDate` when present,
    /// else the date portion of `orderPlaced`. Orders without `orderPlaced`
    /// have no effective date.
    pub fn effective_date_str(&self) -> Option<&str> {
        let placed = self.timestamps.order_placed.as_ref()?;
        match self.timestamps.order_date.as_deref() {
            Some(date) if !date.is_empty() => Some(date),
            _ => Some(placed.date_part()).filter(|d| !d.is_empty()),
        }
    }

    /// Effective date as a calendar date; malformed text yields `None`.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.effective_date_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    pub fn placed_moment(&self) -> Option<&Moment> {
        self.timestamps.order_placed.as_ref()?.moment.as_ref()
    }

    /// Minutes from order placed to kitchen start
    pub fn response_minutes(&self, zone: &Zone) -> Option<f64> {
        minutes_between(
            zone,
            self.timestamps.order_placed.as_ref(),
            self.timestamps.preparing_time.as_ref(),
        )
    }

    /// Minutes from kitchen start to ready
    pub fn wait_minutes(&self, zone: &Zone) -> Option<f64> {
        minutes_between(
            zone,
            self.timestamps.preparing_time.as_ref(),
            self.timestamps.ready_time.as_ref(),
        )
    }
}

fn minutes_between(zone: &Zone, from: Option<&Timestamp>, to: Option<&Timestamp>) -> Option<f64> {
    let from = zone.resolve(from?.moment.as_ref()?)?;
    let to = zone.resolve(to?.moment.as_ref()?)?;
    Some((to - from).num_milliseconds() as f64 / 60_000.0)
}

/// Entry of the menu collection, used to enrich top-selling dishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCatalogEntry {
    pub id: String,
    pub menu_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_category: Option<String>,
    /// `finalPrice`, else `originalPrice`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl MenuCatalogEntry {
    pub fn new(menu_name: impl Into<String>, price: Option<f64>) -> Self {
        let menu_name = menu_name.into();
        Self {
            id: menu_name.clone(),
            menu_name,
            menu_category: None,
            price,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.menu_category = Some(category.into());
        self
    }
}
