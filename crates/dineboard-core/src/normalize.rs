//! Boundary normalization for order documents.
//!
//! Maps raw, schemaless JSON into the strict [`Order`] model:
//! - Status fallback chain (`kitchen.status` → `status` → received)
//! - Table number fallback (`tableNumber` → `customerInfo.tableNumber`)
//! - Quantity, price and total coercion (numbers or numeric strings)
//! - Timestamp parsing, keeping the raw text for date matching
//!
//! Nothing here fails on a bad field; the field degrades to its default.

use crate::error::DineboardError;
use crate::order::{LineItem, MenuCatalogEntry, Order, OrderStatus, Timestamps};
use crate::timestamp::Timestamp;
use serde_json::Value;
use tracing::{debug, warn};

/// Follow a path of object keys.
fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

/// Non-empty trimmed text; numbers are rendered.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite number from a JSON number or numeric string.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Non-negative amount.
fn amount(value: Option<&Value>) -> Option<f64> {
    value.and_then(number).filter(|n| *n >= 0.0)
}

/// Strictly positive price; a zero price counts as not set.
fn price(value: Option<&Value>) -> Option<f64> {
    amount(value).filter(|n| *n > 0.0)
}

fn first_text(value: &Value, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| lookup(value, path).and_then(text))
}

fn quantity(value: Option<&Value>) -> u32 {
    value
        .and_then(number)
        .filter(|n| *n >= 1.0)
        .map(|n| n.trunc().min(u32::MAX as f64) as u32)
        .unwrap_or(1)
}

fn timestamp(value: &Value, key: &str) -> Option<Timestamp> {
    lookup(value, &["timestamps", key]).and_then(Timestamp::from_json)
}

fn line_item(value: &Value) -> LineItem {
    let quantity = quantity(value.get("quantity"));
    let unit_price = price(value.get("finalPrice"))
        .or_else(|| price(value.get("originalPrice")))
        .or_else(|| amount(value.get("itemTotal")).map(|total| total / quantity as f64))
        .unwrap_or(0.0);

    LineItem {
        menu_name: value.get("menuName").and_then(text),
        menu_category: value.get("menuCategory").and_then(text),
        quantity,
        unit_price,
    }
}

/// Normalize one order document. Never fails.
pub fn normalize_order(value: &Value) -> Order {
    let status = first_text(value, &[&["kitchen", "status"], &["status"]])
        .map(|s| OrderStatus::parse(&s))
        .unwrap_or_default();

    let items = value
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter(|v| v.is_object()).map(line_item).collect())
        .unwrap_or_default();

    let order_date = lookup(value, &["timestamps", "orderDate"])
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Order {
        id: value.get("id").and_then(text).unwrap_or_default(),
        status,
        table_number: first_text(value, &[&["tableNumber"], &["customerInfo", "tableNumber"]]),
        items,
        total: amount(lookup(value, &["pricing", "total"])).unwrap_or(0.0),
        timestamps: Timestamps {
            order_placed: timestamp(value, "orderPlaced"),
            order_date,
            preparing_time: timestamp(value, "preparingTime"),
            ready_time: timestamp(value, "readyTime"),
        },
    }
}

/// Normalize a list of order documents.
pub fn normalize_orders(values: &[Value]) -> Vec<Order> {
    values.iter().map(normalize_order).collect()
}

/// Normalize a collection snapshot: either an array of documents or an object
/// keyed by document id. Keyed documents without their own `id` take the key.
pub fn normalize_collection(value: &Value) -> Result<Vec<Order>, DineboardError> {
    match value {
        Value::Array(values) => Ok(normalize_orders(values)),
        Value::Object(map) => Ok(map
            .iter()
            .map(|(key, doc)| {
                let mut order = normalize_order(doc);
                if order.id.is_empty() {
                    order.id = key.clone();
                }
                order
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(DineboardError::ParseError(format!(
            "expected an array or object of orders, got {}",
            json_kind(other)
        ))),
    }
}

/// Parse and normalize an orders payload.
pub fn parse_orders(json: &str) -> Result<Vec<Order>, DineboardError> {
    let value: Value = serde_json::from_str(json)?;
    let orders = normalize_collection(&value)?;
    debug!(count = orders.len(), "parsed orders payload");
    Ok(orders)
}

/// Normalize menu documents. Entries without a usable name are dropped since
/// they can never be matched to an ordered dish.
pub fn normalize_catalog(values: &[Value]) -> Vec<MenuCatalogEntry> {
    let mut dropped = 0usize;
    let entries: Vec<MenuCatalogEntry> = values
        .iter()
        .filter_map(|value| {
            let Some(menu_name) = value.get("menuName").and_then(text) else {
                dropped += 1;
                return None;
            };
            Some(MenuCatalogEntry {
                id: value.get("id").and_then(text).unwrap_or_else(|| menu_name.clone()),
                menu_category: value.get("menuCategory").and_then(text),
                price: price(value.get("finalPrice")).or_else(|| price(value.get("originalPrice"))),
                menu_name,
            })
        })
        .collect();

    if dropped > 0 {
        warn!(dropped, "menu entries without a name were skipped");
    }
    entries
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_fallback_chain() {
        let kitchen_first = normalize_order(&json!({
            "status": "received",
            "kitchen": { "status": "completed" }
        }));
        assert_eq!(kitchen_first.status, OrderStatus::Completed);

        let plain = normalize_order(&json!({ "status": "ready" }));
        assert_eq!(plain.status, OrderStatus::Ready);

        let empty_kitchen = normalize_order(&json!({ "kitchen": { "status": "" }, "status": "preparing" }));
        assert_eq!(empty_kitchen.status, OrderStatus::Preparing);

        let missing = normalize_order(&json!({}));
        assert_eq!(missing.status, OrderStatus::Received);
    }

    #[test]
    fn test_table_number_fallback() {
        let direct = normalize_order(&json!({ "tableNumber": 7, "customerInfo": { "tableNumber": "9" } }));
        assert_eq!(direct.table_number.as_deref(), Some("7"));

        let nested = normalize_order(&json!({ "tableNumber": "  ", "customerInfo": { "tableNumber": "T9" } }));
        assert_eq!(nested.table_number.as_deref(), Some("T9"));

        let none = normalize_order(&json!({ "customerInfo": {} }));
        assert_eq!(none.table_number, None);
    }

    #[test]
    fn test_item_defaults() {
        let order = normalize_order(&json!({
            "items": [
                { "menuName": "Soup" },
                { "menuName": "Tea", "quantity": "3", "finalPrice": "2.5", "menuCategory": "Drinks" },
                { "menuName": "Cake", "quantity": -4, "originalPrice": 6 },
                { "menuName": "Wrap", "quantity": 2, "itemTotal": 18 },
                "not an item"
            ]
        }));

        assert_eq!(order.items.len(), 4);
        assert_eq!(order.items[0].quantity, 1);
        assert_eq!(order.items[0].unit_price, 0.0);
        assert_eq!(order.items[0].menu_category, None);

        assert_eq!(order.items[1].quantity, 3);
        assert_eq!(order.items[1].unit_price, 2.5);
        assert_eq!(order.items[1].menu_category.as_deref(), Some("Drinks"));

        assert_eq!(order.items[2].quantity, 1);
        assert_eq!(order.items[2].unit_price, 6.0);

        assert_eq!(order.items[3].unit_price, 9.0);
    }

    #[test]
    fn test_zero_final_price_falls_back() {
        let order = normalize_order(&json!({
            "items": [
                { "menuName": "Combo", "finalPrice": 0, "originalPrice": 12 },
                { "menuName": "Refill", "finalPrice": "0", "itemTotal": 6, "quantity": 2 },
                { "menuName": "Free", "finalPrice": 0, "originalPrice": 0 }
            ]
        }));
        assert_eq!(order.items[0].unit_price, 12.0);
        assert_eq!(order.items[1].unit_price, 3.0);
        assert_eq!(order.items[2].unit_price, 0.0);

        let catalog = normalize_catalog(&[json!({ "menuName": "Combo", "finalPrice": 0, "originalPrice": 12 })]);
        assert_eq!(catalog[0].price, Some(12.0));
    }

    #[test]
    fn test_total_and_timestamps() {
        let order = normalize_order(&json!({
            "pricing": { "total": "42.5" },
            "timestamps": {
                "orderPlaced": "2024-08-11T12:00:00Z",
                "orderDate": "2024-08-11",
                "preparingTime": null
            }
        }));
        assert_eq!(order.total, 42.5);
        assert!(order.timestamps.order_placed.is_some());
        assert_eq!(order.timestamps.order_date.as_deref(), Some("2024-08-11"));
        assert!(order.timestamps.preparing_time.is_none());

        let bad_total = normalize_order(&json!({ "pricing": { "total": "n/a" } }));
        assert_eq!(bad_total.total, 0.0);
    }

    #[test]
    fn test_collection_keyed_by_id() {
        let orders = normalize_collection(&json!({
            "-Nabc": { "status": "completed" },
            "-Nxyz": { "id": "own-id" }
        }))
        .unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, "-Nabc");
        assert_eq!(orders[1].id, "own-id");

        assert!(normalize_collection(&json!("orders")).is_err());
        assert!(normalize_collection(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_parse_orders_rejects_bad_json() {
        assert!(matches!(parse_orders("[{"), Err(DineboardError::ParseError(_))));
        assert_eq!(parse_orders("[]").unwrap().len(), 0);
    }

    #[test]
    fn test_catalog_normalization() {
        let catalog = normalize_catalog(&[
            json!({ "id": "m1", "menuName": "Pizza", "menuCategory": "Main", "finalPrice": 100 }),
            json!({ "menuName": "Salad", "originalPrice": "40" }),
            json!({ "menuCategory": "Ghost" }),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].price, Some(100.0));
        assert_eq!(catalog[1].id, "Salad");
        assert_eq!(catalog[1].price, Some(40.0));
        assert_eq!(catalog[1].menu_category, None);
    }
}
