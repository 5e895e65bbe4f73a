//! Integration tests for dineboard-core with store-shaped documents.

use dineboard_core::{normalize_collection, parse_orders, DineboardError, Moment, OrderStatus, Zone};
use serde_json::json;

#[test]
fn test_full_document_normalization() {
    let orders = parse_orders(
        r#"[{
            "id": 1042,
            "status": "received",
            "kitchen": { "status": "READY" },
            "customerInfo": { "name": "Walk-in", "tableNumber": 12 },
            "items": [
                { "menuName": "Paneer Tikka", "menuCategory": "Starters", "quantity": 2, "finalPrice": 240, "originalPrice": 280 },
                { "menuName": "Naan", "quantity": "4", "itemTotal": 160 }
            ],
            "pricing": { "subtotal": 640, "total": 672 },
            "timestamps": {
                "orderPlaced": "2024-08-11T19:02:11.350Z",
                "preparingTime": "2024-08-11T19:06:00Z",
                "readyTime": "2024-08-11T19:24:00Z"
            }
        }]"#,
    )
    .unwrap();

    let order = &orders[0];
    assert_eq!(order.id, "1042");
    assert_eq!(order.status, OrderStatus::Ready);
    assert_eq!(order.table_number.as_deref(), Some("12"));
    assert_eq!(order.total, 672.0);
    assert_eq!(order.item_count(), 6);
    assert_eq!(order.items[0].unit_price, 240.0);
    assert_eq!(order.items[1].unit_price, 40.0);
    assert_eq!(order.items[1].menu_category, None);
    assert_eq!(order.effective_date_str(), Some("2024-08-11"));

    let zone = Zone::utc();
    assert_eq!(order.wait_minutes(&zone), Some(18.0));
    let response = order.response_minutes(&zone).unwrap();
    assert!((response - 3.810_833).abs() < 1e-3);
}

#[test]
fn test_naive_timestamps_resolve_in_zone() {
    let orders = normalize_collection(&json!([{
        "timestamps": {
            "orderPlaced": "2024-08-11T23:50:00",
            "preparingTime": "2024-08-12T00:05:00+00:00"
        }
    }]))
    .unwrap();
    let order = &orders[0];

    assert!(matches!(order.placed_moment(), Some(Moment::Floating(_))));
    assert_eq!(order.response_minutes(&Zone::utc()), Some(15.0));
    // One hour east of UTC, 23:50 local is 22:50 UTC
    let east = Zone::from_offset_minutes(60).unwrap();
    assert_eq!(order.response_minutes(&east), Some(75.0));
}

#[test]
fn test_outer_payload_errors() {
    assert!(matches!(parse_orders("not json"), Err(DineboardError::ParseError(_))));
    let err = parse_orders("42").unwrap_err();
    assert!(err.to_string().starts_with("PARSE/"));
}
