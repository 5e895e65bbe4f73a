use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dineboard_analytics::{AnalyticsProfile, Dashboard, OrderAnalyticsAggregator};
use dineboard_core::{normalize_orders, FixedClock, Zone};
use dineboard_filter::Period;
use serde_json::json;
use std::sync::Arc;

fn busy_evening(count: usize) -> Vec<serde_json::Value> {
    (0..count)
        .map(|i| {
            let status = if i % 5 == 0 { "preparing" } else { "completed" };
            json!({
                "id": format!("order-{}", i),
                "kitchen": { "status": status },
                "tableNumber": i % 40,
                "pricing": { "total": 18.5 + (i % 7) as f64 },
                "items": [
                    { "menuName": format!("Dish {}", i % 60), "menuCategory": format!("Cat {}", i % 8), "quantity": 1 + i % 3, "finalPrice": 9.25 },
                    { "menuName": "Water", "menuCategory": "Drinks", "quantity": 1, "finalPrice": 2 }
                ],
                "timestamps": {
                    "orderPlaced": format!("2024-08-11T{:02}:{:02}:00Z", 11 + i % 11, i % 60),
                    "preparingTime": format!("2024-08-11T{:02}:{:02}:30Z", 11 + i % 11, i % 60)
                }
            })
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let orders = normalize_orders(&busy_evening(5_000));
    let aggregator = OrderAnalyticsAggregator::new(AnalyticsProfile::standard(), Zone::utc());

    c.bench_function("aggregate_5000_orders", |b| {
        b.iter(|| aggregator.aggregate(black_box(&orders), &[]))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let raw = busy_evening(5_000);
    c.bench_function("normalize_5000_orders", |b| b.iter(|| normalize_orders(black_box(&raw))));
}

fn bench_dashboard_cache(c: &mut Criterion) {
    let orders = normalize_orders(&busy_evening(5_000));
    let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 8, 11, 23, 0, 0).unwrap()));
    let board = |cache_capacity: usize| {
        let profile = AnalyticsProfile {
            utc_offset_minutes: Some(0),
            cache_capacity,
            ..AnalyticsProfile::standard()
        };
        Dashboard::new(profile, clock.clone()).unwrap()
    };

    let uncached = board(0);
    c.bench_function("dashboard_analytics_5000_orders_cache_off", |b| {
        b.iter(|| uncached.analytics(black_box(&orders), &[], Period::Total, ""))
    });

    let cached = board(8);
    c.bench_function("dashboard_analytics_5000_orders_cache_on", |b| {
        b.iter(|| cached.analytics(black_box(&orders), &[], Period::Total, ""))
    });
}

criterion_group!(benches, bench_aggregate, bench_normalize, bench_dashboard_cache);
criterion_main!(benches);
