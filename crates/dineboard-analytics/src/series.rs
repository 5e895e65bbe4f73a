//! Chart series: orders per hour of day and per day
use chrono::{NaiveDate, Timelike};
use dineboard_core::{Order, Zone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Local hour-of-day of the order's placement, if it has a usable timestamp
pub fn local_hour(order: &Order, zone: &Zone) -> Option<usize> {
    order
        .placed_moment()
        .map(|moment| zone.local_of(moment).hour() as usize)
}

/// Completed orders per local hour (index 0 is midnight)
pub fn hourly_distribution<'a, I>(orders: I, zone: &Zone) -> [u32; 24]
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut hours = [0u32; 24];
    for hour in orders
        .into_iter()
        .filter(|o| o.is_completed())
        .filter_map(|o| local_hour(o, zone))
    {
        hours[hour] += 1;
    }
    hours
}

/// Busiest hour as `"H:00"`. Ties go to the earliest hour; no orders at all
/// yields `None`.
pub fn peak_hour(hours: &[u32; 24]) -> Option<String> {
    let (hour, count) = hours
        .iter()
        .enumerate()
        .fold((0usize, 0u32), |best, (hour, &count)| {
            if count > best.1 {
                (hour, count)
            } else {
                best
            }
        });
    (count > 0).then(|| format!("{}:00", hour))
}

/// Orders and revenue for one effective date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub orders: usize,
    pub revenue: f64,
}

/// Completed orders and revenue per effective date, oldest first. Orders
/// without a valid effective date are left out.
pub fn daily_trend<'a, I>(orders: I) -> Vec<DailyPoint>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut days: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();
    for order in orders.into_iter().filter(|o| o.is_completed()) {
        if let Some(date) = order.effective_date() {
            let day = days.entry(date).or_insert((0, 0.0));
            day.0 += 1;
            day.1 += order.total;
        }
    }
    days.into_iter()
        .map(|(date, (orders, revenue))| DailyPoint { date, orders, revenue })
        .collect()
}
