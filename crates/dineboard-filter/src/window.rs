//! Time-window filtering for reporting periods.
//!
//! `daily` matches the effective date string against the reference date.
//! `weekly` and `monthly` are anchored to the clock's current local date, not
//! to the reference date.

use crate::period::Period;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use dineboard_core::{Clock, Order, SystemClock, Zone};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Inclusive local date-time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// `[first 00:00:00.000, last 23:59:59.999]`
    pub fn days(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        Some(Self {
            start: first.and_hms_opt(0, 0, 0)?,
            end: last.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?),
        })
    }

    /// Sunday through Saturday of the week containing `today`
    pub fn week_of(today: NaiveDate) -> Option<Self> {
        let sunday = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
        Self::days(sunday, sunday + Duration::days(6))
    }

    /// First through last day of the month containing `today`
    pub fn month_of(today: NaiveDate) -> Option<Self> {
        let first = today.with_day(1)?;
        let next_first = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
        };
        Self::days(first, next_first.pred_opt()?)
    }

    /// A date is inside when its local midnight falls within the range.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.and_hms_opt(0, 0, 0)
            .is_some_and(|midnight| midnight >= self.start && midnight <= self.end)
    }
}

/// Selects the orders relevant to a reporting period.
#[derive(Clone)]
pub struct TimeWindowFilter {
    zone: Zone,
    clock: Arc<dyn Clock>,
}

impl TimeWindowFilter {
    pub fn new(zone: Zone, clock: Arc<dyn Clock>) -> Self {
        Self { zone, clock }
    }

    /// Host zone and wall clock
    pub fn system() -> Self {
        Self::new(Zone::Local, Arc::new(SystemClock))
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Current local date according to the clock
    pub fn today(&self) -> NaiveDate {
        self.zone.today(self.clock.now())
    }

    /// Range for `weekly` / `monthly`; `None` for the other periods.
    pub fn window(&self, period: Period) -> Option<DateRange> {
        match period {
            Period::Weekly => DateRange::week_of(self.today()),
            Period::Monthly => DateRange::month_of(self.today()),
            Period::Daily | Period::Total => None,
        }
    }

    /// Orders whose effective date falls in the period. Orders without
    /// `orderPlaced`, or with a malformed effective date, never match a
    /// dated period.
    pub fn filter_by_period<'a>(
        &self,
        orders: &'a [Order],
        period: Period,
        reference_date: &str,
    ) -> Vec<&'a Order> {
        let selected: Vec<&Order> = match period {
            Period::Total => orders.iter().collect(),
            Period::Daily => orders
                .iter()
                .filter(|o| o.effective_date_str() == Some(reference_date))
                .collect(),
            Period::Weekly | Period::Monthly => match self.window(period) {
                Some(range) => orders
                    .iter()
                    .filter(|o| o.effective_date().is_some_and(|d| range.contains_date(d)))
                    .collect(),
                None => Vec::new(),
            },
        };

        debug!(
            period = %period,
            reference_date,
            input = orders.len(),
            selected = selected.len(),
            "filtered orders by period"
        );
        selected
    }
}

impl Default for TimeWindowFilter {
    fn default() -> Self {
        Self::system()
    }
}

/// Filter with the host zone and wall clock.
pub fn filter_by_period<'a>(orders: &'a [Order], period: Period, reference_date: &str) -> Vec<&'a Order> {
    TimeWindowFilter::system().filter_by_period(orders, period, reference_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dineboard_core::{FixedClock, Timestamp};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order_on(raw: &str) -> Order {
        let mut order = Order::new(raw);
        order.timestamps.order_placed = Some(Timestamp::from_text(raw));
        order
    }

    fn filter_at(y: i32, m: u32, d: u32) -> TimeWindowFilter {
        let now = Utc.with_ymd_and_hms(y, m, d, 15, 0, 0).unwrap();
        TimeWindowFilter::new(Zone::utc(), Arc::new(FixedClock(now)))
    }

    #[test]
    fn test_week_is_sunday_to_saturday() {
        // 2024-08-14 is a Wednesday
        let range = DateRange::week_of(date(2024, 8, 14)).unwrap();
        assert_eq!(range.start.date(), date(2024, 8, 11));
        assert_eq!(range.end.date(), date(2024, 8, 17));
        assert_eq!(range.end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());

        let sunday = DateRange::week_of(date(2024, 8, 11)).unwrap();
        assert_eq!(sunday.start.date(), date(2024, 8, 11));
    }

    #[test]
    fn test_month_bounds() {
        let feb = DateRange::month_of(date(2024, 2, 10)).unwrap();
        assert_eq!(feb.start.date(), date(2024, 2, 1));
        assert_eq!(feb.end.date(), date(2024, 2, 29));

        let dec = DateRange::month_of(date(2023, 12, 31)).unwrap();
        assert_eq!(dec.end.date(), date(2023, 12, 31));
    }

    #[test]
    fn test_contains_date_inclusive() {
        let range = DateRange::week_of(date(2024, 8, 14)).unwrap();
        assert!(range.contains_date(date(2024, 8, 11)));
        assert!(range.contains_date(date(2024, 8, 17)));
        assert!(!range.contains_date(date(2024, 8, 10)));
        assert!(!range.contains_date(date(2024, 8, 18)));
    }

    #[test]
    fn test_daily_boundary() {
        let orders = vec![order_on("2024-08-11T23:59:59"), order_on("2024-08-12T00:00:01")];
        let daily = filter_at(2024, 8, 14).filter_by_period(&orders, Period::Daily, "2024-08-11");
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].id, "2024-08-11T23:59:59");
    }

    #[test]
    fn test_weekly_ignores_reference_date() {
        let orders = vec![
            order_on("2024-08-11T08:00:00Z"),
            order_on("2024-08-17T22:00:00Z"),
            order_on("2024-08-18T09:00:00Z"),
            order_on("2024-01-02T09:00:00Z"),
        ];
        let weekly = filter_at(2024, 8, 14).filter_by_period(&orders, Period::Weekly, "2024-01-02");
        let ids: Vec<&str> = weekly.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["2024-08-11T08:00:00Z", "2024-08-17T22:00:00Z"]);
    }

    #[test]
    fn test_monthly() {
        let orders = vec![
            order_on("2024-08-01T00:00:00"),
            order_on("2024-08-31T23:59:59"),
            order_on("2024-09-01T00:00:00"),
        ];
        let monthly = filter_at(2024, 8, 14).filter_by_period(&orders, Period::Monthly, "");
        assert_eq!(monthly.len(), 2);
    }

    #[test]
    fn test_total_is_identity() {
        let orders = vec![Order::new("no-timestamps"), order_on("garbage")];
        let total = filter_at(2024, 8, 14).filter_by_period(&orders, Period::Total, "2024-08-11");
        assert_eq!(total.len(), 2);
    }

    #[test]
    fn test_unusable_timestamps_never_match() {
        let mut dated_but_unplaced = Order::new("no-placed");
        dated_but_unplaced.timestamps.order_date = Some("2024-08-14".to_string());
        let orders = vec![dated_but_unplaced, order_on("garbage")];

        let filter = filter_at(2024, 8, 14);
        for period in [Period::Daily, Period::Weekly, Period::Monthly] {
            assert!(filter.filter_by_period(&orders, period, "2024-08-14").is_empty());
        }
    }
}
