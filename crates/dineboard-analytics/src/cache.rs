//! Memoization of analytics results keyed by content hash
//!
//! The key is a blake3 digest over the fields of the filtered orders, the
//! catalog and the aggregation settings, so two identical snapshots share
//! one entry no matter where they came from. Fields are written straight
//! into one length-prefixed buffer that is hashed once.

use crate::result::AnalyticsResult;
use dineboard_core::{LineItem, MenuCatalogEntry, Moment, Order, Timestamp};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::trace;

/// Rough bytes written per order, for the buffer's first allocation
const BYTES_PER_ORDER: usize = 192;

/// Byte encoding of everything aggregation reads
struct KeyBuffer(Vec<u8>);

impl KeyBuffer {
    fn tag(&mut self, tag: u8) {
        self.0.push(tag);
    }

    fn int(&mut self, n: u64) {
        self.0.extend_from_slice(&n.to_le_bytes());
    }

    fn number(&mut self, n: f64) {
        self.int(n.to_bits());
    }

    fn text(&mut self, s: &str) {
        self.int(s.len() as u64);
        self.0.extend_from_slice(s.as_bytes());
    }

    fn opt_text(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.tag(1);
                self.text(s);
            }
            None => self.tag(0),
        }
    }

    fn timestamp(&mut self, ts: Option<&Timestamp>) {
        let Some(ts) = ts else {
            return self.tag(0);
        };
        self.tag(1);
        self.text(&ts.raw);
        let (tag, at) = match ts.moment {
            None => return self.tag(0),
            Some(Moment::Absolute(at)) => (1, at),
            Some(Moment::Floating(naive)) => (2, naive.and_utc()),
        };
        self.tag(tag);
        self.int(at.timestamp() as u64);
        self.int(u64::from(at.timestamp_subsec_nanos()));
    }

    fn item(&mut self, item: &LineItem) {
        self.opt_text(item.menu_name.as_deref());
        self.opt_text(item.menu_category.as_deref());
        self.int(u64::from(item.quantity));
        self.number(item.unit_price);
    }

    fn order(&mut self, order: &Order) {
        self.text(&order.id);
        self.text(order.status.as_str());
        self.opt_text(order.table_number.as_deref());
        self.number(order.total);
        self.int(order.items.len() as u64);
        for item in &order.items {
            self.item(item);
        }
        self.timestamp(order.timestamps.order_placed.as_ref());
        self.opt_text(order.timestamps.order_date.as_deref());
        self.timestamp(order.timestamps.preparing_time.as_ref());
        self.timestamp(order.timestamps.ready_time.as_ref());
    }

    fn entry(&mut self, entry: &MenuCatalogEntry) {
        self.text(&entry.id);
        self.text(&entry.menu_name);
        self.opt_text(entry.menu_category.as_deref());
        match entry.price {
            Some(price) => {
                self.tag(1);
                self.number(price);
            }
            None => self.tag(0),
        }
    }
}

/// Bounded FIFO cache of analytics results
#[derive(Debug, Clone)]
pub struct AnalyticsCache {
    entries: VecDeque<(String, AnalyticsResult)>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl AnalyticsCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Content key for an order set, catalog and settings fingerprint.
    /// `None` if the settings cannot be serialized.
    pub fn key<S: Serialize + ?Sized>(orders: &[&Order], catalog: &[MenuCatalogEntry], settings: &S) -> Option<String> {
        let mut buf = KeyBuffer(Vec::with_capacity((orders.len() + catalog.len()) * BYTES_PER_ORDER));
        buf.int(orders.len() as u64);
        for order in orders {
            buf.order(order);
        }
        buf.int(catalog.len() as u64);
        for entry in catalog {
            buf.entry(entry);
        }
        buf.text(&serde_json::to_string(settings).ok()?);

        Some(format!("blake3:{}", blake3::hash(&buf.0)))
    }

    pub fn get(&mut self, key: &str) -> Option<AnalyticsResult> {
        match self.entries.iter().find(|(k, _)| k == key) {
            Some((_, result)) => {
                self.hits += 1;
                trace!(key, "analytics cache hit");
                Some(result.clone())
            }
            None => {
                self.misses += 1;
                trace!(key, "analytics cache miss");
                None
            }
        }
    }

    pub fn insert(&mut self, key: String, result: AnalyticsResult) {
        if self.capacity == 0 || self.entries.iter().any(|(k, _)| *k == key) {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((key, result));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
