//! Kitchen board summary: how many orders sit in each stage
use dineboard_core::{Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// Order counts per effective status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenSummary {
    pub received: usize,
    pub preparing: usize,
    pub ready: usize,
    pub completed: usize,
    pub rejected: usize,
    pub unknown: usize,
}

impl KitchenSummary {
    pub fn from_orders<'a, I>(orders: I) -> Self
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut summary = Self::default();
        for order in orders {
            *summary.slot(order.status) += 1;
        }
        summary
    }

    fn slot(&mut self, status: OrderStatus) -> &mut usize {
        match status {
            OrderStatus::Received => &mut self.received,
            OrderStatus::Preparing => &mut self.preparing,
            OrderStatus::Ready => &mut self.ready,
            OrderStatus::Completed => &mut self.completed,
            OrderStatus::Rejected => &mut self.rejected,
            OrderStatus::Unknown => &mut self.unknown,
        }
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Received => self.received,
            OrderStatus::Preparing => self.preparing,
            OrderStatus::Ready => self.ready,
            OrderStatus::Completed => self.completed,
            OrderStatus::Rejected => self.rejected,
            OrderStatus::Unknown => self.unknown,
        }
    }

    /// Orders still on the board
    pub fn active(&self) -> usize {
        self.received + self.preparing + self.ready
    }

    pub fn total(&self) -> usize {
        OrderStatus::ALL.iter().map(|s| self.count(*s)).sum()
    }
}
