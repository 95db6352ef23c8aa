// src/strategy/policy.rs

use serde::Serialize;
use std::fmt;

/// Decides, at a review, whether to order and how much.
pub trait OrderPolicy {
    /// Returns the order quantity, or `None` if no order should be placed.
    fn review(&self, inventory_level: i64) -> Option<i64>;
}

/// The classical (s, S) rule: when stock is below `s`, order up to `S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReorderPolicy {
    /// s
    pub reorder_point: i64,
    /// S
    pub order_up_to: i64,
}

impl ReorderPolicy {
    pub fn new(reorder_point: i64, order_up_to: i64) -> Self {
        Self {
            reorder_point,
            order_up_to,
        }
    }
}

impl OrderPolicy for ReorderPolicy {
    fn review(&self, inventory_level: i64) -> Option<i64> {
        if inventory_level < self.reorder_point {
            // Backlog is included: a level of -3 with S = 40 orders 43.
            Some(self.order_up_to - inventory_level)
        } else {
            None
        }
    }
}

impl fmt::Display for ReorderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.reorder_point, self.order_up_to)
    }
}
