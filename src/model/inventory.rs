// src/model/inventory.rs

/// On-hand stock of the single product during one policy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryState {
    /// Negative values are backlogged demand.
    pub level: i64,
    /// Size of the most recent order; added to stock when it arrives.
    pub pending_order: i64,
}

impl InventoryState {
    pub fn new(initial_level: i64) -> Self {
        Self {
            level: initial_level,
            pending_order: 0,
        }
    }

    /// Demand is always satisfied, driving the level negative if stock is short.
    pub fn withdraw(&mut self, quantity: i64) {
        self.level -= quantity;
    }

    /// Adds the pending order to stock and clears it.
    pub fn receive_pending(&mut self) -> i64 {
        let quantity = self.pending_order;
        self.level += quantity;
        self.pending_order = 0;
        quantity
    }

    pub fn place_order(&mut self, quantity: i64) {
        self.pending_order = quantity;
    }

    pub fn backlog(&self) -> i64 {
        (-self.level).max(0)
    }
}
