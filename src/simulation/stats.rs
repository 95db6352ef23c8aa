// src/simulation/stats.rs

use crate::simulation::config::CostRates;

/// Time-weighted areas and ordering cost for one policy run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostAccumulators {
    pub ordering_cost: f64,
    pub area_inventory: f64,
    pub area_shortage: f64,
    last_update: f64,
}

/// Monthly averages derived from the accumulators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary {
    pub ordering: f64,
    pub holding: f64,
    pub shortage: f64,
}

impl CostSummary {
    pub fn total(&self) -> f64 {
        self.ordering + self.holding + self.shortage
    }
}

impl CostAccumulators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrates `level` over the interval since the previous update.
    ///
    /// `level` must be the value that held during that interval, i.e. read
    /// before the current event changes it.
    pub fn advance(&mut self, now: f64, level: i64) {
        let elapsed = now - self.last_update;
        self.last_update = now;

        if level < 0 {
            self.area_shortage += elapsed * level.unsigned_abs() as f64;
        } else {
            self.area_inventory += elapsed * level as f64;
        }
    }

    pub fn add_ordering_cost(&mut self, amount: f64) {
        self.ordering_cost += amount;
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    /// A zero-length horizon has nothing to average and summarizes to zero.
    pub fn summarize(&self, horizon_months: f64, costs: &CostRates) -> CostSummary {
        if horizon_months == 0.0 {
            return CostSummary {
                ordering: 0.0,
                holding: 0.0,
                shortage: 0.0,
            };
        }
        CostSummary {
            ordering: self.ordering_cost / horizon_months,
            holding: costs.holding_cost * self.area_inventory / horizon_months,
            shortage: costs.backlog_cost * self.area_shortage / horizon_months,
        }
    }
}
