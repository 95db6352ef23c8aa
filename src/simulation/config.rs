// src/simulation/config.rs

use crate::error::ConfigError;
use crate::strategy::policy::ReorderPolicy;

/// How far the last cumulative probability may drift from 1.0.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Discrete demand-size distribution, stored as cumulative probabilities.
///
/// Entry `i` is P(size <= i + 1), so a four-entry table describes sizes 1..=4.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandDistribution {
    cumulative: Vec<f64>,
}

impl DemandDistribution {
    pub fn new(cumulative: Vec<f64>) -> Self {
        Self { cumulative }
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn num_sizes(&self) -> usize {
        self.cumulative.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let last = *self.cumulative.last().ok_or(ConfigError::EmptyDistribution)?;

        let mut previous = 0.0;
        for (index, &value) in self.cumulative.iter().enumerate() {
            if !(0.0..=1.0 + DISTRIBUTION_TOLERANCE).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { index, value });
            }
            if value < previous {
                return Err(ConfigError::NonMonotonicDistribution {
                    index,
                    previous,
                    value,
                });
            }
            previous = value;
        }

        if (last - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(ConfigError::DistributionDoesNotReachOne { last });
        }
        Ok(())
    }
}

/// Cost structure: K, i, h and pi in the classical notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRates {
    pub setup_cost: f64,
    pub incremental_cost: f64,
    pub holding_cost: f64,
    pub backlog_cost: f64,
}

impl CostRates {
    /// Cost of placing one order of `quantity` units.
    pub fn order_cost(&self, quantity: i64) -> f64 {
        self.setup_cost + self.incremental_cost * quantity as f64
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("setup_cost", self.setup_cost),
            ("incremental_cost", self.incremental_cost),
            ("holding_cost", self.holding_cost),
            ("backlog_cost", self.backlog_cost),
        ];
        for (field, value) in fields {
            // NaN fails this check too
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeCost { field, value });
            }
        }
        Ok(())
    }
}

/// Delivery lag range in months.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryLag {
    pub min: f64,
    pub max: f64,
}

impl DeliveryLag {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min >= 0.0 && self.min <= self.max && self.max.is_finite()) {
            return Err(ConfigError::InvalidLagRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Everything a batch of policy runs shares. Read-only once the batch starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioParameters {
    pub initial_inventory: i64,
    pub horizon_months: f64,
    pub demand: DemandDistribution,
    pub mean_interdemand: f64,
    pub costs: CostRates,
    pub delivery_lag: DeliveryLag,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            initial_inventory: 60,
            horizon_months: 120.0,
            demand: DemandDistribution::new(vec![0.167, 0.5, 0.833, 1.0]),
            mean_interdemand: 0.10,
            costs: CostRates {
                setup_cost: 32.0,
                incremental_cost: 3.0,
                holding_cost: 1.0,
                backlog_cost: 5.0,
            },
            delivery_lag: DeliveryLag { min: 0.5, max: 1.0 },
        }
    }
}

impl ScenarioParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Zero is allowed: the report fires at t = 0 and all averages are 0.
        if !(self.horizon_months >= 0.0 && self.horizon_months.is_finite()) {
            return Err(ConfigError::InvalidHorizon(self.horizon_months));
        }
        if !(self.mean_interdemand > 0.0 && self.mean_interdemand.is_finite()) {
            return Err(ConfigError::NonPositiveMeanInterdemand(self.mean_interdemand));
        }
        self.demand.validate()?;
        self.costs.validate()?;
        self.delivery_lag.validate()
    }

    /// Checks a policy batch against this scenario; the first bad policy is reported by index.
    pub fn validate_policies(&self, policies: &[ReorderPolicy]) -> Result<(), ConfigError> {
        if policies.is_empty() {
            return Err(ConfigError::EmptyPolicyBatch);
        }
        for (index, policy) in policies.iter().enumerate() {
            if policy.order_up_to < policy.reorder_point {
                return Err(ConfigError::InvalidPolicy {
                    index,
                    s: policy.reorder_point,
                    big_s: policy.order_up_to,
                });
            }
        }
        Ok(())
    }
}
