// src/simulation/engine.rs

use crate::error::ConfigError;
use crate::model::inventory::InventoryState;
use crate::simulation::clock::{EventClock, EventKind};
use crate::simulation::config::ScenarioParameters;
use crate::simulation::stats::CostAccumulators;
use crate::simulation::variates::{
    discrete_demand, exponential, uniform_lag, SeededUniform, UniformSource,
};
use crate::strategy::policy::{OrderPolicy, ReorderPolicy};
use serde::Serialize;
use tracing::{debug, info, trace};

/// Months between inventory reviews.
pub const REVIEW_PERIOD: f64 = 1.0;

/// Average monthly costs of one policy over the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyResult {
    pub reorder_point: i64,
    pub order_up_to: i64,
    pub avg_total_cost: f64,
    pub avg_ordering_cost: f64,
    pub avg_holding_cost: f64,
    pub avg_shortage_cost: f64,
}

impl PolicyResult {
    pub fn policy(&self) -> ReorderPolicy {
        ReorderPolicy::new(self.reorder_point, self.order_up_to)
    }
}

// Serialized so a trace can be written to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub time: f64,
    pub event: EventKind,
    pub inventory_before: i64,
    pub inventory_after: i64,
}

/// One policy run: clock, stock and accumulators owned together and
/// discarded once the result is produced.
pub struct InventorySimulation<'a, U: UniformSource> {
    scenario: &'a ScenarioParameters,
    policy: ReorderPolicy,
    source: U,

    pub clock: EventClock,
    pub inventory: InventoryState,
    pub stats: CostAccumulators,

    record_trace: bool,
    pub trace: Vec<EventRecord>,
}

impl<'a, U: UniformSource> InventorySimulation<'a, U> {
    /// Sets up the initial event list: evaluation at 0, first demand after
    /// one interarrival draw, report at the horizon, no order in transit.
    ///
    /// Fails without drawing anything if the scenario or the policy is invalid.
    pub fn new(
        scenario: &'a ScenarioParameters,
        policy: ReorderPolicy,
        mut source: U,
    ) -> Result<Self, ConfigError> {
        scenario.validate()?;
        scenario.validate_policies(std::slice::from_ref(&policy))?;

        let mut clock = EventClock::new();
        clock.schedule(
            EventKind::Demand,
            exponential(&mut source, scenario.mean_interdemand),
        );
        clock.schedule(EventKind::Report, scenario.horizon_months);
        clock.schedule(EventKind::Evaluation, 0.0);

        Ok(Self {
            scenario,
            policy,
            source,
            clock,
            inventory: InventoryState::new(scenario.initial_inventory),
            stats: CostAccumulators::new(),
            record_trace: false,
            trace: Vec::new(),
        })
    }

    /// Keep an [`EventRecord`] for every dispatched event.
    pub fn with_trace(mut self) -> Self {
        self.record_trace = true;
        self
    }

    /// Drives the event loop until the report event and summarizes.
    pub fn run(&mut self) -> PolicyResult {
        // Report is always scheduled, so the loop ends at the horizon.
        while let Some((event, now)) = self.clock.next_event() {
            let before = self.inventory.level;
            self.stats.advance(now, before);

            trace!(?event, time = now, level = before, "dispatch");
            match event {
                EventKind::OrderArrival => self.order_arrival(),
                EventKind::Demand => self.demand(),
                EventKind::Evaluation => self.evaluate(),
                EventKind::Report => {}
            }

            if self.record_trace {
                self.trace.push(EventRecord {
                    time: now,
                    event,
                    inventory_before: before,
                    inventory_after: self.inventory.level,
                });
            }

            if event == EventKind::Report {
                break;
            }
        }
        self.report()
    }

    fn order_arrival(&mut self) {
        let received = self.inventory.receive_pending();
        self.clock.cancel(EventKind::OrderArrival);
        debug!(time = self.clock.current_time(), received, "order arrived");
    }

    fn demand(&mut self) {
        let size = discrete_demand(&mut self.source, &self.scenario.demand);
        self.inventory.withdraw(size);

        let next = self.clock.current_time()
            + exponential(&mut self.source, self.scenario.mean_interdemand);
        self.clock.schedule(EventKind::Demand, next);
    }

    fn evaluate(&mut self) {
        let now = self.clock.current_time();

        if let Some(quantity) = self.policy.review(self.inventory.level) {
            if self.clock.is_scheduled(EventKind::OrderArrival) {
                // Only one order is tracked; the new one replaces it.
                debug!(
                    time = now,
                    replaced = self.inventory.pending_order,
                    "order placed while another is in transit"
                );
            }
            self.inventory.place_order(quantity);
            self.stats
                .add_ordering_cost(self.scenario.costs.order_cost(quantity));

            let arrival = now + uniform_lag(&mut self.source, &self.scenario.delivery_lag);
            self.clock.schedule(EventKind::OrderArrival, arrival);
            debug!(time = now, quantity, arrival, "reorder");
        }

        self.clock.schedule(EventKind::Evaluation, now + REVIEW_PERIOD);
    }

    fn report(&self) -> PolicyResult {
        let summary = self
            .stats
            .summarize(self.scenario.horizon_months, &self.scenario.costs);
        PolicyResult {
            reorder_point: self.policy.reorder_point,
            order_up_to: self.policy.order_up_to,
            avg_total_cost: summary.total(),
            avg_ordering_cost: summary.ordering,
            avg_holding_cost: summary.holding,
            avg_shortage_cost: summary.shortage,
        }
    }
}

/// Evaluates each policy in turn, in input order.
///
/// The scenario and every policy are validated first; on error nothing is
/// simulated. Policies draw from `source` one after another, so a batch is
/// reproducible from the source's starting state.
pub fn run_policy_batch<U: UniformSource>(
    scenario: &ScenarioParameters,
    policies: &[ReorderPolicy],
    source: &mut U,
) -> Result<Vec<PolicyResult>, ConfigError> {
    let runs = simulate_batch(scenario, policies, source, false)?;
    Ok(runs.into_iter().map(|(result, _)| result).collect())
}

/// Like [`run_policy_batch`], also returning every policy's event trace.
pub fn run_policy_batch_traced<U: UniformSource>(
    scenario: &ScenarioParameters,
    policies: &[ReorderPolicy],
    source: &mut U,
) -> Result<Vec<(PolicyResult, Vec<EventRecord>)>, ConfigError> {
    simulate_batch(scenario, policies, source, true)
}

fn simulate_batch<U: UniformSource>(
    scenario: &ScenarioParameters,
    policies: &[ReorderPolicy],
    source: &mut U,
    record_trace: bool,
) -> Result<Vec<(PolicyResult, Vec<EventRecord>)>, ConfigError> {
    scenario.validate()?;
    scenario.validate_policies(policies)?;

    let mut runs = Vec::with_capacity(policies.len());
    for policy in policies {
        info!(
            s = policy.reorder_point,
            big_s = policy.order_up_to,
            "simulating policy"
        );
        let mut sim = InventorySimulation::new(scenario, *policy, &mut *source)?;
        sim.record_trace = record_trace;
        let result = sim.run();
        info!(
            s = policy.reorder_point,
            big_s = policy.order_up_to,
            avg_total = result.avg_total_cost,
            "policy done"
        );
        runs.push((result, sim.trace));
    }
    Ok(runs)
}

/// [`run_policy_batch`] over a fresh [`SeededUniform`] stream.
pub fn run_policy_batch_seeded(
    scenario: &ScenarioParameters,
    policies: &[ReorderPolicy],
    seed: u64,
) -> Result<Vec<PolicyResult>, ConfigError> {
    let mut source = SeededUniform::new(seed);
    run_policy_batch(scenario, policies, &mut source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::{CostRates, DeliveryLag, DemandDistribution};
    use crate::simulation::variates::tests::Scripted;

    /// Demand size always 1, costs easy to follow by hand.
    fn hand_scenario() -> ScenarioParameters {
        ScenarioParameters {
            initial_inventory: 2,
            horizon_months: 2.0,
            demand: DemandDistribution::new(vec![1.0]),
            mean_interdemand: 1.0,
            costs: CostRates {
                setup_cost: 10.0,
                incremental_cost: 1.0,
                holding_cost: 1.0,
                backlog_cost: 2.0,
            },
            delivery_lag: DeliveryLag { min: 0.5, max: 0.5 },
        }
    }

    #[test]
    fn hand_traced_run() {
        // Every uniform is e^-0.7, so each interdemand gap is 0.7 months.
        let u = (-0.7f64).exp();
        let scenario = hand_scenario();
        let policy = ReorderPolicy::new(1, 3);
        let mut sim = InventorySimulation::new(&scenario, policy, Scripted::new(vec![u]))
            .expect("valid scenario")
            .with_trace();
        let result = sim.run();

        let kinds: Vec<EventKind> = sim.trace.iter().map(|r| r.event).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Evaluation,   // t=0.0, level 2, no order
                EventKind::Demand,       // t=0.7, 2 -> 1
                EventKind::Evaluation,   // t=1.0, level 1, no order
                EventKind::Demand,       // t=1.4, 1 -> 0
                EventKind::Report,       // t=2.0 wins the tie with evaluation
            ]
        );
        assert_eq!(sim.inventory.level, 0);

        // Area: 2 * 0.7 + 1 * 0.7 + 0 * 0.6 = 2.1
        assert!((sim.stats.area_inventory - 2.1).abs() < 1e-9);
        assert_eq!(sim.stats.area_shortage, 0.0);
        assert_eq!(result.avg_ordering_cost, 0.0);
        assert!((result.avg_holding_cost - 1.05).abs() < 1e-9);
        assert_eq!(result.avg_shortage_cost, 0.0);
    }

    #[test]
    fn reorder_schedules_arrival_and_charges_cost() {
        let u = (-0.7f64).exp();
        let mut scenario = hand_scenario();
        scenario.horizon_months = 3.0;
        let policy = ReorderPolicy::new(1, 3);
        let mut sim = InventorySimulation::new(&scenario, policy, Scripted::new(vec![u]))
            .expect("valid scenario")
            .with_trace();
        let result = sim.run();

        // Evaluation at t=2.0 sees level 0 (< 1), orders 3 units, arrival at 2.5.
        let arrival = sim
            .trace
            .iter()
            .find(|r| r.event == EventKind::OrderArrival)
            .expect("order should arrive");
        assert!((arrival.time - 2.5).abs() < 1e-9);
        assert_eq!(arrival.inventory_after - arrival.inventory_before, 3);
        assert!(!sim.clock.is_scheduled(EventKind::OrderArrival));

        assert!((result.avg_ordering_cost - (10.0 + 3.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn backlog_accrues_shortage() {
        let u = (-0.7f64).exp();
        let mut scenario = hand_scenario();
        scenario.initial_inventory = 0;
        // Never reorders.
        let policy = ReorderPolicy::new(-100, -100);
        let mut sim = InventorySimulation::new(&scenario, policy, Scripted::new(vec![u]))
            .expect("valid scenario");
        let result = sim.run();

        // Level 0 until 0.7, -1 until 1.4, -2 until 2.0: area 0.7 + 1.2 = 1.9
        assert!((sim.stats.area_shortage - 1.9).abs() < 1e-9);
        assert_eq!(sim.stats.area_inventory, 0.0);
        assert!((result.avg_shortage_cost - 2.0 * 1.9 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn batch_rejects_bad_scenario_before_running() {
        let mut scenario = ScenarioParameters::default();
        scenario.demand = DemandDistribution::new(vec![0.2, 0.6]);
        let err = run_policy_batch_seeded(&scenario, &[ReorderPolicy::new(20, 40)], 1)
            .expect_err("distribution is incomplete");
        assert!(matches!(err, ConfigError::DistributionDoesNotReachOne { .. }));

        let err = run_policy_batch_seeded(&ScenarioParameters::default(), &[], 1)
            .expect_err("no policies");
        assert_eq!(err, ConfigError::EmptyPolicyBatch);
    }

    #[test]
    fn zero_horizon_reports_immediately() {
        let scenario = ScenarioParameters {
            horizon_months: 0.0,
            ..ScenarioParameters::default()
        };
        let policy = ReorderPolicy::new(20, 40);
        let mut sim = InventorySimulation::new(&scenario, policy, SeededUniform::new(1))
            .expect("zero horizon is allowed")
            .with_trace();
        let result = sim.run();

        // Report and evaluation both sit at t = 0; the report wins.
        assert_eq!(sim.trace.len(), 1);
        assert_eq!(sim.trace[0].event, EventKind::Report);
        assert_eq!(result.avg_total_cost, 0.0);
        assert_eq!(result.avg_ordering_cost, 0.0);
        assert_eq!(result.avg_holding_cost, 0.0);
        assert_eq!(result.avg_shortage_cost, 0.0);

        let batch = run_policy_batch_seeded(&scenario, &[policy], 1)
            .expect("zero horizon is allowed");
        assert_eq!(batch[0].avg_total_cost, 0.0);
    }

    #[test]
    fn single_run_rejects_invalid_scenario() {
        let policy = ReorderPolicy::new(20, 40);
        let stalled = ScenarioParameters {
            mean_interdemand: 0.0,
            ..ScenarioParameters::default()
        };
        let err = InventorySimulation::new(&stalled, policy, SeededUniform::new(1))
            .err()
            .expect("zero mean inter-demand time must be rejected");
        assert_eq!(err, ConfigError::NonPositiveMeanInterdemand(0.0));

        let endless = ScenarioParameters {
            horizon_months: f64::NAN,
            ..ScenarioParameters::default()
        };
        assert!(matches!(
            InventorySimulation::new(&endless, policy, SeededUniform::new(1)),
            Err(ConfigError::InvalidHorizon(_))
        ));

        let inverted = ReorderPolicy::new(50, 30);
        let scenario = ScenarioParameters::default();
        assert!(matches!(
            InventorySimulation::new(&scenario, inverted, SeededUniform::new(1)),
            Err(ConfigError::InvalidPolicy { index: 0, .. })
        ));
    }

    #[test]
    fn traced_batch_matches_plain_batch() {
        let scenario = ScenarioParameters {
            horizon_months: 12.0,
            ..ScenarioParameters::default()
        };
        let policies = [ReorderPolicy::new(20, 40), ReorderPolicy::new(20, 80)];

        let plain = run_policy_batch(&scenario, &policies, &mut SeededUniform::new(4))
            .expect("valid batch");
        let traced = run_policy_batch_traced(&scenario, &policies, &mut SeededUniform::new(4))
            .expect("valid batch");

        assert_eq!(traced.len(), 2);
        for ((result, trace), expected) in traced.iter().zip(&plain) {
            assert_eq!(result, expected);
            assert_eq!(trace.last().map(|r| r.event), Some(EventKind::Report));
        }
    }

    #[test]
    fn equal_limits_do_not_fail() {
        let scenario = ScenarioParameters::default();
        let results = run_policy_batch_seeded(&scenario, &[ReorderPolicy::new(40, 40)], 9)
            .expect("valid batch");
        assert_eq!(results.len(), 1);
        assert!(results[0].avg_total_cost.is_finite());
    }
}
