//! Reproducibility of policy runs.
//!
//! A run is a pure function of the scenario, the policy and the uniform
//! stream, so replaying the same seed must give bit-identical results.

use inventory_sim::{
    run_policy_batch, run_policy_batch_seeded, EventKind, InventorySimulation, PolicyResult,
    ReorderPolicy, ScenarioParameters, SeededUniform,
};

fn bits(r: &PolicyResult) -> [u64; 4] {
    [
        r.avg_total_cost.to_bits(),
        r.avg_ordering_cost.to_bits(),
        r.avg_holding_cost.to_bits(),
        r.avg_shortage_cost.to_bits(),
    ]
}

#[test]
fn same_seed_gives_identical_results() {
    let scenario = ScenarioParameters::default();
    let policies = [ReorderPolicy::new(20, 40), ReorderPolicy::new(40, 100)];

    let first = run_policy_batch_seeded(&scenario, &policies, 12345).expect("valid batch");
    let second = run_policy_batch_seeded(&scenario, &policies, 12345).expect("valid batch");

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(bits(a), bits(b));
    }
}

#[test]
fn independent_sources_with_same_seed_agree() {
    let scenario = ScenarioParameters::default();
    let policy = ReorderPolicy::new(20, 60);

    let copy = scenario.clone();
    let a = InventorySimulation::new(&scenario, policy, SeededUniform::new(99))
        .expect("valid scenario")
        .run();
    let b = InventorySimulation::new(&copy, policy, SeededUniform::new(99))
        .expect("valid scenario")
        .run();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn different_seeds_usually_differ() {
    let scenario = ScenarioParameters::default();
    let policies = [ReorderPolicy::new(20, 40)];

    let a = run_policy_batch_seeded(&scenario, &policies, 1).expect("valid batch");
    let b = run_policy_batch_seeded(&scenario, &policies, 2).expect("valid batch");
    assert_ne!(bits(&a[0]), bits(&b[0]));
}

#[test]
fn batch_matches_individual_runs_on_a_shared_stream() {
    let scenario = ScenarioParameters::default();
    let policies = [ReorderPolicy::new(20, 40), ReorderPolicy::new(20, 80)];

    let mut source = SeededUniform::new(7);
    let batch = run_policy_batch(&scenario, &policies, &mut source).expect("valid batch");

    let mut replay = SeededUniform::new(7);
    let first = InventorySimulation::new(&scenario, policies[0], &mut replay)
        .expect("valid scenario")
        .run();
    let second = InventorySimulation::new(&scenario, policies[1], &mut replay)
        .expect("valid scenario")
        .run();

    assert_eq!(bits(&batch[0]), bits(&first));
    assert_eq!(bits(&batch[1]), bits(&second));
}

#[test]
fn longer_horizon_extends_the_same_trajectory() {
    let short = ScenarioParameters {
        horizon_months: 12.0,
        ..ScenarioParameters::default()
    };
    let long = ScenarioParameters {
        horizon_months: 24.0,
        ..ScenarioParameters::default()
    };
    let policy = ReorderPolicy::new(20, 40);

    let mut a = InventorySimulation::new(&short, policy, SeededUniform::new(5))
        .expect("valid scenario")
        .with_trace();
    a.run();
    let mut b = InventorySimulation::new(&long, policy, SeededUniform::new(5))
        .expect("valid scenario")
        .with_trace();
    b.run();

    let prefix_a: Vec<_> = a.trace.iter().filter(|r| r.time < 12.0).collect();
    let prefix_b: Vec<_> = b.trace.iter().filter(|r| r.time < 12.0).collect();
    assert!(!prefix_a.is_empty());
    assert_eq!(prefix_a, prefix_b);

    // The short run ends on its report at exactly the horizon.
    let last = a.trace.last().expect("trace is not empty");
    assert_eq!(last.event, EventKind::Report);
    assert_eq!(last.time, 12.0);
}
