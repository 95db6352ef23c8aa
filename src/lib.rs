//! Periodic-review (s, S) inventory simulation using next-event time advance.
//!
//! [`run_policy_batch`] evaluates a list of reorder policies against one
//! scenario and returns, per policy, the average monthly ordering, holding
//! and shortage cost over the horizon.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{ConfigError, InputError};
pub use simulation::clock::{EventClock, EventKind};
pub use simulation::config::{CostRates, DeliveryLag, DemandDistribution, ScenarioParameters};
pub use simulation::engine::{
    run_policy_batch, run_policy_batch_seeded, run_policy_batch_traced, EventRecord,
    InventorySimulation, PolicyResult,
};
pub use simulation::variates::{SeededUniform, UniformSource};
pub use strategy::policy::{OrderPolicy, ReorderPolicy};
