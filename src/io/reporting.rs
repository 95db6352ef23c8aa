// src/io/reporting.rs

use crate::error::InputError;
use crate::simulation::config::ScenarioParameters;
use crate::simulation::engine::{EventRecord, PolicyResult};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

const RULE_WIDTH: usize = 98;

/// Renders the scenario header and one table row per policy.
pub fn render_report(scenario: &ScenarioParameters, results: &[PolicyResult]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, scenario, results);
    out
}

fn write_report(
    out: &mut String,
    scenario: &ScenarioParameters,
    results: &[PolicyResult],
) -> std::fmt::Result {
    writeln!(out, "------Single-Product Inventory System------\n")?;
    writeln!(out, "Initial inventory level: {} items\n", scenario.initial_inventory)?;
    writeln!(out, "Number of demand sizes: {}\n", scenario.demand.num_sizes())?;

    write!(out, "Distribution function of demand sizes: ")?;
    for p in scenario.demand.cumulative() {
        write!(out, "{p:.2} ")?;
    }
    writeln!(out, "\n")?;

    writeln!(out, "Mean inter-demand time: {:.2} months\n", scenario.mean_interdemand)?;
    writeln!(
        out,
        "Delivery lag range: {:.2} to {:.2} months\n",
        scenario.delivery_lag.min, scenario.delivery_lag.max
    )?;
    writeln!(out, "Length of simulation: {} months\n", scenario.horizon_months)?;
    writeln!(out, "Costs:")?;
    writeln!(out, "K = {:.2}", scenario.costs.setup_cost)?;
    writeln!(out, "i = {:.2}", scenario.costs.incremental_cost)?;
    writeln!(out, "h = {:.2}", scenario.costs.holding_cost)?;
    writeln!(out, "pi = {:.2}\n", scenario.costs.backlog_cost)?;
    writeln!(out, "Number of policies: {}\n", results.len())?;

    writeln!(out, "Policies:")?;
    writeln!(out, "{:-<RULE_WIDTH$}", "")?;
    writeln!(
        out,
        concat!(
            " Policy        Avg_total_cost     Avg_ordering_cost",
            "      Avg_holding_cost     Avg_shortage_cost"
        )
    )?;
    writeln!(out, "{:-<RULE_WIDTH$}", "")?;
    for r in results {
        writeln!(
            out,
            "({:2}, {:3}) {:>17.2}{:>23.2}{:>24.2}{:>20.2}",
            r.reorder_point,
            r.order_up_to,
            r.avg_total_cost,
            r.avg_ordering_cost,
            r.avg_holding_cost,
            r.avg_shortage_cost
        )?;
    }
    writeln!(out, "{:-<RULE_WIDTH$}", "")
}

/// Writes the policy results to a CSV file.
pub fn write_results_csv(
    path: impl AsRef<Path>,
    results: &[PolicyResult],
) -> Result<(), InputError> {
    write_csv(csv::Writer::from_path(path)?, results)
}

/// Writes an event trace to a CSV file.
pub fn write_trace_csv(
    path: impl AsRef<Path>,
    trace: &[EventRecord],
) -> Result<(), InputError> {
    write_csv(csv::Writer::from_path(path)?, trace)
}

/// Writes one trace CSV per policy into `dir`, named by batch position and
/// policy. Returns the number of files written.
pub fn write_trace_dir(
    dir: impl AsRef<Path>,
    runs: &[(PolicyResult, Vec<EventRecord>)],
) -> Result<usize, InputError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    for (index, (result, trace)) in runs.iter().enumerate() {
        let name = format!(
            "policy_{index}_{}_{}.csv",
            result.reorder_point, result.order_up_to
        );
        write_trace_csv(dir.join(name), trace)?;
    }
    Ok(runs.len())
}

fn write_csv<W: io::Write, T: Serialize>(
    mut wtr: csv::Writer<W>,
    rows: &[T],
) -> Result<(), InputError> {
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
