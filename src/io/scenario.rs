// src/io/scenario.rs

use crate::error::InputError;
use crate::simulation::config::{CostRates, DeliveryLag, DemandDistribution, ScenarioParameters};
use crate::strategy::policy::ReorderPolicy;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A parsed scenario file: shared parameters plus the policies to compare.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioFile {
    pub scenario: ScenarioParameters,
    pub policies: Vec<ReorderPolicy>,
}

/// Reads and validates a scenario file.
pub fn read_scenario_file(path: impl AsRef<Path>) -> Result<ScenarioFile, InputError> {
    let text = fs::read_to_string(path)?;
    parse_scenario(&text)
}

/// Parses the whitespace-separated scenario format:
///
/// ```text
/// initial_inventory horizon_months num_policies
/// num_demand_sizes mean_interdemand
/// setup_cost incremental_cost holding_cost backlog_cost
/// min_lag max_lag
/// p1 p2 ... pn            (cumulative)
/// s S                     (num_policies lines)
/// ```
///
/// Blank lines are ignored. The result is validated before it is returned.
pub fn parse_scenario(text: &str) -> Result<ScenarioFile, InputError> {
    let mut lines = Lines::new(text);

    let (line, header) = lines.next("initial inventory, horizon and policy count")?;
    let [initial, horizon, count] = fixed::<3>(line, &header)?;
    let initial_inventory = parse(line, "initial inventory", initial)?;
    let horizon_months = parse(line, "horizon", horizon)?;
    let num_policies: usize = parse(line, "policy count", count)?;

    let (line, demand) = lines.next("demand size count and mean inter-demand time")?;
    let [sizes, mean] = fixed::<2>(line, &demand)?;
    let num_sizes: usize = parse(line, "demand size count", sizes)?;
    let mean_interdemand = parse(line, "mean inter-demand time", mean)?;

    let (line, cost_tokens) = lines.next("setup, incremental, holding and backlog costs")?;
    let [k, i, h, pi] = fixed::<4>(line, &cost_tokens)?;
    let costs = CostRates {
        setup_cost: parse(line, "setup cost", k)?,
        incremental_cost: parse(line, "incremental cost", i)?,
        holding_cost: parse(line, "holding cost", h)?,
        backlog_cost: parse(line, "backlog cost", pi)?,
    };

    let (line, lag) = lines.next("delivery lag range")?;
    let [min, max] = fixed::<2>(line, &lag)?;
    let delivery_lag = DeliveryLag {
        min: parse(line, "minimum lag", min)?,
        max: parse(line, "maximum lag", max)?,
    };

    let (line, probs) = lines.next("cumulative demand distribution")?;
    if probs.len() != num_sizes {
        return Err(InputError::WrongArity {
            line,
            expected: num_sizes,
            found: probs.len(),
        });
    }
    let cumulative = probs
        .iter()
        .map(|token| parse(line, "probability", token))
        .collect::<Result<Vec<f64>, _>>()?;

    let mut policies = Vec::with_capacity(num_policies);
    for _ in 0..num_policies {
        let (line, tokens) = lines.next("policy 's S'")?;
        let [s, big_s] = fixed::<2>(line, &tokens)?;
        policies.push(ReorderPolicy::new(
            parse(line, "reorder point", s)?,
            parse(line, "order-up-to level", big_s)?,
        ));
    }

    let scenario = ScenarioParameters {
        initial_inventory,
        horizon_months,
        demand: DemandDistribution::new(cumulative),
        mean_interdemand,
        costs,
        delivery_lag,
    };
    scenario.validate()?;
    scenario.validate_policies(&policies)?;

    Ok(ScenarioFile { scenario, policies })
}

struct Lines<'t> {
    inner: std::iter::Enumerate<std::str::Lines<'t>>,
    consumed: usize,
}

impl<'t> Lines<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            consumed: 0,
        }
    }

    /// Next non-blank line as (1-based line number, tokens).
    fn next(&mut self, expected: &'static str) -> Result<(usize, Vec<&'t str>), InputError> {
        for (index, raw) in self.inner.by_ref() {
            self.consumed = index + 1;
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            if !tokens.is_empty() {
                return Ok((self.consumed, tokens));
            }
        }
        Err(InputError::MissingLine {
            line: self.consumed + 1,
            expected,
        })
    }
}

fn fixed<const N: usize>(line: usize, tokens: &[&str]) -> Result<[String; N], InputError> {
    if tokens.len() != N {
        return Err(InputError::WrongArity {
            line,
            expected: N,
            found: tokens.len(),
        });
    }
    Ok(std::array::from_fn(|i| tokens[i].to_string()))
}

fn parse<T: FromStr>(
    line: usize,
    field: &'static str,
    token: impl AsRef<str>,
) -> Result<T, InputError> {
    let token = token.as_ref();
    token.parse().map_err(|_| InputError::BadToken {
        line,
        field,
        token: token.to_string(),
    })
}
