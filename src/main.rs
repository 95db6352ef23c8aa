use inventory_sim::io::{reporting, scenario};
use inventory_sim::{run_policy_batch, run_policy_batch_traced, PolicyResult, SeededUniform};
use std::env;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: inventory-sim <scenario.txt> [--seed N] [--csv results.csv] [--trace DIR]";

struct Args {
    scenario_path: String,
    seed: u64,
    csv_path: Option<String>,
    trace_dir: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let mut scenario_path = None;
    let mut seed = 1;
    let mut csv_path = None;
    let mut trace_dir = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed '{value}'"))?;
            }
            "--csv" => csv_path = Some(args.next().ok_or("--csv needs a path")?),
            "--trace" => trace_dir = Some(args.next().ok_or("--trace needs a directory")?),
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ if scenario_path.is_none() => scenario_path = Some(arg),
            _ => return Err(format!("unexpected argument '{arg}'\n{USAGE}")),
        }
    }

    Ok(Args {
        scenario_path: scenario_path.ok_or(USAGE)?,
        seed,
        csv_path,
        trace_dir,
    })
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_env("INVENTORY_SIM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    // 1. READ SCENARIO
    let file = match scenario::read_scenario_file(&args.scenario_path) {
        Ok(file) => file,
        Err(e) => {
            error!(path = %args.scenario_path, "{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(policies = file.policies.len(), seed = args.seed, "scenario loaded");

    // 2. RUN ALL POLICIES
    let mut source = SeededUniform::new(args.seed);
    let batch = if args.trace_dir.is_some() {
        run_policy_batch_traced(&file.scenario, &file.policies, &mut source)
    } else {
        run_policy_batch(&file.scenario, &file.policies, &mut source)
            .map(|results| results.into_iter().map(|r| (r, Vec::new())).collect())
    };
    let runs = match batch {
        Ok(runs) => runs,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let results: Vec<PolicyResult> = runs.iter().map(|(result, _)| *result).collect();

    // 3. REPORT
    print!("{}", reporting::render_report(&file.scenario, &results));

    if let Some(path) = args.csv_path {
        if let Err(e) = reporting::write_results_csv(&path, &results) {
            error!(%path, "{e}");
            return ExitCode::FAILURE;
        }
        info!(%path, rows = results.len(), "results exported");
    }

    if let Some(dir) = args.trace_dir {
        match reporting::write_trace_dir(&dir, &runs) {
            Ok(files) => info!(%dir, files, "event traces exported"),
            Err(e) => {
                error!(%dir, "{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
