// File: services/slotcheck_runner/src/main.rs
use clap::Parser;
use slotcheck_common::{
    init_with_level, log_result, parse_level, ApiClient, ExitStatusCode, SmokeError,
};
use slotcheck_config::{load_config, SmokeConfig};
use slotcheck_runner::cli::Args;
use slotcheck_runner::{run, Outcome, RunSettings};
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let code = match prepare(&args) {
        Ok(config) => {
            init_with_level(parse_level(&config.log_level));
            report(execute(&args, &config).await)
        }
        Err(err) => report(Err(err)),
    };

    ExitCode::from(code)
}

fn prepare(args: &Args) -> Result<SmokeConfig, SmokeError> {
    let config = load_config(args.config.as_deref())?;
    Ok(args.apply_to(config))
}

async fn execute(args: &Args, config: &SmokeConfig) -> Result<Outcome, SmokeError> {
    let api = ApiClient::new(&args.base_url, Duration::from_secs(config.timeout_secs))?;
    let settings = RunSettings::from_config(config, args.slot_id.clone());
    debug!("Run settings: {:?}", settings);
    log_result(run(&api, &settings).await, "Smoke run finished", "Smoke run failed")
}

/// Prints the verdict and returns the exit code for it.
fn report(result: Result<Outcome, SmokeError>) -> u8 {
    match result {
        Ok(outcome) => {
            match &outcome {
                Outcome::Passed { .. } => println!("E2E success"),
                Outcome::Skipped => println!("No free slot available; aborting (not a failure)"),
            }
            outcome.exit_code()
        }
        Err(err @ (SmokeError::Transport(_) | SmokeError::Config(_))) => {
            eprintln!("ERROR: {}", err);
            err.exit_code()
        }
        Err(err) => {
            println!("{}", err);
            if let Some(excerpt) = err.excerpt() {
                println!("{}", excerpt);
            }
            err.exit_code()
        }
    }
}
