// crates/randomuser-conformance-cli/src/main.rs
// ============================================================================
// Module: Random User Conformance CLI Entry Point
// Description: Command dispatcher for listing, inspecting, and running checks.
// Purpose: Run the conformance suite against a live endpoint and report.
// Dependencies: clap, randomuser-conformance-client, randomuser-conformance-core,
//               serde_jcs, tokio, tracing-subscriber
// ============================================================================

//! ## Overview
//! `randomuser-conformance` lists the scenario suite, prints catalog entries
//! and parsed password policies, and runs the suite with bounded parallelism.
//! Output goes to stdout; diagnostics go to stderr through `tracing`.
//! The process exits non-zero when any scenario fails.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub(crate) mod report;
pub(crate) mod runner;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use randomuser_conformance_client::ConformanceConfig;
use randomuser_conformance_client::HttpTransport;
use randomuser_conformance_core::Catalog;
use randomuser_conformance_core::ParamValue;
use randomuser_conformance_core::ParameterSet;
use randomuser_conformance_core::PasswordPolicy;
use randomuser_conformance_core::Rule;
use randomuser_conformance_core::Scenario;
use randomuser_conformance_core::ScenarioOutcome;
use randomuser_conformance_core::serialize;
use serde_json::json;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::report::RunReport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the log filter directive.
const LOG_ENV_VAR: &str = "RANDOMUSER_CONFORMANCE_LOG";
/// Log filter used when the environment does not set one.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "randomuser-conformance", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List scenario names in suite order.
    List,
    /// Print the query parameters a catalog rule sends (every rule when omitted).
    Params(ParamsCommand),
    /// Parse a password policy and print its canonical form.
    Policy(PolicyCommand),
    /// Run scenarios against the configured endpoint.
    Run(RunCommand),
}

/// Arguments for `params`.
#[derive(Args, Debug)]
struct ParamsCommand {
    /// Catalog rule name, e.g. `nat_multi`.
    rule: Option<String>,
    /// Extra `key=value` pairs merged on top of the catalog entry.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
}

/// Arguments for `policy`.
#[derive(Args, Debug)]
struct PolicyCommand {
    /// Password policy, e.g. `upper,lower,1-16`.
    policy: String,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Config file path (defaults to `RANDOMUSER_CONFORMANCE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Base URL override.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Run only the named scenarios (repeatable).
    #[arg(long, value_name = "NAME")]
    only: Vec<String>,
    /// Directory for `report.json`, `report.md`, and `transcript.json`.
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,
    /// Maximum scenarios in flight.
    #[arg(long, value_name = "N")]
    parallelism: Option<usize>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::List => command_list(),
        Commands::Params(command) => command_params(&command),
        Commands::Policy(command) => command_policy(&command),
        Commands::Run(command) => command_run(command).await,
    }
}

/// Installs the stderr subscriber, filtered by `RANDOMUSER_CONFORMANCE_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Prints scenario names in suite order.
fn command_list() -> CliResult<ExitCode> {
    for scenario in Scenario::standard_suite() {
        write_stdout_line(&scenario.name()).map_err(|err| output_error("stdout", &err))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints the serialized parameters of one or every catalog rule as
/// canonical JSON, one line per rule.
fn command_params(command: &ParamsCommand) -> CliResult<ExitCode> {
    let rule = command
        .rule
        .as_deref()
        .map(|raw| raw.parse::<Rule>().map_err(CliError::new))
        .transpose()?;
    let overrides = parse_set_args(&command.set)?;
    for line in params_lines(&Catalog::standard(), rule, &overrides)? {
        write_stdout_line(&line).map_err(|err| output_error("stdout", &err))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Parses a password policy and prints its canonical form and bounds.
fn command_policy(command: &PolicyCommand) -> CliResult<ExitCode> {
    let policy = PasswordPolicy::parse(&command.policy)
        .map_err(|err| CliError::new(format!("invalid password policy: {err}")))?;
    let (min, max) = policy.length().bounds();
    let classes: Vec<&str> = policy.classes().iter().map(|class| class.as_str()).collect();
    let output = json!({
        "policy": policy.to_string(),
        "classes": classes,
        "min_length": min,
        "max_length": max,
    });
    let text = serde_jcs::to_string(&output)
        .map_err(|err| CliError::new(format!("failed to serialize policy: {err}")))?;
    write_stdout_line(&text).map_err(|err| output_error("stdout", &err))?;
    Ok(ExitCode::SUCCESS)
}

/// Runs the selected scenarios and writes optional reports.
async fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let mut config = ConformanceConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    if let Some(base_url) = command.base_url {
        config.target.base_url = base_url;
    }
    if let Some(parallelism) = command.parallelism {
        config.run.parallelism = parallelism;
    }
    config.validate().map_err(|err| CliError::new(err.to_string()))?;

    let scenarios = select_scenarios(&command.only)?;
    let catalog = Arc::new(config.catalog().map_err(|err| CliError::new(err.to_string()))?);
    let transport_config =
        config.transport_config().map_err(|err| CliError::new(err.to_string()))?;
    let transport = Arc::new(
        HttpTransport::new(transport_config).map_err(|err| CliError::new(err.to_string()))?,
    );
    tracing::info!(
        base_url = %transport.config().base_url,
        scenarios = scenarios.len(),
        parallelism = config.run.parallelism,
        "starting conformance run"
    );

    let outcomes = runner::run_suite(
        Arc::clone(&transport),
        catalog,
        &scenarios,
        config.run.parallelism,
    )
    .await
    .map_err(CliError::new)?;

    for outcome in &outcomes {
        write_stdout_line(&outcome_line(outcome)).map_err(|err| output_error("stdout", &err))?;
    }
    let report = RunReport::new(transport.config().base_url.as_str(), outcomes);
    write_stdout_line(&report.summary_line()).map_err(|err| output_error("stdout", &err))?;

    if let Some(dir) = command.report_dir {
        report::write_reports(&dir, &report, &transport.transcript()).map_err(CliError::new)?;
    }
    Ok(if report.failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves `--only` names, defaulting to the standard suite.
fn select_scenarios(only: &[String]) -> CliResult<Vec<Scenario>> {
    if only.is_empty() {
        return Ok(Scenario::standard_suite());
    }
    let mut selected: Vec<Scenario> = Vec::with_capacity(only.len());
    for name in only {
        let scenario: Scenario = name.parse().map_err(CliError::new)?;
        if !selected.contains(&scenario) {
            selected.push(scenario);
        }
    }
    Ok(selected)
}

/// Renders `{"rule","query"}` lines for `rule`, or for every catalog entry
/// in rule order when `rule` is `None`.
fn params_lines(
    catalog: &Catalog,
    rule: Option<Rule>,
    overrides: &ParameterSet,
) -> CliResult<Vec<String>> {
    let rules: Vec<Rule> = match rule {
        Some(rule) => vec![rule],
        None => catalog.entries().map(|(rule, _)| rule).collect(),
    };
    rules
        .into_iter()
        .map(|rule| {
            let params = catalog.build_params(rule, Some(overrides));
            let output = json!({
                "rule": rule.as_str(),
                "query": serialize(&params),
            });
            serde_jcs::to_string(&output)
                .map_err(|err| CliError::new(format!("failed to serialize parameters: {err}")))
        })
        .collect()
}

/// Parses `key=value` arguments into a parameter set.
fn parse_set_args(args: &[String]) -> CliResult<ParameterSet> {
    let mut params = ParameterSet::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| CliError::new(format!("expected KEY=VALUE, got `{arg}`")))?;
        params.insert(key.trim(), parse_param_value(value));
    }
    Ok(params)
}

/// Interprets a raw value as a boolean, unsigned integer, or text.
fn parse_param_value(raw: &str) -> ParamValue {
    match raw {
        "true" => ParamValue::Bool(true),
        "false" => ParamValue::Bool(false),
        _ => raw.parse::<u64>().map_or_else(|_| ParamValue::from(raw), ParamValue::Unsigned),
    }
}

/// Formats one scenario outcome for stdout.
fn outcome_line(outcome: &ScenarioOutcome) -> String {
    match &outcome.failure {
        None => format!("PASS {}", outcome.name),
        Some(failure) => {
            let headline = failure.message.lines().next().unwrap_or_default();
            format!("FAIL {} [{}] {headline}", outcome.name, failure.kind.as_str())
        }
    }
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream error.
fn output_error(stream: &str, error: &std::io::Error) -> CliError {
    CliError::new(format!("failed to write {stream}: {error}"))
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
