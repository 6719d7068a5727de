// crates/george-cli/src/main.rs
// ============================================================================
// Module: George CLI Entry Point
// Description: Command dispatcher for the Orchestrator, Runtime Gate,
//              Consistency Validator, and Self-Healing subcommands.
// Purpose: One `george` binary exposing the four components as subcommands,
//          matching each component's CLI contract in §6.
// Dependencies: clap, george-core, george-policy, george-runtime, george-gate,
//               george-consistency, george-selfheal, george-store, serde_json,
//               thiserror
// ============================================================================

//! # george
//!
//! `george orchestrate` drains `ops/events.jsonl` through the Orchestrator
//! pipeline and writes the system status snapshot; `george gate` runs one
//! Runtime Gate evaluation; `george validate` runs the Consistency
//! Validator; `george heal` runs one Self-Healing detect-and-propose cycle.
//! Every subcommand's exit code is part of its CLI contract — see each
//! command function's doc comment.

#![forbid(unsafe_code)]
#![allow(clippy::print_stdout, reason = "CLI summary output, not logging")]

mod sink;
mod status_writer;

use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use george_consistency::ValidationMode;
use george_core::Event;
use george_core::HealthState;
use george_core::interfaces::ArtifactStore;
use george_core::paths::PathConfig;
use george_core::time::Clock;
use george_core::time::SystemClock;
use george_policy::PolicyError;
use george_policy::load_agent_registry;
use george_policy::load_authority_matrix;
use george_policy::load_rule_table;
use george_runtime::OrchestrateOutcome;
use george_runtime::Orchestrator;
use george_runtime::RuntimeError;
use george_runtime::SimulatedExecutor;
use george_store::FsArtifactStore;
use serde_json::Value;
use thiserror::Error;

use crate::sink::WorkingTreeChangeSetSink;
use crate::status_writer::build_system_status;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "george", about = "The George governance runtime")]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// The four components, one subcommand each.
#[derive(Subcommand, Debug)]
enum Command {
    /// Drains `ops/events.jsonl` through the Orchestrator pipeline.
    Orchestrate,
    /// Runs one Runtime Gate evaluation against a decision and policy.
    Gate {
        /// Path to the decision JSON to evaluate.
        decision: PathBuf,
        /// Path to the gate policy YAML.
        policy: PathBuf,
        /// Where to write the gate result (defaults to the canonical path).
        output: Option<PathBuf>,
    },
    /// Runs the Consistency Validator against the current `ops/` tree.
    Validate {
        /// Path to the consistency rule file.
        #[arg(long)]
        rules: PathBuf,
        /// Where to write the consistency report.
        #[arg(long)]
        report: PathBuf,
        /// The run mode this invocation is made under.
        #[arg(long, value_enum)]
        mode: ModeArg,
    },
    /// Runs one Self-Healing detect-and-propose cycle.
    Heal,
}

/// CLI-facing mirror of [`ValidationMode`] (clap's `ValueEnum` cannot be
/// derived on a type from another crate).
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Run from a developer's machine.
    Local,
    /// Run inside continuous integration.
    Ci,
}

impl From<ModeArg> for ValidationMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Local => Self::Local,
            ModeArg::Ci => Self::Ci,
        }
    }
}

/// Errors surfaced by any `george` subcommand before it can report its own
/// exit code.
#[derive(Debug, Error)]
enum CliError {
    /// A policy or rule document failed to load.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// The Orchestrator pipeline failed to persist an artifact.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// The Runtime Gate failed to run.
    #[error(transparent)]
    Gate(#[from] george_gate::GateError),
    /// The Consistency Validator failed to run.
    #[error(transparent)]
    Consistency(#[from] george_consistency::ConsistencyError),
    /// The Self-Healing cycle failed to run.
    #[error(transparent)]
    SelfHeal(#[from] george_selfheal::SelfHealError),
    /// `ops/events.jsonl` could not be read.
    #[error("failed to read {path}: {source}")]
    ReadEvents {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A line in `ops/events.jsonl` was not a valid event.
    #[error("invalid event on line {line}: {source}")]
    ParseEvent {
        /// The 1-indexed line number.
        line: usize,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The system status snapshot could not be encoded.
    #[error("failed to encode system status: {0}")]
    EncodeStatus(serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("george: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, CliError> {
    match command {
        Command::Orchestrate => command_orchestrate(),
        Command::Gate { decision, policy, output } => command_gate(&decision, &policy, output.as_deref()),
        Command::Validate { rules, report, mode } => command_validate(&rules, &report, mode.into()),
        Command::Heal => command_heal(),
    }
}

fn read_events(path: &Path) -> Result<Vec<Event>, CliError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|source| CliError::ReadEvents { path: path.display().to_string(), source })?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|source| CliError::ParseEvent { line: index + 1, source })
        })
        .collect()
}

fn initial_health(paths: &PathConfig) -> HealthState {
    std::fs::read_to_string(&paths.latest_decision)
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .and_then(|value| value.get("health_context").cloned())
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

fn emergency_lock_engaged(path: &Path) -> bool {
    std::fs::read(path)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
        .and_then(|value| value.get("locked").and_then(Value::as_bool))
        .unwrap_or(false)
}

/// Runs the Orchestrator over every event in `ops/events.jsonl`, then writes
/// `ops/reports/system_status.json`. Always exits `0`; a policy denial is a
/// `blocked` decision, not a process failure (§4.6).
fn command_orchestrate() -> Result<ExitCode, CliError> {
    let paths = PathConfig::from_env();
    let store = FsArtifactStore::new();
    let executor = SimulatedExecutor;
    let rules = load_rule_table(&paths.rules)?;
    let agents = load_agent_registry(&paths.autonomy)?;
    let authority = load_authority_matrix(&paths.authority_matrix)?;
    let events = read_events(&paths.events)?;

    let mut health = initial_health(&paths);
    let locked = emergency_lock_engaged(&paths.emergency_lock);
    let now = SystemClock.now();
    let orchestrator = Orchestrator::new(&store, &executor);

    let mut processed = 0usize;
    let mut halted = false;
    for event in &events {
        match orchestrator.orchestrate(event, &rules, &agents, &authority, &paths, health.clone(), now)? {
            OrchestrateOutcome::Processed { health: updated, .. } => {
                health = updated;
                processed += 1;
            }
            OrchestrateOutcome::EmergencyLocked => {
                halted = true;
                break;
            }
        }
    }

    let status = build_system_status(&paths, &agents, &health, locked || halted, now);
    let status_json = serde_json::to_value(&status).map_err(CliError::EncodeStatus)?;
    store.write_canonical(&paths.system_status, &status_json)?;

    println!(
        "processed {processed}/{total} events{suffix}",
        total = events.len(),
        suffix = if halted { " (halted: emergency lock engaged)" } else { "" },
    );
    Ok(ExitCode::SUCCESS)
}

/// Runs one Runtime Gate evaluation. Exit code is the verdict's (`ALLOW`=0,
/// `ESCALATE`=10, `BLOCK`=20), per §6.
fn command_gate(decision: &Path, policy: &Path, output: Option<&Path>) -> Result<ExitCode, CliError> {
    let paths = PathConfig::from_env();
    let output = output.unwrap_or(&paths.gate_result);
    let store = FsArtifactStore::new();
    let result = george_gate::run(&store, decision, policy, output)?;
    println!("verdict={verdict:?} reasons={reasons:?}", verdict = result.verdict, reasons = result.reasons);
    #[allow(
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        reason = "exit_code() returns a small non-negative constant"
    )]
    let code = result.verdict.exit_code() as u8;
    Ok(ExitCode::from(code))
}

/// Runs the Consistency Validator. Exit code is `2` if any finding is
/// `FAIL`-level, else `0`, per §6.
fn command_validate(rules: &Path, report: &Path, mode: ValidationMode) -> Result<ExitCode, CliError> {
    let paths = PathConfig::from_env();
    let store = FsArtifactStore::new();
    let now = SystemClock.now();
    let result = george_consistency::run(&store, &paths, rules, report, mode, now)?;
    println!(
        "{findings} findings, exit_code={code}",
        findings = result.findings.len(),
        code = result.exit_code(),
    );
    #[allow(
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        reason = "exit_code() returns a small non-negative constant"
    )]
    let code = result.exit_code() as u8;
    Ok(ExitCode::from(code))
}

/// Runs one Self-Healing cycle. Always exits `0`; prints
/// `regression=true|false` and the proposed branch name, per §6.
fn command_heal() -> Result<ExitCode, CliError> {
    let paths = PathConfig::from_env();
    let store = FsArtifactStore::new();
    let sink = WorkingTreeChangeSetSink::new(Path::new("."));
    let now = SystemClock.now();
    let outcome = george_selfheal::run(&store, &sink, &paths, now)?;

    match outcome.branch {
        Some(branch) => println!(
            "regression=true detector={detector} playbook={playbook} branch={branch}",
            detector = outcome.detector.unwrap_or("unknown"),
            playbook = outcome.playbook.unwrap_or("unknown"),
        ),
        None => println!("regression=false"),
    }
    Ok(ExitCode::SUCCESS)
}
