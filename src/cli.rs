//! CLI argument parsing for the scenario orchestrator.
//!
//! The CLI is intentionally thin: each subcommand maps one-to-one onto a
//! sequence-table action, so routing stays obvious and the core resolution
//! logic can be reused without the binary.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "crucible",
    version,
    about = "Scenario orchestrator for infrastructure-testing workflows",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// High-level actions resolved against the scenario sequence table.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Destroy, create, converge, then check the scenario
    Check(ScenarioArgs),
    /// Create and converge the scenario
    Converge(ScenarioArgs),
    /// Resolve the scenario's dependencies
    Dependency(ScenarioArgs),
    /// Tear the scenario environment down
    Destroy(ScenarioArgs),
    /// Re-run convergence and fail on reported changes
    Idempotence(ScenarioArgs),
    /// Lint the scenario definition
    Lint(ScenarioArgs),
    /// Run the scenario's side-effect playbook
    SideEffect(ScenarioArgs),
    /// Syntax-check the scenario definition
    Syntax(ScenarioArgs),
    /// Full test sequence, bracketed by destroys
    Test(ScenarioArgs),
    /// Run the scenario's verifier
    Verify(ScenarioArgs),
}

impl Command {
    /// The action key matched against the sequence table.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Check(_) => "check",
            Self::Converge(_) => "converge",
            Self::Dependency(_) => "dependency",
            Self::Destroy(_) => "destroy",
            Self::Idempotence(_) => "idempotence",
            Self::Lint(_) => "lint",
            Self::SideEffect(_) => "side_effect",
            Self::Syntax(_) => "syntax",
            Self::Test(_) => "test",
            Self::Verify(_) => "verify",
        }
    }

    /// Scenario selection shared by every action.
    pub fn scenario_args(&self) -> &ScenarioArgs {
        match self {
            Self::Check(args)
            | Self::Converge(args)
            | Self::Dependency(args)
            | Self::Destroy(args)
            | Self::Idempotence(args)
            | Self::Lint(args)
            | Self::SideEffect(args)
            | Self::Syntax(args)
            | Self::Test(args)
            | Self::Verify(args) => args,
        }
    }
}

/// Scenario selection arguments.
#[derive(Parser, Debug)]
pub struct ScenarioArgs {
    /// Name of the scenario to target
    #[arg(long, default_value = "default")]
    pub scenario_name: String,

    /// Directory containing the scenario definition
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub scenario_dir: PathBuf,
}
