//! Scenario identity and sequence resolution.
//!
//! A scenario resolves the configured subcommand into a fixed, ordered list
//! of steps and owns the scenario-local ephemeral directory. Resolution is
//! pure; the only filesystem touch is ensuring the ephemeral directory
//! exists before any sequence is consumed.
use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Directory name appended to a scenario directory for run-time state.
pub const EPHEMERAL_DIR_NAME: &str = ".crucible";

/// One named unit of work within a scenario's plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Check,
    Converge,
    Create,
    Dependency,
    Destroy,
    Idempotence,
    Lint,
    SideEffect,
    Syntax,
    Verify,
}

impl Step {
    /// Stable string form used for dispatch and progress reporting.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Converge => "converge",
            Self::Create => "create",
            Self::Dependency => "dependency",
            Self::Destroy => "destroy",
            Self::Idempotence => "idempotence",
            Self::Lint => "lint",
            Self::SideEffect => "side_effect",
            Self::Syntax => "syntax",
            Self::Verify => "verify",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CHECK_SEQUENCE: &[Step] = &[
    Step::Destroy,
    Step::Create,
    Step::Converge,
    Step::Check,
    Step::Destroy,
];
const CONVERGE_SEQUENCE: &[Step] = &[Step::Create, Step::Converge];
const DEPENDENCY_SEQUENCE: &[Step] = &[Step::Dependency];
const DESTROY_SEQUENCE: &[Step] = &[Step::Destroy];
const SIDE_EFFECT_SEQUENCE: &[Step] = &[Step::SideEffect];
const IDEMPOTENCE_SEQUENCE: &[Step] = &[Step::Idempotence];
const LINT_SEQUENCE: &[Step] = &[Step::Lint];
const SYNTAX_SEQUENCE: &[Step] = &[Step::Syntax];
// The full test run is bracketed by destroys so it always re-enters a clean
// environment and leaves one behind.
const TEST_SEQUENCE: &[Step] = &[
    Step::Destroy,
    Step::Dependency,
    Step::Syntax,
    Step::Create,
    Step::Converge,
    Step::Idempotence,
    Step::Lint,
    Step::SideEffect,
    Step::Verify,
    Step::Destroy,
];
const VERIFY_SEQUENCE: &[Step] = &[Step::Verify];

/// High-level action parsed from the configured subcommand identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Check,
    Converge,
    Dependency,
    Destroy,
    Idempotence,
    Lint,
    SideEffect,
    Syntax,
    Test,
    Verify,
    /// Subcommand with no scenario steps; resolves to an empty sequence.
    Unknown,
}

impl Action {
    /// Parse the final `.`-separated component of a namespaced subcommand
    /// identifier, e.g. `crucible.command.test`. Matching is case-sensitive;
    /// anything unrecognized maps to [`Action::Unknown`].
    pub fn parse(subcommand: &str) -> Self {
        let key = subcommand.rsplit('.').next().unwrap_or(subcommand);
        match key {
            "check" => Self::Check,
            "converge" => Self::Converge,
            "dependency" => Self::Dependency,
            "destroy" => Self::Destroy,
            "idempotence" => Self::Idempotence,
            "lint" => Self::Lint,
            "side_effect" => Self::SideEffect,
            "syntax" => Self::Syntax,
            "test" => Self::Test,
            "verify" => Self::Verify,
            _ => Self::Unknown,
        }
    }

    /// The fixed step ordering for this action. Order is load-bearing and
    /// must never be rearranged by callers.
    pub fn steps(self) -> &'static [Step] {
        match self {
            Self::Check => CHECK_SEQUENCE,
            Self::Converge => CONVERGE_SEQUENCE,
            Self::Dependency => DEPENDENCY_SEQUENCE,
            Self::Destroy => DESTROY_SEQUENCE,
            Self::Idempotence => IDEMPOTENCE_SEQUENCE,
            Self::Lint => LINT_SEQUENCE,
            Self::SideEffect => SIDE_EFFECT_SEQUENCE,
            Self::Syntax => SYNTAX_SEQUENCE,
            Self::Test => TEST_SEQUENCE,
            Self::Verify => VERIFY_SEQUENCE,
            Self::Unknown => &[],
        }
    }
}

/// Join the fixed tool-namespace suffix onto a scenario directory.
pub fn ephemeral_directory(directory: &Path) -> PathBuf {
    directory.join(EPHEMERAL_DIR_NAME)
}

/// A named environment definition and its resolved execution plan.
#[derive(Debug)]
pub struct Scenario {
    name: String,
    directory: PathBuf,
    ephemeral_directory: PathBuf,
    action: Action,
}

impl Scenario {
    /// Derive scenario state from configuration without touching the
    /// filesystem. Callers must ensure the ephemeral directory exists
    /// before consuming any sequence; prefer [`Scenario::create`].
    pub fn new(config: &Config) -> Self {
        Self {
            name: config.scenario_name.clone(),
            directory: config.scenario_directory.clone(),
            ephemeral_directory: ephemeral_directory(&config.scenario_directory),
            action: Action::parse(&config.subcommand),
        }
    }

    /// Build a scenario and ensure its ephemeral directory exists.
    pub fn create(config: &Config) -> Result<Self> {
        let scenario = Self::new(config);
        scenario.ensure_ephemeral_directory()?;
        Ok(scenario)
    }

    /// Human-readable scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base directory containing the scenario definition.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Derived `<directory>/.crucible` working directory.
    pub fn ephemeral_directory(&self) -> &Path {
        &self.ephemeral_directory
    }

    /// The action parsed from the configured subcommand.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Create the ephemeral directory and any missing parents.
    ///
    /// Idempotent: a pre-existing directory and its contents are left
    /// untouched. Failure (permissions, collision with a regular file)
    /// surfaces the underlying I/O error.
    pub fn ensure_ephemeral_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.ephemeral_directory).with_context(|| {
            format!(
                "create ephemeral directory {}",
                self.ephemeral_directory.display()
            )
        })
    }

    /// Resolve the configured action into its ordered list of terms.
    ///
    /// An unrecognized subcommand contributes no steps and yields an empty
    /// list rather than an error.
    pub fn sequence(&self) -> Vec<Term<'_>> {
        self.action
            .steps()
            .iter()
            .map(|&step| Term::new(self, step))
            .collect()
    }

    // Per-action rows, fixed regardless of the configured subcommand.

    pub fn check_sequence(&self) -> &'static [Step] {
        CHECK_SEQUENCE
    }

    pub fn converge_sequence(&self) -> &'static [Step] {
        CONVERGE_SEQUENCE
    }

    pub fn dependency_sequence(&self) -> &'static [Step] {
        DEPENDENCY_SEQUENCE
    }

    pub fn destroy_sequence(&self) -> &'static [Step] {
        DESTROY_SEQUENCE
    }

    pub fn side_effect_sequence(&self) -> &'static [Step] {
        SIDE_EFFECT_SEQUENCE
    }

    pub fn idempotence_sequence(&self) -> &'static [Step] {
        IDEMPOTENCE_SEQUENCE
    }

    pub fn lint_sequence(&self) -> &'static [Step] {
        LINT_SEQUENCE
    }

    pub fn syntax_sequence(&self) -> &'static [Step] {
        SYNTAX_SEQUENCE
    }

    pub fn test_sequence(&self) -> &'static [Step] {
        TEST_SEQUENCE
    }

    pub fn verify_sequence(&self) -> &'static [Step] {
        VERIFY_SEQUENCE
    }
}

/// One resolved step bound to its owning scenario.
///
/// Immutable after construction. Equality is `(step, scenario identity)`:
/// terms from different scenarios never compare equal even when the step
/// matches.
#[derive(Debug, Clone, Copy)]
pub struct Term<'a> {
    scenario: &'a Scenario,
    step: Step,
}

impl<'a> Term<'a> {
    pub fn new(scenario: &'a Scenario, step: Step) -> Self {
        Self { scenario, step }
    }

    /// The step identifier, unchanged from the table row.
    pub fn name(&self) -> &'static str {
        self.step.as_str()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// The owning scenario, the same reference passed at construction.
    pub fn scenario(&self) -> &'a Scenario {
        self.scenario
    }

    /// The two progress-report lines, scenario line first.
    ///
    /// Log-scraping tooling depends on this ordering; keep it fixed.
    pub fn banner(&self) -> [String; 2] {
        [
            format!("Scenario: '{}'", self.scenario.name()),
            format!("Term: '{}'", self.step),
        ]
    }

    /// Emit the banner through the logging collaborator.
    pub fn print_info(&self) {
        for line in self.banner() {
            tracing::info!("{line}");
        }
    }
}

impl PartialEq for Term<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.step == other.step && std::ptr::eq(self.scenario, other.scenario)
    }
}

impl Eq for Term<'_> {}
