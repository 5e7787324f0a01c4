//! Sequence driver.
//!
//! Walks a scenario's resolved sequence in table order and hands each term
//! to a step runner. Ordering discipline lives here: steps are never
//! reordered, skipped, or parallelized. The actual provisioning work
//! belongs to the runner implementation.
use anyhow::Result;

use crate::config::Config;
use crate::scenario::{Scenario, Step};

/// Executor seam for resolved steps.
pub trait StepRunner {
    fn run_step(&mut self, scenario: &Scenario, step: Step) -> Result<()>;
}

/// Runner that only records dispatch through the logging collaborator.
///
/// Used for dry runs and until a real provisioner is wired in.
#[derive(Debug, Default)]
pub struct LoggingRunner;

impl StepRunner for LoggingRunner {
    fn run_step(&mut self, scenario: &Scenario, step: Step) -> Result<()> {
        tracing::debug!(scenario = scenario.name(), step = %step, "dispatch");
        Ok(())
    }
}

/// Build the scenario for `config` and execute its resolved sequence.
///
/// The ephemeral directory is guaranteed to exist before the first step
/// runs. An empty sequence is a no-op, not an error.
pub fn execute(config: &Config, runner: &mut dyn StepRunner) -> Result<()> {
    let scenario = Scenario::create(config)?;
    for term in scenario.sequence() {
        term.print_info();
        runner.run_step(&scenario, term.step())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[derive(Default)]
    struct RecordingRunner {
        steps: Vec<&'static str>,
        fail_on: Option<Step>,
    }

    impl StepRunner for RecordingRunner {
        fn run_step(&mut self, _scenario: &Scenario, step: Step) -> Result<()> {
            if self.fail_on == Some(step) {
                return Err(anyhow!("step {step} failed"));
            }
            self.steps.push(step.as_str());
            Ok(())
        }
    }

    fn config(action: &str, directory: &std::path::Path) -> Config {
        Config {
            subcommand: format!("crucible.command.{action}"),
            scenario_name: "default".to_string(),
            scenario_directory: directory.to_path_buf(),
        }
    }

    #[test]
    fn executes_full_test_sequence_in_order() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut runner = RecordingRunner::default();
        execute(&config("test", tmp.path()), &mut runner).expect("execute");
        assert_eq!(
            vec![
                "destroy",
                "dependency",
                "syntax",
                "create",
                "converge",
                "idempotence",
                "lint",
                "side_effect",
                "verify",
                "destroy",
            ],
            runner.steps
        );
        assert!(tmp.path().join(".crucible").is_dir());
    }

    #[test]
    fn unknown_action_dispatches_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut runner = RecordingRunner::default();
        execute(&config("invalid", tmp.path()), &mut runner).expect("execute");
        assert!(runner.steps.is_empty());
        // The ephemeral directory is still created; only the sequence is empty.
        assert!(tmp.path().join(".crucible").is_dir());
    }

    #[test]
    fn step_failure_stops_the_walk() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut runner = RecordingRunner {
            fail_on: Some(Step::Create),
            ..Default::default()
        };
        let err = execute(&config("converge", tmp.path()), &mut runner).unwrap_err();
        assert!(err.to_string().contains("create"));
        assert!(runner.steps.is_empty());
    }
}
