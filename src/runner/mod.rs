//! Example execution. The navigator only sees [`ExampleRunner`]; nothing in
//! this crate evaluates lesson code inside its own process.

pub mod simulated;
pub mod subprocess;

pub use simulated::SimulatedRunner;
pub use subprocess::SubprocessRunner;

use crate::config::{Config, RunnerKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Success { output: String },
    Fault { message: String },
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success { .. })
    }
}

pub trait ExampleRunner {
    fn execute(&self, code: &str) -> ExecutionOutcome;
}

/// Runner selected by the config. The subprocess runner is strictly opt-in.
pub fn from_config(config: &Config) -> Box<dyn ExampleRunner> {
    match config.runner_kind() {
        RunnerKind::Simulated => Box::new(SimulatedRunner),
        RunnerKind::Subprocess => {
            tracing::info!(interpreter = %config.interpreter, "examples run in a subprocess");
            Box::new(SubprocessRunner::new(
                &config.interpreter,
                &config.interpreter_args,
            ))
        }
    }
}
