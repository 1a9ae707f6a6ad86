use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tempfile::TempDir;

use crate::runner::{ExampleRunner, ExecutionOutcome};

/// Runs an example with an external interpreter. The code is piped on
/// stdin, the child starts with an empty environment and works inside a
/// throwaway directory that is removed afterwards.
#[derive(Clone, Debug)]
pub struct SubprocessRunner {
    interpreter: String,
    args: Vec<String>,
}

impl SubprocessRunner {
    pub fn new(interpreter: &str, args: &[String]) -> Self {
        Self {
            interpreter: interpreter.to_string(),
            args: args.to_vec(),
        }
    }

    fn run(&self, code: &str) -> Result<ExecutionOutcome, std::io::Error> {
        let sandbox = TempDir::new()?;
        let mut command = Command::new(&self.interpreter);
        command
            .args(&self.args)
            .current_dir(sandbox.path())
            .env_clear()
            .env("PYTHONIOENCODING", "utf-8")
            .env("HOME", sandbox.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(path) = std::env::var_os("PATH") {
            command.env("PATH", path);
        }
        let mut child = command.spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // An interpreter that exits early closes the pipe; its own
            // stderr explains why.
            if let Err(e) = stdin.write_all(code.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e);
                }
                tracing::debug!("example subprocess closed stdin early");
            }
        }
        let output = child.wait_with_output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();

        tracing::debug!(status = %output.status, "example subprocess finished");
        if output.status.success() {
            Ok(ExecutionOutcome::Success { output: stdout })
        } else {
            let message = if stderr.is_empty() {
                format!("çıkış durumu {}", output.status)
            } else {
                stderr
            };
            Ok(ExecutionOutcome::Fault { message })
        }
    }
}

impl ExampleRunner for SubprocessRunner {
    fn execute(&self, code: &str) -> ExecutionOutcome {
        self.run(code).unwrap_or_else(|e| {
            tracing::warn!(interpreter = %self.interpreter, error = %e, "could not run example");
            ExecutionOutcome::Fault {
                message: format!("{} çalıştırılamadı: {e}", self.interpreter),
            }
        })
    }
}
