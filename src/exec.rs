//! External command execution behind an injectable [`Executor`].
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over process execution so git interaction can be tested
/// without a git binary.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `program` in `dir`, failing on a non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exits non-zero.
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run `program` in `dir`, returning the result whatever the exit code.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be spawned.
    fn run_unchecked_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Whether `program` is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// Production [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(dir);
        execute_checked(cmd, &format!("{program} in {}", dir.display()))
    }

    fn run_unchecked_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Execute a command and return the result, bailing on non-zero exit.
fn execute_checked(mut cmd: Command, label: &str) -> Result<ExecResult> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to execute: {label}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        bail!(
            "{label} failed (exit {}): {}",
            result.code.unwrap_or(-1),
            result.stderr.trim()
        );
    }
    Ok(result)
}

/// Scripted [`Executor`] for unit tests.
///
/// Responses are consumed in FIFO order; every call is recorded as
/// `"program arg1 arg2 ..."` for later inspection.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: std::sync::Mutex<std::collections::VecDeque<(bool, String)>>,
    calls: std::sync::Mutex<Vec<String>>,
    which_result: bool,
}

#[cfg(test)]
impl MockExecutor {
    /// Create a mock from an ordered list of `(success, stdout)` pairs.
    #[must_use]
    pub fn with_responses(responses: Vec<(bool, String)>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into()),
            calls: std::sync::Mutex::default(),
            which_result: true,
        }
    }

    /// Set the value returned by every [`Executor::which`] call.
    #[must_use]
    pub const fn with_which(mut self, result: bool) -> Self {
        self.which_result = result;
        self
    }

    /// Every command line issued so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map_or_else(|_| Vec::new(), |guard| guard.clone())
    }

    fn next(&self, program: &str, args: &[&str]) -> (bool, String) {
        if let Ok(mut calls) = self.calls.lock() {
            let mut line = program.to_string();
            for arg in args {
                line.push(' ');
                line.push_str(arg);
            }
            calls.push(line);
        }
        self.responses.lock().map_or_else(
            |_| (false, "mutex poisoned".to_string()),
            |mut guard| {
                guard
                    .pop_front()
                    .unwrap_or_else(|| (false, "unexpected call".to_string()))
            },
        )
    }
}

#[cfg(test)]
impl Executor for MockExecutor {
    fn run_in(&self, _: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        let (success, stdout) = self.next(program, args);
        if !success {
            bail!("mock command failed");
        }
        Ok(ExecResult {
            stdout,
            stderr: String::new(),
            success,
            code: Some(0),
        })
    }

    fn run_unchecked_in(&self, _: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        let (success, stdout) = self.next(program, args);
        Ok(ExecResult {
            stdout,
            stderr: String::new(),
            success,
            code: Some(i32::from(!success)),
        })
    }

    fn which(&self, _: &str) -> bool {
        self.which_result
    }
}
