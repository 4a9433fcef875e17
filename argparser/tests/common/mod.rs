//! Test driver for the `argtest` demo program.
//!
//! Runs the binary with the given arguments and captures stdout and stderr
//! for assertions.

use std::process::{Command, Output, Stdio};

/// A finished `argtest` run.
pub struct TestSession {
    output: Output,
}

impl TestSession {
    /// Run `argtest` with the given arguments.
    pub fn spawn(args: &[&str]) -> TestSession {
        Self::spawn_with_env(args, &[])
    }

    /// Like `spawn`, with additional environment variables set.
    pub fn spawn_with_env(args: &[&str], env: &[(&str, &str)]) -> TestSession {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_argtest"));
        cmd.args(args);
        cmd.env_remove("RUST_LOG");
        for (k, v) in env {
            cmd.env(k, v);
        }
        cmd.stdin(Stdio::null());

        let output = cmd.output().expect("failed to run argtest");
        TestSession { output }
    }

    /// Assert the exit code and hand back the captured streams.
    pub fn wait_exit(self, expected_code: i32) -> SessionOutput {
        let code = self.output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&self.output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&self.output.stderr).to_string();

        assert_eq!(
            code, expected_code,
            "expected exit code {expected_code}, got {code}\nstdout:\n{stdout}\nstderr:\n{stderr}"
        );

        SessionOutput { stdout, stderr }
    }
}

/// Output captured from a completed session.
pub struct SessionOutput {
    pub stdout: String,
    pub stderr: String,
}

impl SessionOutput {
    /// The `argv[i]: ...` lines printed for the surviving arguments.
    pub fn survivors(&self) -> Vec<String> {
        self.stdout
            .lines()
            .filter_map(|l| l.strip_prefix("argv[").and_then(|r| r.split_once("]: ")))
            .map(|(_, v)| v.to_string())
            .collect()
    }

    /// The value printed on the line starting with `label`.
    pub fn value(&self, label: &str) -> Option<String> {
        self.stdout
            .lines()
            .find(|l| l.starts_with(label))
            .and_then(|l| l.split_once("): "))
            .map(|(_, v)| v.trim().to_string())
    }
}
