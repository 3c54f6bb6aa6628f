//! TestWorld pattern for CLI integration tests.
//!
//! Provides a fluent interface for:
//! - Creating an isolated temp directory with a config file
//! - Placing run files
//! - Executing the `tracegrid` binary against them

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracegrid_types::Run;

use crate::fixtures;

/// Config written by [`TestWorld::new`]: fixed zone and locale so output
/// does not depend on the machine running the tests.
const DEFAULT_CONFIG: &str = r#"[display]
locale = "en_US"
timezone = "UTC"
"#;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use tracegrid_testing::{TestWorld, fixtures};
///
/// let world = TestWorld::new().with_runs("runs.json", &fixtures::conversation());
/// let result = world.run(&["table", "runs.json", "--format", "json"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, DEFAULT_CONFIG).expect("Failed to write config");

        Self {
            temp_dir,
            config_path,
            env_vars: HashMap::new(),
        }
    }

    /// Get the temp directory root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Replace the config file contents.
    pub fn with_config(self, toml: &str) -> Self {
        fs::write(&self.config_path, toml).expect("Failed to write config");
        self
    }

    /// Write `runs` as a JSON array at `name` (relative to the root).
    pub fn with_runs(self, name: &str, runs: &[Run]) -> Self {
        fixtures::write_runs(&self.root().join(name), runs).expect("Failed to write runs");
        self
    }

    /// Write a raw file at `name` (relative to the root).
    pub fn with_file(self, name: &str, contents: &str) -> Self {
        fs::write(self.root().join(name), contents).expect("Failed to write file");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller provides the base command (e.g. from `cargo_bin_cmd!("tracegrid")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config").arg(&self.config_path);
        cmd.current_dir(self.root());
        cmd.env_remove("TRACEGRID_CONFIG");
        cmd.env_remove("TRACEGRID_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run the `tracegrid` binary with `args`.
    ///
    /// Requires the binary to be built, which `cargo test` does for the CLI
    /// crate's integration tests.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("tracegrid")
            .map_err(|e| anyhow::anyhow!("Failed to find tracegrid binary: {}", e))?;
        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;
        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
