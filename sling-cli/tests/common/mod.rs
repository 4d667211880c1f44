//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary project directory
//! - Command builder helpers isolated from the caller's environment
//! - Configuration fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A project with mounts at `/`, `/some/path` and a locked `/secure`.
pub const SAMPLE_CONFIG: &str = r"
auth:
  user: alice
mounts:
  - root: /
    name: root
    resources:
      - path: /
        resource_type: root
      - path: /something
        resource_type: sample/type
      - path: /content
        resource_type: app/folder
      - path: /content/page
        resource_type: app/page
        properties:
          title: Welcome
  - root: /some/path
    name: mounted
    ranking: 5
    resources:
      - path: /some/path
        resource_type: sample/mounted
      - path: /some/path/child
        resource_type: sample/child
  - root: /secure
    name: secure
    auth: lazy
    allowed_users: [alice]
    resources:
      - path: /secure
        resource_type: app/folder
      - path: /secure/doc
        resource_type: app/doc
";

/// Test environment with an isolated project directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an empty test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Create a test environment with `sling.yaml` holding [`SAMPLE_CONFIG`].
    pub fn with_sample_config() -> Self {
        let env = Self::new();
        env.write_file("sling.yaml", SAMPLE_CONFIG);
        env
    }

    /// Get a bare command builder running in the project directory.
    ///
    /// Variables that would leak the caller's configuration are removed.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("sling").expect("Failed to find sling binary");
        cmd.current_dir(&self.temp_path)
            .env("HOME", &self.temp_path)
            .env_remove("SLING_CONFIG")
            .env_remove("SLING_USER")
            .env_remove("SLING_PASSWORD")
            .env_remove("SLING_LOG_MODE")
            .env_remove("SLING_OUTPUT_FORMAT");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the project directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

/// Parse command stdout as JSON.
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}
