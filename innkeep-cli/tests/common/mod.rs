//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Seeding helpers that return the ids the CLI prints

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the innkeep data directory
    pub data_dir: PathBuf,
}

impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; innkeep creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("innkeep-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Runs inside the temp directory with `INNKEEP_*` variables cleared so
    /// the host environment cannot leak in.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("innkeep").expect("Failed to find innkeep binary");
        cmd.current_dir(&self.temp_path);
        for var in [
            "INNKEEP_DATA_DIR",
            "INNKEEP_ACTOR",
            "INNKEEP_ROLE",
            "INNKEEP_BUSY_TIMEOUT",
            "INNKEEP_DISABLE_AUTOINIT",
            "INNKEEP_OUTPUT_FORMAT",
            "INNKEEP_MAX_STAY_NIGHTS",
            "INNKEEP_REQUIRE_PAYMENT",
            "INNKEEP_MAXIMUM_LOCK_WAIT_SECONDS",
            "INNKEEP_TRANSIENT_RETRIES",
            "INNKEEP_CURRENCY",
            "INNKEEP_LOG_MODE",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("innkeep.db")
    }

    /// Run a command that must succeed and return its trimmed stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run innkeep");

        assert!(
            output.status.success(),
            "innkeep {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Run a command with `--json` and parse its output.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut all = vec!["--json"];
        all.extend_from_slice(args);
        serde_json::from_str(&self.run(&all)).expect("Output is not JSON")
    }

    /// Add a room type with `rooms` rooms numbered `{code}1`, `{code}2`, ...
    ///
    /// Returns the room numbers.
    pub fn add_room_type(&self, code: &str, name: &str, rooms: usize) -> Vec<String> {
        self.run(&[
            "room-type", "add", "--code", code, "--name", name, "--rate", "250000",
        ]);
        (1..=rooms)
            .map(|n| {
                let number = format!("{code}{n}");
                self.run(&["room", "add", "--number", &number, "--type", code]);
                number
            })
            .collect()
    }

    /// Register a guest and return their id.
    pub fn add_guest(&self, name: &str) -> String {
        self.run(&["guest", "add", "--name", name])
    }

    /// Book and return the confirmation code.
    pub fn book(&self, guest: &str, room_type: &str, check_in: &str, check_out: &str) -> String {
        self.book_priced(guest, room_type, check_in, check_out, "1000000", "0")
    }

    /// Book with an explicit total and deposit.
    pub fn book_priced(
        &self,
        guest: &str,
        room_type: &str,
        check_in: &str,
        check_out: &str,
        total: &str,
        deposit: &str,
    ) -> String {
        self.run(&[
            "book",
            "--guest",
            guest,
            "--type",
            room_type,
            "--check-in",
            check_in,
            "--check-out",
            check_out,
            "--subtotal",
            total,
            "--total",
            total,
            "--deposit",
            deposit,
        ])
    }
}
