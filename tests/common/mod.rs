#![allow(dead_code)]

pub mod mock_data;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run vendor-board commands in an isolated temp directory
pub struct BoardTest {
    pub temp_dir: TempDir,
}

impl BoardTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        BoardTest { temp_dir }
    }

    /// Create a test directory with an assessments file
    pub fn with_data(yaml: &str) -> Self {
        let test = Self::new();
        test.write_data(yaml);
        test
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join(".vendor-board")
    }

    pub fn write_data(&self, yaml: &str) {
        fs::create_dir_all(self.root()).expect("Failed to create board root");
        fs::write(self.root().join("assessments.yaml"), yaml)
            .expect("Failed to write assessments");
    }

    pub fn write_config(&self, yaml: &str) {
        fs::create_dir_all(self.root()).expect("Failed to create board root");
        fs::write(self.root().join("config.yaml"), yaml).expect("Failed to write config");
    }

    pub fn read_data(&self) -> String {
        fs::read_to_string(self.root().join("assessments.yaml"))
            .expect("Failed to read assessments")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_vendor-board"))
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("VENDOR_BOARD_ROOT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute vendor-board command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

impl Default for BoardTest {
    fn default() -> Self {
        Self::new()
    }
}
