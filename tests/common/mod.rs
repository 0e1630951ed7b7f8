//! Shared testing utilities for storyframe CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CITY_SCRIPT: &str = "EXT. CITY STREET - NIGHT\n\nWide shot, neon signs, camera slowly pushes in.\n\n\
INT. DINER - DAY\n\nClose-up of MARIA pouring coffee, soft warm light.\n\nMARIA\nRefill?\n";

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `storyframe` binary in the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("storyframe").expect("Failed to locate storyframe binary");
        cmd.current_dir(self.work_dir())
            .env("HOME", self.root.path())
            .env_remove("STORYFRAME_API_TOKEN")
            .env_remove("STORYFRAME_LOG");
        cmd
    }

    /// Write a script file into the work directory and return its path.
    pub fn write_script(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, content).expect("Failed to write script");
        path
    }

    pub fn storyboards_dir(&self) -> PathBuf {
        self.work_dir.join("outputs").join("storyboards")
    }

    /// Ids of every saved storyboard, sorted.
    pub fn storyboard_ids(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.storyboards_dir()) else {
            return Vec::new();
        };
        let mut ids: Vec<String> =
            entries.flatten().map(|entry| entry.file_name().to_string_lossy().into_owned()).collect();
        ids.sort();
        ids
    }

    /// Generate a storyboard in mock mode and return its id.
    pub fn generate_mock(&self, name: &str) -> String {
        let script = self.write_script("city.txt", CITY_SCRIPT);
        self.cli()
            .args(["generate", "--mock", "--name", name])
            .arg(&script)
            .assert()
            .success();
        let ids = self.storyboard_ids();
        assert_eq!(ids.len(), 1, "expected exactly one storyboard");
        ids[0].clone()
    }
}
