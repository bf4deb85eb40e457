use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// TestHarness provides an isolated project directory for running the
/// cruiser binary against rule set and baseline files.
pub struct TestHarness {
    pub dir: TempDir,
    pub cruiser_binary: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            dir: TempDir::new().expect("Failed to create temp dir"),
            cruiser_binary: PathBuf::from(env!("CARGO_BIN_EXE_cruiser")),
        }
    }

    /// Returns the base directory path (the TempDir path).
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `name` relative to the harness directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Executes the cruiser binary with the given arguments in the harness directory.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.cruiser_binary)
            .args(args)
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run cruiser")
    }

    /// Runs `cruiser options ...` and parses stdout as JSON.
    pub fn options(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["options"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(
            output.status.success(),
            "cruiser options failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("options output is JSON")
    }
}
