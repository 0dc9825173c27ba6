//! Shared testing utilities for intunify CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    out_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let out_dir = root.path().join("out");
        fs::create_dir_all(&out_dir).expect("Failed to create test output directory");
        Self { root, out_dir }
    }

    /// Root of the isolated environment.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Output directory passed to the CLI as `--outfolder`.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Build a command for invoking the compiled `intunify` binary.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("intunify").expect("Failed to locate intunify binary");
        cmd.current_dir(self.root.path());
        cmd
    }

    /// Path to a generated bundle directory.
    pub fn bundle_path(&self, slug: &str) -> PathBuf {
        self.out_dir.join(slug)
    }

    /// Read a generated artifact to a string.
    pub fn read_artifact(&self, slug: &str, file: &str) -> String {
        let path = self.bundle_path(slug).join(file);
        fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("Failed to read {}: {}", path.display(), err))
    }

    /// Assert that the four bundle artifacts exist for a slug.
    pub fn assert_bundle_artifacts(&self, slug: &str) {
        for file in ["README.md", "install.ps1", "uninstall.ps1", "detect.ps1"] {
            assert!(
                self.bundle_path(slug).join(file).exists(),
                "{} should exist in bundle {}",
                file,
                slug
            );
        }
    }

    /// Write a catalog file and return its path.
    pub fn write_catalog(&self, content: &str) -> PathBuf {
        let path = self.root.path().join("catalog.json");
        fs::write(&path, content).expect("Failed to write catalog file");
        path
    }
}
