//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding the files of one test.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Create a new fixture with a fresh directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of `name` inside the fixture, whether or not it exists.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `content` to `name` and return its path.
    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write `len` bytes of a repeating, non-trivial pattern to `name`.
    pub fn write_pattern(&self, name: &str, len: usize) -> PathBuf {
        self.write(name, pattern(len))
    }

    /// Check that a file exists and has exactly the expected bytes.
    pub fn assert_bytes(&self, path: &Path, expected: impl AsRef<[u8]>) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read(path).expect("Failed to read file");
        assert_eq!(actual, expected.as_ref(), "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytes `0..len` of a pattern that never repeats within 251 bytes.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 251) as u8).collect()
}
