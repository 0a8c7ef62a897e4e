#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Writes a config file into a fresh tempdir and returns both.
pub fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create tempdir");
    let path = dir.path().join("prodserver.yaml");
    fs::write(&path, contents).expect("failed to write config");
    (dir, path)
}
