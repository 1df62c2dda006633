//! Integration tests for TOML configuration loading

#![cfg(feature = "config")]

use std::fs;

use anyhow::Result;
use tempfile::TempDir;
use tiny_memoize::{MemoizeConfig, MemoizeError, Memoized};

/// Verifies that a configuration file drives a memoized function.
///
/// # Test Steps
/// 1. Write a TOML file with a bound of 2 and metrics enabled
/// 2. Load it and build a wrapper from it
/// 3. Insert three keys and confirm one eviction was recorded
#[test]
fn test_config_file_drives_wrapper() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("memoize.toml");
    fs::write(&path, "max_memoizations = 2\ntrack_metrics = true\nname = \"lengths\"\n")?;

    let config = MemoizeConfig::from_toml_file(&path)?;
    assert_eq!(config.max_size.get(), 2);
    assert_eq!(config.name.as_deref(), Some("lengths"));

    let memo = Memoized::builder(|args: &[&str]| args[0].len()).config(config).build();
    for word in ["one", "three", "seven"] {
        memo.call(&[word]);
    }

    let stats = memo.stats();
    assert_eq!(stats.size, 2);
    assert_eq!(stats.evictions, 1);
    Ok(())
}

/// Validates that out-of-range values in a file are normalised, not rejected.
#[test]
fn test_config_file_normalises_hint() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("memoize.toml");
    fs::write(&path, "max_memoizations = -7\n")?;

    let config = MemoizeConfig::from_toml_file(&path)?;
    assert_eq!(config.max_size.get(), 1);
    assert!(!config.track_metrics);
    Ok(())
}

#[test]
fn test_missing_config_file_is_io_error() -> Result<()> {
    let dir = TempDir::new()?;
    let err = MemoizeConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, MemoizeError::Io(_)));
    Ok(())
}

#[test]
fn test_malformed_config_file_is_config_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("memoize.toml");
    fs::write(&path, "track_metrics = \"maybe\"\n")?;

    let err = MemoizeConfig::from_toml_file(&path).unwrap_err();
    assert!(matches!(err, MemoizeError::Config { .. }));
    Ok(())
}
