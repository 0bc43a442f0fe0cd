//! Environment overrides live in their own test binary: they mutate process env.

use std::env;
use std::fs;
use std::sync::Mutex;

use tempfile::TempDir;

use orgtree::config::{Settings, SettingsError};
use orgtree::render::OutputFormat;

// Tests in this binary run in parallel but share one process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn given_env_vars_when_load_then_override_files() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("local.toml");
    fs::write(&explicit, "format = \"json\"\ncolor = true\n").unwrap();

    env::set_var("ORGTREE_FORMAT", "tree");
    env::set_var("ORGTREE_COLOR", "false");
    let settings = Settings::load_from(None, Some(&explicit));
    env::remove_var("ORGTREE_FORMAT");
    env::remove_var("ORGTREE_COLOR");

    let settings = settings.unwrap();
    assert_eq!(settings.format, OutputFormat::Tree);
    assert!(!settings.color);
}

#[test]
fn given_non_boolean_color_env_when_load_then_env_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    env::set_var("ORGTREE_COLOR", "maybe");
    let result = Settings::load_from(None, None);
    env::remove_var("ORGTREE_COLOR");

    let err = result.unwrap_err();
    assert!(matches!(&err, SettingsError::Env(msg) if msg.contains("maybe")));
}

#[test]
fn given_unknown_format_env_when_load_then_env_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    env::set_var("ORGTREE_FORMAT", "yaml");
    let result = Settings::load_from(None, None);
    env::remove_var("ORGTREE_FORMAT");

    assert!(matches!(result, Err(SettingsError::Env(_))));
}
