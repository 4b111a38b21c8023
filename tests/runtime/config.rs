//! Integration tests for interpreter configuration
//!
//! Tests TOML loading and the effect of configuration on the interpreter.

use std::fs;
use std::path::PathBuf;

use vision_foundation::ErrorKind;
use vision_runtime::InterpreterConfig;

use crate::support::interpreter;

#[test]
fn load_from_file() {
    let dir = std::env::temp_dir().join(format!("vision-{}-config", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("vision.toml");
    fs::write(
        &path,
        "interactive_name = \"repl\"\ntest_directory = \"suites\"\nverify_scope = true\n",
    )
    .unwrap();

    let config = InterpreterConfig::load(&path).unwrap();
    assert_eq!(config.interactive_name, "repl");
    assert_eq!(config.test_directory, PathBuf::from("suites"));
    assert!(config.verify_scope);
    assert_eq!(config.log_filter, "warn");

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn empty_toml_is_default() {
    let config = InterpreterConfig::from_toml_str("").unwrap();
    assert_eq!(config, InterpreterConfig::default());
}

#[test]
fn unknown_types_are_rejected() {
    let err = InterpreterConfig::from_toml_str("test_directory = 3").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Config(_)));
}

#[test]
fn interactive_name_drives_interactive_view() {
    let mut interp = interpreter(InterpreterConfig::default().with_interactive_name("repl"));
    interp.push_interactive("use web").unwrap();
    interp.add_scanner("suite.vision", ["open"]).unwrap();
    assert_eq!(interp.interactive_scanner().unwrap().name(), "repl");
    assert_eq!(interp.file_scanner().unwrap().name(), "suite.vision");
    assert_eq!(interp.config().interactive_name, "repl");
}
