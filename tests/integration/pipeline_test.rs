//! Option normalization against the working directory

use cruiser::options::{normalize_options, OptionValue, RawOptions};
use cruiser::Error;
use serial_test::serial;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn raw(value: serde_json::Value) -> RawOptions {
    value.as_object().cloned().expect("raw options are an object")
}

/// Puts the working directory back when dropped, panics included.
struct RestoreCwd(PathBuf);

impl Drop for RestoreCwd {
    fn drop(&mut self) {
        std::env::set_current_dir(&self.0).ok();
    }
}

/// Runs `f` with the working directory set to a fresh temp dir.
fn in_temp_dir<T>(f: impl FnOnce(&TempDir) -> T) -> T {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let _restore = RestoreCwd(std::env::current_dir().expect("Failed to get cwd"));
    std::env::set_current_dir(tmp.path()).expect("Failed to change dir");

    f(&tmp)
}

#[test]
#[serial]
fn test_default_candidate_order() {
    in_temp_dir(|tmp| {
        fs::write(tmp.path().join(".cruiser.yml"), "required: []\n").unwrap();
        fs::write(tmp.path().join(".cruiser.yaml"), "allowed: []\n").unwrap();

        let options = normalize_options(&raw(json!({ "validate": true }))).unwrap();

        assert_eq!(options.rules_file, Some(PathBuf::from(".cruiser.yaml")));
        assert!(options.rule_set.unwrap().rules.contains_key("allowed"));
    });
}

#[test]
#[serial]
fn test_no_candidate_reports_default_name() {
    in_temp_dir(|_| {
        let err = normalize_options(&raw(json!({ "config": true }))).unwrap_err();
        match err {
            Error::FileNotFound { path, .. } => assert_eq!(path, PathBuf::from(".cruiser.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    });
}

#[test]
#[serial]
fn test_full_pipeline() {
    in_temp_dir(|tmp| {
        fs::write(
            tmp.path().join(".cruiser.json"),
            r#"{ "forbidden": [], "options": { "babelConfig": { "env": "test" } } }"#,
        )
        .unwrap();
        fs::write(tmp.path().join("baseline.json"), "[]").unwrap();

        let options = normalize_options(&raw(json!({
            "validate": true,
            "ignoreKnown": "baseline.json",
            "progress": true,
            "tsConfig": true,
            "moduleSystems": "cjs,amd",
            "unknown": "dropped"
        })))
        .unwrap();

        assert!(options.is_validating());
        assert_eq!(options.known_violations_file, Some(PathBuf::from("baseline.json")));
        assert_eq!(options.progress, Some(OptionValue::from("cli-feedback")));
        assert!(!options.passthrough.contains_key("unknown"));

        let nested = options.rule_set.unwrap().options;
        assert_eq!(nested.ts_config.unwrap().file_name.as_deref(), Some("./tsconfig.json"));
        let babel = nested.babel_config.unwrap();
        assert_eq!(babel.file_name.as_deref(), Some("./.babelrc"));
        assert_eq!(babel.extra["env"], "test");
    });
}

#[test]
#[serial]
fn test_cwd_restored_after_failure() {
    let before = std::env::current_dir().unwrap();

    let outcome = std::panic::catch_unwind(|| {
        in_temp_dir(|_| panic!("assertion inside the temp dir"));
    });

    assert!(outcome.is_err());
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
#[serial]
fn test_empty_wrapper_shorthand() {
    in_temp_dir(|_| {
        let options = normalize_options(&raw(json!({ "webpackConfig": "" }))).unwrap();
        let webpack = options.rule_set.unwrap().options.webpack_config.unwrap();
        assert_eq!(webpack.file_name.as_deref(), Some("./webpack.config.js"));
    });
}
