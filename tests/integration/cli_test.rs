//! CLI

use crate::harness::TestHarness;

use serde_json::json;

#[test]
fn test_specifier_command() {
    let harness = TestHarness::new();
    let output = harness.run(&[
        "specifier",
        "node:fs",
        "nod:fs",
        "data:application/json,gegevens.json",
    ]);
    assert!(output.status.success());

    let lines: Vec<serde_json::Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(
        lines,
        vec![
            json!({ "module": "fs", "protocol": "node:" }),
            json!({ "module": "nod:fs" }),
            json!({ "module": "gegevens.json", "protocol": "data:", "mimeType": "application/json" }),
        ]
    );
}

#[test]
fn test_options_defaults() {
    let harness = TestHarness::new();
    let options = harness.options(&[]);

    assert_eq!(
        options,
        json!({ "outputTo": "-", "outputType": "err", "validate": false })
    );
}

#[test]
fn test_options_validate_searches_candidates() {
    let harness = TestHarness::new();
    harness.write(".cruiser.yaml", "forbidden:\n  - name: no-circular\n");

    let options = harness.options(&["-T", "json", "--validate"]);

    assert_eq!(options["validate"], true);
    assert_eq!(options["rulesFile"], ".cruiser.yaml");
    assert_eq!(options["ruleSet"]["forbidden"][0]["name"], "no-circular");
    assert_eq!(options["outputType"], "json");
}

#[test]
fn test_options_validate_missing_file() {
    let harness = TestHarness::new();
    let output = harness.run(&["options", "--validate", "nope.json"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Can't open 'nope.json' for reading"));
    assert!(stderr.contains("cruiser init"));
}

#[test]
fn test_init_then_validate() {
    let harness = TestHarness::new();
    let output = harness.run(&["init"]);
    assert!(output.status.success());
    assert!(harness.path().join(".cruiser.json").exists());

    let options = harness.options(&["--config"]);
    assert_eq!(options["validate"], true);
    assert_eq!(options["rulesFile"], ".cruiser.json");

    // Second init without --force must not clobber the file
    let output = harness.run(&["init"]);
    assert!(!output.status.success());
}

#[test]
fn test_options_known_violations() {
    let harness = TestHarness::new();
    harness.write(".cruiser-known-violations.json", "[]");

    let options = harness.options(&["--ignore-known"]);
    assert_eq!(options["knownViolationsFile"], ".cruiser-known-violations.json");

    let output = harness.run(&["options", "--ignore-known", "other-baseline.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("other-baseline.json"));
}

#[test]
fn test_options_wrapper_configs_and_progress() {
    let harness = TestHarness::new();
    let options = harness.options(&[
        "--ts-config",
        "tsconfig.build.json",
        "--progress",
        "-M",
        "cjs, es6",
        "--webpack-config",
    ]);

    assert_eq!(options["progress"], "cli-feedback");
    assert_eq!(options["moduleSystems"], json!(["cjs", "es6"]));
    assert_eq!(
        options["ruleSet"]["options"],
        json!({
            "webpackConfig": { "fileName": "./webpack.config.js" },
            "tsConfig": { "fileName": "tsconfig.build.json" }
        })
    );
    assert!(options.get("tsConfig").is_none());
    assert!(options.get("webpackConfig").is_none());
}

#[test]
fn test_options_raw_unknown_keys_dropped() {
    let harness = TestHarness::new();
    let options = harness.options(&[
        "--raw",
        r#"{ "outputType": "dot", "rawArgs": ["x"], "maxDepth": 2 }"#,
        "--max-depth",
        "4",
    ]);

    assert_eq!(options["outputType"], "dot");
    assert_eq!(options["maxDepth"], 4);
    assert!(options.get("rawArgs").is_none());
}

#[test]
fn test_defaults_file() {
    let harness = TestHarness::new();
    harness.write("defaults.yaml", "outputType: html\nrulesFileCandidates: [rules/deps.json]\n");
    harness.write("rules/deps.json", r#"{ "allowed": [] }"#);

    let options = harness.options(&["--defaults", "defaults.yaml", "--validate"]);

    assert_eq!(options["outputType"], "html");
    assert_eq!(options["rulesFile"], "rules/deps.json");
}

#[test]
fn test_init_follows_defaults_file() {
    let harness = TestHarness::new();
    harness.write(
        "defaults.yaml",
        "configFileName: rules.yml\nrulesFileCandidates: [rules.yml]\n",
    );

    let output = harness.run(&["--defaults", "defaults.yaml", "options", "--validate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Can't open 'rules.yml'"));

    let output = harness.run(&["--defaults", "defaults.yaml", "init"]);
    assert!(output.status.success());
    assert!(harness.path().join("rules.yml").exists());
    assert!(!harness.path().join(".cruiser.json").exists());

    let options = harness.options(&["--defaults", "defaults.yaml", "--validate"]);
    assert_eq!(options["rulesFile"], "rules.yml");
    assert_eq!(options["ruleSet"]["forbidden"][0]["name"], "no-circular");
}

#[test]
fn test_completion() {
    let harness = TestHarness::new();
    let output = harness.run(&["completion", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("cruiser"));
}
