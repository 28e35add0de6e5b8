//! Checks of the `userconfig-schema` command line tool

use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_userconfig-schema"))
        .args(args)
        .env_remove("PLUGIN_LOG_FILE")
        .output()
        .expect("failed to run userconfig-schema")
}

#[test]
fn prints_requested_blocks_as_json() {
    let output = run(&["redis"]);
    assert!(output.status.success(), "{:?}", output);

    let blocks: Value = serde_json::from_slice(&output.stdout).unwrap();
    let blocks = blocks.as_object().unwrap();
    assert_eq!(blocks.keys().collect::<Vec<_>>(), vec!["redis"]);
    assert!(blocks["redis"]["attributes"]["redis_timeout"].is_object());
}

#[test]
fn prints_every_type_of_the_category() {
    let output = run(&["--category", "integration_endpoint_types"]);
    assert!(output.status.success(), "{:?}", output);

    let blocks: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = blocks.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        names,
        vec!["datadog", "external_elasticsearch_logs", "prometheus", "rsyslog"]
    );
}

#[test]
fn unknown_type_fails() {
    let output = run(&["--category", "integration_endpoint_types", "nope"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: unknown schema type: nope"),
        "{}",
        stderr
    );
}

#[test]
fn unknown_category_is_rejected() {
    let output = run(&["--category", "bogus"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown schema category: bogus"), "{}", stderr);
}
