use crate::common::{bundled_scenario, cmd, failing_scenario, TestContext};
use serde_json::Value;

fn json_stdout(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("Invalid UTF-8 in stdout");
    serde_json::from_str(&stdout).expect("stdout is not valid JSON")
}

#[test]
fn test_run_json_output_is_valid() {
    let output = cmd()
        .args([
            "run",
            "--scenario",
            &bundled_scenario("greeter.toml"),
            "--format",
            "json",
        ])
        .output()
        .expect("Failed to run callmap");

    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["status"], "passed");
    assert_eq!(json["result"]["target"], "Greeter");
    assert_eq!(json["result"]["steps"][0]["observed"]["outcome"], "returned");
    assert_eq!(json["result"]["steps"][0]["observed"]["value"], "great");
    assert_eq!(json["result"]["steps"][3]["observed"]["outcome"], "proxy");
    assert_eq!(json["result"]["ledger"]["calls"]["greet"][0][0], "world");
    assert!(json["errors"].is_null());
}

#[test]
fn test_run_json_output_on_failure() {
    let ctx = TestContext::new().expect("Failed to create test context");
    let path = ctx
        .create_file("clock.toml", failing_scenario())
        .expect("Failed to write scenario");

    let output = cmd()
        .args(["run", "--scenario", path.to_str().unwrap(), "--format", "json"])
        .output()
        .expect("Failed to run callmap");

    assert!(!output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["status"], "failed");
    assert_eq!(json["errors"][0], "expected 3, returned 2");
    assert_eq!(json["result"]["passed"], false);
}

#[test]
fn test_config_file_selects_json_format() {
    let ctx = TestContext::new().expect("Failed to create test context");
    ctx.create_file(".callmap.toml", "[output]\nformat = \"json\"\n")
        .expect("Failed to write config");

    let output = cmd()
        .current_dir(ctx.temp_path())
        .args(["run", "--scenario", &bundled_scenario("repository.toml")])
        .output()
        .expect("Failed to run callmap");

    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["status"], "passed");
    assert_eq!(json["result"]["steps"][3]["observed"]["outcome"], "raised");
}

#[test]
fn test_command_line_format_overrides_config() {
    let ctx = TestContext::new().expect("Failed to create test context");
    ctx.create_file(".callmap.toml", "[output]\nformat = \"json\"\n")
        .expect("Failed to write config");

    let output = cmd()
        .current_dir(ctx.temp_path())
        .args([
            "run",
            "--scenario",
            &bundled_scenario("repository.toml"),
            "--format",
            "text",
        ])
        .output()
        .expect("Failed to run callmap");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All scenario steps passed successfully!"));
}
