use crate::common::{bundled_scenario, cmd, failing_scenario, TestContext};
use predicates::prelude::*;

#[test]
fn test_run_greeter_scenario() {
    cmd()
        .args(["run", "--scenario", &bundled_scenario("greeter.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 3: falls back to the original"))
        .stdout(predicate::str::contains("Result: returned \"Hello world\""))
        .stdout(predicate::str::contains("✓ greet received 3 calls"))
        .stdout(predicate::str::contains("All scenario steps passed successfully!"));
}

#[test]
fn test_run_repository_scenario() {
    cmd()
        .args(["run", "-s", &bundled_scenario("repository.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Result: raised RuntimeException: read-only connection",
        ));
}

#[test]
fn test_run_with_show_ledger() {
    cmd()
        .args([
            "run",
            "--scenario",
            &bundled_scenario("greeter.toml"),
            "--show-ledger",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invocation Ledger (4 calls)"))
        .stdout(predicate::str::contains("#1   greet(\"world\")"))
        .stdout(predicate::str::contains("with(\"lang\", \"en\")"));
}

#[test]
fn test_verbose_run_logs_the_ledger() {
    cmd()
        .args(["-v", "run", "--scenario", &bundled_scenario("greeter.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invocation Ledger").not())
        .stderr(predicate::str::contains("Scenario ledger"))
        .stderr(predicate::str::contains("Invocation Ledger (4 calls)"));
}

#[test]
fn test_prevent_parent_calls_flag_changes_fallback() {
    cmd()
        .args([
            "run",
            "--scenario",
            &bundled_scenario("greeter.toml"),
            "--prevent-parent-calls",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Result: returned null"))
        .stdout(predicate::str::contains("Step 3 failed."));
}

#[test]
fn test_failing_scenario_exits_with_error() {
    let ctx = TestContext::new().expect("Failed to create test context");
    let path = ctx
        .create_file("clock.toml", failing_scenario())
        .expect("Failed to write scenario");

    cmd()
        .args(["run", "--scenario", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("expected 3, returned 2"))
        .stderr(predicate::str::contains("Scenario execution failed"));
}

#[test]
fn test_check_valid_scenario() {
    cmd()
        .args(["check", "--scenario", &bundled_scenario("greeter.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Scenario is valid: 2 members declared, 1 mapped, 4 steps",
        ));
}

#[test]
fn test_check_does_not_run_steps() {
    let ctx = TestContext::new().expect("Failed to create test context");
    let path = ctx
        .create_file("clock.toml", failing_scenario())
        .expect("Failed to write scenario");

    cmd()
        .args(["check", "--scenario", path.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_config_file_enables_ledger() {
    let ctx = TestContext::new().expect("Failed to create test context");
    ctx.create_file(".callmap.toml", "[output]\nshow_ledger = true\n")
        .expect("Failed to write config");

    cmd()
        .current_dir(ctx.temp_path())
        .args(["run", "--scenario", &bundled_scenario("greeter.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invocation Ledger"));
}
