use crate::common::{cmd, TestContext};
use predicates::prelude::*;

#[test]
fn test_run_with_missing_scenario_file() {
    cmd()
        .args(["run", "--scenario", "/nonexistent/scenario.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read scenario file"));
}

#[test]
fn test_run_without_scenario_argument() {
    cmd()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--scenario"));
}

#[test]
fn test_malformed_scenario_reports_path() {
    let ctx = TestContext::new().expect("Failed to create test context");
    let path = ctx
        .create_file(
            "bad.toml",
            "[target]\nname = \"Greeter\"\n\n[[steps]]\nmember = 42\n",
        )
        .expect("Failed to write scenario");

    cmd()
        .args(["check", "--scenario", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse scenario TOML"))
        .stderr(predicate::str::contains("steps"));
}

#[test]
fn test_unknown_member_is_reported() {
    let ctx = TestContext::new().expect("Failed to create test context");
    let path = ctx
        .create_file(
            "typo.toml",
            "[target]\nname = \"Greeter\"\nmembers = [{ name = \"greet\" }]\n\n[calls.greeet]\nvalue = 1\n",
        )
        .expect("Failed to write scenario");

    cmd()
        .args(["check", "--scenario", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Trying to map method Greeter::greeet(), but it does not exist. Probably a typo?",
        ));
}

#[test]
fn test_invalid_format_value() {
    cmd()
        .args(["run", "--scenario", "x.toml", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    cmd()
        .args(["-v", "-q", "check", "--scenario", "x.toml"])
        .assert()
        .failure();
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let ctx = TestContext::new().expect("Failed to create test context");
    ctx.create_file(".callmap.toml", "[output\n")
        .expect("Failed to write config");
    let scenario = ctx
        .create_file(
            "ok.toml",
            "[target]\nname = \"Clock\"\nmembers = [{ name = \"now\" }]\n",
        )
        .expect("Failed to write scenario");

    cmd()
        .current_dir(ctx.temp_path())
        .args(["run", "--scenario", scenario.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to load config"));
}
