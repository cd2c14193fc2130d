//! Binary-level tests for the fp CLI

use assert_cmd::Command;
use predicates::prelude::*;

fn fp() -> Command {
    Command::cargo_bin("fp").expect("fp binary")
}

#[test]
fn test_plan_prints_recommendation() {
    fp().args([
        "plan",
        "--budget",
        "150000",
        "--space",
        "20",
        "--experience",
        "beginner",
        "--days",
        "21",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Recommended flock"))
    .stdout(predicate::str::contains("Advice:"));
}

#[test]
fn test_plan_reports_shortfall() {
    fp().args([
        "plan",
        "--budget",
        "1000",
        "--space",
        "1",
        "--experience",
        "advanced",
        "--days",
        "30",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Not enough resources"));
}

#[test]
fn test_plan_json_output() {
    fp().args([
        "plan",
        "--budget",
        "150000",
        "--space",
        "20",
        "--experience",
        "beginner",
        "--days",
        "21",
        "--json",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"outcome\": \"viable\""))
    .stdout(predicate::str::contains("\"flock_size\""));
}

#[test]
fn test_plan_rejects_invalid_duration() {
    fp().args([
        "plan",
        "--budget",
        "150000",
        "--space",
        "20",
        "--experience",
        "beginner",
        "--days",
        "90",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("between 21 and 60"));
}

#[test]
fn test_plan_rejects_unknown_experience() {
    fp().args([
        "plan",
        "--budget",
        "150000",
        "--space",
        "20",
        "--experience",
        "expert",
        "--days",
        "21",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown experience level"));
}
