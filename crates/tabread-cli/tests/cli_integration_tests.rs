// Dweve Tabread - Tabular data file reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

fn tabread_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tabread").expect("Failed to find tabread binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    tabread_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tabread - tabular data file reader"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    tabread_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tabread"));
}

#[test]
fn test_no_subcommand_fails() {
    tabread_cmd().assert().failure();
}

// ===== Inspect Command Tests =====

#[test]
fn test_inspect_lists_variables() {
    let file = create_temp_file("age,weight,group\n31,70.5,a\n45,82,b\n", ".csv");

    tabread_cmd()
        .args(["inspect", "--delimiter", "comma"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows:"))
        .stdout(predicate::str::contains("weight"))
        .stdout(predicate::str::contains("3 (3 retained)"));
}

#[test]
fn test_inspect_with_exclusion() {
    let file = create_temp_file("id\tx\n1\t2\n", ".txt");

    tabread_cmd()
        .arg("inspect")
        .arg(file.path())
        .args(["--exclude-column", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 (1 retained)"));
}

#[test]
fn test_unknown_delimiter_rejected() {
    let file = create_temp_file("a\n1\n", ".txt");

    tabread_cmd()
        .args(["inspect", "--delimiter", "slash"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown delimiter"));
}

#[test]
fn test_conflicting_exclusions_rejected() {
    let file = create_temp_file("a\n1\n", ".txt");

    tabread_cmd()
        .arg("inspect")
        .arg(file.path())
        .args(["--exclude-name", "a", "--exclude-column", "1"])
        .assert()
        .failure();
}

// ===== Read Command Tests =====

#[test]
fn test_read_continuous() {
    let file = create_temp_file("// header\nx y\n1 2\n3 4\n", ".txt");

    tabread_cmd()
        .args(["read", "-d", "whitespace", "--comment", "//"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("continuous dataset, 2 rows x 2 columns"));
}

#[test]
fn test_read_mixed_json() {
    let file = create_temp_file("g,v\na,1\nb,2\na,3\nb,\n", ".csv");

    let output = tabread_cmd()
        .args(["read", "-d", "comma", "--mode", "mixed", "--threshold", "2", "--json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "mixed");
    assert_eq!(json["rows"], 4);
    assert_eq!(json["columns"][0]["kind"], "discrete");
    assert_eq!(json["columns"][0]["categories"], serde_json::json!(["a", "b"]));
    assert_eq!(json["columns"][1]["kind"], "continuous");
    assert_eq!(json["columns"][1]["missing"], 1);
}

#[test]
fn test_read_fails_on_short_row() {
    let file = create_temp_file("a,b,c,d\n1,2,3,4\n1,2,3\n5,6,7,8\n", ".csv");

    tabread_cmd()
        .args(["read", "-d", "comma"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"))
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_read_missing_file() {
    tabread_cmd()
        .arg("read")
        .arg("/nonexistent/tabread/file.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

// ===== Validate Command Tests =====

#[test]
fn test_validate_clean_file() {
    let file = create_temp_file("x\ty\n1\t2\n", ".txt");

    tabread_cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues found"));
}

#[test]
fn test_validate_reports_all_errors() {
    let file = create_temp_file("x,y\n1,abc\n1,2,3\n4,5\n", ".csv");

    tabread_cmd()
        .args(["validate", "-d", "comma"])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("INVALID_NUMBER"))
        .stdout(predicate::str::contains("EXCESS_DATA"))
        .stderr(predicate::str::contains("2 validation error(s)"));
}

#[test]
fn test_validate_json_ends_with_summary() {
    let file = create_temp_file("x\n\n1\n,\n", ".csv");

    let output = tabread_cmd()
        .args(["validate", "-d", "comma", "--format", "json"])
        .arg(file.path())
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.last().unwrap()["kind"], "FILE_SUMMARY");
}

#[test]
fn test_validate_max_results() {
    let file = create_temp_file("x\na\nb\nc\nd\n", ".txt");

    tabread_cmd()
        .args(["validate", "--max-results", "2"])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("DIAGNOSTIC_LIMIT"));
}

#[test]
fn test_validate_columns_only() {
    let file = create_temp_file("a,,c\nx,y,z\n", ".csv");

    tabread_cmd()
        .args(["validate", "-d", "comma", "--columns-only"])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("MISSING_VARIABLE_NAME"));
}

// ===== Covariance Command Tests =====

#[test]
fn test_covariance_read() {
    let file = create_temp_file("120\nx y\n2.0\n0.5 3.0\n", ".cov");

    tabread_cmd()
        .args(["covariance", "-d", "whitespace"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 variables, 120 cases"));
}

#[test]
fn test_covariance_validate_reports_missing_rows() {
    let file = create_temp_file("120\nx y z\n2.0\n", ".cov");

    tabread_cmd()
        .args(["covariance", "-d", "whitespace", "--validate"])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("MISSING_COVARIANCE_DATA"));
}

// ===== Logging Tests =====

#[test]
fn test_verbose_logs_to_stderr() {
    let file = create_temp_file("x\n1\n", ".txt");

    tabread_cmd()
        .args(["-vv", "read"])
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("reading data"));
}
