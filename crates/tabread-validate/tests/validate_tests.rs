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

//! Integration tests for tabread-validate

use std::io::Write;
use tabread::{Delimiter, Exclusion, MemorySource, ReadMode, ReaderConfig};
use tabread_validate::{
    ValidationAttribute, ValidationCode, ValidationConfig, ValidationKind, Validator,
};
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ==================== File Tests ====================

#[test]
fn test_clean_file_only_has_summary() {
    let file = write_temp("# survey\nage\tweight\n31\t70.5\n45\t82\n");
    let config = ReaderConfig::default().with_comment_marker("#");
    let report = Validator::open(file.path(), config)
        .validate_data(&Exclusion::None, ReadMode::Continuous)
        .unwrap();

    assert_eq!(report.len(), 1);
    let summary = report.summary().unwrap();
    assert_eq!(summary.count(ValidationAttribute::RowNumber), Some(2));
    assert_eq!(summary.count(ValidationAttribute::ColumnNumber), Some(2));
    let file_name = summary
        .attribute(ValidationAttribute::FileName)
        .and_then(|v| v.as_text())
        .unwrap();
    assert!(file_name.ends_with(
        file.path().file_name().unwrap().to_str().unwrap()
    ));
}

#[test]
fn test_missing_file_becomes_io_result() {
    let report = Validator::open("/nonexistent/tabread/data.txt", ReaderConfig::default())
        .validate_columns(&Exclusion::None)
        .unwrap();

    assert_eq!(report.results()[0].kind(), ValidationKind::IoError);
    assert!(report.has_errors());
    assert!(report.summary().is_some());
}

// ==================== Scenario Tests ====================

#[test]
fn test_insufficient_row_is_reported_not_fatal() {
    let validator = Validator::new(
        MemorySource::from("a,b,c,d\n1,2,3,4\n1,2,3\n5,6,7,8\n"),
        ReaderConfig::new(Delimiter::Comma),
    );
    let report = validator
        .validate_data(&Exclusion::None, ReadMode::Continuous)
        .unwrap();

    let shape: Vec<_> = report.of_kind(ValidationKind::InsufficientData).collect();
    assert_eq!(shape.len(), 1);
    assert_eq!(shape[0].line(), Some(3));
    assert_eq!(shape[0].count(ValidationAttribute::ExpectedCount), Some(4));
    assert_eq!(shape[0].count(ValidationAttribute::ActualCount), Some(3));
    assert_eq!(
        report.summary().unwrap().count(ValidationAttribute::RowNumber),
        Some(3)
    );
}

#[test]
fn test_excluded_columns_are_not_checked() {
    let validator = Validator::new(
        MemorySource::from("id,x\nA17,1\nB22,2\n"),
        ReaderConfig::new(Delimiter::Comma),
    );
    let strict = validator
        .validate_data(&Exclusion::None, ReadMode::Continuous)
        .unwrap();
    assert_eq!(strict.count(ValidationCode::Error), 2);

    let excluded = validator
        .validate_data(&Exclusion::names(["id"]), ReadMode::Continuous)
        .unwrap();
    assert!(!excluded.has_errors());
}

#[test]
fn test_min_code_keeps_summary() {
    let validator = Validator::new(
        MemorySource::from("x\n\n1\n\"\"\n"),
        ReaderConfig::new(Delimiter::Comma),
    )
    .with_config(ValidationConfig::default().with_min_code(ValidationCode::Error));

    let report = validator
        .validate_data(&Exclusion::None, ReadMode::Continuous)
        .unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(
        report
            .summary()
            .unwrap()
            .count(ValidationAttribute::AssumedMissingCount),
        Some(1)
    );
}

// ==================== Serialization Tests ====================

#[test]
fn test_report_serializes_to_json() {
    let validator = Validator::new(
        MemorySource::named("m.csv", "x\nabc\n"),
        ReaderConfig::new(Delimiter::Comma),
    );
    let report = validator
        .validate_data(&Exclusion::None, ReadMode::Continuous)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["kind"], "INVALID_NUMBER");
    assert_eq!(results[0]["attributes"]["VALUE"], "abc");
    assert_eq!(results[1]["attributes"]["FILE_NAME"], "m.csv");
}
