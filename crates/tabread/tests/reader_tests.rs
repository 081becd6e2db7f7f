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

//! Integration tests for tabread

use std::io::Write;
use tabread::{
    CancellationToken, ColumnDescriptor, ColumnKind, CovarianceReader, Dataset, Delimiter,
    Exclusion, MemorySource, ReadMode, ReaderConfig, ReaderError, TabularReader,
    MISSING_DISCRETE_VALUE,
};
use tempfile::NamedTempFile;

fn comma_reader(input: &str) -> TabularReader<MemorySource> {
    TabularReader::new(MemorySource::from(input), ReaderConfig::new(Delimiter::Comma))
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ==================== Scenario Tests ====================

#[test]
fn test_continuous_scenario() {
    let reader = comma_reader("x,y\n1,2\n3,4\n");

    let columns = reader
        .read_columns(&Exclusion::None, ReadMode::Continuous)
        .unwrap();
    assert_eq!(
        columns,
        vec![
            ColumnDescriptor::new("x", 1, ColumnKind::Continuous),
            ColumnDescriptor::new("y", 2, ColumnKind::Continuous),
        ]
    );

    let data = reader.read_continuous(&Exclusion::None).unwrap();
    assert_eq!(data.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
}

#[test]
fn test_discrete_scenario() {
    let reader = comma_reader("x,y\nA,1\nB,2\nA,3\n");
    let data = reader.read_mixed(&Exclusion::None, 5).unwrap();

    let table = data.table(0).unwrap();
    assert_eq!(table.encode("A"), Some(0));
    assert_eq!(table.encode("B"), Some(1));
    assert_eq!(data.discrete_column(0), Some(&[0, 1, 0][..]));
}

#[test]
fn test_missing_marker_in_both_kinds() {
    let config = ReaderConfig::new(Delimiter::Comma).with_missing_marker("*");
    let reader = TabularReader::new(MemorySource::from("v\n1\n*\n"), config);

    let continuous = reader.read_continuous(&Exclusion::None).unwrap();
    assert!(continuous.get(1, 0).unwrap().is_nan());

    let discrete = reader.read_discrete(&Exclusion::None).unwrap();
    assert_eq!(discrete.get(1, 0), Some(MISSING_DISCRETE_VALUE));
}

#[test]
fn test_insufficient_data_is_fatal() {
    let err = comma_reader("a,b,c,d\n1,2,3,4\n1,2,3\n5,6,7,8\n")
        .read_data(&Exclusion::None, ReadMode::Continuous)
        .unwrap_err();
    assert!(matches!(
        err,
        ReaderError::InsufficientData {
            line: 3,
            expected: 4,
            actual: 3
        }
    ));
    assert!(err.to_string().contains("line 3"));
}

// ==================== Lexical Tests ====================

#[test]
fn test_whitespace_file_with_comments() {
    let input = "// generated\n  x    y   z\n 1  2  3 \n\n// mid\n4\t5\t6\r\n";
    let config = ReaderConfig::new(Delimiter::Whitespace).with_comment_marker("//");
    let reader = TabularReader::new(MemorySource::from(input), config);

    assert_eq!(reader.count_rows().unwrap(), 2);
    assert_eq!(reader.count_columns().unwrap(), 3);
    let data = reader.read_continuous(&Exclusion::None).unwrap();
    assert_eq!(data.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
}

#[test]
fn test_quoted_names_and_values() {
    let reader = comma_reader("\"last, first\",group\n\"Doe, J\",\"a,b\"\nRoe,c\n");
    let data = reader.read_discrete(&Exclusion::None).unwrap();

    assert_eq!(data.columns()[0].name, "last, first");
    assert_eq!(data.label(0, 0), Some("Doe, J"));
    assert_eq!(data.label(0, 1), Some("a,b"));
    assert_eq!(data.label(1, 1), Some("c"));
}

#[test]
fn test_tab_delimited_default() {
    let reader = TabularReader::new(
        MemorySource::from("a\tb\n1\t\n"),
        ReaderConfig::default(),
    );
    let data = reader.read_continuous(&Exclusion::None).unwrap();
    assert_eq!(data.get(0, 0), Some(1.0));
    assert!(data.get(0, 1).unwrap().is_nan());
}

#[test]
fn test_every_fixed_delimiter() {
    for delimiter in Delimiter::ALL {
        let Some(byte) = delimiter.byte() else {
            continue;
        };
        let sep = (byte as char).to_string();
        let input = format!("a{sep}b\n1{sep}2\n");
        let reader = TabularReader::new(MemorySource::from(input), ReaderConfig::new(delimiter));
        let data = reader.read_continuous(&Exclusion::None).unwrap();
        assert_eq!(data.values(), &[1.0, 2.0], "delimiter {}", delimiter);
    }
}

// ==================== Exclusion Tests ====================

#[test]
fn test_exclusion_by_name_and_position_agree() {
    let reader = comma_reader("id,x,label,y\n1,0.5,foo,2\n2,1.5,bar,4\n");

    let by_name = reader
        .read_continuous(&Exclusion::names(["id", "label"]))
        .unwrap();
    let by_position = reader
        .read_continuous(&Exclusion::positions([3, 1]))
        .unwrap();

    assert_eq!(by_name, by_position);
    assert_eq!(by_name.to_rows(), vec![vec![0.5, 2.0], vec![1.5, 4.0]]);
    let positions: Vec<usize> = by_name.columns().iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![2, 4]);
}

#[test]
fn test_mixed_dataset_with_exclusion() {
    let reader = comma_reader("id,sex,age\n1,m,31\n2,f,45\n3,f,27\n4,m,60\n");
    let dataset = reader
        .read_data(
            &Exclusion::names(["id"]),
            ReadMode::Mixed {
                category_threshold: 3,
            },
        )
        .unwrap();

    let Dataset::Mixed(data) = dataset else {
        panic!("expected mixed dataset");
    };
    assert_eq!(data.num_columns(), 2);
    assert_eq!(data.kind(0), Some(ColumnKind::Discrete));
    assert_eq!(data.kind(1), Some(ColumnKind::Continuous));
    assert_eq!(data.discrete_column(0), Some(&[1, 0, 0, 1][..]));
    assert_eq!(data.continuous_column(1), Some(&[31.0, 45.0, 27.0, 60.0][..]));
}

// ==================== File Tests ====================

#[test]
fn test_read_from_file_with_small_buffer() {
    let file = write_temp("# header comment\r\nx,y\r\n1,2\r\n3,4\r\n");
    let config = ReaderConfig::new(Delimiter::Comma)
        .with_comment_marker("# ")
        .with_buffer_size(3);
    let reader = TabularReader::open(file.path(), config);

    assert_eq!(reader.count_rows().unwrap(), 2);
    let data = reader.read_continuous(&Exclusion::None).unwrap();
    assert_eq!(data.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
}

#[test]
fn test_repeated_passes_on_file() {
    let file = write_temp("a,b\n1,2\n");
    let reader = TabularReader::open(file.path(), ReaderConfig::new(Delimiter::Comma));
    for _ in 0..100 {
        assert_eq!(reader.count_columns().unwrap(), 2);
    }
}

#[test]
fn test_covariance_from_file() {
    let file = write_temp("250\nx y\n4.0\n1.2 9.0\n");
    let reader = CovarianceReader::new(
        tabread::FileSource::new(file.path()),
        ReaderConfig::new(Delimiter::Whitespace),
    );
    let data = reader.read().unwrap();
    assert_eq!(data.num_cases, 250);
    assert_eq!(data.matrix, vec![vec![4.0, 1.2], vec![1.2, 9.0]]);
}

// ==================== Cancellation Tests ====================

#[test]
fn test_cancellation_stops_read() {
    let token = CancellationToken::new();
    let reader = comma_reader("a\n1\n2\n").with_cancellation(token.clone());
    assert_eq!(reader.count_rows().unwrap(), 2);

    token.cancel();
    assert!(matches!(reader.count_rows(), Err(ReaderError::Cancelled)));
}
