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

//! Tests for the clap command structure.

use clap::{CommandFactory, Parser};
use tabread::{Delimiter, Exclusion, ReadMode};
use tabread_cli::cli::Commands;

#[derive(Parser)]
#[command(name = "tabread")]
struct TestCli {
    #[command(subcommand)]
    command: Commands,
}

#[test]
fn test_command_definition_is_valid() {
    TestCli::command().debug_assert();
}

#[test]
fn test_all_commands_available() {
    let cmd = TestCli::command();
    let subcommands: Vec<_> = cmd.get_subcommands().map(|c| c.get_name()).collect();

    for name in ["inspect", "read", "validate", "covariance"] {
        assert!(subcommands.contains(&name), "missing {}", name);
    }
}

#[test]
fn test_reader_flags_parse() {
    let cli = TestCli::try_parse_from([
        "tabread",
        "read",
        "data.txt",
        "--delimiter",
        "semicolon",
        "--quote",
        "'",
        "--missing",
        "NA",
        "--no-header",
        "--exclude-name",
        "id",
        "--exclude-name",
        "weight",
        "--mode",
        "mixed",
        "--threshold",
        "7",
    ])
    .unwrap();

    let Commands::Read { reader, mode, .. } = cli.command else {
        panic!("expected read command");
    };
    let config = reader.config().unwrap();
    assert_eq!(config.delimiter, Delimiter::Semicolon);
    assert_eq!(config.quote, Some(b'\''));
    assert_eq!(config.missing_marker, "NA");
    assert!(!config.has_header);
    assert_eq!(reader.exclusion(), Exclusion::names(["id", "weight"]));
    assert_eq!(
        mode.mode(),
        ReadMode::Mixed {
            category_threshold: 7
        }
    );
}

#[test]
fn test_quote_conflicts_with_no_quote() {
    let result = TestCli::try_parse_from([
        "tabread",
        "inspect",
        "data.txt",
        "--quote",
        "'",
        "--no-quote",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_validate_defaults() {
    let cli = TestCli::try_parse_from(["tabread", "validate", "data.txt"]).unwrap();
    let Commands::Validate {
        max_results,
        columns_only,
        ..
    } = cli.command
    else {
        panic!("expected validate command");
    };
    assert_eq!(max_results, tabread_validate::MAX_RESULTS);
    assert!(!columns_only);
}
