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

//! Tabread Command Line Interface

use clap::{ArgAction, Parser};
use std::process::ExitCode;
use tabread_cli::cli::Commands;
use tabread_cli::logging;

/// Tabread - tabular data file reader
///
/// # Examples
///
/// ```bash
/// # Show the variables of a comma-separated file
/// tabread inspect survey.csv --delimiter comma
///
/// # Read with mixed discrete/continuous columns, skipping an id column
/// tabread read survey.csv -d comma --mode mixed --threshold 5 --exclude-name id
///
/// # Report every problem as JSON
/// tabread validate data.txt --comment "//" --format json
/// ```
#[derive(Parser)]
#[command(name = "tabread")]
#[command(author, version, about = "Tabread - tabular data file reader", long_about = None)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!("tabread v{}", env!("CARGO_PKG_VERSION"));

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
