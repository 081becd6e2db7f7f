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

//! Covariance command

use super::validate::{check_report, print_report};
use crate::cli::args::OutputFormat;
use crate::error::CliError;
use colored::Colorize;
use std::path::Path;
use tabread::{CovarianceReader, FileSource, ReaderConfig};
use tabread_validate::Validator;

/// Read a covariance file and print the matrix, or validate it.
pub fn covariance(
    file: &Path,
    config: ReaderConfig,
    validate: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    if validate {
        let report = Validator::open(file, config)
            .validate_covariance()
            .map_err(|e| CliError::validate(file, e))?;
        print_report(file, &report, format)?;
        return check_report(file, &report);
    }

    let data = CovarianceReader::new(FileSource::new(file), config)
        .read()
        .map_err(|e| CliError::read(file, e))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
        OutputFormat::Text => {
            println!(
                "{} {} - {} variables, {} cases",
                "✓".green().bold(),
                file.display(),
                data.num_variables(),
                data.num_cases
            );
            let width = data
                .variables
                .iter()
                .map(String::len)
                .max()
                .unwrap_or(0)
                .max(10);
            print!("  {:width$}", "", width = width);
            for name in &data.variables {
                print!(" {:>width$}", name.cyan(), width = width);
            }
            println!();
            for (name, row) in data.variables.iter().zip(&data.matrix) {
                print!("  {:<width$}", name.cyan(), width = width);
                for value in row {
                    print!(" {:>width$.4}", value, width = width);
                }
                println!();
            }
        }
    }
    Ok(())
}
