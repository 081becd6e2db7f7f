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

//! Validate command - report every problem in a file

use crate::cli::args::OutputFormat;
use crate::error::CliError;
use colored::Colorize;
use std::path::Path;
use tabread::{Exclusion, ReadMode, ReaderConfig};
use tabread_validate::{
    ValidationCode, ValidationConfig, ValidationKind, ValidationReport, Validator,
};

/// Settings for [`validate`].
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Data validation in this mode; `None` checks only the variable names.
    pub mode: Option<ReadMode>,
    pub validation: ValidationConfig,
    pub format: OutputFormat,
}

/// Validate a file and print the report.
///
/// # Errors
///
/// [`CliError::ValidationFailed`] when the report holds any error result,
/// [`CliError::Validate`] when no report could be produced.
///
/// # Output
///
/// **Text format**: one colored line per result, then the file summary.
///
/// **JSON format**: `{"file": ..., "results": [...]}` with the results in
/// report order.
pub fn validate(
    file: &Path,
    config: ReaderConfig,
    exclusion: &Exclusion,
    options: &ValidateOptions,
) -> Result<(), CliError> {
    let validator = Validator::open(file, config).with_config(options.validation.clone());
    let report = match options.mode {
        Some(mode) => validator.validate_data(exclusion, mode),
        None => validator.validate_columns(exclusion),
    }
    .map_err(|e| CliError::validate(file, e))?;

    print_report(file, &report, options.format)?;
    check_report(file, &report)
}

pub(crate) fn print_report(
    file: &Path,
    report: &ValidationReport,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "file": file.display().to_string(),
                "results": report.results(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            let issues: Vec<_> = report
                .iter()
                .filter(|r| r.kind() != ValidationKind::FileSummary)
                .collect();

            if issues.is_empty() {
                println!("{} {} - no issues found", "✓".green().bold(), file.display());
            } else {
                println!(
                    "{} {} - {} issue(s) found:",
                    "!".yellow().bold(),
                    file.display(),
                    issues.len()
                );
                for result in issues {
                    let code = match result.code() {
                        ValidationCode::Error => "error".red(),
                        ValidationCode::Warning => "warning".yellow(),
                        ValidationCode::Info => "info".blue(),
                    };
                    match result.line() {
                        Some(line) => println!(
                            "  {}:{}: {} [{}]: {}",
                            file.display(),
                            line,
                            code,
                            result.kind(),
                            result.message()
                        ),
                        None => println!(
                            "  {}: {} [{}]: {}",
                            file.display(),
                            code,
                            result.kind(),
                            result.message()
                        ),
                    }
                }
            }

            if let Some(summary) = report.summary() {
                println!("  {}", summary.message().dimmed());
            }
        }
    }
    Ok(())
}

pub(crate) fn check_report(file: &Path, report: &ValidationReport) -> Result<(), CliError> {
    let errors = report.count(ValidationCode::Error);
    if errors > 0 {
        return Err(CliError::ValidationFailed {
            path: file.to_path_buf(),
            errors,
        });
    }
    Ok(())
}
