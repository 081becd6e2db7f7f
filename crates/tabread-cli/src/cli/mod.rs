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

//! CLI command definitions and argument parsing.
//!
//! - [`Commands`]: the subcommands and their dispatch
//! - [`args`]: argument groups shared by several commands

pub mod args;

use crate::commands;
use crate::error::CliError;
use args::{ModeArgs, OutputFormat, ReaderArgs};
use clap::Subcommand;
use std::path::PathBuf;
use tabread_validate::ValidationConfig;

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show variable names, kinds and row/column counts
    Inspect {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        reader: ReaderArgs,
    },

    /// Read a file into a dataset and summarize it
    ///
    /// Fails on the first problem in the file, exactly as a program
    /// loading the data would.
    Read {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        reader: ReaderArgs,

        #[command(flatten)]
        mode: ModeArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report every problem in a file
    ///
    /// Exits with a failure code when any error is found.
    Validate {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        reader: ReaderArgs,

        #[command(flatten)]
        mode: ModeArgs,

        /// Only check the variable names
        #[arg(long)]
        columns_only: bool,

        /// Stop after this many results
        #[arg(long, value_name = "N", default_value_t = tabread_validate::MAX_RESULTS)]
        max_results: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Read or validate a covariance matrix file
    Covariance {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        reader: ReaderArgs,

        /// Report every problem instead of failing on the first
        #[arg(long)]
        validate: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a read fails, if arguments conflict, or if
    /// validation finds errors.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Inspect { file, reader } => {
                commands::inspect(&file, reader.config()?, &reader.exclusion())
            }
            Commands::Read {
                file,
                reader,
                mode,
                json,
            } => commands::read(&file, reader.config()?, &reader.exclusion(), mode.mode(), json),
            Commands::Validate {
                file,
                reader,
                mode,
                columns_only,
                max_results,
                format,
            } => {
                let options = commands::ValidateOptions {
                    mode: (!columns_only).then(|| mode.mode()),
                    validation: ValidationConfig::default().with_max_results(max_results),
                    format,
                };
                commands::validate(&file, reader.config()?, &reader.exclusion(), &options)
            }
            Commands::Covariance {
                file,
                reader,
                validate,
                format,
            } => commands::covariance(&file, reader.config()?, validate, format),
        }
    }
}
