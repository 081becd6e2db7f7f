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

//! Tabread CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **inspect**: variable names and row/column counts
//! - **read**: read a file into a dataset and summarize each column
//! - **validate**: report every problem in a file; fails when errors are found
//! - **covariance**: read or validate a covariance matrix file
//!
//! Every command takes the same reader flags (`--delimiter`, `--quote`,
//! `--no-quote`, `--comment`, `--missing`, `--no-header`, `--exclude-name`,
//! `--exclude-column`).
//!
//! # Examples
//!
//! ```no_run
//! use tabread::{Delimiter, Exclusion, ReadMode, ReaderConfig};
//! use tabread_cli::commands::read;
//!
//! # fn main() -> Result<(), tabread_cli::error::CliError> {
//! let config = ReaderConfig::new(Delimiter::Comma).with_missing_marker("NA");
//! read(
//!     "survey.csv".as_ref(),
//!     config,
//!     &Exclusion::names(["id"]),
//!     ReadMode::Mixed { category_threshold: 10 },
//!     false,
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Diagnostics from the library crates go to stderr. The level defaults to
//! `warn`, is raised by `-v`/`-vv`, and `RUST_LOG` overrides both.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
