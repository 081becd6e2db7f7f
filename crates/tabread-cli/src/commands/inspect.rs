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

//! Inspect command - file structure overview

use crate::error::CliError;
use colored::Colorize;
use std::path::Path;
use tabread::{Exclusion, ReadMode, ReaderConfig, TabularReader};

/// Print the variable names and the row and column counts of a file.
///
/// Only the structural passes run; cell contents are not parsed.
///
/// # Examples
///
/// ```no_run
/// use tabread::{Delimiter, Exclusion, ReaderConfig};
/// use tabread_cli::commands::inspect;
///
/// # fn main() -> Result<(), tabread_cli::error::CliError> {
/// inspect(
///     "survey.csv".as_ref(),
///     ReaderConfig::new(Delimiter::Comma),
///     &Exclusion::None,
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn inspect(file: &Path, config: ReaderConfig, exclusion: &Exclusion) -> Result<(), CliError> {
    let reader = TabularReader::open(file, config);
    let rows = reader.count_rows().map_err(|e| CliError::read(file, e))?;
    let file_columns = reader.count_columns().map_err(|e| CliError::read(file, e))?;
    let columns = reader
        .read_columns(exclusion, ReadMode::Continuous)
        .map_err(|e| CliError::read(file, e))?;

    println!("{}", "Tabular File".bold().underline());
    println!();
    println!("{}       {}", "File:".cyan(), file.display());
    println!("{}  {}", "Delimiter:".cyan(), reader.config().delimiter);
    println!("{}       {}", "Rows:".cyan(), rows);
    println!(
        "{}    {} ({} retained)",
        "Columns:".cyan(),
        file_columns,
        columns.len()
    );

    println!();
    println!("{}", "Variables:".cyan());
    for column in &columns {
        println!("  {:>4}  {}", column.position, column.name.green());
    }

    Ok(())
}
