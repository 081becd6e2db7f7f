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

//! Read command - materialize a dataset and summarize it

use crate::error::CliError;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tabread::{
    is_missing_discrete, ColumnKind, Dataset, Exclusion, ReadMode, ReaderConfig, TabularReader,
};

#[derive(Debug, Serialize)]
struct DatasetSummary<'a> {
    file: String,
    kind: &'static str,
    rows: usize,
    columns: Vec<ColumnSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct ColumnSummary<'a> {
    name: &'a str,
    position: usize,
    kind: ColumnKind,
    missing: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<&'a [String]>,
}

/// Read `file` in `mode` and print one line per retained column.
///
/// # Errors
///
/// The first problem in the file aborts the read and is returned as
/// [`CliError::Read`].
pub fn read(
    file: &Path,
    config: ReaderConfig,
    exclusion: &Exclusion,
    mode: ReadMode,
    json: bool,
) -> Result<(), CliError> {
    let dataset = TabularReader::open(file, config)
        .read_data(exclusion, mode)
        .map_err(|e| CliError::read(file, e))?;

    let summary = DatasetSummary {
        file: file.display().to_string(),
        kind: dataset.kind_name(),
        rows: dataset.num_rows(),
        columns: summarize_columns(&dataset),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} - {} dataset, {} rows x {} columns",
        "✓".green().bold(),
        summary.file,
        summary.kind,
        summary.rows,
        summary.columns.len()
    );
    for column in &summary.columns {
        let kind = match column.kind {
            ColumnKind::Discrete => "discrete".magenta(),
            ColumnKind::Continuous => "continuous".blue(),
        };
        print!(
            "  {:>4}  {:<20} {:<10}  missing {}",
            column.position,
            column.name.green(),
            kind,
            column.missing
        );
        if let Some(categories) = column.categories {
            print!("  {} categories: {}", categories.len(), categories.join(", "));
        }
        println!();
    }

    Ok(())
}

fn summarize_columns(dataset: &Dataset) -> Vec<ColumnSummary<'_>> {
    dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let (missing, categories) = match dataset {
                Dataset::Continuous(data) => (
                    data.rows().filter(|row| row[index].is_nan()).count(),
                    None,
                ),
                Dataset::Discrete(data) => (
                    count_missing_codes(data.column(index)),
                    data.table(index).map(|t| t.categories()),
                ),
                Dataset::Mixed(data) => match column.kind {
                    ColumnKind::Discrete => (
                        count_missing_codes(data.discrete_column(index)),
                        data.table(index).map(|t| t.categories()),
                    ),
                    ColumnKind::Continuous => (
                        data.continuous_column(index)
                            .map_or(0, |values| values.iter().filter(|v| v.is_nan()).count()),
                        None,
                    ),
                },
            };
            ColumnSummary {
                name: &column.name,
                position: column.position,
                kind: column.kind,
                missing,
                categories,
            }
        })
        .collect()
}

fn count_missing_codes(codes: Option<&[i32]>) -> usize {
    codes.map_or(0, |codes| {
        codes.iter().filter(|&&code| is_missing_discrete(code)).count()
    })
}
