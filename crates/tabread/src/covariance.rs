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

//! Lower-triangular covariance files.
//!
//! ```text
//! 100
//! x  y  z
//! 1.0
//! 0.5  2.0
//! 0.1  0.3  1.5
//! ```
//!
//! The first logical line is the number of cases, the second the variable
//! names, and row `i` of the triangle holds `i + 1` values. Comment and blank
//! lines are skipped as in any other file. Lines after the last row of the
//! triangle are ignored.

use crate::cancel::CancellationToken;
use crate::config::ReaderConfig;
use crate::error::{ReaderError, ReaderResult};
use crate::source::ByteSource;
use crate::tokenizer::{field_text, scan, FieldContext, Flow, RecordContext, RecordVisitor, ScanOptions};
use tracing::debug;

/// A parsed covariance file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CovarianceData {
    pub num_cases: usize,
    pub variables: Vec<String>,
    /// Full symmetric `n × n` matrix.
    pub matrix: Vec<Vec<f64>>,
}

impl CovarianceData {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.matrix.get(row).and_then(|r| r.get(column)).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    CaseCount,
    Names,
    /// Expecting this triangle row (0-based).
    Matrix(usize),
    Done,
}

/// Record visitor for the covariance layout.
///
/// Errors are returned as soon as they are seen, but the parser state is
/// always advanced first, so a caller that records an error and keeps
/// feeding records gets sensible results for the rest of the file. Cells that
/// failed to parse stay `NaN`.
#[derive(Debug)]
pub struct CovarianceParser {
    stage: Stage,
    num_cases: usize,
    variables: Vec<String>,
    matrix: Vec<Vec<f64>>,
    last_line: usize,
}

impl Default for CovarianceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CovarianceParser {
    pub fn new() -> Self {
        Self {
            stage: Stage::CaseCount,
            num_cases: 0,
            variables: Vec::new(),
            matrix: Vec::new(),
            last_line: 0,
        }
    }

    /// Variables read so far.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Matrix rows completed so far.
    pub fn rows_read(&self) -> usize {
        match self.stage {
            Stage::Matrix(row) => row,
            Stage::Done => self.variables.len(),
            _ => 0,
        }
    }

    /// Check completeness and return the data.
    ///
    /// # Errors
    ///
    /// [`ReaderError::MissingCovarianceData`] if the file ended early.
    pub fn finish(self) -> ReaderResult<CovarianceData> {
        if self.stage != Stage::Done {
            return Err(ReaderError::MissingCovarianceData {
                line: self.last_line + 1,
            });
        }
        Ok(CovarianceData {
            num_cases: self.num_cases,
            variables: self.variables,
            matrix: self.matrix,
        })
    }
}

impl RecordVisitor for CovarianceParser {
    fn field(&mut self, ctx: &FieldContext, value: &[u8]) -> ReaderResult<()> {
        match self.stage {
            Stage::CaseCount if ctx.index == 0 => {
                let text = field_text(value);
                match text.parse::<usize>() {
                    Ok(cases) if cases > 0 => {
                        self.num_cases = cases;
                        Ok(())
                    }
                    _ => Err(ReaderError::InvalidCaseCount {
                        line: ctx.line,
                        value: text.into_owned(),
                    }),
                }
            }
            Stage::Names => {
                self.variables.push(field_text(value).into_owned());
                if value.is_empty() {
                    return Err(ReaderError::MissingVariableName {
                        line: ctx.line,
                        column: ctx.column,
                    });
                }
                Ok(())
            }
            Stage::Matrix(row) if ctx.index <= row => {
                let parsed = std::str::from_utf8(value)
                    .ok()
                    .and_then(|text| text.parse::<f64>().ok());
                match parsed {
                    Some(number) => {
                        self.matrix[row][ctx.index] = number;
                        self.matrix[ctx.index][row] = number;
                        Ok(())
                    }
                    None => Err(ReaderError::invalid_number(
                        ctx.line,
                        ctx.column,
                        field_text(value),
                    )),
                }
            }
            _ => Ok(()),
        }
    }

    fn end_record(&mut self, ctx: &RecordContext) -> ReaderResult<Flow> {
        self.last_line = ctx.line;
        match self.stage {
            Stage::CaseCount => {
                self.stage = Stage::Names;
                Ok(Flow::Continue)
            }
            Stage::Names => {
                let n = self.variables.len();
                self.matrix = vec![vec![f64::NAN; n]; n];
                self.stage = if n == 0 { Stage::Done } else { Stage::Matrix(0) };
                Ok(if n == 0 { Flow::Break } else { Flow::Continue })
            }
            Stage::Matrix(row) => {
                let done = row + 1 == self.variables.len();
                self.stage = if done { Stage::Done } else { Stage::Matrix(row + 1) };
                if let Some(err) = ReaderError::shape(ctx.line, row + 1, ctx.retained) {
                    return Err(err);
                }
                Ok(if done { Flow::Break } else { Flow::Continue })
            }
            Stage::Done => Ok(Flow::Break),
        }
    }
}

/// Reads a covariance file with the lexical rules of a [`ReaderConfig`].
///
/// The `has_header` setting does not apply; the layout is fixed.
pub struct CovarianceReader<S> {
    source: S,
    config: ReaderConfig,
    cancel: Option<CancellationToken>,
}

impl<S: ByteSource> CovarianceReader<S> {
    pub fn new(source: S, config: ReaderConfig) -> Self {
        Self {
            source,
            config,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Parse the whole file, failing on the first problem.
    pub fn read(&self) -> ReaderResult<CovarianceData> {
        self.config.validate()?;
        let mut parser = CovarianceParser::new();
        let options = ScanOptions::new().cancel_with(self.cancel.as_ref());
        scan(&self.source, &self.config, &options, &mut parser)?;

        let data = parser.finish()?;
        debug!(
            source = %self.source.name(),
            cases = data.num_cases,
            variables = data.num_variables(),
            "read covariance matrix"
        );
        Ok(data)
    }
}
