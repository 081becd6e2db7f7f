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

//! The final pass: typed values for every retained cell.

use crate::cancel::CancellationToken;
use crate::category::CategoryTable;
use crate::columns::{ColumnKind, ColumnLayout};
use crate::config::{ReadMode, ReaderConfig};
use crate::dataset::{
    ContinuousData, Dataset, DiscreteData, MixedData, MISSING_CONTINUOUS_VALUE,
    MISSING_DISCRETE_VALUE,
};
use crate::error::{ReaderError, ReaderResult};
use crate::source::ByteSource;
use crate::tokenizer::{field_text, scan, FieldContext, Flow, RecordContext, RecordVisitor, ScanOptions};
use tracing::debug;

/// A continuous cell after parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContinuousCell {
    Missing,
    Number(f64),
    Invalid,
}

/// Parse a trimmed continuous field.
///
/// Empty text, and text equal to a non-empty `missing_marker`, is missing.
pub fn parse_continuous(value: &[u8], missing_marker: &str) -> ContinuousCell {
    if is_missing(value, missing_marker) {
        return ContinuousCell::Missing;
    }
    std::str::from_utf8(value)
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
        .map_or(ContinuousCell::Invalid, ContinuousCell::Number)
}

/// Whether a trimmed field denotes a missing value.
#[inline]
pub fn is_missing(value: &[u8], missing_marker: &str) -> bool {
    value.is_empty() || (!missing_marker.is_empty() && value == missing_marker.as_bytes())
}

/// Destination of one retained column.
enum ColumnSink<'t> {
    Continuous(Vec<f64>),
    Discrete {
        codes: Vec<i32>,
        table: &'t CategoryTable,
    },
}

/// Where parsed cells go for the requested dataset shape.
enum Target<'t> {
    /// Continuous reads fill one row-major buffer in arrival order.
    Rows(Vec<f64>),
    Columns(Vec<ColumnSink<'t>>),
}

/// Re-walks the file and produces the [`Dataset`].
pub struct DataMaterializer<'a, S: ?Sized> {
    source: &'a S,
    config: &'a ReaderConfig,
    cancel: Option<&'a CancellationToken>,
}

impl<'a, S: ByteSource + ?Sized> DataMaterializer<'a, S> {
    pub fn new(source: &'a S, config: &'a ReaderConfig) -> Self {
        Self {
            source,
            config,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: Option<&'a CancellationToken>) -> Self {
        self.cancel = token;
        self
    }

    /// Build the dataset.
    ///
    /// `tables` holds one entry per retained column, as returned by
    /// [`CategoryDiscoverer::discover`](crate::CategoryDiscoverer::discover);
    /// it may be empty for continuous reads.
    ///
    /// # Errors
    ///
    /// - [`ReaderError::InvalidNumber`] for unparsable continuous text
    /// - [`ReaderError::ExcessData`] / [`ReaderError::InsufficientData`] for a
    ///   row of the wrong width
    /// - [`ReaderError::UnknownCategory`] if a discrete value has no code
    pub fn materialize(
        &self,
        layout: ColumnLayout,
        tables: Vec<Option<CategoryTable>>,
        mode: ReadMode,
    ) -> ReaderResult<Dataset> {
        let target = match mode {
            ReadMode::Continuous => Target::Rows(Vec::new()),
            ReadMode::Discrete | ReadMode::Mixed { .. } => Target::Columns(
                layout
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| match (column.kind, tables.get(i).and_then(Option::as_ref)) {
                        (ColumnKind::Discrete, Some(table)) => ColumnSink::Discrete {
                            codes: Vec::new(),
                            table,
                        },
                        _ => ColumnSink::Continuous(Vec::new()),
                    })
                    .collect(),
            ),
        };

        let mut visitor = MaterializeVisitor {
            target,
            expected: layout.num_columns(),
            missing_marker: &self.config.missing_marker,
            rows: 0,
        };
        let options = ScanOptions::new()
            .skip_header(self.config.has_header)
            .exclude(&layout.excluded)
            .cancel_with(self.cancel);
        scan(self.source, self.config, &options, &mut visitor)?;

        let num_rows = visitor.rows;
        debug!(
            source = %self.source.name(),
            rows = num_rows,
            columns = layout.num_columns(),
            "materialized data"
        );

        let sinks = match visitor.target {
            Target::Rows(values) => {
                return Ok(Dataset::Continuous(ContinuousData::new(
                    layout.columns,
                    num_rows,
                    values,
                )))
            }
            Target::Columns(sinks) => sinks,
        };

        Ok(match mode {
            ReadMode::Discrete => {
                let codes = sinks
                    .into_iter()
                    .map(|sink| match sink {
                        ColumnSink::Discrete { codes, .. } => codes,
                        ColumnSink::Continuous(_) => Vec::new(),
                    })
                    .collect();
                let tables = tables.into_iter().map(Option::unwrap_or_default).collect();
                Dataset::Discrete(DiscreteData::new(layout.columns, num_rows, codes, tables))
            }
            _ => {
                let mut continuous = Vec::with_capacity(sinks.len());
                let mut discrete = Vec::with_capacity(sinks.len());
                for sink in sinks {
                    match sink {
                        ColumnSink::Continuous(values) => {
                            continuous.push(values);
                            discrete.push(Vec::new());
                        }
                        ColumnSink::Discrete { codes, .. } => {
                            continuous.push(Vec::new());
                            discrete.push(codes);
                        }
                    }
                }
                Dataset::Mixed(MixedData::new(
                    layout.columns,
                    num_rows,
                    continuous,
                    discrete,
                    tables,
                ))
            }
        })
    }
}

struct MaterializeVisitor<'t> {
    target: Target<'t>,
    expected: usize,
    missing_marker: &'t str,
    rows: usize,
}

fn continuous_cell(ctx: &FieldContext, value: &[u8], missing_marker: &str) -> ReaderResult<f64> {
    match parse_continuous(value, missing_marker) {
        ContinuousCell::Number(number) => Ok(number),
        ContinuousCell::Missing => Ok(MISSING_CONTINUOUS_VALUE),
        ContinuousCell::Invalid => Err(ReaderError::invalid_number(
            ctx.line,
            ctx.column,
            field_text(value),
        )),
    }
}

fn discrete_cell(
    ctx: &FieldContext,
    value: &[u8],
    table: &CategoryTable,
    missing_marker: &str,
) -> ReaderResult<i32> {
    if is_missing(value, missing_marker) {
        return Ok(MISSING_DISCRETE_VALUE);
    }
    let text = field_text(value);
    table
        .encode(&text)
        .ok_or_else(|| ReaderError::UnknownCategory {
            line: ctx.line,
            column: ctx.column,
            value: text.into_owned(),
        })
}

impl RecordVisitor for MaterializeVisitor<'_> {
    fn field(&mut self, ctx: &FieldContext, value: &[u8]) -> ReaderResult<()> {
        if ctx.index >= self.expected {
            return Ok(());
        }

        let missing_marker = self.missing_marker;
        match &mut self.target {
            Target::Rows(values) => values.push(continuous_cell(ctx, value, missing_marker)?),
            Target::Columns(sinks) => match &mut sinks[ctx.index] {
                ColumnSink::Continuous(values) => {
                    values.push(continuous_cell(ctx, value, missing_marker)?)
                }
                ColumnSink::Discrete { codes, table } => {
                    codes.push(discrete_cell(ctx, value, table, missing_marker)?)
                }
            },
        }
        Ok(())
    }

    fn end_record(&mut self, ctx: &RecordContext) -> ReaderResult<Flow> {
        if let Some(err) = ReaderError::shape(ctx.line, self.expected, ctx.retained) {
            return Err(err);
        }
        self.rows += 1;
        Ok(Flow::Continue)
    }
}
