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

//! Validation runner

use crate::diagnostic::{ValidationAttribute, ValidationCode, ValidationKind, ValidationResult};
use crate::error::{ValidateError, ValidateResult};
use crate::report::ValidationReport;
use tabread::{
    field_text, parse_continuous, resolve_exclusion, scan, ByteSource, CancellationToken,
    CategoryCollector, ColumnCatalog, ColumnKind, ColumnLayout, ContinuousCell, CovarianceParser,
    Exclusion, FieldContext, FileSource, Flow, ReadMode, ReaderConfig, ReaderError, ReaderResult,
    RecordContext, RecordVisitor, ScanOptions, StructureProbe,
};
use tracing::{debug, warn};

/// Default cap on results collected by one run.
///
/// A file with a systematic problem (a wrong delimiter, say) produces one
/// result per row; past this many the report stops growing.
pub const MAX_RESULTS: usize = 10_000;

/// Settings for a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Maximum results before the scan stops (default: 10,000).
    ///
    /// The cap does not count the limit warning or the file summary.
    pub max_results: usize,
    /// Results below this code are dropped (default: info, keep all).
    pub min_code: ValidationCode,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            min_code: ValidationCode::Info,
        }
    }
}

impl ValidationConfig {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_min_code(mut self, code: ValidationCode) -> Self {
        self.min_code = code;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("max_results must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Collects results up to the cap.
struct ResultSink {
    results: Vec<ValidationResult>,
    max: usize,
    min_code: ValidationCode,
    limited: bool,
}

impl ResultSink {
    fn new(config: &ValidationConfig) -> Self {
        Self {
            results: Vec::new(),
            max: config.max_results,
            min_code: config.min_code,
            limited: false,
        }
    }

    /// Record a result. Returns `false` once the cap has been hit.
    fn push(&mut self, result: ValidationResult) -> bool {
        if self.limited {
            return false;
        }
        if result.code() < self.min_code {
            return true;
        }
        if self.results.len() >= self.max {
            self.limited = true;
            warn!(max = self.max, "validation result limit reached, stopping scan");
            self.results.push(
                ValidationResult::warning(
                    ValidationKind::DiagnosticLimit,
                    format!("Result limit of {} reached; remaining rows not checked", self.max),
                )
                .with(ValidationAttribute::ExpectedCount, self.max),
            );
            return false;
        }
        self.results.push(result);
        true
    }

    /// Record a data problem; anything else is handed back.
    fn record(&mut self, err: ReaderError) -> ReaderResult<()> {
        match ValidationResult::from_reader_error(&err) {
            Some(result) => {
                self.push(result);
                Ok(())
            }
            None => Err(err),
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.limited
    }

    fn flow(&self) -> Flow {
        if self.limited {
            Flow::Break
        } else {
            Flow::Continue
        }
    }

    fn finish(mut self, summary: ValidationResult) -> ValidationReport {
        self.results.push(summary);
        ValidationReport::new(self.results)
    }
}

#[derive(Debug, Default)]
struct Tally {
    rows: usize,
    columns: usize,
    discrete: usize,
    continuous: usize,
    assumed_missing: usize,
    labeled_missing: usize,
}

/// Runs diagnostic passes over one source.
///
/// Unlike [`TabularReader`](tabread::TabularReader), problems in the data do
/// not stop a pass: each becomes a [`ValidationResult`] and the scan moves on
/// to the next field or line. Every report ends with a
/// [`ValidationKind::FileSummary`] result.
pub struct Validator<S> {
    source: S,
    config: ReaderConfig,
    validation: ValidationConfig,
    cancel: Option<CancellationToken>,
}

impl Validator<FileSource> {
    /// Validator over a file on disk.
    pub fn open(path: impl AsRef<std::path::Path>, config: ReaderConfig) -> Self {
        Self::new(FileSource::new(path), config)
    }
}

impl<S: ByteSource> Validator<S> {
    pub fn new(source: S, config: ReaderConfig) -> Self {
        Self {
            source,
            config,
            validation: ValidationConfig::default(),
            cancel: None,
        }
    }

    pub fn with_config(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Check the header: one error per empty, non-excluded variable name.
    ///
    /// # Errors
    ///
    /// Only for an unusable configuration or cancellation; I/O failures are
    /// reported as [`ValidationKind::IoError`] results.
    pub fn validate_columns(&self, exclusion: &Exclusion) -> ValidateResult<ValidationReport> {
        self.check_config()?;
        let mut sink = ResultSink::new(&self.validation);
        let mut tally = Tally::default();

        let outcome = self
            .check_columns(exclusion, ReadMode::Continuous, &mut sink)
            .and_then(|layout| {
                tally.columns = layout.num_columns();
                if !sink.is_full() {
                    tally.rows = self.count_rows()?;
                }
                Ok(())
            });
        if let Err(err) = outcome {
            sink.record(err)?;
        }

        Ok(self.finish(sink, self.summary(&tally)))
    }

    /// Check every data row as a read in `mode` would see it.
    ///
    /// Reports missing names, rows of the wrong width, unparsable numbers in
    /// continuous columns, empty fields and over-long fields. In mixed mode a
    /// first pass settles which columns are discrete.
    pub fn validate_data(
        &self,
        exclusion: &Exclusion,
        mode: ReadMode,
    ) -> ValidateResult<ValidationReport> {
        self.check_config()?;
        mode.validate()?;
        let mut sink = ResultSink::new(&self.validation);
        let mut tally = Tally::default();

        if let Err(err) = self.check_data(exclusion, mode, &mut sink, &mut tally) {
            sink.record(err)?;
        }

        let mut summary = self
            .summary(&tally)
            .with(ValidationAttribute::AssumedMissingCount, tally.assumed_missing)
            .with(ValidationAttribute::LabeledMissingCount, tally.labeled_missing);
        if let ReadMode::Mixed { .. } = mode {
            summary = summary
                .with(ValidationAttribute::DiscreteVarCount, tally.discrete)
                .with(ValidationAttribute::ContinuousVarCount, tally.continuous);
        }
        Ok(self.finish(sink, summary))
    }

    /// Check a covariance file: the case count, the names and every cell of
    /// the lower triangle.
    pub fn validate_covariance(&self) -> ValidateResult<ValidationReport> {
        self.check_config()?;
        let mut sink = ResultSink::new(&self.validation);

        let mut visitor = LenientCovariance {
            parser: CovarianceParser::new(),
            sink: &mut sink,
        };
        let options = ScanOptions::new().cancel_with(self.cancel.as_ref());
        let outcome = scan(&self.source, &self.config, &options, &mut visitor);
        let LenientCovariance { parser, .. } = visitor;

        let tally = Tally {
            rows: parser.rows_read(),
            columns: parser.variables().len(),
            ..Tally::default()
        };
        match outcome {
            Err(err) => sink.record(err)?,
            Ok(_) if !sink.is_full() => {
                if let Err(err) = parser.finish() {
                    sink.record(err)?;
                }
            }
            Ok(_) => {}
        }

        Ok(self.finish(sink, self.summary(&tally)))
    }

    fn check_config(&self) -> ValidateResult<()> {
        self.config.validate()?;
        self.validation
            .validate()
            .map_err(ValidateError::InvalidConfig)
    }

    fn check_columns(
        &self,
        exclusion: &Exclusion,
        mode: ReadMode,
        sink: &mut ResultSink,
    ) -> ReaderResult<ColumnLayout> {
        let catalog =
            ColumnCatalog::new(&self.source, &self.config).with_cancellation(self.cancel.as_ref());
        let (header, num_file_columns) = catalog.read_structure()?;
        let excluded = resolve_exclusion(exclusion, header.as_ref(), num_file_columns);

        if let Some(header) = &header {
            for column in header.missing_names(&excluded) {
                sink.record(ReaderError::MissingVariableName {
                    line: header.line,
                    column,
                })?;
                if sink.is_full() {
                    break;
                }
            }
        }

        Ok(ColumnLayout::build(
            header.as_ref(),
            excluded,
            num_file_columns,
            mode,
        ))
    }

    fn check_data(
        &self,
        exclusion: &Exclusion,
        mode: ReadMode,
        sink: &mut ResultSink,
        tally: &mut Tally,
    ) -> ReaderResult<()> {
        let mut layout = self.check_columns(exclusion, mode, sink)?;
        tally.columns = layout.num_columns();
        if sink.is_full() {
            return Ok(());
        }

        if mode.category_threshold().is_some() {
            self.settle_kinds(&mut layout, mode)?;
        }
        tally.discrete = layout.columns.iter().filter(|c| c.is_discrete()).count();
        tally.continuous = tally.columns - tally.discrete;

        let mut visitor = DataVisitor {
            kinds: layout.columns.iter().map(|c| c.kind).collect(),
            missing_marker: &self.config.missing_marker,
            sink,
            tally,
        };
        let options = self.data_options(&layout);
        scan(&self.source, &self.config, &options, &mut visitor)?;
        Ok(())
    }

    /// Run category discovery without failing on malformed rows.
    fn settle_kinds(&self, layout: &mut ColumnLayout, mode: ReadMode) -> ReaderResult<()> {
        let mut visitor = CollectVisitor {
            collector: CategoryCollector::new(&layout.columns, mode, &self.config.missing_marker),
        };
        scan(
            &self.source,
            &self.config,
            &self.data_options(layout),
            &mut visitor,
        )?;
        visitor.collector.finish(&mut layout.columns);
        Ok(())
    }

    fn data_options<'a>(&'a self, layout: &'a ColumnLayout) -> ScanOptions<'a> {
        ScanOptions::new()
            .skip_header(self.config.has_header)
            .exclude(&layout.excluded)
            .cancel_with(self.cancel.as_ref())
    }

    fn count_rows(&self) -> ReaderResult<usize> {
        let lines = StructureProbe::new(&self.source, &self.config)
            .with_cancellation(self.cancel.as_ref())
            .count_logical_lines()?;
        Ok(if self.config.has_header {
            lines.saturating_sub(1)
        } else {
            lines
        })
    }

    /// `ROW_NUMBER` and `COLUMN_NUMBER` carry the row and column counts.
    fn summary(&self, tally: &Tally) -> ValidationResult {
        let name = self.source.name();
        ValidationResult::info(
            ValidationKind::FileSummary,
            format!("{}: {} rows, {} columns", name, tally.rows, tally.columns),
        )
        .with(ValidationAttribute::FileName, name)
        .with(ValidationAttribute::RowNumber, tally.rows)
        .with(ValidationAttribute::ColumnNumber, tally.columns)
    }

    fn finish(&self, sink: ResultSink, summary: ValidationResult) -> ValidationReport {
        let report = sink.finish(summary);
        debug!(
            source = %self.source.name(),
            results = report.len(),
            errors = report.count(ValidationCode::Error),
            truncated = report.is_truncated(),
            "validation finished"
        );
        report
    }
}

struct DataVisitor<'v> {
    kinds: Vec<ColumnKind>,
    missing_marker: &'v str,
    sink: &'v mut ResultSink,
    tally: &'v mut Tally,
}

impl RecordVisitor for DataVisitor<'_> {
    fn field(&mut self, ctx: &FieldContext, value: &[u8]) -> ReaderResult<()> {
        let Some(kind) = self.kinds.get(ctx.index) else {
            return Ok(());
        };

        if value.is_empty() {
            self.tally.assumed_missing += 1;
            // With a marker configured, blanks should have been labeled.
            let (code, message) = if self.missing_marker.is_empty() {
                (
                    ValidationCode::Warning,
                    format!(
                        "Empty field at line {}, column {} assumed missing",
                        ctx.line, ctx.column
                    ),
                )
            } else {
                (
                    ValidationCode::Error,
                    format!(
                        "Empty field at line {}, column {} instead of missing marker '{}'",
                        ctx.line, ctx.column, self.missing_marker
                    ),
                )
            };
            self.sink.push(
                ValidationResult::new(code, ValidationKind::MissingValue, message)
                    .with_line(ctx.line)
                    .with_column(ctx.column)
                    .with(ValidationAttribute::RowNumber, ctx.row),
            );
        } else if !self.missing_marker.is_empty() && value == self.missing_marker.as_bytes() {
            self.tally.labeled_missing += 1;
        } else if *kind == ColumnKind::Continuous {
            if let ContinuousCell::Invalid = parse_continuous(value, self.missing_marker) {
                self.sink
                    .record(ReaderError::invalid_number(ctx.line, ctx.column, field_text(value)))?;
            }
        }
        Ok(())
    }

    fn end_record(&mut self, ctx: &RecordContext) -> ReaderResult<Flow> {
        self.tally.rows += 1;
        if let Some(err) = ReaderError::shape(ctx.line, self.kinds.len(), ctx.retained) {
            self.sink.record(err)?;
        }
        Ok(self.sink.flow())
    }

    fn field_too_long(&mut self, ctx: &FieldContext, limit: usize) -> ReaderResult<()> {
        self.sink.record(ReaderError::FieldTooLong {
            line: ctx.line,
            column: ctx.column,
            limit,
        })
    }
}

struct CollectVisitor {
    collector: CategoryCollector,
}

impl RecordVisitor for CollectVisitor {
    fn field(&mut self, ctx: &FieldContext, value: &[u8]) -> ReaderResult<()> {
        self.collector.add(ctx.index, value);
        Ok(())
    }

    fn end_record(&mut self, _ctx: &RecordContext) -> ReaderResult<Flow> {
        Ok(Flow::Continue)
    }

    fn field_too_long(&mut self, _ctx: &FieldContext, _limit: usize) -> ReaderResult<()> {
        Ok(())
    }
}

struct LenientCovariance<'v> {
    parser: CovarianceParser,
    sink: &'v mut ResultSink,
}

impl RecordVisitor for LenientCovariance<'_> {
    fn field(&mut self, ctx: &FieldContext, value: &[u8]) -> ReaderResult<()> {
        match self.parser.field(ctx, value) {
            Ok(()) => Ok(()),
            Err(err) => self.sink.record(err),
        }
    }

    fn end_record(&mut self, ctx: &RecordContext) -> ReaderResult<Flow> {
        let flow = match self.parser.end_record(ctx) {
            Ok(flow) => flow,
            Err(err) => {
                self.sink.record(err)?;
                Flow::Continue
            }
        };
        Ok(match self.sink.flow() {
            Flow::Break => Flow::Break,
            Flow::Continue => flow,
        })
    }

    fn field_too_long(&mut self, ctx: &FieldContext, limit: usize) -> ReaderResult<()> {
        self.sink.record(ReaderError::FieldTooLong {
            line: ctx.line,
            column: ctx.column,
            limit,
        })
    }
}
