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

//! Cheap structural passes: line and column counts.

use crate::cancel::CancellationToken;
use crate::config::ReaderConfig;
use crate::error::ReaderResult;
use crate::source::ByteSource;
use crate::tokenizer::{scan, FieldContext, Flow, RecordContext, RecordVisitor, ScanOptions};
use tracing::debug;

/// Counts logical lines and the width of the first one.
///
/// Neither pass looks at field content, so oversized fields are tolerated.
pub struct StructureProbe<'a, S: ?Sized> {
    source: &'a S,
    config: &'a ReaderConfig,
    cancel: Option<&'a CancellationToken>,
}

impl<'a, S: ByteSource + ?Sized> StructureProbe<'a, S> {
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

    fn options(&self) -> ScanOptions<'a> {
        ScanOptions::new().cancel_with(self.cancel)
    }

    /// Number of lines with at least one non-blank, non-comment byte.
    ///
    /// The header, if any, is included.
    pub fn count_logical_lines(&self) -> ReaderResult<usize> {
        let mut visitor = CountRecords;
        let summary = scan(self.source, self.config, &self.options(), &mut visitor)?;
        debug!(
            source = %self.source.name(),
            lines = summary.records,
            "counted logical lines"
        );
        Ok(summary.records)
    }

    /// Number of fields on the first logical line, or 0 for an empty file.
    pub fn count_fields_in_first_data_line(&self) -> ReaderResult<usize> {
        let mut visitor = FirstWidth(0);
        scan(self.source, self.config, &self.options(), &mut visitor)?;
        debug!(
            source = %self.source.name(),
            fields = visitor.0,
            "counted fields in first line"
        );
        Ok(visitor.0)
    }
}

struct CountRecords;

impl RecordVisitor for CountRecords {
    fn field(&mut self, _ctx: &FieldContext, _value: &[u8]) -> ReaderResult<()> {
        Ok(())
    }

    fn end_record(&mut self, _ctx: &RecordContext) -> ReaderResult<Flow> {
        Ok(Flow::Continue)
    }

    fn field_too_long(&mut self, _ctx: &FieldContext, _limit: usize) -> ReaderResult<()> {
        Ok(())
    }
}

struct FirstWidth(usize);

impl RecordVisitor for FirstWidth {
    fn field(&mut self, _ctx: &FieldContext, _value: &[u8]) -> ReaderResult<()> {
        Ok(())
    }

    fn end_record(&mut self, ctx: &RecordContext) -> ReaderResult<Flow> {
        self.0 = ctx.fields;
        Ok(Flow::Break)
    }

    fn field_too_long(&mut self, _ctx: &FieldContext, _limit: usize) -> ReaderResult<()> {
        Ok(())
    }
}
