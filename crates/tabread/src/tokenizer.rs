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

//! The scan driver shared by every pass.
//!
//! One state machine turns the byte stream into fields and records. Passes
//! differ only in the [`RecordVisitor`] they plug in, so counting, validating
//! and extracting all see exactly the same lexical events.
//!
//! # Lexical Rules
//!
//! - A **logical line** is a physical line with at least one non-blank byte
//!   that is not a comment. Blank and comment lines produce no record.
//! - A **comment** is a line whose first non-blank bytes equal the configured
//!   marker. A partial match followed by a different byte turns comment
//!   detection off for that line; the bytes consumed by the partial match are
//!   dropped.
//! - The **quote** byte toggles quoting and is never part of a field. While
//!   quoted, delimiters are plain content. Quotes do not span lines.
//! - Fields are **trimmed** of leading and trailing blank bytes.
//! - With a fixed delimiter, `n` delimiters make `n + 1` fields. With the
//!   whitespace-run delimiter, trailing blanks do not open a new field.
//!
//! # Example
//!
//! ```rust
//! use tabread::{scan, Delimiter, FieldContext, Flow, MemorySource, ReaderConfig,
//!     ReaderResult, RecordContext, RecordVisitor, ScanOptions};
//!
//! struct Widths(Vec<usize>);
//!
//! impl RecordVisitor for Widths {
//!     fn field(&mut self, _ctx: &FieldContext, _value: &[u8]) -> ReaderResult<()> {
//!         Ok(())
//!     }
//!
//!     fn end_record(&mut self, ctx: &RecordContext) -> ReaderResult<Flow> {
//!         self.0.push(ctx.fields);
//!         Ok(Flow::Continue)
//!     }
//! }
//!
//! let source = MemorySource::from("a,b,c\n# note\n1,2\n");
//! let config = ReaderConfig::new(Delimiter::Comma).with_comment_marker("#");
//! let mut widths = Widths(Vec::new());
//! scan(&source, &config, &ScanOptions::new(), &mut widths).unwrap();
//! assert_eq!(widths.0, vec![3, 2]);
//! ```

use crate::cancel::CancellationToken;
use crate::comment::{CommentMarker, MarkerStep};
use crate::config::ReaderConfig;
use crate::delimiter::{is_blank, Delimiter};
use crate::error::{ReaderError, ReaderResult};
use crate::exclusion::{ExclusionCursor, ExclusionSet};
use crate::scanner::{ByteScanner, ScanEvent};
use crate::source::ByteSource;
use std::borrow::Cow;

/// Whether the scan should go on after a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Break,
}

/// Location of a retained field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldContext {
    /// Physical line (1-based).
    pub line: usize,
    /// Record number among delivered records (1-based).
    pub row: usize,
    /// File column (1-based), counted before exclusion.
    pub column: usize,
    /// Position among retained columns (0-based).
    pub index: usize,
}

/// Summary of a finished logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordContext {
    /// Physical line (1-based).
    pub line: usize,
    /// Record number among delivered records (1-based).
    pub row: usize,
    /// Fields found on the line, excluded ones included.
    pub fields: usize,
    /// Fields delivered to the visitor.
    pub retained: usize,
}

/// Receives the fields and records of one pass.
pub trait RecordVisitor {
    /// A retained field, trimmed of surrounding blanks.
    fn field(&mut self, ctx: &FieldContext, value: &[u8]) -> ReaderResult<()>;

    /// End of a logical line.
    fn end_record(&mut self, ctx: &RecordContext) -> ReaderResult<Flow>;

    /// A field grew past the configured limit. Called once per field; the
    /// rest of the field is dropped if this returns `Ok`.
    fn field_too_long(&mut self, ctx: &FieldContext, limit: usize) -> ReaderResult<()> {
        Err(ReaderError::FieldTooLong {
            line: ctx.line,
            column: ctx.column,
            limit,
        })
    }
}

/// Per-pass options for [`scan`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions<'a> {
    /// Swallow the first logical line instead of delivering it.
    pub skip_header: bool,
    /// Columns that are never delivered.
    pub exclusion: Option<&'a ExclusionSet>,
    /// Polled at every line end.
    pub cancel: Option<&'a CancellationToken>,
}

impl<'a> ScanOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_header(mut self, skip: bool) -> Self {
        self.skip_header = skip;
        self
    }

    pub fn exclude(mut self, exclusion: &'a ExclusionSet) -> Self {
        self.exclusion = Some(exclusion);
        self
    }

    pub fn cancel_with(mut self, token: Option<&'a CancellationToken>) -> Self {
        self.cancel = token;
        self
    }
}

/// Counts reported when a scan ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Logical lines seen, header included.
    pub records: usize,
    /// Records delivered to the visitor.
    pub rows: usize,
    /// The visitor asked to stop early.
    pub stopped: bool,
}

/// Run one pass over `source`.
///
/// The source is opened here and closed before returning, on success and on
/// every error path.
///
/// # Errors
///
/// - [`ReaderError::Io`] if the source cannot be opened or read
/// - [`ReaderError::Cancelled`] if the token was set
/// - whatever the visitor returns
pub fn scan<S, V>(
    source: &S,
    config: &ReaderConfig,
    options: &ScanOptions<'_>,
    visitor: &mut V,
) -> ReaderResult<ScanSummary>
where
    S: ByteSource + ?Sized,
    V: RecordVisitor + ?Sized,
{
    let cancelled = || options.cancel.is_some_and(|token| token.is_cancelled());
    if cancelled() {
        return Err(ReaderError::Cancelled);
    }

    let none = ExclusionSet::none();
    let exclusion = options.exclusion.unwrap_or(&none);
    let mut scanner = ByteScanner::new(source.open()?, config.buffer_size);
    let mut tokenizer = Tokenizer::new(config, options.skip_header, exclusion);

    loop {
        match scanner.next_event()? {
            ScanEvent::Byte(byte) => {
                tokenizer.byte(byte, scanner.previous(), scanner.line(), visitor)?;
                if tokenizer.state == ScanState::InComment {
                    scanner.skip_line()?;
                }
            }
            ScanEvent::LineEnd => {
                if tokenizer.end_line(scanner.line(), visitor)? == Flow::Break {
                    return Ok(tokenizer.summary(true));
                }
                if cancelled() {
                    return Err(ReaderError::Cancelled);
                }
            }
            ScanEvent::Eof => {
                let flow = tokenizer.end_line(scanner.line(), visitor)?;
                return Ok(tokenizer.summary(flow == Flow::Break));
            }
        }
    }
}

/// Trim leading and trailing blank bytes.
pub fn trim_blank(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| !is_blank(b))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| !is_blank(b))
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Field bytes as text. Invalid UTF-8 is replaced, not rejected.
#[inline]
pub fn field_text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Where the state machine is within the current physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Only blank bytes so far.
    AtLineStart,
    /// This many bytes of the comment marker matched.
    MatchingComment(usize),
    /// Discarding the rest of the line.
    InComment,
    InField,
    InQuotedField,
}

/// Accumulator for the line being scanned.
#[derive(Debug, Default)]
struct RowBuffer {
    field: Vec<u8>,
    /// File column of the field being built (1-based).
    column: usize,
    retained: usize,
    /// Blank-delimiter boundaries seen before the first content byte.
    leading: usize,
    /// A non-blank byte or a quote was seen in the current field.
    started: bool,
    overflowed: bool,
}

impl RowBuffer {
    fn new() -> Self {
        Self {
            column: 1,
            ..Self::default()
        }
    }

    fn next_field(&mut self) {
        self.field.clear();
        self.column += 1;
        self.started = false;
        self.overflowed = false;
    }

    fn reset(&mut self) {
        self.field.clear();
        self.column = 1;
        self.retained = 0;
        self.leading = 0;
        self.started = false;
        self.overflowed = false;
    }
}

struct Tokenizer<'a> {
    delimiter: Delimiter,
    quote: Option<u8>,
    comment: CommentMarker<'a>,
    max_field_length: usize,
    skip_header: bool,
    state: ScanState,
    row: RowBuffer,
    exclusion: ExclusionCursor<'a>,
    records: usize,
    rows: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(config: &'a ReaderConfig, skip_header: bool, exclusion: &'a ExclusionSet) -> Self {
        Self {
            delimiter: config.delimiter,
            quote: config.quote,
            comment: CommentMarker::new(&config.comment_marker),
            max_field_length: config.max_field_length,
            skip_header,
            state: ScanState::AtLineStart,
            row: RowBuffer::new(),
            exclusion: exclusion.cursor(),
            records: 0,
            rows: 0,
        }
    }

    fn summary(&self, stopped: bool) -> ScanSummary {
        ScanSummary {
            records: self.records,
            rows: self.rows,
            stopped,
        }
    }

    #[inline]
    fn in_header(&self) -> bool {
        self.skip_header && self.records == 0
    }

    fn field_context(&self, line: usize) -> FieldContext {
        FieldContext {
            line,
            row: self.rows + 1,
            column: self.row.column,
            index: self.row.retained,
        }
    }

    fn byte<V: RecordVisitor + ?Sized>(
        &mut self,
        byte: u8,
        previous: u8,
        line: usize,
        visitor: &mut V,
    ) -> ReaderResult<()> {
        match self.state {
            ScanState::InComment => Ok(()),
            ScanState::AtLineStart => {
                if let Some(step) = self.comment.start(byte) {
                    return self.marker_step(step, byte, previous, line, visitor);
                }
                if is_blank(byte) {
                    if self.delimiter.is_blank() && self.delimiter.is_boundary(byte, previous) {
                        self.row.leading += 1;
                    }
                    return Ok(());
                }
                self.begin_content(line, visitor)?;
                self.content_byte(byte, previous, line, visitor)
            }
            ScanState::MatchingComment(matched) => {
                let step = self.comment.advance(matched, byte);
                self.marker_step(step, byte, previous, line, visitor)
            }
            ScanState::InField | ScanState::InQuotedField => {
                self.content_byte(byte, previous, line, visitor)
            }
        }
    }

    fn marker_step<V: RecordVisitor + ?Sized>(
        &mut self,
        step: MarkerStep,
        byte: u8,
        previous: u8,
        line: usize,
        visitor: &mut V,
    ) -> ReaderResult<()> {
        match step {
            MarkerStep::Partial(matched) => {
                self.state = ScanState::MatchingComment(matched);
                Ok(())
            }
            MarkerStep::Complete => {
                self.state = ScanState::InComment;
                Ok(())
            }
            MarkerStep::Mismatch => {
                self.begin_content(line, visitor)?;
                self.content_byte(byte, previous, line, visitor)
            }
        }
    }

    /// Leave the line-start states, emitting any empty leading fields.
    fn begin_content<V: RecordVisitor + ?Sized>(
        &mut self,
        line: usize,
        visitor: &mut V,
    ) -> ReaderResult<()> {
        self.state = ScanState::InField;
        for _ in 0..std::mem::take(&mut self.row.leading) {
            self.finish_field(line, visitor)?;
        }
        Ok(())
    }

    fn content_byte<V: RecordVisitor + ?Sized>(
        &mut self,
        byte: u8,
        previous: u8,
        line: usize,
        visitor: &mut V,
    ) -> ReaderResult<()> {
        if self.quote == Some(byte) {
            self.state = match self.state {
                ScanState::InQuotedField => ScanState::InField,
                _ => ScanState::InQuotedField,
            };
            self.row.started = true;
            return Ok(());
        }

        if self.state == ScanState::InQuotedField {
            return self.push(byte, line, visitor);
        }

        if self.delimiter.is_boundary(byte, previous) {
            return self.finish_field(line, visitor);
        }

        if is_blank(byte) && !self.row.started {
            return Ok(());
        }

        self.push(byte, line, visitor)
    }

    fn push<V: RecordVisitor + ?Sized>(
        &mut self,
        byte: u8,
        line: usize,
        visitor: &mut V,
    ) -> ReaderResult<()> {
        if !is_blank(byte) {
            self.row.started = true;
        }

        if self.row.field.len() < self.max_field_length {
            self.row.field.push(byte);
            return Ok(());
        }

        if !self.row.overflowed {
            self.row.overflowed = true;
            if !self.in_header() && !self.exclusion.is_excluded(self.row.column) {
                let ctx = self.field_context(line);
                visitor.field_too_long(&ctx, self.max_field_length)?;
            }
        }
        Ok(())
    }

    fn finish_field<V: RecordVisitor + ?Sized>(
        &mut self,
        line: usize,
        visitor: &mut V,
    ) -> ReaderResult<()> {
        if !self.exclusion.is_excluded(self.row.column) {
            if !self.in_header() {
                let ctx = self.field_context(line);
                visitor.field(&ctx, trim_blank(&self.row.field))?;
            }
            self.row.retained += 1;
        }
        self.row.next_field();
        Ok(())
    }

    fn end_line<V: RecordVisitor + ?Sized>(
        &mut self,
        line: usize,
        visitor: &mut V,
    ) -> ReaderResult<Flow> {
        let flow = match self.state {
            ScanState::AtLineStart | ScanState::InComment => Flow::Continue,
            ScanState::MatchingComment(_) | ScanState::InField | ScanState::InQuotedField => {
                if matches!(self.state, ScanState::MatchingComment(_)) {
                    self.begin_content(line, visitor)?;
                }
                if self.delimiter != Delimiter::Whitespace || self.row.started {
                    self.finish_field(line, visitor)?;
                }

                let header = self.in_header();
                let ctx = RecordContext {
                    line,
                    row: self.rows + 1,
                    fields: self.row.column - 1,
                    retained: self.row.retained,
                };
                self.records += 1;

                if header {
                    Flow::Continue
                } else {
                    self.rows += 1;
                    visitor.end_record(&ctx)?
                }
            }
        };

        self.state = ScanState::AtLineStart;
        self.row.reset();
        self.exclusion.reset();
        Ok(flow)
    }
}
