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

//! Column names, positions and kinds.
//!
//! The catalog decides which file columns take part in a read and what each
//! is called. Positions are always file positions (1-based, counted before
//! exclusion), so they stay stable whatever is excluded.

use crate::cancel::CancellationToken;
use crate::config::{Exclusion, ReadMode, ReaderConfig};
use crate::error::{ReaderError, ReaderResult};
use crate::exclusion::ExclusionSet;
use crate::probe::StructureProbe;
use crate::source::ByteSource;
use crate::tokenizer::{field_text, scan, FieldContext, Flow, RecordContext, RecordVisitor, ScanOptions};
use std::fmt;
use tracing::debug;

/// How a column's values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnKind {
    /// Categorical labels, encoded as dense integer codes.
    Discrete,
    /// 64-bit floats.
    Continuous,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discrete => f.write_str("discrete"),
            Self::Continuous => f.write_str("continuous"),
        }
    }
}

/// A retained column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDescriptor {
    pub name: String,
    /// File column, 1-based.
    pub position: usize,
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, position: usize, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            position,
            kind,
        }
    }

    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.kind == ColumnKind::Discrete
    }
}

/// Synthesized name for a headerless column.
pub fn synthesized_name(position: usize) -> String {
    format!("V{}", position)
}

/// The raw header line: every field, excluded or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Physical line of the header.
    pub line: usize,
    /// Trimmed names in file order; position is index + 1.
    pub names: Vec<String>,
}

impl Header {
    /// Positions of empty names that are not excluded.
    pub fn missing_names<'s>(
        &'s self,
        excluded: &'s ExclusionSet,
    ) -> impl Iterator<Item = usize> + 's {
        self.names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.is_empty())
            .map(|(i, _)| i + 1)
            .filter(move |position| !excluded.contains(*position))
    }
}

/// Result of column resolution, consumed by every later pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Retained columns in file order.
    pub columns: Vec<ColumnDescriptor>,
    /// Excluded file positions.
    pub excluded: ExclusionSet,
    /// Fields on the first logical line.
    pub num_file_columns: usize,
}

impl ColumnLayout {
    /// Build descriptors for the retained columns.
    ///
    /// Names come from `header` when present and are synthesized otherwise.
    /// Every column starts discrete for discrete and mixed reads.
    pub fn build(
        header: Option<&Header>,
        excluded: ExclusionSet,
        num_file_columns: usize,
        mode: ReadMode,
    ) -> Self {
        let kind = if mode.starts_discrete() {
            ColumnKind::Discrete
        } else {
            ColumnKind::Continuous
        };

        let columns = (1..=num_file_columns)
            .filter(|&position| !excluded.contains(position))
            .map(|position| {
                let name = header
                    .and_then(|h| h.names.get(position - 1).cloned())
                    .unwrap_or_else(|| synthesized_name(position));
                ColumnDescriptor::new(name, position, kind)
            })
            .collect();

        Self {
            columns,
            excluded,
            num_file_columns,
        }
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Resolves the [`ColumnDescriptor`] list for a read.
///
/// # Example
///
/// ```rust
/// use tabread::{ColumnCatalog, ColumnKind, Delimiter, Exclusion, MemorySource, ReadMode,
///     ReaderConfig};
///
/// let source = MemorySource::from("id,x,y\n1,2,3\n");
/// let config = ReaderConfig::new(Delimiter::Comma);
/// let catalog = ColumnCatalog::new(&source, &config);
///
/// let columns = catalog
///     .resolve_columns(&Exclusion::names(["id"]), ReadMode::Continuous)
///     .unwrap();
/// assert_eq!(columns.len(), 2);
/// assert_eq!(columns[0].name, "x");
/// assert_eq!(columns[0].position, 2);
/// assert_eq!(columns[0].kind, ColumnKind::Continuous);
/// ```
pub struct ColumnCatalog<'a, S: ?Sized> {
    source: &'a S,
    config: &'a ReaderConfig,
    cancel: Option<&'a CancellationToken>,
}

impl<'a, S: ByteSource + ?Sized> ColumnCatalog<'a, S> {
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

    /// Resolve the retained columns.
    ///
    /// # Errors
    ///
    /// [`ReaderError::MissingVariableName`] for an empty, non-excluded header
    /// field, plus any I/O or cancellation error.
    pub fn resolve_columns(
        &self,
        exclusion: &Exclusion,
        mode: ReadMode,
    ) -> ReaderResult<Vec<ColumnDescriptor>> {
        Ok(self.resolve_layout(exclusion, mode)?.columns)
    }

    /// Like [`resolve_columns`](Self::resolve_columns), keeping the exclusion
    /// set and file width for later passes.
    pub fn resolve_layout(&self, exclusion: &Exclusion, mode: ReadMode) -> ReaderResult<ColumnLayout> {
        let (header, num_file_columns) = self.read_structure()?;
        let excluded = resolve_exclusion(exclusion, header.as_ref(), num_file_columns);

        if let Some(header) = &header {
            if let Some(column) = header.missing_names(&excluded).next() {
                return Err(ReaderError::MissingVariableName {
                    line: header.line,
                    column,
                });
            }
        }

        let layout = ColumnLayout::build(header.as_ref(), excluded, num_file_columns, mode);
        debug!(
            source = %self.source.name(),
            file_columns = num_file_columns,
            retained = layout.num_columns(),
            "resolved columns"
        );
        Ok(layout)
    }

    /// The header, if configured, and the file width.
    ///
    /// With a header the width is taken from the header line itself, which is
    /// the first logical line. Without one the probe measures it.
    pub fn read_structure(&self) -> ReaderResult<(Option<Header>, usize)> {
        if self.config.has_header {
            let header = self.read_header()?;
            let width = header.as_ref().map_or(0, |h| h.names.len());
            Ok((header, width))
        } else {
            let width = StructureProbe::new(self.source, self.config)
                .with_cancellation(self.cancel)
                .count_fields_in_first_data_line()?;
            Ok((None, width))
        }
    }

    /// Read every field of the first logical line as a name.
    ///
    /// Returns `None` for a file without logical lines.
    pub fn read_header(&self) -> ReaderResult<Option<Header>> {
        let mut visitor = HeaderVisitor::default();
        let options = ScanOptions::new().cancel_with(self.cancel);
        scan(self.source, self.config, &options, &mut visitor)?;
        Ok(visitor.line.map(|line| Header {
            line,
            names: visitor.names,
        }))
    }
}

/// Turn an [`Exclusion`] into file positions.
///
/// Names match trimmed header names exactly; every column with a matching
/// name is excluded. Without a header, names match the synthesized
/// `V<position>` names. Unknown names and out-of-range positions are
/// ignored.
pub fn resolve_exclusion(
    exclusion: &Exclusion,
    header: Option<&Header>,
    num_file_columns: usize,
) -> ExclusionSet {
    match exclusion {
        Exclusion::None => ExclusionSet::none(),
        Exclusion::Positions(positions) => {
            ExclusionSet::from_positions(positions.iter().copied(), num_file_columns)
        }
        Exclusion::Names(names) => {
            let matches = |position: usize| -> bool {
                match header.and_then(|h| h.names.get(position - 1)) {
                    Some(name) => names.iter().any(|n| n.trim() == name.as_str()),
                    None => {
                        let synthesized = synthesized_name(position);
                        names.iter().any(|n| n.trim() == synthesized.as_str())
                    }
                }
            };
            ExclusionSet::from_positions(
                (1..=num_file_columns).filter(|&p| matches(p)),
                num_file_columns,
            )
        }
    }
}

#[derive(Default)]
struct HeaderVisitor {
    names: Vec<String>,
    line: Option<usize>,
}

impl RecordVisitor for HeaderVisitor {
    fn field(&mut self, _ctx: &FieldContext, value: &[u8]) -> ReaderResult<()> {
        self.names.push(field_text(value).into_owned());
        Ok(())
    }

    fn end_record(&mut self, ctx: &RecordContext) -> ReaderResult<Flow> {
        self.line = Some(ctx.line);
        Ok(Flow::Break)
    }
}
