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

//! Category discovery for discrete columns.
//!
//! Codes are assigned by sorting the distinct values and numbering from 0, so
//! the encoding depends only on the set of values and never on row order.

use crate::cancel::CancellationToken;
use crate::columns::{ColumnDescriptor, ColumnKind, ColumnLayout};
use crate::config::{ReadMode, ReaderConfig};
use crate::error::{ReaderError, ReaderResult};
use crate::source::ByteSource;
use crate::tokenizer::{field_text, scan, FieldContext, Flow, RecordContext, RecordVisitor, ScanOptions};
use std::collections::BTreeSet;
use tracing::debug;

/// Dense integer codes for the values of one discrete column.
///
/// ```rust
/// use tabread::CategoryTable;
///
/// let table = CategoryTable::from_values(["b", "a", "b", "c"]);
/// assert_eq!(table.categories(), &["a", "b", "c"]);
/// assert_eq!(table.encode("b"), Some(1));
/// assert_eq!(table.decode(2), Some("c"));
/// assert_eq!(table.encode("z"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryTable {
    categories: Vec<String>,
}

impl CategoryTable {
    /// Build a table from any values; duplicates collapse.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        Self::from_sorted(set)
    }

    fn from_sorted(set: BTreeSet<String>) -> Self {
        Self {
            categories: set.into_iter().collect(),
        }
    }

    /// Distinct values in code order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Code for `value`, if it is a known category.
    pub fn encode(&self, value: &str) -> Option<i32> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
            .and_then(|i| i32::try_from(i).ok())
    }

    /// Category text for `code`.
    pub fn decode(&self, code: i32) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.categories.get(i))
            .map(String::as_str)
    }
}

/// Accumulates distinct values per retained column.
///
/// Shared by the fail-fast discoverer and the validator, which tolerates
/// malformed rows.
#[derive(Debug)]
pub struct CategoryCollector {
    /// One set per retained column; `None` once the column is continuous.
    sets: Vec<Option<BTreeSet<String>>>,
    threshold: Option<usize>,
    missing_marker: Vec<u8>,
}

impl CategoryCollector {
    pub fn new(columns: &[ColumnDescriptor], mode: ReadMode, missing_marker: &str) -> Self {
        Self {
            sets: columns
                .iter()
                .map(|c| c.is_discrete().then(BTreeSet::new))
                .collect(),
            threshold: mode.category_threshold(),
            missing_marker: missing_marker.as_bytes().to_vec(),
        }
    }

    /// Record one trimmed field of retained column `index`.
    pub fn add(&mut self, index: usize, value: &[u8]) {
        if value.is_empty() || value == self.missing_marker.as_slice() {
            return;
        }
        let Some(slot) = self.sets.get_mut(index) else {
            return;
        };
        let Some(set) = slot.as_mut() else {
            return;
        };

        let text = field_text(value);
        if !set.contains(text.as_ref()) {
            set.insert(text.into_owned());
        }
        if self.threshold.is_some_and(|limit| set.len() > limit) {
            *slot = None;
        }
    }

    /// Finalize kinds and build a table for every column still discrete.
    pub fn finish(self, columns: &mut [ColumnDescriptor]) -> Vec<Option<CategoryTable>> {
        columns
            .iter_mut()
            .zip(self.sets)
            .map(|(column, set)| match set {
                Some(set) if column.is_discrete() => Some(CategoryTable::from_sorted(set)),
                _ => {
                    column.kind = ColumnKind::Continuous;
                    None
                }
            })
            .collect()
    }
}

/// Scans every data row to build the [`CategoryTable`]s.
pub struct CategoryDiscoverer<'a, S: ?Sized> {
    source: &'a S,
    config: &'a ReaderConfig,
    cancel: Option<&'a CancellationToken>,
}

impl<'a, S: ByteSource + ?Sized> CategoryDiscoverer<'a, S> {
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

    /// Discover categories and settle column kinds.
    ///
    /// In mixed mode a column holding more than the threshold's distinct
    /// values becomes continuous. The result has one entry per retained
    /// column, `None` for continuous columns.
    ///
    /// # Errors
    ///
    /// [`ReaderError::ExcessData`] or [`ReaderError::InsufficientData`] for a
    /// row whose width differs from the column count, plus any I/O or
    /// cancellation error.
    pub fn discover(
        &self,
        layout: &mut ColumnLayout,
        mode: ReadMode,
    ) -> ReaderResult<Vec<Option<CategoryTable>>> {
        let mut visitor = DiscoverVisitor {
            collector: CategoryCollector::new(&layout.columns, mode, &self.config.missing_marker),
            expected: layout.num_columns(),
        };
        let options = ScanOptions::new()
            .skip_header(self.config.has_header)
            .exclude(&layout.excluded)
            .cancel_with(self.cancel);
        let summary = scan(self.source, self.config, &options, &mut visitor)?;

        let tables = visitor.collector.finish(&mut layout.columns);
        debug!(
            source = %self.source.name(),
            rows = summary.rows,
            discrete = tables.iter().filter(|t| t.is_some()).count(),
            "discovered categories"
        );
        Ok(tables)
    }
}

struct DiscoverVisitor {
    collector: CategoryCollector,
    expected: usize,
}

impl RecordVisitor for DiscoverVisitor {
    fn field(&mut self, ctx: &FieldContext, value: &[u8]) -> ReaderResult<()> {
        self.collector.add(ctx.index, value);
        Ok(())
    }

    fn end_record(&mut self, ctx: &RecordContext) -> ReaderResult<Flow> {
        match ReaderError::shape(ctx.line, self.expected, ctx.retained) {
            Some(err) => Err(err),
            None => Ok(Flow::Continue),
        }
    }
}
