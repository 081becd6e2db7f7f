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

//! Sorted set of excluded column positions.

/// 1-based column positions to skip, sorted ascending without duplicates.
///
/// Because the scanner visits columns in increasing order, membership is
/// tested with a cursor that only moves forward ([`ExclusionCursor`]).
///
/// ```rust
/// use tabread::ExclusionSet;
///
/// let set = ExclusionSet::from_positions([4, 2, 2, 9, 0], 5);
/// assert_eq!(set.positions(), &[2, 4]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    positions: Vec<usize>,
}

impl ExclusionSet {
    /// An empty set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Keep positions within `1..=num_columns`, sorted and deduplicated.
    ///
    /// Out-of-range positions are dropped silently.
    pub fn from_positions(positions: impl IntoIterator<Item = usize>, num_columns: usize) -> Self {
        let mut positions: Vec<usize> = positions
            .into_iter()
            .filter(|&p| p >= 1 && p <= num_columns)
            .collect();
        positions.sort_unstable();
        positions.dedup();
        Self { positions }
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.binary_search(&position).is_ok()
    }

    /// A cursor positioned before the first column of a line.
    pub fn cursor(&self) -> ExclusionCursor<'_> {
        ExclusionCursor {
            positions: &self.positions,
            next: 0,
        }
    }
}

/// Forward-only membership test over an [`ExclusionSet`].
#[derive(Debug, Clone)]
pub struct ExclusionCursor<'a> {
    positions: &'a [usize],
    next: usize,
}

impl ExclusionCursor<'_> {
    /// Whether `column` is excluded. Columns must be queried in increasing order.
    #[inline]
    pub fn is_excluded(&mut self, column: usize) -> bool {
        while self.next < self.positions.len() && self.positions[self.next] < column {
            self.next += 1;
        }
        self.positions.get(self.next) == Some(&column)
    }

    /// Start over for a new line.
    #[inline]
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
