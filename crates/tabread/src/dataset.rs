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

//! Materialized datasets.
//!
//! Missing values are stored in-band: [`MISSING_CONTINUOUS_VALUE`] (`NaN`) for
//! continuous cells and [`MISSING_DISCRETE_VALUE`] for discrete cells.

use crate::category::CategoryTable;
use crate::columns::{ColumnDescriptor, ColumnKind};

/// Code stored for a missing discrete value.
pub const MISSING_DISCRETE_VALUE: i32 = -99;

/// Value stored for a missing continuous value.
pub const MISSING_CONTINUOUS_VALUE: f64 = f64::NAN;

/// Whether a discrete cell is missing.
#[inline]
pub fn is_missing_discrete(code: i32) -> bool {
    code == MISSING_DISCRETE_VALUE
}

/// All columns continuous, stored row-major (`rows × columns`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuousData {
    columns: Vec<ColumnDescriptor>,
    num_rows: usize,
    values: Vec<f64>,
}

impl ContinuousData {
    pub(crate) fn new(columns: Vec<ColumnDescriptor>, num_rows: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), num_rows * columns.len());
        Self {
            columns,
            num_rows,
            values,
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// One row, or `None` past the end.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.num_rows {
            return None;
        }
        let width = self.num_columns();
        Some(&self.values[row * width..(row + 1) * width])
    }

    /// Iterate over rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.num_rows).filter_map(move |row| self.row(row))
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if column >= self.num_columns() {
            return None;
        }
        self.row(row).map(|r| r[column])
    }

    /// The backing row-major buffer.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Rows as owned vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}

/// All columns discrete, stored column-major (`columns × rows`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteData {
    columns: Vec<ColumnDescriptor>,
    num_rows: usize,
    codes: Vec<Vec<i32>>,
    tables: Vec<CategoryTable>,
}

impl DiscreteData {
    pub(crate) fn new(
        columns: Vec<ColumnDescriptor>,
        num_rows: usize,
        codes: Vec<Vec<i32>>,
        tables: Vec<CategoryTable>,
    ) -> Self {
        Self {
            columns,
            num_rows,
            codes,
            tables,
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Codes of one column in row order.
    pub fn column(&self, column: usize) -> Option<&[i32]> {
        self.codes.get(column).map(Vec::as_slice)
    }

    pub fn table(&self, column: usize) -> Option<&CategoryTable> {
        self.tables.get(column)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<i32> {
        self.column(column).and_then(|c| c.get(row)).copied()
    }

    /// Category text of a cell, `None` when missing.
    pub fn label(&self, row: usize, column: usize) -> Option<&str> {
        let code = self.get(row, column)?;
        self.table(column)?.decode(code)
    }
}

/// Per-column kinds. A column is populated in exactly one of the two
/// column-major matrices; its slot in the other one is empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MixedData {
    columns: Vec<ColumnDescriptor>,
    num_rows: usize,
    continuous: Vec<Vec<f64>>,
    discrete: Vec<Vec<i32>>,
    tables: Vec<Option<CategoryTable>>,
}

impl MixedData {
    pub(crate) fn new(
        columns: Vec<ColumnDescriptor>,
        num_rows: usize,
        continuous: Vec<Vec<f64>>,
        discrete: Vec<Vec<i32>>,
        tables: Vec<Option<CategoryTable>>,
    ) -> Self {
        Self {
            columns,
            num_rows,
            continuous,
            discrete,
            tables,
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn kind(&self, column: usize) -> Option<ColumnKind> {
        self.columns.get(column).map(|c| c.kind)
    }

    /// Values of a continuous column, `None` for discrete columns.
    pub fn continuous_column(&self, column: usize) -> Option<&[f64]> {
        match self.kind(column)? {
            ColumnKind::Continuous => self.continuous.get(column).map(Vec::as_slice),
            ColumnKind::Discrete => None,
        }
    }

    /// Codes of a discrete column, `None` for continuous columns.
    pub fn discrete_column(&self, column: usize) -> Option<&[i32]> {
        match self.kind(column)? {
            ColumnKind::Discrete => self.discrete.get(column).map(Vec::as_slice),
            ColumnKind::Continuous => None,
        }
    }

    pub fn table(&self, column: usize) -> Option<&CategoryTable> {
        self.tables.get(column).and_then(Option::as_ref)
    }

    pub fn num_discrete(&self) -> usize {
        self.columns.iter().filter(|c| c.is_discrete()).count()
    }

    pub fn num_continuous(&self) -> usize {
        self.num_columns() - self.num_discrete()
    }
}

/// The result of a full read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Dataset {
    Continuous(ContinuousData),
    Discrete(DiscreteData),
    Mixed(MixedData),
}

impl Dataset {
    pub fn columns(&self) -> &[ColumnDescriptor] {
        match self {
            Self::Continuous(d) => d.columns(),
            Self::Discrete(d) => d.columns(),
            Self::Mixed(d) => d.columns(),
        }
    }

    pub fn num_rows(&self) -> usize {
        match self {
            Self::Continuous(d) => d.num_rows(),
            Self::Discrete(d) => d.num_rows(),
            Self::Mixed(d) => d.num_rows(),
        }
    }

    pub fn num_columns(&self) -> usize {
        self.columns().len()
    }

    pub fn as_continuous(&self) -> Option<&ContinuousData> {
        match self {
            Self::Continuous(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_discrete(&self) -> Option<&DiscreteData> {
        match self {
            Self::Discrete(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_mixed(&self) -> Option<&MixedData> {
        match self {
            Self::Mixed(d) => Some(d),
            _ => None,
        }
    }

    /// Short name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Continuous(_) => "continuous",
            Self::Discrete(_) => "discrete",
            Self::Mixed(_) => "mixed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn continuous_columns(n: usize) -> Vec<ColumnDescriptor> {
        (1..=n)
            .map(|p| ColumnDescriptor::new(format!("c{}", p), p, ColumnKind::Continuous))
            .collect()
    }

    #[test]
    fn test_continuous_rows() {
        let data = ContinuousData::new(continuous_columns(2), 2, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(data.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(data.row(2), None);
        assert_eq!(data.get(0, 1), Some(2.0));
        assert_eq!(data.get(0, 2), None);
        assert_eq!(data.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_continuous_without_columns() {
        let data = ContinuousData::new(Vec::new(), 3, Vec::new());
        assert_eq!(data.rows().count(), 3);
        assert!(data.row(0).unwrap().is_empty());
    }

    #[test]
    fn test_discrete_label() {
        let columns = vec![ColumnDescriptor::new("x", 1, ColumnKind::Discrete)];
        let table = CategoryTable::from_values(["A", "B"]);
        let data = DiscreteData::new(
            columns,
            3,
            vec![vec![0, MISSING_DISCRETE_VALUE, 1]],
            vec![table],
        );
        assert_eq!(data.label(0, 0), Some("A"));
        assert_eq!(data.label(1, 0), None);
        assert!(is_missing_discrete(data.get(1, 0).unwrap()));
        assert_eq!(data.label(2, 0), Some("B"));
    }

    #[test]
    fn test_mixed_accessors() {
        let columns = vec![
            ColumnDescriptor::new("a", 1, ColumnKind::Discrete),
            ColumnDescriptor::new("b", 2, ColumnKind::Continuous),
        ];
        let data = MixedData::new(
            columns,
            1,
            vec![Vec::new(), vec![2.5]],
            vec![vec![0], Vec::new()],
            vec![Some(CategoryTable::from_values(["x"])), None],
        );
        assert_eq!(data.discrete_column(0), Some(&[0][..]));
        assert_eq!(data.continuous_column(0), None);
        assert_eq!(data.continuous_column(1), Some(&[2.5][..]));
        assert!(data.table(1).is_none());
        assert_eq!((data.num_discrete(), data.num_continuous()), (1, 1));
    }

    #[test]
    fn test_dataset_dispatch() {
        let dataset = Dataset::Continuous(ContinuousData::new(continuous_columns(1), 1, vec![7.0]));
        assert_eq!(dataset.num_rows(), 1);
        assert_eq!(dataset.num_columns(), 1);
        assert_eq!(dataset.kind_name(), "continuous");
        assert!(dataset.as_discrete().is_none());
    }
}
