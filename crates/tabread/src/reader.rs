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

//! High-level entry point tying the passes together.

use crate::cancel::CancellationToken;
use crate::category::CategoryDiscoverer;
use crate::columns::{ColumnCatalog, ColumnDescriptor};
use crate::config::{Exclusion, ReadMode, ReaderConfig};
use crate::dataset::{ContinuousData, Dataset, DiscreteData, MixedData};
use crate::error::{ReaderError, ReaderResult};
use crate::materialize::DataMaterializer;
use crate::probe::StructureProbe;
use crate::source::{ByteSource, FileSource};
use std::path::Path;
use tracing::debug;

/// Reads a delimited data file.
///
/// Every method is a fresh set of passes over the source; nothing is cached
/// between calls.
///
/// # Examples
///
/// ```rust
/// use tabread::{Delimiter, Exclusion, MemorySource, ReaderConfig, TabularReader};
///
/// let source = MemorySource::from("x,y\n1,2\n3,4\n");
/// let reader = TabularReader::new(source, ReaderConfig::new(Delimiter::Comma));
///
/// assert_eq!(reader.count_rows().unwrap(), 2);
/// assert_eq!(reader.count_columns().unwrap(), 2);
///
/// let data = reader.read_continuous(&Exclusion::None).unwrap();
/// assert_eq!(data.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
/// ```
pub struct TabularReader<S> {
    source: S,
    config: ReaderConfig,
    cancel: Option<CancellationToken>,
}

impl TabularReader<FileSource> {
    /// Reader over a file on disk.
    pub fn open(path: impl AsRef<Path>, config: ReaderConfig) -> Self {
        Self::new(FileSource::new(path), config)
    }
}

impl<S: ByteSource> TabularReader<S> {
    pub fn new(source: S, config: ReaderConfig) -> Self {
        Self {
            source,
            config,
            cancel: None,
        }
    }

    /// Stop passes once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    fn probe(&self) -> StructureProbe<'_, S> {
        StructureProbe::new(&self.source, &self.config).with_cancellation(self.cancel.as_ref())
    }

    fn catalog(&self) -> ColumnCatalog<'_, S> {
        ColumnCatalog::new(&self.source, &self.config).with_cancellation(self.cancel.as_ref())
    }

    /// Number of data rows: logical lines minus the header, if any.
    pub fn count_rows(&self) -> ReaderResult<usize> {
        self.config.validate()?;
        let lines = self.probe().count_logical_lines()?;
        Ok(if self.config.has_header {
            lines.saturating_sub(1)
        } else {
            lines
        })
    }

    /// Number of fields on the first logical line.
    pub fn count_columns(&self) -> ReaderResult<usize> {
        self.config.validate()?;
        self.probe().count_fields_in_first_data_line()
    }

    /// Resolve the retained columns without reading data.
    pub fn read_columns(
        &self,
        exclusion: &Exclusion,
        mode: ReadMode,
    ) -> ReaderResult<Vec<ColumnDescriptor>> {
        self.config.validate()?;
        mode.validate()?;
        self.catalog().resolve_columns(exclusion, mode)
    }

    /// Run every pass and build the dataset.
    ///
    /// # Errors
    ///
    /// The first configuration, I/O, structural or content error aborts the
    /// read; no partial dataset is returned.
    pub fn read_data(&self, exclusion: &Exclusion, mode: ReadMode) -> ReaderResult<Dataset> {
        self.config.validate()?;
        mode.validate()?;
        debug!(source = %self.source.name(), ?mode, "reading data");

        let mut layout = self.catalog().resolve_layout(exclusion, mode)?;
        let tables = if mode.starts_discrete() {
            CategoryDiscoverer::new(&self.source, &self.config)
                .with_cancellation(self.cancel.as_ref())
                .discover(&mut layout, mode)?
        } else {
            Vec::new()
        };

        DataMaterializer::new(&self.source, &self.config)
            .with_cancellation(self.cancel.as_ref())
            .materialize(layout, tables, mode)
    }

    pub fn read_continuous(&self, exclusion: &Exclusion) -> ReaderResult<ContinuousData> {
        match self.read_data(exclusion, ReadMode::Continuous)? {
            Dataset::Continuous(data) => Ok(data),
            other => Err(unexpected_shape("continuous", &other)),
        }
    }

    pub fn read_discrete(&self, exclusion: &Exclusion) -> ReaderResult<DiscreteData> {
        match self.read_data(exclusion, ReadMode::Discrete)? {
            Dataset::Discrete(data) => Ok(data),
            other => Err(unexpected_shape("discrete", &other)),
        }
    }

    pub fn read_mixed(
        &self,
        exclusion: &Exclusion,
        category_threshold: usize,
    ) -> ReaderResult<MixedData> {
        match self.read_data(exclusion, ReadMode::Mixed { category_threshold })? {
            Dataset::Mixed(data) => Ok(data),
            other => Err(unexpected_shape("mixed", &other)),
        }
    }
}

fn unexpected_shape(expected: &str, dataset: &Dataset) -> ReaderError {
    ReaderError::config(format!(
        "expected a {} dataset, got {}",
        expected,
        dataset.kind_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delimiter::Delimiter;
    use crate::source::MemorySource;

    fn reader(input: &str) -> TabularReader<MemorySource> {
        TabularReader::new(MemorySource::from(input), ReaderConfig::new(Delimiter::Comma))
    }

    #[test]
    fn test_counts() {
        let reader = reader("x,y,z\n1,2,3\n\n4,5,6\n");
        assert_eq!(reader.count_rows().unwrap(), 2);
        assert_eq!(reader.count_columns().unwrap(), 3);
    }

    #[test]
    fn test_count_rows_without_header() {
        let reader = TabularReader::new(
            MemorySource::from("1\n2\n"),
            ReaderConfig::new(Delimiter::Comma).with_header(false),
        );
        assert_eq!(reader.count_rows().unwrap(), 2);
    }

    #[test]
    fn test_count_rows_empty_file() {
        assert_eq!(reader("").count_rows().unwrap(), 0);
    }

    #[test]
    fn test_read_columns_matches_width() {
        let reader = reader("a,b,c\n1,2,3\n");
        let columns = reader.read_columns(&Exclusion::None, ReadMode::Continuous).unwrap();
        assert_eq!(columns.len(), reader.count_columns().unwrap());
    }

    #[test]
    fn test_read_mixed_shortcut() {
        let data = reader("g,v\na,1\nb,2\na,3\n")
            .read_mixed(&Exclusion::None, 2)
            .unwrap();
        assert_eq!(data.num_rows(), 3);
        assert_eq!(data.num_discrete(), 1);
        assert_eq!(data.num_continuous(), 1);
        assert_eq!(data.discrete_column(0), Some(&[0, 1, 0][..]));
        assert_eq!(data.continuous_column(1), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn test_read_mixed_text_over_threshold_is_invalid_number() {
        let err = reader("g,v\na,1\nb,2\nc,3\n")
            .read_mixed(&Exclusion::None, 2)
            .unwrap_err();
        assert!(matches!(
            err,
            ReaderError::InvalidNumber {
                line: 2,
                column: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_read_discrete_shortcut() {
        let data = reader("g\nb\na\n").read_discrete(&Exclusion::None).unwrap();
        assert_eq!(data.column(0), Some(&[1, 0][..]));
    }

    #[test]
    fn test_invalid_config_rejected_before_io() {
        let reader = TabularReader::open(
            "/nonexistent/data.txt",
            ReaderConfig::new(Delimiter::Comma).with_buffer_size(0),
        );
        assert!(matches!(
            reader.count_rows().unwrap_err(),
            ReaderError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let err = reader("a\n1\n").read_mixed(&Exclusion::None, 0).unwrap_err();
        assert!(matches!(err, ReaderError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let reader = TabularReader::open("/nonexistent/data.txt", ReaderConfig::default());
        assert!(matches!(reader.count_rows().unwrap_err(), ReaderError::Io(_)));
    }

    #[test]
    fn test_cancelled_reader() {
        let token = CancellationToken::new();
        let reader = reader("a\n1\n").with_cancellation(token.clone());
        token.cancel();
        assert!(matches!(
            reader.read_data(&Exclusion::None, ReadMode::Continuous),
            Err(ReaderError::Cancelled)
        ));
    }
}
