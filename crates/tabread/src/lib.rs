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

//! Tabular Data Reader
//!
//! This crate reads delimited data files (tab, comma, whitespace and friends)
//! into typed datasets. The file is scanned in fixed-size chunks, so files
//! larger than memory can be probed, and every pass shares one byte-level
//! state machine.
//!
//! # Features
//!
//! - **Streaming**: Chunked reads with CR, LF and CRLF line endings
//! - **Configurable Lexing**: Delimiters, quotes, comment markers, missing-value markers
//! - **Column Selection**: Exclude columns by name or position
//! - **Three Shapes**: Continuous, discrete (category codes) and mixed datasets
//! - **Covariance Files**: Lower-triangular matrices with a case count
//! - **Cancellation**: Stop long scans through a shared token
//!
//! # Passes
//!
//! A full read runs four passes over the source:
//!
//! 1. [`StructureProbe`] counts logical lines and columns
//! 2. [`ColumnCatalog`] resolves names, positions and exclusions
//! 3. [`CategoryDiscoverer`] builds category tables (discrete and mixed reads)
//! 4. [`DataMaterializer`] produces the [`Dataset`]
//!
//! Extraction is fail-fast: the first malformed row aborts the read with a
//! [`ReaderError`] that names the line.
//!
//! # Example
//!
//! ```rust
//! use tabread::{Delimiter, Exclusion, MemorySource, ReaderConfig, TabularReader};
//!
//! let input = "# survey\nregion,income\nnorth,1.5\nsouth,*\nnorth,2.0\nsouth,3.5\n";
//! let config = ReaderConfig::new(Delimiter::Comma)
//!     .with_comment_marker("#")
//!     .with_missing_marker("*");
//! let reader = TabularReader::new(MemorySource::from(input), config);
//!
//! let data = reader.read_mixed(&Exclusion::None, 2).unwrap();
//! assert_eq!(data.num_rows(), 4);
//! assert_eq!(data.discrete_column(0), Some(&[0, 1, 0, 1][..]));
//! assert!(data.continuous_column(1).unwrap()[1].is_nan());
//! ```
//!
//! # Reading From Disk
//!
//! ```rust,no_run
//! use tabread::{Exclusion, ReaderConfig, TabularReader};
//!
//! let reader = TabularReader::open("measurements.txt", ReaderConfig::default());
//! let data = reader.read_continuous(&Exclusion::positions([1])).unwrap();
//! for row in data.rows() {
//!     println!("{:?}", row);
//! }
//! ```

mod cancel;
mod category;
mod columns;
mod comment;
mod config;
mod covariance;
mod dataset;
mod delimiter;
mod error;
mod exclusion;
mod materialize;
mod probe;
mod reader;
mod scanner;
mod source;
mod tokenizer;

pub use cancel::CancellationToken;
pub use category::{CategoryCollector, CategoryDiscoverer, CategoryTable};
pub use columns::{
    resolve_exclusion, synthesized_name, ColumnCatalog, ColumnDescriptor, ColumnKind,
    ColumnLayout, Header,
};
pub use config::{Exclusion, ReadMode, ReaderConfig, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_FIELD_LENGTH};
pub use covariance::{CovarianceData, CovarianceParser, CovarianceReader};
pub use dataset::{
    is_missing_discrete, ContinuousData, Dataset, DiscreteData, MixedData,
    MISSING_CONTINUOUS_VALUE, MISSING_DISCRETE_VALUE,
};
pub use delimiter::{is_blank, Delimiter};
pub use error::{ReaderError, ReaderResult};
pub use exclusion::{ExclusionCursor, ExclusionSet};
pub use materialize::{is_missing, parse_continuous, ContinuousCell, DataMaterializer};
pub use probe::StructureProbe;
pub use reader::TabularReader;
pub use scanner::{ByteScanner, ScanEvent};
pub use source::{ByteSource, FileSource, MemorySource};
pub use tokenizer::{
    field_text, scan, trim_blank, FieldContext, Flow, RecordContext, RecordVisitor, ScanOptions,
    ScanSummary,
};
