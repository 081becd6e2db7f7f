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

//! Error types for the tabular reader.
//!
//! Every structural or content error carries the physical line number (1-based)
//! it was detected on, and a column number where one applies.
//!
//! # Error Categories
//!
//! - **I/O Errors**: the byte source could not be opened or read
//! - **Header Errors**: empty variable names
//! - **Content Errors**: unparsable numbers, oversized fields
//! - **Shape Errors**: rows with more or fewer fields than the header declares
//! - **Covariance Errors**: bad case count or truncated matrix
//! - **Control**: invalid configuration, cancellation
//!
//! # Examples
//!
//! ```rust
//! use tabread::ReaderError;
//!
//! let err = ReaderError::invalid_number(3, 2, "abc");
//! assert_eq!(err.line(), Some(3));
//! assert!(err.to_string().contains("line 3"));
//! ```

use thiserror::Error;

/// Errors raised while reading a data file.
///
/// Extraction is fail-fast: the first error aborts the pass and no partial
/// dataset is returned.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A header field is empty.
    #[error("Missing variable name at line {line} column {column}")]
    MissingVariableName { line: usize, column: usize },

    /// A continuous value could not be parsed as a number.
    #[error("Invalid number '{value}' at line {line} column {column}")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },

    /// A row has more fields than the header declares.
    #[error("Excess data at line {line}: extracted {actual} value(s) but expected {expected}")]
    ExcessData {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A row has fewer fields than the header declares.
    #[error(
        "Insufficient data at line {line}: extracted {actual} value(s) but expected {expected}"
    )]
    InsufficientData {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A discrete value was not seen during category discovery.
    ///
    /// This means the discovery and materialization passes disagreed about the
    /// file content and is never caused by user data alone.
    #[error("Internal error: unknown category '{value}' at line {line} column {column}")]
    UnknownCategory {
        line: usize,
        column: usize,
        value: String,
    },

    /// A single field exceeded the configured size limit.
    #[error("Field at line {line} column {column} exceeds {limit} bytes")]
    FieldTooLong {
        line: usize,
        column: usize,
        limit: usize,
    },

    /// The covariance case count line is not a positive integer.
    #[error("Invalid number of cases '{value}' at line {line}")]
    InvalidCaseCount { line: usize, value: String },

    /// The covariance matrix ended before every variable had a row.
    #[error("Missing covariance data at line {line}")]
    MissingCovarianceData { line: usize },

    /// The reader configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The pass was stopped through its cancellation token.
    #[error("Reading cancelled")]
    Cancelled,
}

impl ReaderError {
    /// Create an invalid number error.
    #[inline]
    pub fn invalid_number(line: usize, column: usize, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            line,
            column,
            value: value.into(),
        }
    }

    /// Create an invalid configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create the shape error matching a field count mismatch.
    ///
    /// Returns `None` when the counts agree.
    pub fn shape(line: usize, expected: usize, actual: usize) -> Option<Self> {
        use std::cmp::Ordering;

        match actual.cmp(&expected) {
            Ordering::Greater => Some(Self::ExcessData {
                line,
                expected,
                actual,
            }),
            Ordering::Less => Some(Self::InsufficientData {
                line,
                expected,
                actual,
            }),
            Ordering::Equal => None,
        }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingVariableName { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::ExcessData { line, .. }
            | Self::InsufficientData { line, .. }
            | Self::UnknownCategory { line, .. }
            | Self::FieldTooLong { line, .. }
            | Self::InvalidCaseCount { line, .. }
            | Self::MissingCovarianceData { line } => Some(*line),
            _ => None,
        }
    }

    /// Get the column number if available.
    #[inline]
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::MissingVariableName { column, .. }
            | Self::InvalidNumber { column, .. }
            | Self::UnknownCategory { column, .. }
            | Self::FieldTooLong { column, .. } => Some(*column),
            _ => None,
        }
    }
}

/// Result type for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;
