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

//! Reader configuration.

use crate::delimiter::{is_blank, Delimiter};
use crate::error::{ReaderError, ReaderResult};

/// Default chunk size for reading the byte source (64KB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default maximum size of a single field (1MB).
pub const DEFAULT_MAX_FIELD_LENGTH: usize = 1024 * 1024;

/// Lexical settings shared by every pass over a file.
///
/// # Examples
///
/// ## Default Configuration
///
/// ```rust
/// use tabread::{Delimiter, ReaderConfig};
///
/// let config = ReaderConfig::default();
/// assert_eq!(config.delimiter, Delimiter::Tab);
/// assert_eq!(config.quote, Some(b'"'));
/// assert!(config.comment_marker.is_empty());
/// assert!(config.missing_marker.is_empty());
/// assert!(config.has_header);
/// ```
///
/// ## Comma Separated With Comments
///
/// ```rust
/// use tabread::{Delimiter, ReaderConfig};
///
/// let config = ReaderConfig::new(Delimiter::Comma)
///     .with_comment_marker("//")
///     .with_missing_marker("*");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Field delimiter (default: tab).
    pub delimiter: Delimiter,

    /// Quote byte (default: `"`). `None` disables quoting.
    ///
    /// Inside quotes, delimiters and comment markers are not recognized. The
    /// quote byte itself never becomes part of a field.
    pub quote: Option<u8>,

    /// Byte sequence that marks a comment line (default: empty, disabled).
    pub comment_marker: String,

    /// Field text denoting a missing value (default: empty).
    ///
    /// Empty fields are always treated as missing.
    pub missing_marker: String,

    /// Whether the first logical line holds variable names (default: `true`).
    pub has_header: bool,

    /// Chunk size used when reading the source (default: 64KB).
    pub buffer_size: usize,

    /// Maximum size of one field in bytes (default: 1MB).
    pub max_field_length: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            quote: Some(b'"'),
            comment_marker: String::new(),
            missing_marker: String::new(),
            has_header: true,
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
        }
    }
}

impl ReaderConfig {
    /// Default configuration with the given delimiter.
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    pub fn with_quote(mut self, quote: Option<u8>) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    pub fn with_missing_marker(mut self, marker: impl Into<String>) -> Self {
        self.missing_marker = marker.into();
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn with_max_field_length(mut self, limit: usize) -> Self {
        self.max_field_length = limit;
        self
    }

    /// Check that the settings can drive a scan.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::InvalidConfig`] if:
    /// - the buffer size or field limit is zero
    /// - the quote byte is a line terminator, blank, or equal to the delimiter
    /// - the comment marker contains a line terminator
    pub fn validate(&self) -> ReaderResult<()> {
        if self.buffer_size == 0 {
            return Err(ReaderError::config("buffer size must be at least 1 byte"));
        }
        if self.max_field_length == 0 {
            return Err(ReaderError::config(
                "maximum field length must be at least 1 byte",
            ));
        }
        if let Some(quote) = self.quote {
            if is_blank(quote) {
                return Err(ReaderError::config(format!(
                    "quote byte 0x{:02x} is blank",
                    quote
                )));
            }
            if self.delimiter.byte() == Some(quote) {
                return Err(ReaderError::config(format!(
                    "quote byte '{}' equals the delimiter",
                    quote as char
                )));
            }
        }
        if self
            .comment_marker
            .bytes()
            .any(|b| b == b'\n' || b == b'\r')
        {
            return Err(ReaderError::config(
                "comment marker must not contain a line terminator",
            ));
        }
        Ok(())
    }
}

/// Shape of the dataset to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadMode {
    /// Every column is parsed as a 64-bit float.
    #[default]
    Continuous,
    /// Every column is encoded as category codes.
    Discrete,
    /// Columns start discrete and turn continuous once they exceed
    /// `category_threshold` distinct values.
    Mixed { category_threshold: usize },
}

impl ReadMode {
    /// Whether ColumnCatalog marks columns discrete up front.
    pub fn starts_discrete(self) -> bool {
        !matches!(self, Self::Continuous)
    }

    /// Distinct-value limit, for mixed reads only.
    pub fn category_threshold(self) -> Option<usize> {
        match self {
            Self::Mixed { category_threshold } => Some(category_threshold),
            _ => None,
        }
    }

    pub fn validate(self) -> ReaderResult<()> {
        match self {
            Self::Mixed {
                category_threshold: 0,
            } => Err(ReaderError::config("category threshold must be at least 1")),
            _ => Ok(()),
        }
    }
}

/// Columns to leave out of a read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Exclusion {
    /// Keep every column.
    #[default]
    None,
    /// Exclude columns whose (trimmed) name matches exactly.
    Names(Vec<String>),
    /// Exclude 1-based column positions. Out-of-range entries are ignored.
    Positions(Vec<usize>),
}

impl Exclusion {
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    pub fn positions(positions: impl IntoIterator<Item = usize>) -> Self {
        Self::Positions(positions.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Names(names) => names.is_empty(),
            Self::Positions(positions) => positions.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== ReaderConfig tests ====================

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.delimiter, Delimiter::Tab);
        assert_eq!(config.quote, Some(b'"'));
        assert!(config.has_header);
        assert_eq!(config.buffer_size, 64 * 1024);
        assert_eq!(config.max_field_length, 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ReaderConfig::new(Delimiter::Comma)
            .with_quote(Some(b'\''))
            .with_comment_marker("#")
            .with_missing_marker("NA")
            .with_header(false)
            .with_buffer_size(8)
            .with_max_field_length(32);

        assert_eq!(config.delimiter, Delimiter::Comma);
        assert_eq!(config.quote, Some(b'\''));
        assert_eq!(config.comment_marker, "#");
        assert_eq!(config.missing_marker, "NA");
        assert!(!config.has_header);
        assert_eq!(config.buffer_size, 8);
        assert_eq!(config.max_field_length, 32);
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let err = ReaderConfig::default()
            .with_buffer_size(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("buffer size"));
    }

    #[test]
    fn test_zero_field_limit_rejected() {
        assert!(ReaderConfig::default()
            .with_max_field_length(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_quote_equal_to_delimiter_rejected() {
        let err = ReaderConfig::new(Delimiter::Comma)
            .with_quote(Some(b','))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("equals the delimiter"));
    }

    #[test]
    fn test_blank_quote_rejected() {
        assert!(ReaderConfig::default()
            .with_quote(Some(b' '))
            .validate()
            .is_err());
    }

    #[test]
    fn test_no_quote_is_valid() {
        assert!(ReaderConfig::default().with_quote(None).validate().is_ok());
    }

    #[test]
    fn test_comment_marker_with_newline_rejected() {
        assert!(ReaderConfig::default()
            .with_comment_marker("#\n")
            .validate()
            .is_err());
    }

    // ==================== ReadMode tests ====================

    #[test]
    fn test_read_mode_starts_discrete() {
        assert!(!ReadMode::Continuous.starts_discrete());
        assert!(ReadMode::Discrete.starts_discrete());
        assert!(ReadMode::Mixed {
            category_threshold: 3
        }
        .starts_discrete());
    }

    #[test]
    fn test_read_mode_threshold() {
        assert_eq!(ReadMode::Discrete.category_threshold(), None);
        assert_eq!(
            ReadMode::Mixed {
                category_threshold: 4
            }
            .category_threshold(),
            Some(4)
        );
    }

    #[test]
    fn test_zero_threshold_rejected() {
        assert!(ReadMode::Mixed {
            category_threshold: 0
        }
        .validate()
        .is_err());
        assert!(ReadMode::Continuous.validate().is_ok());
    }

    // ==================== Exclusion tests ====================

    #[test]
    fn test_exclusion_constructors() {
        assert_eq!(
            Exclusion::names(["a", "b"]),
            Exclusion::Names(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(Exclusion::positions([3, 1]), Exclusion::Positions(vec![3, 1]));
    }

    #[test]
    fn test_exclusion_is_empty() {
        assert!(Exclusion::None.is_empty());
        assert!(Exclusion::Names(Vec::new()).is_empty());
        assert!(!Exclusion::positions([1]).is_empty());
    }
}
