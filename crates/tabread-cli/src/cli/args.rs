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

//! Argument groups shared by several commands.

use crate::error::CliError;
use clap::{Args, ValueEnum};
use tabread::{Delimiter, Exclusion, ReadMode, ReaderConfig};

/// Lexical settings and column exclusion.
#[derive(Args, Debug, Clone, Default)]
pub struct ReaderArgs {
    /// Field delimiter (comma, tab, semicolon, colon, space, pipe, whitespace)
    #[arg(short, long, default_value_t = Delimiter::Tab)]
    pub delimiter: Delimiter,

    /// Quote character
    #[arg(long, value_name = "CHAR", conflicts_with = "no_quote")]
    pub quote: Option<char>,

    /// Disable quoting
    #[arg(long)]
    pub no_quote: bool,

    /// Comment line marker, e.g. "//" or "#"
    #[arg(short, long, value_name = "MARKER")]
    pub comment: Option<String>,

    /// Text that denotes a missing value
    #[arg(short, long, value_name = "TEXT")]
    pub missing: Option<String>,

    /// The first line holds data, not variable names
    #[arg(long)]
    pub no_header: bool,

    /// Exclude a column by variable name (repeatable)
    #[arg(long = "exclude-name", value_name = "NAME", conflicts_with = "exclude_column")]
    pub exclude_name: Vec<String>,

    /// Exclude a column by 1-based position (repeatable)
    #[arg(long = "exclude-column", value_name = "N")]
    pub exclude_column: Vec<usize>,
}

impl ReaderArgs {
    pub fn config(&self) -> Result<ReaderConfig, CliError> {
        let mut config = ReaderConfig::new(self.delimiter).with_header(!self.no_header);

        if self.no_quote {
            config = config.with_quote(None);
        } else if let Some(quote) = self.quote {
            if !quote.is_ascii() {
                return Err(CliError::invalid_argument(format!(
                    "quote must be a single ASCII character, got '{}'",
                    quote
                )));
            }
            config = config.with_quote(Some(quote as u8));
        }
        if let Some(marker) = &self.comment {
            config = config.with_comment_marker(marker.as_str());
        }
        if let Some(marker) = &self.missing {
            config = config.with_missing_marker(marker.as_str());
        }
        Ok(config)
    }

    pub fn exclusion(&self) -> Exclusion {
        if !self.exclude_name.is_empty() {
            Exclusion::names(self.exclude_name.iter().cloned())
        } else if !self.exclude_column.is_empty() {
            Exclusion::positions(self.exclude_column.iter().copied())
        } else {
            Exclusion::None
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeArg {
    #[default]
    Continuous,
    Discrete,
    Mixed,
}

/// Read mode selection.
#[derive(Args, Debug, Clone, Default)]
pub struct ModeArgs {
    /// Shape of the dataset
    #[arg(long, value_enum, default_value_t = ModeArg::Continuous)]
    pub mode: ModeArg,

    /// Mixed mode: a column with more distinct values than this is continuous
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub threshold: usize,
}

impl ModeArgs {
    pub fn mode(&self) -> ReadMode {
        match self.mode {
            ModeArg::Continuous => ReadMode::Continuous,
            ModeArg::Discrete => ReadMode::Discrete,
            ModeArg::Mixed => ReadMode::Mixed {
                category_threshold: self.threshold,
            },
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReaderArgs::default().config().unwrap();
        assert_eq!(config.delimiter, Delimiter::Tab);
        assert!(config.has_header);
    }

    #[test]
    fn test_config_flags() {
        let args = ReaderArgs {
            delimiter: Delimiter::Comma,
            no_quote: true,
            comment: Some("//".into()),
            missing: Some("*".into()),
            no_header: true,
            ..ReaderArgs::default()
        };
        let config = args.config().unwrap();
        assert_eq!(config.quote, None);
        assert_eq!(config.comment_marker, "//");
        assert_eq!(config.missing_marker, "*");
        assert!(!config.has_header);
    }

    #[test]
    fn test_non_ascii_quote_rejected() {
        let args = ReaderArgs {
            quote: Some('«'),
            ..ReaderArgs::default()
        };
        assert!(matches!(args.config(), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_exclusion() {
        let args = ReaderArgs {
            exclude_column: vec![2, 4],
            ..ReaderArgs::default()
        };
        assert_eq!(args.exclusion(), Exclusion::Positions(vec![2, 4]));
        assert_eq!(ReaderArgs::default().exclusion(), Exclusion::None);
    }

    #[test]
    fn test_mode() {
        let args = ModeArgs {
            mode: ModeArg::Mixed,
            threshold: 4,
        };
        assert_eq!(
            args.mode(),
            ReadMode::Mixed {
                category_threshold: 4
            }
        );
    }
}
