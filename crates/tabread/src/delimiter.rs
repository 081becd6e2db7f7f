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

//! Field delimiters and the boundary rule.
//!
//! Two families of delimiter exist:
//!
//! - **Fixed**: a single byte (`,` `\t` `;` `:` ` ` `|`). Every occurrence is a
//!   boundary, so `a,,b` has three fields.
//! - **Whitespace run**: any run of bytes at or below ASCII space. Only the first
//!   blank byte after a non-blank byte is a boundary, so `a   b` has two fields.

use crate::error::{ReaderError, ReaderResult};
use std::fmt;
use std::str::FromStr;

/// ASCII space; every byte at or below it counts as blank.
pub const SPACE: u8 = b' ';

/// Returns true for bytes treated as whitespace by the scanner.
#[inline]
pub fn is_blank(byte: u8) -> bool {
    byte <= SPACE
}

/// Field delimiter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Delimiter {
    Comma,
    #[default]
    Tab,
    Semicolon,
    Colon,
    Space,
    Pipe,
    /// Runs of blank bytes collapse into one boundary.
    Whitespace,
}

impl Delimiter {
    /// All delimiters, in display order.
    pub const ALL: [Delimiter; 7] = [
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Semicolon,
        Delimiter::Colon,
        Delimiter::Space,
        Delimiter::Pipe,
        Delimiter::Whitespace,
    ];

    /// The byte this delimiter matches, or `None` for whitespace runs.
    pub fn byte(self) -> Option<u8> {
        match self {
            Self::Comma => Some(b','),
            Self::Tab => Some(b'\t'),
            Self::Semicolon => Some(b';'),
            Self::Colon => Some(b':'),
            Self::Space => Some(b' '),
            Self::Pipe => Some(b'|'),
            Self::Whitespace => None,
        }
    }

    /// Lowercase name used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Tab => "tab",
            Self::Semicolon => "semicolon",
            Self::Colon => "colon",
            Self::Space => "space",
            Self::Pipe => "pipe",
            Self::Whitespace => "whitespace",
        }
    }

    /// Whether the delimiter itself is a blank byte.
    ///
    /// Leading blank bytes on a line are only skipped when this is false.
    pub fn is_blank(self) -> bool {
        match self.byte() {
            Some(b) => is_blank(b),
            None => true,
        }
    }

    /// Decide whether `current` ends a field, given the byte before it.
    ///
    /// Callers must not ask while inside a quoted section.
    #[inline]
    pub fn is_boundary(self, current: u8, previous: u8) -> bool {
        match self {
            Self::Whitespace => is_blank(current) && !is_blank(previous),
            _ => self.byte() == Some(current),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Delimiter {
    type Err = ReaderError;

    fn from_str(s: &str) -> ReaderResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name() == lower)
            .ok_or_else(|| {
                ReaderError::config(format!(
                    "unknown delimiter '{}' (expected one of: comma, tab, semicolon, colon, space, pipe, whitespace)",
                    s
                ))
            })
    }
}
