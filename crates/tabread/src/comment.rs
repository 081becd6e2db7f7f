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

//! Incremental comment-marker matching.
//!
//! The marker is compared byte by byte as the line arrives, so a marker split
//! across two read chunks still matches. Matching only happens before the first
//! non-blank byte of a line.

/// Result of feeding one byte to a partial match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerStep {
    /// The marker prefix grew to this many bytes.
    Partial(usize),
    /// The whole marker matched; the rest of the line is a comment.
    Complete,
    /// The byte broke the match; comment detection is off for this line.
    Mismatch,
}

/// A configured comment marker. Empty means comments are disabled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CommentMarker<'a> {
    bytes: &'a [u8],
}

impl<'a> CommentMarker<'a> {
    pub(crate) fn new(marker: &'a str) -> Self {
        Self {
            bytes: marker.as_bytes(),
        }
    }

    /// Feed the first candidate byte of a line.
    pub(crate) fn start(&self, byte: u8) -> Option<MarkerStep> {
        match self.bytes.first() {
            Some(&first) if first == byte => Some(self.step_after(1)),
            _ => None,
        }
    }

    /// Feed the next byte after `matched` bytes already matched.
    pub(crate) fn advance(&self, matched: usize, byte: u8) -> MarkerStep {
        match self.bytes.get(matched) {
            Some(&expected) if expected == byte => self.step_after(matched + 1),
            _ => MarkerStep::Mismatch,
        }
    }

    fn step_after(&self, matched: usize) -> MarkerStep {
        if matched == self.bytes.len() {
            MarkerStep::Complete
        } else {
            MarkerStep::Partial(matched)
        }
    }
}
