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

//! Error types for validation runs.
//!
//! Problems in the data never surface here; they become results in the
//! report. Only conditions that prevent a run from producing a report do.

use tabread::ReaderError;
use thiserror::Error;

/// Errors that abort a validation run.
#[derive(Error, Debug)]
pub enum ValidateError {
    /// The reader configuration is unusable, or the run was cancelled.
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// The validation settings are unusable.
    #[error("Invalid validation configuration: {0}")]
    InvalidConfig(String),
}

impl ValidateError {
    /// Whether the run was stopped through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Reader(ReaderError::Cancelled))
    }
}

/// Result type for validation runs.
pub type ValidateResult<T> = Result<T, ValidateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_error_is_transparent() {
        let err = ValidateError::from(ReaderError::config("bad quote"));
        assert_eq!(err.to_string(), "Invalid configuration: bad quote");
    }

    #[test]
    fn test_is_cancelled() {
        assert!(ValidateError::from(ReaderError::Cancelled).is_cancelled());
        assert!(!ValidateError::InvalidConfig("x".into()).is_cancelled());
    }
}
