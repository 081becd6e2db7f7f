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

//! Structured error types for the tabread CLI.
//!
//! Every command returns `Result<(), CliError>`; `main` prints the error once
//! on stderr and exits with a failure code.

use std::path::{Path, PathBuf};
use tabread::ReaderError;
use tabread_validate::ValidateError;
use thiserror::Error;

/// The main error type for tabread CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// A read pass failed.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ReaderError,
    },

    /// A validation run could not produce a report.
    #[error("Failed to validate '{path}': {source}")]
    Validate {
        path: PathBuf,
        #[source]
        source: ValidateError,
    },

    /// Validation finished and found errors.
    #[error("'{path}' has {errors} validation error(s)")]
    ValidationFailed { path: PathBuf, errors: usize },

    /// Command-line arguments that clap accepts but that do not make sense
    /// together.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization error.
    #[error("JSON format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn read(path: impl AsRef<Path>, source: ReaderError) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn validate(path: impl AsRef<Path>, source: ValidateError) -> Self {
        Self::Validate {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
