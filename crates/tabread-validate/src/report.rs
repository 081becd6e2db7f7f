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

//! Validation report

use crate::diagnostic::{ValidationCode, ValidationKind, ValidationResult};
use serde::Serialize;

/// Ordered results of one validation run.
///
/// Results appear in the order they were found. The file summary is always
/// the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub(crate) fn new(results: Vec<ValidationResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ValidationResult> {
        self.results
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of results with the given code.
    pub fn count(&self, code: ValidationCode) -> usize {
        self.results.iter().filter(|r| r.code() == code).count()
    }

    /// Results of one kind.
    pub fn of_kind(&self, kind: ValidationKind) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(move |r| r.kind() == kind)
    }

    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|r| r.code() == ValidationCode::Error)
    }

    /// Whether the scan stopped at the result cap.
    pub fn is_truncated(&self) -> bool {
        self.of_kind(ValidationKind::DiagnosticLimit).next().is_some()
    }

    /// The trailing file summary.
    pub fn summary(&self) -> Option<&ValidationResult> {
        self.results
            .last()
            .filter(|r| r.kind() == ValidationKind::FileSummary)
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationResult;
    type IntoIter = std::slice::Iter<'a, ValidationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
