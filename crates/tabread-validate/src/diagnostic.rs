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

//! Validation result types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tabread::ReaderError;

/// Severity of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationCode {
    /// Informational, e.g. the file summary
    Info,
    /// Suspicious but readable
    Warning,
    /// Extraction would fail here
    Error,
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What a result is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationKind {
    FileSummary,
    MissingVariableName,
    InvalidNumber,
    ExcessData,
    InsufficientData,
    MissingValue,
    FieldTooLong,
    InvalidCaseCount,
    MissingCovarianceData,
    IoError,
    /// The result cap was reached and the scan stopped
    DiagnosticLimit,
}

impl ValidationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileSummary => "FILE_SUMMARY",
            Self::MissingVariableName => "MISSING_VARIABLE_NAME",
            Self::InvalidNumber => "INVALID_NUMBER",
            Self::ExcessData => "EXCESS_DATA",
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::MissingValue => "MISSING_VALUE",
            Self::FieldTooLong => "FIELD_TOO_LONG",
            Self::InvalidCaseCount => "INVALID_CASE_COUNT",
            Self::MissingCovarianceData => "MISSING_COVARIANCE_DATA",
            Self::IoError => "IO_ERROR",
            Self::DiagnosticLimit => "DIAGNOSTIC_LIMIT",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys of result attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationAttribute {
    LineNumber,
    ColumnNumber,
    RowNumber,
    ExpectedCount,
    ActualCount,
    Value,
    FileName,
    DiscreteVarCount,
    ContinuousVarCount,
    AssumedMissingCount,
    LabeledMissingCount,
}

/// An attribute value: a count or position, or text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(usize),
    Text(String),
}

impl AttributeValue {
    pub fn as_integer(&self) -> Option<usize> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Integer(_) => None,
        }
    }
}

impl From<usize> for AttributeValue {
    fn from(n: usize) -> Self {
        Self::Integer(n)
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A single validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    code: ValidationCode,
    kind: ValidationKind,
    message: String,
    attributes: BTreeMap<ValidationAttribute, AttributeValue>,
}

impl ValidationResult {
    pub fn new(code: ValidationCode, kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            code,
            kind,
            message: message.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn info(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self::new(ValidationCode::Info, kind, message)
    }

    pub fn warning(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self::new(ValidationCode::Warning, kind, message)
    }

    pub fn error(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self::new(ValidationCode::Error, kind, message)
    }

    pub fn with(mut self, attribute: ValidationAttribute, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(attribute, value.into());
        self
    }

    pub fn with_line(self, line: usize) -> Self {
        self.with(ValidationAttribute::LineNumber, line)
    }

    pub fn with_column(self, column: usize) -> Self {
        self.with(ValidationAttribute::ColumnNumber, column)
    }

    // Public getters
    pub fn code(&self) -> ValidationCode {
        self.code
    }

    pub fn kind(&self) -> ValidationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn attributes(&self) -> &BTreeMap<ValidationAttribute, AttributeValue> {
        &self.attributes
    }

    pub fn attribute(&self, attribute: ValidationAttribute) -> Option<&AttributeValue> {
        self.attributes.get(&attribute)
    }

    /// Integer attribute shortcut.
    pub fn count(&self, attribute: ValidationAttribute) -> Option<usize> {
        self.attribute(attribute).and_then(AttributeValue::as_integer)
    }

    pub fn line(&self) -> Option<usize> {
        self.count(ValidationAttribute::LineNumber)
    }

    /// Result for a reader error raised inside a validation pass.
    ///
    /// Errors that are not about the data (cancellation, configuration, or
    /// an internal inconsistency) are handed back unchanged.
    pub fn from_reader_error(err: &ReaderError) -> Option<Self> {
        let message = err.to_string();
        let result = match err {
            ReaderError::Io(_) => Self::error(ValidationKind::IoError, message),
            ReaderError::MissingVariableName { line, column } => {
                Self::error(ValidationKind::MissingVariableName, message)
                    .with_line(*line)
                    .with_column(*column)
            }
            ReaderError::InvalidNumber {
                line,
                column,
                value,
            } => Self::error(ValidationKind::InvalidNumber, message)
                .with_line(*line)
                .with_column(*column)
                .with(ValidationAttribute::Value, value.as_str()),
            ReaderError::ExcessData {
                line,
                expected,
                actual,
            } => Self::error(ValidationKind::ExcessData, message)
                .with_line(*line)
                .with(ValidationAttribute::ExpectedCount, *expected)
                .with(ValidationAttribute::ActualCount, *actual),
            ReaderError::InsufficientData {
                line,
                expected,
                actual,
            } => Self::error(ValidationKind::InsufficientData, message)
                .with_line(*line)
                .with(ValidationAttribute::ExpectedCount, *expected)
                .with(ValidationAttribute::ActualCount, *actual),
            ReaderError::FieldTooLong { line, column, .. } => {
                Self::error(ValidationKind::FieldTooLong, message)
                    .with_line(*line)
                    .with_column(*column)
            }
            ReaderError::InvalidCaseCount { line, value } => {
                Self::error(ValidationKind::InvalidCaseCount, message)
                    .with_line(*line)
                    .with(ValidationAttribute::Value, value.as_str())
            }
            ReaderError::MissingCovarianceData { line } => {
                Self::error(ValidationKind::MissingCovarianceData, message).with_line(*line)
            }
            ReaderError::UnknownCategory { .. }
            | ReaderError::InvalidConfig(_)
            | ReaderError::Cancelled => return None,
        };
        Some(result)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line() {
            write!(f, "line {}: ", line)?;
        }

        write!(f, "[{}] {}: {}", self.kind, self.code, self.message)
    }
}
