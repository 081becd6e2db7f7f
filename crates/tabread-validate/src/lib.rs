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

//! Tabread Validate - diagnostic passes over tabular and covariance files
//!
//! Where [`tabread::TabularReader`] stops at the first problem, a
//! [`Validator`] walks the whole file and reports every problem it finds as
//! a [`ValidationResult`].
//!
//! ## Quick Start
//!
//! ```rust
//! use tabread::{Delimiter, Exclusion, MemorySource, ReadMode, ReaderConfig};
//! use tabread_validate::{ValidationKind, Validator};
//!
//! let source = MemorySource::from("x,y\n1,2\n3,oops\n4\n");
//! let validator = Validator::new(source, ReaderConfig::new(Delimiter::Comma));
//!
//! let report = validator
//!     .validate_data(&Exclusion::None, ReadMode::Continuous)
//!     .unwrap();
//!
//! assert!(report.has_errors());
//! for result in &report {
//!     println!("{}", result);
//! }
//! assert_eq!(report.summary().unwrap().kind(), ValidationKind::FileSummary);
//! ```
//!
//! ## Result Cap
//!
//! A run collects at most [`ValidationConfig::max_results`] results. When the
//! cap is reached a single [`ValidationKind::DiagnosticLimit`] warning is
//! added and the scan stops. The file summary is always the last result.

mod diagnostic;
mod error;
mod report;
mod runner;

pub use diagnostic::{
    AttributeValue, ValidationAttribute, ValidationCode, ValidationKind, ValidationResult,
};
pub use error::{ValidateError, ValidateResult};
pub use report::ValidationReport;
pub use runner::{ValidationConfig, Validator, MAX_RESULTS};
