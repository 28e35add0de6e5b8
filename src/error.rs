// This file is part of the aiven-userconfig project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! [`Error`] module

use serde_json::Value;
use thiserror::Error;

/// Result type of the userconfig operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading the schema representations
///
/// Malformed embedded representations are not reported here:
/// they are build-time defects and abort the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The name does not match any schema category
    #[error("unknown schema category: {0}")]
    UnknownCategory(String),
    /// The schema category has no type with this name
    #[error("unknown schema type: {0}")]
    UnknownSchemaType(String),
    /// The abstract type cannot be projected onto a Terraform type
    #[error("unknown type: {0}")]
    UnknownType(String),
    /// A string was expected
    #[error("value is not a string: {0}")]
    NotAString(Value),
    /// A sequence was expected
    #[error("not a slice: {0}")]
    NotASlice(Value),
    /// Either a string or a sequence of strings was expected
    #[error("value is not a string or a slice of strings: {0}")]
    NotAStringOrSlice(Value),
    /// The property has neither a description nor a title
    #[error("property has no description nor title")]
    MissingDescription,
    /// A mandatory field of a property descriptor is absent
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// A property descriptor is not a mapping
    #[error("property is not a mapping: {0}")]
    NotAnObject(Value),
}
