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

//! Projection of the representation types onto Terraform types

use std::fmt::Display;

use crate::error::{Error, Result};

/// Concrete attribute type, named after the Terraform plugin SDK types
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TerraformType {
    /// `boolean`
    Bool,
    /// `integer`
    Int,
    /// `number`
    Float,
    /// `string`
    String,
    /// Both arrays and objects
    List,
}

impl TerraformType {
    /// SDK name of the type
    pub fn as_str(self) -> &'static str {
        match self {
            TerraformType::Bool => "TypeBool",
            TerraformType::Int => "TypeInt",
            TerraformType::Float => "TypeFloat",
            TerraformType::String => "TypeString",
            TerraformType::List => "TypeList",
        }
    }

    /// Check if the type is a scalar
    pub fn is_primitive(self) -> bool {
        !matches!(self, TerraformType::List)
    }
}

impl Display for TerraformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if a Terraform type, given by its SDK name, is a scalar
///
/// ```
/// # use aiven_userconfig::is_terraform_type_primitive;
/// assert!(is_terraform_type_primitive("TypeFloat"));
/// assert!(!is_terraform_type_primitive("TypeList"));
/// ```
pub fn is_terraform_type_primitive(name: &str) -> bool {
    matches!(name, "TypeBool" | "TypeInt" | "TypeFloat" | "TypeString")
}

/// Convert representation types into Terraform types
///
/// Returns the Terraform types together with the representation types they come from.
/// Both vectors have the same length: `null` is dropped from both.
///
/// ```
/// # use aiven_userconfig::{terraform_types, TerraformType};
/// let (types, abstract_types) = terraform_types(&["string", "null"]).unwrap();
/// assert_eq!(types, vec![TerraformType::String]);
/// assert_eq!(abstract_types, vec!["string"]);
/// ```
pub fn terraform_types<S: AsRef<str>>(types: &[S]) -> Result<(Vec<TerraformType>, Vec<String>)> {
    let mut projected = Vec::with_capacity(types.len());
    let mut accepted = Vec::with_capacity(types.len());

    for t in types {
        let t = t.as_ref();
        let tf_type = match t {
            // Nullability is expressed by the attribute being optional
            "null" => continue,
            "boolean" => TerraformType::Bool,
            "integer" => TerraformType::Int,
            "number" => TerraformType::Float,
            "string" => TerraformType::String,
            "array" | "object" => TerraformType::List,
            _ => return Err(Error::UnknownType(t.to_owned())),
        };
        projected.push(tf_type);
        accepted.push(t.to_owned());
    }

    Ok((projected, accepted))
}
