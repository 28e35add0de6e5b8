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

//! Terraform schema model produced from the representations

use std::{collections::BTreeMap, fmt::Display};

use serde::Serialize;

use crate::types::TerraformType;

/// Specify if a description must interpreted as markdown or plain
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StringKind {
    #[default]
    Plain,
    Markdown,
}

/// Description
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Description {
    /// Kind of the description (either `Plain` or `Markdown`)
    pub kind: StringKind,
    /// Content of the description
    pub content: String,
}

impl Description {
    /// Create a plain description
    pub fn plain<T>(content: T) -> Self
    where
        T: ToString,
    {
        Self {
            kind: StringKind::Plain,
            content: content.to_string(),
        }
    }
    /// Create a markdown description
    pub fn markdown<T>(content: T) -> Self
    where
        T: ToString,
    {
        Self {
            kind: StringKind::Markdown,
            content: content.to_string(),
        }
    }
}

impl<T> From<T> for Description
where
    T: ToString,
{
    fn from(value: T) -> Self {
        Description::plain(value.to_string())
    }
}

/// NestedBlock
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "nesting", rename_all = "lowercase")]
pub enum NestedBlock {
    /// The nested block can appear at most once (if not given, it will be null)
    ///
    /// On the wire, it is a list with at most one element.
    Optional { block: Block },
    /// The nested block can appear multiple times
    List {
        block: Block,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_items: Option<u64>,
    },
}

impl NestedBlock {
    /// Inner block
    pub fn block(&self) -> &Block {
        match self {
            NestedBlock::Optional { block } => block,
            NestedBlock::List { block, .. } => block,
        }
    }
}

/// Block
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Block {
    /// Attributes of the block
    pub attributes: BTreeMap<String, Attribute>,
    /// Nested blocks of the block
    pub blocks: BTreeMap<String, NestedBlock>,
    /// Description for the block
    pub description: Description,
    /// Is the block deprecated
    pub deprecated: bool,
}

impl Default for Block {
    /// Create an empty block (with a description "empty")
    fn default() -> Block {
        Block {
            attributes: Default::default(),
            blocks: Default::default(),
            description: "empty".into(),
            deprecated: false,
        }
    }
}

/// Specify the Attribute type
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AttributeType {
    /// String
    String,
    /// Number (int or float)
    Number,
    /// Boolean
    Bool,
    /// List
    List(Box<AttributeType>),
}

impl AttributeType {
    /// Attribute type of a scalar Terraform type
    ///
    /// Returns `None` for lists: their element type is not known from the Terraform type alone.
    pub fn from_primitive(tf_type: TerraformType) -> Option<Self> {
        match tf_type {
            TerraformType::Bool => Some(AttributeType::Bool),
            TerraformType::Int | TerraformType::Float => Some(AttributeType::Number),
            TerraformType::String => Some(AttributeType::String),
            TerraformType::List => None,
        }
    }
}

impl Serialize for AttributeType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            AttributeType::String => serializer.serialize_str("string"),
            AttributeType::Number => serializer.serialize_str("number"),
            AttributeType::Bool => serializer.serialize_str("bool"),
            AttributeType::List(attr) => ("list", attr).serialize(serializer),
        }
    }
}

impl Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return f.write_str(
            serde_json::to_string(self)
                .or(Err(std::fmt::Error))?
                .as_str(),
        );
    }
}

/// Specify the Attribute constraint
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeConstraint {
    /// The attribute is optional, and the provider cannot generate a value for it
    Optional,
    /// The attribute is both optional and computed:
    /// the practitioner can omit the value, and the API fills in its default
    OptionalComputed,
}

/// Attribute
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Attribute {
    /// Type of the Attribute
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Description of the Attribute
    pub description: Description,
    /// Is the attribute required
    pub constraint: AttributeConstraint,
    /// Is the attribute sensitive
    pub sensitive: bool,
    /// Is the attribute deprecated
    pub deprecated: bool,
}
