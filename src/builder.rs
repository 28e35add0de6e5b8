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

//! Build Terraform blocks from the schema representations
//!
//! Every user config type becomes a [`Block`]:
//! - scalar properties become attributes,
//! - object properties become optional nested blocks,
//! - arrays of scalars become list attributes,
//! - arrays of objects become list nested blocks.
//!
//! When a property accepts several types, the first one keeps the property name,
//! and the others are suffixed with their representation type (eg: `ip_filter_object`).

use serde_json::{Map, Value};

use crate::{
    attribute_path::AttributePath,
    diagnostics::Diagnostics,
    error::{Error, Result},
    property::{description_for_property, encode_key, sliced_string, DescriptionKey},
    representation::{type_representation, SchemaCategory},
    schema::{Attribute, AttributeConstraint, AttributeType, Block, Description, NestedBlock},
    types::terraform_types,
};

/// Build the user config block of a type
///
/// Errors are reported into `diags`, and `None` is returned if any error occurred.
/// Warnings do not prevent the block from being returned.
pub fn user_config_block(
    diags: &mut Diagnostics,
    category: SchemaCategory,
    type_name: &str,
) -> Option<Block> {
    let descriptor = match type_representation(category, type_name) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            diags.root_error_short(err.to_string());
            return None;
        }
    };

    let mut local = Diagnostics::default();
    let path = AttributePath::new(format!("{}_user_config", type_name));
    let mut block = match descriptor.get("properties").and_then(Value::as_object) {
        Some(properties) => block_from_properties(&mut local, path, properties),
        None => Block::default(),
    };
    block.description = match description_for_property(descriptor) {
        Ok((_, text)) => Description::plain(text),
        Err(_) => Description::plain(format!("{} user configurable settings", type_name)),
    };

    tracing::debug!(
        %category,
        type_name,
        attributes = block.attributes.len(),
        blocks = block.blocks.len(),
        errors = local.errors.len(),
        "built user config block"
    );

    let failed = local.has_errors();
    diags.add_diagnostics(local);
    if failed {
        None
    } else {
        Some(block)
    }
}

/// Build a block from a mapping of property names to property descriptors
///
/// Properties that cannot be converted are skipped and reported as errors at their path.
pub fn block_from_properties(
    diags: &mut Diagnostics,
    path: AttributePath,
    properties: &Map<String, Value>,
) -> Block {
    let mut block = Block::default();

    for (name, property) in properties {
        let key = encode_key(name);
        let property_path = path.clone().attribute(key.clone());
        match property_fields(diags, &property_path, &key, property) {
            Ok(fields) => {
                for (key, field) in fields {
                    match field {
                        Field::Attribute(attribute) => {
                            block.attributes.insert(key, attribute);
                        }
                        Field::Block(nested) => {
                            block.blocks.insert(key, nested);
                        }
                    }
                }
            }
            Err(err) => {
                tracing::warn!(path = %property_path, %err, "skipping user config property");
                diags.error(
                    "Invalid user config property",
                    err.to_string(),
                    property_path,
                );
            }
        }
    }

    block
}

enum Field {
    Attribute(Attribute),
    Block(NestedBlock),
}

pub(crate) enum Variant<'a> {
    Scalar(AttributeType),
    ScalarList(AttributeType),
    Object,
    ObjectList(&'a Map<String, Value>),
}

fn property_fields(
    diags: &mut Diagnostics,
    path: &AttributePath,
    key: &str,
    property: &Value,
) -> Result<Vec<(String, Field)>> {
    let property = property
        .as_object()
        .ok_or_else(|| Error::NotAnObject(property.clone()))?;
    let variants = property_variants(property)?;

    if variants.is_empty() {
        diags.warning(
            "Ignored user config property",
            "the property can only be null",
            path.clone(),
        );
        return Ok(Vec::new());
    }

    let (key_kind, text) = description_for_property(property)?;
    let description = property_description(text, property);
    let deprecated = key_kind == DescriptionKey::Deprecated;
    let sensitive = property.get("_secure") == Some(&Value::Bool(true));
    let constraint = if property.contains_key("default") {
        AttributeConstraint::OptionalComputed
    } else {
        AttributeConstraint::Optional
    };
    let max_items = property.get("max_items").and_then(Value::as_u64);

    let mut fields = Vec::with_capacity(variants.len());
    for (i, (abstract_type, variant)) in variants.into_iter().enumerate() {
        let (key, path) = if i == 0 {
            (key.to_owned(), path.clone())
        } else {
            let key = variant_key(key, i, &abstract_type);
            let path = AttributePath {
                steps: path.steps[..path.steps.len() - 1].to_vec(),
            }
            .attribute(key.clone());
            (key, path)
        };
        let attribute = |attr_type| Attribute {
            attr_type,
            description: description.clone(),
            constraint: constraint.clone(),
            sensitive,
            deprecated,
        };
        let field = match variant {
            Variant::Scalar(attr_type) => Field::Attribute(attribute(attr_type)),
            Variant::ScalarList(attr_type) => {
                Field::Attribute(attribute(AttributeType::List(Box::new(attr_type))))
            }
            Variant::Object => Field::Block(NestedBlock::Optional {
                block: nested_block(diags, path, property, &description, deprecated),
            }),
            Variant::ObjectList(items) => Field::Block(NestedBlock::List {
                block: nested_block(diags, path.index(0), items, &description, deprecated),
                max_items,
            }),
        };
        fields.push((key, field));
    }

    Ok(fields)
}

/// Name of the field holding the `index`-th type of a property
pub(crate) fn variant_key(key: &str, index: usize, abstract_type: &str) -> String {
    if index == 0 {
        key.to_owned()
    } else {
        format!("{}_{}", key, abstract_type)
    }
}

/// Collect the representation types a property expands into
///
/// Arrays expand into their item types.
pub(crate) fn property_variants(
    property: &Map<String, Value>,
) -> Result<Vec<(String, Variant<'_>)>> {
    let types = sliced_string(property.get("type").ok_or(Error::MissingField("type"))?)?;
    let (tf_types, abstract_types) = terraform_types(&types)?;

    let mut variants = Vec::new();
    for (tf_type, abstract_type) in tf_types.into_iter().zip(abstract_types) {
        if let Some(attr_type) = AttributeType::from_primitive(tf_type) {
            variants.push((abstract_type, Variant::Scalar(attr_type)));
        } else if abstract_type == "object" {
            variants.push((abstract_type, Variant::Object));
        } else {
            let items = property
                .get("items")
                .and_then(Value::as_object)
                .ok_or(Error::MissingField("items"))?;
            let item_types =
                sliced_string(items.get("type").ok_or(Error::MissingField("type"))?)?;
            let (item_tf_types, item_abstract_types) = terraform_types(&item_types)?;
            for (item_tf_type, item_abstract_type) in
                item_tf_types.into_iter().zip(item_abstract_types)
            {
                let variant = match AttributeType::from_primitive(item_tf_type) {
                    Some(attr_type) => Variant::ScalarList(attr_type),
                    None if item_abstract_type == "object" => Variant::ObjectList(items),
                    None => {
                        return Err(Error::UnknownType(format!(
                            "array of {}",
                            item_abstract_type
                        )))
                    }
                };
                variants.push((item_abstract_type, variant));
            }
        }
    }

    Ok(variants)
}

fn nested_block(
    diags: &mut Diagnostics,
    path: AttributePath,
    descriptor: &Map<String, Value>,
    description: &Description,
    deprecated: bool,
) -> Block {
    let mut block = match descriptor.get("properties").and_then(Value::as_object) {
        Some(properties) => block_from_properties(diags, path, properties),
        None => Block::default(),
    };
    block.description = description.clone();
    block.deprecated = deprecated;
    block
}

fn property_description(text: String, property: &Map<String, Value>) -> Description {
    let mut content = text.trim_end().to_owned();
    let mut extra = Vec::new();

    let values = property
        .get("enum")
        .or_else(|| property.get("items").and_then(|items| items.get("enum")));
    if let Some(Value::Array(values)) = values {
        let values: Vec<_> = values
            .iter()
            .filter_map(scalar_to_string)
            .map(|value| format!("`{}`", value))
            .collect();
        if !values.is_empty() {
            extra.push(format!("The possible values are {}.", values.join(", ")));
        }
    }
    if let Some(default) = property.get("default").and_then(scalar_to_string) {
        extra.push(format!("The default value is `{}`.", default));
    }
    if property.get("create_only") == Some(&Value::Bool(true)) {
        extra.push("Changing this property forces recreation of the resource.".to_owned());
    }

    if extra.is_empty() {
        return Description::plain(content);
    }
    if !content.ends_with('.') {
        content.push('.');
    }
    for sentence in extra {
        content.push(' ');
        content.push_str(&sentence);
    }
    Description::markdown(content)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
