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

//! Conversion of user config values between the API and the Terraform state
//!
//! The generic functions [`from_api`] and [`to_api`] only take care of the keys.
//! The typed ones ([`from_api_for`] and [`to_api_for`]) follow the layout produced by the
//! [builder](crate::user_config_block): optional blocks are lists of at most one element,
//! and union types are split across suffixed fields.

use serde_json::{Map, Value};

use crate::{
    builder::{property_variants, variant_key, Variant},
    error::Result,
    property::{decode_key, encode_key},
    representation::{type_representation, SchemaCategory},
};

/// Escape the keys of an API value
pub fn from_api(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (encode_key(key), from_api(value)))
                .collect(),
        ),
        Value::Array(values) => Value::Array(values.iter().map(from_api).collect()),
        _ => value.clone(),
    }
}

/// Unescape the keys of a Terraform value, and drop its null fields
pub fn to_api(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (decode_key(key), to_api(value)))
                .collect(),
        ),
        Value::Array(values) => Value::Array(values.iter().map(to_api).collect()),
        _ => value.clone(),
    }
}

/// Convert the API user config of a type into its Terraform layout
pub fn from_api_for(category: SchemaCategory, type_name: &str, value: &Value) -> Result<Value> {
    let descriptor = type_representation(category, type_name)?;
    Ok(from_api_block(properties_of(descriptor), value))
}

/// Convert the Terraform user config of a type into its API layout
///
/// Union fields are merged back into one list, grouped by type in the order of the
/// property's type list: the order of elements of different types is not kept.
///
/// ```
/// use aiven_userconfig::{from_api_for, to_api_for, SchemaCategory};
/// use serde_json::json;
///
/// let api = json!({"ip_filter": [{"network": "10.20.0.0/16"}, "10.0.0.0/8"]});
/// let tf = from_api_for(SchemaCategory::Service, "redis", &api).unwrap();
/// assert_eq!(
///     to_api_for(SchemaCategory::Service, "redis", &tf).unwrap(),
///     json!({"ip_filter": ["10.0.0.0/8", {"network": "10.20.0.0/16"}]})
/// );
/// ```
pub fn to_api_for(category: SchemaCategory, type_name: &str, value: &Value) -> Result<Value> {
    let descriptor = type_representation(category, type_name)?;
    Ok(to_api_block(properties_of(descriptor), value))
}

fn properties_of(descriptor: &Map<String, Value>) -> Option<&Map<String, Value>> {
    descriptor.get("properties").and_then(Value::as_object)
}

/// Check if a JSON value has the shape of a representation type
fn matches_type(abstract_type: &str, value: &Value) -> bool {
    match abstract_type {
        "boolean" => value.is_boolean(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "string" => value.is_string(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        _ => false,
    }
}

fn is_list_variant(variant: &Variant<'_>) -> bool {
    matches!(variant, Variant::ScalarList(_) | Variant::ObjectList(_))
}

fn from_api_block(properties: Option<&Map<String, Value>>, value: &Value) -> Value {
    let Value::Object(map) = value else {
        return from_api(value);
    };
    let mut result = Map::new();

    for (api_key, value) in map {
        if value.is_null() {
            continue;
        }
        let key = encode_key(api_key);
        let variants = properties
            .and_then(|properties| properties.get(api_key))
            .and_then(Value::as_object)
            .and_then(|property| Some((property, property_variants(property).ok()?)));
        let Some((property, variants)) = variants else {
            result.insert(key, from_api(value));
            continue;
        };

        if let Value::Array(elements) = value {
            if variants.iter().any(|(_, variant)| is_list_variant(variant)) {
                let mut buckets: Vec<Vec<Value>> = vec![Vec::new(); variants.len()];
                for element in elements {
                    let found = variants.iter().enumerate().find(|(_, (t, variant))| {
                        is_list_variant(variant) && matches_type(t, element)
                    });
                    match found {
                        Some((i, (_, Variant::ObjectList(items)))) => {
                            buckets[i].push(from_api_block(properties_of(items), element))
                        }
                        Some((i, _)) => buckets[i].push(from_api(element)),
                        None => {
                            tracing::warn!(%key, "dropping user config element of unexpected type")
                        }
                    }
                }
                let all_empty = buckets.iter().all(Vec::is_empty);
                for (i, ((abstract_type, _), bucket)) in variants.iter().zip(buckets).enumerate() {
                    if !bucket.is_empty() || (all_empty && i == 0) {
                        result.insert(variant_key(&key, i, abstract_type), Value::Array(bucket));
                    }
                }
                continue;
            }
        }

        let found = variants
            .iter()
            .enumerate()
            .find(|(_, (t, variant))| !is_list_variant(variant) && matches_type(t, value));
        match found {
            Some((i, (abstract_type, Variant::Object))) => {
                let block = from_api_block(properties_of(property), value);
                result.insert(variant_key(&key, i, abstract_type), Value::Array(vec![block]));
            }
            Some((i, (abstract_type, _))) => {
                result.insert(variant_key(&key, i, abstract_type), from_api(value));
            }
            None => {
                result.insert(key, from_api(value));
            }
        }
    }

    Value::Object(result)
}

fn to_api_block(properties: Option<&Map<String, Value>>, value: &Value) -> Value {
    let Value::Object(map) = value else {
        return to_api(value);
    };
    let mut result = Map::new();

    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        let Some((api_key, property, variant)) = properties.and_then(|p| resolve_key(p, key))
        else {
            result.insert(decode_key(key), to_api(value));
            continue;
        };

        let converted = match (&variant, value) {
            (Variant::Object, Value::Array(elements)) => match elements.first() {
                Some(element) => to_api_block(properties_of(property), element),
                None => continue,
            },
            (Variant::Object, _) => to_api_block(properties_of(property), value),
            (Variant::ObjectList(items), Value::Array(elements)) => Value::Array(
                elements
                    .iter()
                    .map(|element| to_api_block(properties_of(items), element))
                    .collect(),
            ),
            _ => to_api(value),
        };

        // union fields are merged back into the same list
        if let Some(Value::Array(existing)) = result.get_mut(api_key.as_str()) {
            if let Value::Array(more) = converted {
                existing.extend(more);
                continue;
            }
        }
        result.insert(api_key.clone(), converted);
    }

    Value::Object(result)
}

/// Find the property and the variant a Terraform key stands for
fn resolve_key<'a>(
    properties: &'a Map<String, Value>,
    key: &str,
) -> Option<(&'a String, &'a Map<String, Value>, Variant<'a>)> {
    properties.iter().find_map(|(api_key, property)| {
        let property = property.as_object()?;
        let encoded = encode_key(api_key);
        if !key.starts_with(encoded.as_str()) {
            return None;
        }
        property_variants(property)
            .ok()?
            .into_iter()
            .enumerate()
            .find(|(i, (abstract_type, _))| variant_key(&encoded, *i, abstract_type) == key)
            .map(|(_, (_, variant))| (api_key, property, variant))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn generic_keys() {
        let api = json!({"pg": {"pg_stat_statements.track": "all"}, "list": [{"a.b": 1}]});
        let tf = from_api(&api);
        assert_eq!(
            tf,
            json!({"pg": {"pg_stat_statements__dot__track": "all"}, "list": [{"a__dot__b": 1}]})
        );
        assert_eq!(to_api(&tf), api);
    }

    #[test]
    fn nulls_are_dropped() {
        assert_eq!(
            to_api(&json!({"a": null, "b": {"c": null, "d": 1}})),
            json!({"b": {"d": 1}})
        );
    }

    #[test]
    fn pg_from_api() {
        let api = json!({
            "pg": {"pg_stat_statements.track": "all", "max_connections": 100},
            "pg_version": "15",
            "admin_username": null,
            "unknown.key": true,
        });
        let tf = from_api_for(SchemaCategory::Service, "pg", &api).unwrap();
        assert_eq!(
            tf,
            json!({
                "pg": [{"pg_stat_statements__dot__track": "all", "max_connections": 100}],
                "pg_version": "15",
                "unknown__dot__key": true,
            })
        );
        assert_eq!(
            to_api_for(SchemaCategory::Service, "pg", &tf).unwrap(),
            json!({
                "pg": {"pg_stat_statements.track": "all", "max_connections": 100},
                "pg_version": "15",
                "unknown.key": true,
            })
        );
    }

    #[test]
    fn union_lists_are_split_and_merged() {
        let api = json!({
            "ip_filter": ["10.0.0.0/8", {"network": "10.20.0.0/16", "description": "office"}],
        });
        let tf = from_api_for(SchemaCategory::Service, "redis", &api).unwrap();
        assert_eq!(
            tf,
            json!({
                "ip_filter": ["10.0.0.0/8"],
                "ip_filter_object": [{"network": "10.20.0.0/16", "description": "office"}],
            })
        );
        assert_eq!(to_api_for(SchemaCategory::Service, "redis", &tf).unwrap(), api);
    }

    #[test]
    fn union_lists_are_grouped_by_type() {
        let api = json!({
            "ip_filter": [
                {"network": "10.20.0.0/16"},
                "10.0.0.0/8",
                {"network": "10.30.0.0/16"},
                "192.168.0.0/24",
            ],
        });
        let tf = from_api_for(SchemaCategory::Service, "redis", &api).unwrap();
        assert_eq!(
            tf,
            json!({
                "ip_filter": ["10.0.0.0/8", "192.168.0.0/24"],
                "ip_filter_object": [{"network": "10.20.0.0/16"}, {"network": "10.30.0.0/16"}],
            })
        );
        assert_eq!(
            to_api_for(SchemaCategory::Service, "redis", &tf).unwrap(),
            json!({
                "ip_filter": [
                    "10.0.0.0/8",
                    "192.168.0.0/24",
                    {"network": "10.20.0.0/16"},
                    {"network": "10.30.0.0/16"},
                ],
            })
        );
    }

    #[test]
    fn empty_blocks_are_omitted() {
        let tf = json!({"migration": [], "redis_ssl": true, "ip_filter": []});
        assert_eq!(
            to_api_for(SchemaCategory::Service, "redis", &tf).unwrap(),
            json!({"redis_ssl": true, "ip_filter": []})
        );
        assert_eq!(
            from_api_for(SchemaCategory::Service, "redis", &json!({"ip_filter": []})).unwrap(),
            json!({"ip_filter": []})
        );
    }
}
