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

//! Helpers to extract data from property descriptors

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

const DOT_ESCAPE: &str = "__dot__";

/// Convert a sequence of strings
pub fn must_string_slice(value: &Value) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(Error::NotASlice(value.clone()));
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::NotAString(other.clone())),
        })
        .collect()
}

/// Convert either a string or a sequence of strings into a sequence of strings
///
/// ```
/// # use aiven_userconfig::sliced_string;
/// # use serde_json::json;
/// assert_eq!(sliced_string(&json!("a")).unwrap(), vec!["a"]);
/// assert_eq!(sliced_string(&json!(["a", "b"])).unwrap(), vec!["a", "b"]);
/// assert!(sliced_string(&json!(42)).is_err());
/// ```
pub fn sliced_string(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(_) => must_string_slice(value),
        other => Err(Error::NotAStringOrSlice(other.clone())),
    }
}

/// Kind of text attached to a property
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum DescriptionKey {
    Description,
    Deprecated,
}

impl DescriptionKey {
    /// Field of the attribute schema the text goes to
    pub fn as_str(self) -> &'static str {
        match self {
            DescriptionKey::Description => "Description",
            DescriptionKey::Deprecated => "Deprecated",
        }
    }
}

impl Display for DescriptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get the description of a property, and whether it is deprecated
///
/// The `description` field is preferred over the `title` field.
/// Only the `description` field can mark a property as deprecated.
pub fn description_for_property(property: &Map<String, Value>) -> Result<(DescriptionKey, String)> {
    if let Some(Value::String(description)) = property.get("description") {
        let key = if description.to_lowercase().contains("deprecated") {
            DescriptionKey::Deprecated
        } else {
            DescriptionKey::Description
        };
        return Ok((key, description.clone()));
    }

    match property.get("title") {
        Some(Value::String(title)) => Ok((DescriptionKey::Description, title.clone())),
        _ => Err(Error::MissingDescription),
    }
}

/// Escape the dots of a key so it can be used as a Terraform attribute name
///
/// ```
/// # use aiven_userconfig::{decode_key, encode_key};
/// assert_eq!(encode_key("pg_stat_statements.track"), "pg_stat_statements__dot__track");
/// assert_eq!(decode_key("pg_stat_statements__dot__track"), "pg_stat_statements.track");
/// ```
pub fn encode_key(key: &str) -> String {
    key.replace('.', DOT_ESCAPE)
}

/// Reverse [`encode_key`]
pub fn decode_key(key: &str) -> String {
    key.replace(DOT_ESCAPE, ".")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn descriptor(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn string_slices() {
        assert_eq!(sliced_string(&json!("a")).unwrap(), vec!["a"]);
        assert_eq!(sliced_string(&json!(["a", "b"])).unwrap(), vec!["a", "b"]);
        assert_eq!(sliced_string(&json!([])).unwrap(), Vec::<String>::new());
        assert_eq!(
            sliced_string(&json!(42)),
            Err(Error::NotAStringOrSlice(json!(42)))
        );
        assert_eq!(
            sliced_string(&json!(["a", 1])),
            Err(Error::NotAString(json!(1)))
        );
        assert_eq!(
            must_string_slice(&json!("a")),
            Err(Error::NotASlice(json!("a")))
        );
    }

    #[test]
    fn deprecated_description() {
        let (key, text) =
            description_for_property(&descriptor(json!({"description": "This is Deprecated now"})))
                .unwrap();
        assert_eq!(key, DescriptionKey::Deprecated);
        assert_eq!(text, "This is Deprecated now");
    }

    #[test]
    fn plain_description() {
        let (key, text) = description_for_property(&descriptor(
            json!({"description": "normal text", "title": "ignored"}),
        ))
        .unwrap();
        assert_eq!(key, DescriptionKey::Description);
        assert_eq!(text, "normal text");
    }

    #[test]
    fn title_fallback() {
        let (key, text) = description_for_property(&descriptor(json!({"title": "T"}))).unwrap();
        assert_eq!(key.as_str(), "Description");
        assert_eq!(text, "T");

        // a deprecated title does not deprecate the property
        let (key, _) =
            description_for_property(&descriptor(json!({"title": "deprecated"}))).unwrap();
        assert_eq!(key, DescriptionKey::Description);
    }

    #[test]
    fn missing_description() {
        assert_eq!(
            description_for_property(&descriptor(json!({"type": "string"}))),
            Err(Error::MissingDescription)
        );
        assert_eq!(
            description_for_property(&descriptor(json!({"title": 3}))),
            Err(Error::MissingDescription)
        );
    }

    #[test]
    fn key_escaping() {
        assert_eq!(encode_key("a.b.c"), "a__dot__b__dot__c");
        assert_eq!(decode_key("a__dot__b__dot__c"), "a.b.c");
        assert_eq!(encode_key("plain"), "plain");
        assert_eq!(decode_key(&encode_key(".lead.")), ".lead.");
    }
}
