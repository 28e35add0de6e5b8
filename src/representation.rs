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

//! Embedded schema representations and their process-wide cache

use std::{fmt::Display, str::FromStr, sync::OnceLock};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Parsed representation: type name (or property name) to its untyped descriptor
pub type Representation = Map<String, Value>;

/// Partition of the embedded schema description
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SchemaCategory {
    /// User config of the services
    Service = 0,
    /// User config of the service integrations
    Integration = 1,
    /// User config of the service integration endpoints
    IntegrationEndpoint = 2,
}

impl SchemaCategory {
    /// All the schema categories
    pub const ALL: [SchemaCategory; 3] = [
        SchemaCategory::Service,
        SchemaCategory::Integration,
        SchemaCategory::IntegrationEndpoint,
    ];

    /// Name of the category, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            SchemaCategory::Service => "service_types",
            SchemaCategory::Integration => "integration_types",
            SchemaCategory::IntegrationEndpoint => "integration_endpoint_types",
        }
    }

    fn raw(self) -> &'static str {
        match self {
            SchemaCategory::Service => include_str!("representation/service_types.yml"),
            SchemaCategory::Integration => include_str!("representation/integration_types.yml"),
            SchemaCategory::IntegrationEndpoint => {
                include_str!("representation/integration_endpoint_types.yml")
            }
        }
    }
}

impl Display for SchemaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemaCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SchemaCategory::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_owned()))
    }
}

static CACHE: [OnceLock<Representation>; 3] = [OnceLock::new(), OnceLock::new(), OnceLock::new()];

/// Get the parsed representation of a category
///
/// The embedded YAML is parsed on first access and cached for the lifetime of the process.
/// Every later call returns the same instance.
///
/// # Panics
///
/// Panics if the embedded representation is not a valid YAML mapping.
pub fn representation(category: SchemaCategory) -> &'static Representation {
    CACHE[category as usize].get_or_init(|| {
        let parsed: Representation = serde_yaml::from_str(category.raw())
            .unwrap_or_else(|err| panic!("malformed {} representation: {}", category, err));
        tracing::debug!(%category, types = parsed.len(), "parsed schema representation");
        parsed
    })
}

/// Names of the types described in a category, sorted
pub fn type_names(category: SchemaCategory) -> Vec<&'static str> {
    let mut names: Vec<_> = representation(category).keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

/// Descriptor of a single type of a category
pub fn type_representation(
    category: SchemaCategory,
    name: &str,
) -> Result<&'static Map<String, Value>> {
    representation(category)
        .get(name)
        .and_then(Value::as_object)
        .ok_or_else(|| Error::UnknownSchemaType(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_parses() {
        for category in SchemaCategory::ALL {
            assert!(
                !representation(category).is_empty(),
                "{} should describe at least one type",
                category
            );
        }
    }

    #[test]
    fn representation_is_cached() {
        let first = representation(SchemaCategory::Service);
        let second = representation(SchemaCategory::Service);
        assert!(std::ptr::eq(first, second));
        assert!(!std::ptr::eq(
            first,
            representation(SchemaCategory::Integration)
        ));
    }

    #[test]
    fn category_names() {
        for category in SchemaCategory::ALL {
            assert_eq!(category.name().parse::<SchemaCategory>(), Ok(category));
        }
        assert_eq!(
            "kafka_types".parse::<SchemaCategory>(),
            Err(Error::UnknownCategory("kafka_types".to_owned()))
        );
    }

    #[test]
    fn type_lookup() {
        assert_eq!(
            type_names(SchemaCategory::Service),
            vec!["clickhouse", "pg", "redis"]
        );
        let pg = type_representation(SchemaCategory::Service, "pg").unwrap();
        assert_eq!(pg["type"], "object");
        assert_eq!(
            type_representation(SchemaCategory::Service, "mysql"),
            Err(Error::UnknownSchemaType("mysql".to_owned()))
        );
    }
}
