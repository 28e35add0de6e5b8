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

//! User configuration schemas of the managed cloud services
//!
//! The API describes the user configuration of services, service integrations and
//! integration endpoints with embedded YAML representations.
//! This library turns those representations into Terraform schemas:
//!
//! - [`representation`] parses and caches the representation of a [`SchemaCategory`],
//! - [`terraform_types`] projects representation types onto Terraform types,
//! - [`user_config_block`] builds the [`Block`] of a user config type,
//! - [`from_api_for`] and [`to_api_for`] convert user config values between the API and Terraform.
//!
//! ```
//! use aiven_userconfig::{user_config_block, Diagnostics, SchemaCategory};
//!
//! let mut diags = Diagnostics::default();
//! let block = user_config_block(&mut diags, SchemaCategory::Service, "redis").unwrap();
//! assert!(block.attributes.contains_key("redis_timeout"));
//! ```

mod attribute_path;
mod builder;
mod convert;
mod diagnostics;
mod error;
mod property;
mod representation;
mod types;

pub mod schema;

pub use attribute_path::{AttributePath, AttributePathStep};
pub use builder::{block_from_properties, user_config_block};
pub use convert::{from_api, from_api_for, to_api, to_api_for};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{Error, Result};
pub use property::{
    decode_key, description_for_property, encode_key, must_string_slice, sliced_string,
    DescriptionKey,
};
pub use representation::{
    representation, type_names, type_representation, Representation, SchemaCategory,
};
pub use schema::Block;
pub use types::{is_terraform_type_primitive, terraform_types, TerraformType};
