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

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, Write},
    sync::Mutex,
};

use aiven_userconfig::{type_names, user_config_block, Diagnostics, SchemaCategory};
use anyhow::{bail, Result};
use clap::Parser;

/// Print the Terraform schema of user config types as JSON
#[derive(Debug, Parser)]
#[command(name = "userconfig-schema", version)]
struct Args {
    /// Schema category of the types
    #[arg(short, long, default_value = "service_types")]
    category: SchemaCategory,

    /// Maximum level of the logs written on stderr
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,

    /// Write the logs into this file instead of stderr
    #[arg(long, env = "PLUGIN_LOG_FILE")]
    log_file: Option<String>,

    /// Types to print (all the types of the category if none is given)
    types: Vec<String>,
}

fn init_logging(args: &Args) -> Result<()> {
    if let Some(path) = &args.log_file {
        let log_file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(Mutex::new(log_file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(args.log_level)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let types = if args.types.is_empty() {
        type_names(args.category)
            .into_iter()
            .map(str::to_owned)
            .collect()
    } else {
        args.types.clone()
    };

    let mut diags = Diagnostics::default();
    let blocks: BTreeMap<_, _> = types
        .into_iter()
        .filter_map(|name| {
            let block = user_config_block(&mut diags, args.category, &name)?;
            Some((name, block))
        })
        .collect();

    for warning in &diags.warnings {
        eprintln!("warning: {}", warning);
    }
    for error in &diags.errors {
        eprintln!("error: {}", error);
    }

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &blocks)?;
    writeln!(stdout)?;

    if diags.has_errors() {
        bail!(
            "{} error(s) while building the {} schemas",
            diags.errors.len(),
            args.category
        );
    }
    Ok(())
}
