// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! `farapack` -- command-line front end for `.fara` template packages.
//!
//! # Usage
//!
//! ```text
//! farapack list
//! farapack export <id> [target]
//! farapack import <file>
//! farapack inspect <file>
//! farapack reset
//! ```
//!
//! # Environment variables
//!
//! | Variable             | Default               | Description                              |
//! |----------------------|-----------------------|------------------------------------------|
//! | `FARA_STORE`         | `fara-templates.json` | JSON file holding the template list      |
//! | `FARA_EXPORT_DIR`    | `.`                   | Export target when none is given         |
//! | `FARA_TRANSFORM_KEY` | built-in key          | Key for the `audit.logic` byte transform |
//! | `RUST_LOG`           | `farapack=info`       | Log filter                               |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use farapack::logic::exchange::{export_template, import_template, inspect_package};
use farapack::repository::{JsonFileRepository, TemplateRepository};
use farapack::{CodecConfig, PackageCodec};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_STORE: &str = "fara-templates.json";
const DEFAULT_EXPORT_DIR: &str = ".";

const USAGE: &str = "usage: farapack <list | export <id> [target] | import <file> | inspect <file> | reset>";

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farapack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let store = std::env::var("FARA_STORE").unwrap_or_else(|_| DEFAULT_STORE.into());
    let codec = PackageCodec::new(CodecConfig::from_env().context("Invalid codec configuration")?);

    match args {
        [cmd] if cmd == "list" => {
            let repo = open_store(&store)?;
            for record in repo.list()? {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.id,
                    record.name,
                    record.version,
                    record.tags.join(",")
                );
            }
        }
        [cmd, id, rest @ ..] if cmd == "export" && rest.len() <= 1 => {
            let repo = open_store(&store)?;
            let target = match rest.first() {
                Some(target) => PathBuf::from(target),
                None => std::env::var("FARA_EXPORT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_EXPORT_DIR)),
            };
            let path = export_template(&repo, &codec, id, &target)?;
            println!("{}", path.display());
        }
        [cmd, file] if cmd == "import" => {
            let mut repo = open_store(&store)?;
            let record = import_template(&mut repo, &codec, Path::new(file))?;
            println!("{}\t{}", record.id, record.name);
        }
        [cmd, file] if cmd == "inspect" => {
            let summary = inspect_package(&codec, Path::new(file))?;
            let manifest = &summary.manifest;
            println!("name:        {}", manifest.name);
            println!("description: {}", manifest.description);
            println!("version:     {}", manifest.version);
            println!("author:      {}", manifest.author);
            println!("tags:        {}", manifest.tags.join(", "));
            println!("format:      {}", manifest.format);
            println!("exportedAt:  {}", manifest.exported_at);
            println!("entries:     {}", summary.entries.join(", "));
            println!("payload:     {} bytes", summary.payload_bytes);
            println!("sha256:      {}", summary.sha256);
        }
        [cmd] if cmd == "reset" => {
            let mut repo = open_store(&store)?;
            repo.reset_to_defaults()?;
            println!("{}", repo.path().display());
        }
        _ => bail!("{USAGE}"),
    }
    Ok(())
}

fn open_store(path: &str) -> Result<JsonFileRepository> {
    JsonFileRepository::open(path).with_context(|| format!("Failed to open template store {path}"))
}

