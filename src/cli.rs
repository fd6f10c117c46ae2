//! Command-line interface
//!
//! `rewrite` and `event` run the rewriter directly; `serve` starts the local
//! edge emulator; `config` prints the effective configuration.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::routing::{rewrite_uri, Rewrite, RewriteRules};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rewrite SPA request paths to bucket object keys", long_about = None)]
pub struct Args {
    /// Configuration file name, without extension
    #[arg(short, long, value_name = "PATH", default_value = "config", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Rewrite request URIs and print the storage keys
    Rewrite {
        #[arg(required = true, value_name = "URI")]
        uris: Vec<String>,
        /// Print a JSON array instead of `input -> output` lines
        #[arg(long)]
        json: bool,
    },
    /// Rewrite the request of a viewer-request event read from FILE or stdin
    Event {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Run the local edge emulator
    Serve,
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Serialize)]
struct RewriteReport<'a> {
    input: &'a str,
    #[serde(flatten)]
    rewrite: Rewrite,
}

/// Render the output of the `rewrite` subcommand
pub fn render_rewrites(
    uris: &[String],
    rules: &RewriteRules,
    json: bool,
) -> Result<String, serde_json::Error> {
    if json {
        let reports: Vec<RewriteReport<'_>> = uris
            .iter()
            .map(|uri| RewriteReport {
                input: uri,
                rewrite: rewrite_uri(uri, rules),
            })
            .collect();
        return serde_json::to_string_pretty(&reports);
    }

    Ok(uris
        .iter()
        .map(|uri| format!("{uri} -> {}", rewrite_uri(uri, rules).uri))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Read event input from a file, or stdin when no file is given
pub fn read_input(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
