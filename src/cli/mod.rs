// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the docpeep command-line interface.
//!
//! Two subcommands: `search` to query one or more corpus roots, and `inspect`
//! to see exactly how a single document matches a query.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docpeep",
    about = "Typo-tolerant search over extracted document text",
    version
)]
pub struct Cli {
    /// Config file (default: .docpeep.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search corpus roots for approximate matches
    Search {
        /// Search query
        query: String,

        /// Corpus root as KEY=PATH, or a bare directory keyed by its name.
        /// Replaces any roots from the config file. Repeatable.
        #[arg(short, long = "root", value_name = "KEY=PATH")]
        roots: Vec<String>,

        /// Worker threads (default: available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Abandon the search after this many milliseconds
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,

        /// Print the JSON response envelope instead of formatted results
        #[arg(long)]
        json: bool,

        /// Maximum number of results to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show how one text file matches a query
    Inspect {
        /// Extracted text file (a .layout.json sidecar is picked up if present)
        file: PathBuf,

        /// Search query
        query: String,
    },
}
