// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Configuration file support.
//!
//! Loads `--config <path>` if given, else `.docpeep.toml` in the current
//! directory, else `<config dir>/docpeep/config.toml`. The first file found
//! wins; files are not merged. Command-line flags override whatever the file
//! says.
//!
//! ```toml
//! workers = 4
//! timeout_ms = 5000
//!
//! [[roots]]
//! key = "invoices"
//! path = "/srv/scans/invoices"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::layout::DEFAULT_PREVIEW_PADDING;
use crate::search::{SearchOptions, DEFAULT_SNIPPET_CONTEXT};
use crate::source::layout_file::DEFAULT_VIEWPORT_SCALE;
use crate::source::{CorpusRoot, FsSource};

const LOCAL_CONFIG: &str = ".docpeep.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Named corpus roots, searched in order
    pub roots: Vec<CorpusRoot>,
    /// Worker-pool size (default: available parallelism)
    pub workers: Option<usize>,
    /// Per-search deadline in milliseconds
    pub timeout_ms: Option<u64>,
    pub viewport_scale: f64,
    pub preview_padding: f64,
    pub snippet_context: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            workers: None,
            timeout_ms: None,
            viewport_scale: DEFAULT_VIEWPORT_SCALE,
            preview_padding: DEFAULT_PREVIEW_PADDING,
            snippet_context: DEFAULT_SNIPPET_CONTEXT,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Discovered files are optional, but one
    /// that exists and fails to parse is an error rather than silently
    /// ignored.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        for path in Self::candidate_paths() {
            if path.is_file() {
                return Self::load_from_path(&path);
            }
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Discovery order for config files.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("docpeep").join("config.toml"));
        }
        paths
    }

    /// Read and parse one file. Relative root paths resolve against the
    /// file's directory.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content, path)?;

        if let Some(base) = path.parent() {
            for root in &mut config.roots {
                if root.path.is_relative() {
                    root.path = base.join(&root.path);
                }
            }
        }
        debug!(path = %path.display(), roots = config.roots.len(), "loaded config");
        Ok(config)
    }

    /// Parse and validate config text; `path` is only used in error messages.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// `viewport_scale` must be positive and `preview_padding` non-negative.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |field, reason| ConfigError::InvalidValue {
            path: path.to_path_buf(),
            field,
            reason,
        };
        if !(self.viewport_scale.is_finite() && self.viewport_scale > 0.0) {
            return Err(invalid("viewport_scale", "must be a positive number"));
        }
        if !(self.preview_padding.is_finite() && self.preview_padding >= 0.0) {
            return Err(invalid("preview_padding", "must be zero or more"));
        }
        Ok(())
    }

    /// Replace the configured roots with command-line ones, if any were given.
    pub fn merge_roots(&mut self, cli_roots: Vec<CorpusRoot>) {
        if !cli_roots.is_empty() {
            self.roots = cli_roots;
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            workers: self.workers,
            snippet_context: self.snippet_context,
            preview_padding: self.preview_padding,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Filesystem source over the configured roots.
    pub fn source(&self) -> FsSource {
        FsSource::new(self.roots.clone()).with_viewport_scale(self.viewport_scale)
    }
}

/// Parse a `--root` argument: `key=path`, or a bare path keyed by its
/// directory name.
pub fn parse_root_arg(arg: &str) -> Result<CorpusRoot, ConfigError> {
    let invalid = || ConfigError::InvalidRoot(arg.to_string());

    if let Some((key, path)) = arg.split_once('=') {
        let key = key.trim();
        if key.is_empty() || path.is_empty() {
            return Err(invalid());
        }
        return Ok(CorpusRoot::new(key, path));
    }

    let path = PathBuf::from(arg);
    let key = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(invalid)?
        .to_string();
    Ok(CorpusRoot::new(key, path))
}
