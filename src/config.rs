//! `docinfer.toml` settings.
//!
//! ```toml
//! infer-private = "^_"
//! access = ["public", "protected", "undefined"]
//! sort-order = "alpha"
//! lint = true
//! toc = ["Setup", "Widget"]
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use crate::filter::{AccessLevel, DEFAULT_LEVELS};
use crate::sort::SortOrder;
use crate::Options;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_FILE: &str = "docinfer.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Names matching this pattern are private unless tagged otherwise.
    pub infer_private: Option<String>,
    /// Access levels kept in the output.
    pub access: Vec<AccessLevel>,
    pub sort_order: SortOrder,
    pub lint: bool,
    /// Top-level names that lead the output, in this order.
    pub toc: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            infer_private: None,
            access: DEFAULT_LEVELS.to_vec(),
            sort_order: SortOrder::default(),
            lint: false,
            toc: Vec::new(),
        }
    }
}

impl Config {
    /// Read `path`, or [`DEFAULT_FILE`] if present, or fall back to
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Config::read(path),
            None if Path::new(DEFAULT_FILE).is_file() => Config::read(Path::new(DEFAULT_FILE)),
            None => Ok(Config::default()),
        }
    }

    fn read(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Config::parse(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Config> {
        toml::from_str(text).context("failed to parse TOML")
    }

    pub fn infer_private_regex(&self) -> Result<Option<Regex>> {
        self.infer_private
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("invalid infer-private pattern: {}", pattern))
            })
            .transpose()
    }

    /// Compile into the options the pipeline runs with.
    pub fn options(&self) -> Result<Options> {
        Ok(Options {
            infer_private: self.infer_private_regex()?,
            access: self.access.clone(),
            sort_order: self.sort_order,
            lint: self.lint,
            toc: self.toc.clone(),
        })
    }
}
